//! Serde helpers for the report wire format.
//!
//! Report records arrive as JSON from the form app (or as YAML written by hand). They are
//! frequently partial, so the helpers here are lenient: blank strings load as "absent" and
//! parse failures carry the path of the offending field.

use crate::{PcrError, PcrResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Parse JSON text, reporting the path (e.g. `history.pn_sob`) of the failing field.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> PcrResult<T> {
    let mut de = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut de).map_err(|e| PcrError::Deserialization {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

/// Parse YAML text, reporting the path of the failing field.
pub fn parse_yaml<T: DeserializeOwned>(text: &str) -> PcrResult<T> {
    let de = serde_yaml::Deserializer::from_str(text);
    serde_path_to_error::deserialize(de).map_err(|e| PcrError::YamlDeserialization {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

/// Deserialize an optional string-backed value, treating `null`, missing and blank as `None`.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(text) if !text.trim().is_empty() => text
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize a string-backed value, treating `null` and blank as `T::default()`.
pub(crate) fn blank_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    Ok(blank_as_none(deserializer)?.unwrap_or_default())
}
