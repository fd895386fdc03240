//! Report identifiers.
//!
//! A report id is opaque: records created by the form app carry a millisecond timestamp
//! (`"1718028309123"`), records created here carry a canonical UUID (32 lowercase hex
//! characters, no hyphens). Both are accepted as-is, surrounding whitespace included; the only
//! requirement is that the id is not blank.

use crate::{PcrError, PcrResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Opaque identifier of a report.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportId(String);

impl ReportId {
    /// Allocates a fresh identifier for a new report.
    ///
    /// This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps an externally supplied identifier without altering it.
    ///
    /// # Errors
    ///
    /// Returns [`PcrError::InvalidInput`] if `input` is empty or whitespace.
    pub fn parse(input: &str) -> PcrResult<Self> {
        if input.trim().is_empty() {
            return Err(PcrError::InvalidInput("report id cannot be empty".into()));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReportId {
    type Error = PcrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReportId> for String {
    fn from(id: ReportId) -> Self {
        id.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportId {
    type Err = PcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_canonical_uuid() {
        let id = ReportId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id
            .as_str()
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(ReportId::generate(), ReportId::generate());
    }

    #[test]
    fn test_parse_accepts_timestamp_ids() {
        let id = ReportId::parse("1718028309123").unwrap();
        assert_eq!(id.to_string(), "1718028309123");
    }

    #[test]
    fn test_parse_keeps_id_verbatim() {
        let id = ReportId::parse(" 1718028309123 ").unwrap();
        assert_eq!(id.as_str(), " 1718028309123 ");

        let loaded: ReportId = serde_json::from_str("\" A-12\"").unwrap();
        assert_eq!(loaded.as_str(), " A-12");
        assert_eq!(serde_json::to_string(&loaded).unwrap(), "\" A-12\"");
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<ReportId>("\"  \"").is_err());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(ReportId::parse("").is_err());
        assert!("  ".parse::<ReportId>().is_err());
    }
}
