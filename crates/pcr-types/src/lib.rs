//! Text primitives shared by the PCR crates.
//!
//! Report records are mostly free text captured on a form. Two notions of "text" matter:
//! - identifiers and required values, which must never be blank ([`NonEmptyText`])
//! - optional form fields, which are rendered only when present ([`is_present`])

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Returns `true` when an optional form field holds a value worth rendering.
///
/// Any non-empty string counts, including whitespace-only input. Values are never trimmed or
/// otherwise interpreted; what the user typed is what the narrative shows.
pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Medic 12  ").unwrap();
        assert_eq!(text.as_str(), "Medic 12");
    }

    #[test]
    fn test_non_empty_text_rejects_blank() {
        assert!(NonEmptyText::new("").is_err());
        assert!(NonEmptyText::new(" \t\n").is_err());
    }

    #[test]
    fn test_non_empty_text_deserialize_rejects_blank() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"   \"");
        assert!(result.is_err());

        let ok: NonEmptyText = serde_json::from_str("\"1718000000000\"").unwrap();
        assert_eq!(ok.as_str(), "1718000000000");
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(""));
        assert!(is_present(" "));
        assert!(is_present("chest pain"));
    }
}
