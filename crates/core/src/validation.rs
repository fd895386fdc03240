//! Input validation utilities.
//!
//! Report ids are opaque text, but they are embedded into export file names and must not be
//! able to escape the target directory.

use crate::{PcrError, PcrResult};

const MAX_FILE_ID_LEN: usize = 200;

/// Validates that a report id is safe for embedding in a file name.
///
/// Rejects:
/// - blank ids
/// - ids longer than 200 bytes
/// - path separators (`/`, `\`) and `..`
/// - control characters
///
/// # Errors
///
/// Returns `PcrError::InvalidInput` describing the first rule the id breaks.
pub fn validate_report_id_safe_for_file_name(id: &str) -> PcrResult<()> {
    if id.trim().is_empty() {
        return Err(PcrError::InvalidInput("report id cannot be empty".into()));
    }

    if id.len() > MAX_FILE_ID_LEN {
        return Err(PcrError::InvalidInput(format!(
            "report id exceeds maximum length of {} bytes",
            MAX_FILE_ID_LEN
        )));
    }

    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(PcrError::InvalidInput(format!(
            "report id '{}' cannot be used in a file name",
            id
        )));
    }

    if id.chars().any(char::is_control) {
        return Err(PcrError::InvalidInput(
            "report id contains control characters".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_form_and_generated_ids() {
        assert!(validate_report_id_safe_for_file_name("1718028309123").is_ok());
        assert!(validate_report_id_safe_for_file_name("3f1c9a0e2b7d4e6f8a9b0c1d2e3f4a5b").is_ok());
        assert!(validate_report_id_safe_for_file_name("run 12.b").is_ok());
    }

    #[test]
    fn test_rejects_path_escapes() {
        for id in ["../etc", "a/b", "a\\b", "..", "x..y"] {
            let err = validate_report_id_safe_for_file_name(id).unwrap_err();
            assert!(matches!(err, PcrError::InvalidInput(_)), "{id}");
        }
    }

    #[test]
    fn test_rejects_blank_long_and_control() {
        assert!(validate_report_id_safe_for_file_name("   ").is_err());
        assert!(validate_report_id_safe_for_file_name(&"a".repeat(201)).is_err());
        assert!(validate_report_id_safe_for_file_name(&"a".repeat(200)).is_ok());
        assert!(validate_report_id_safe_for_file_name("abc\n").is_err());
    }
}
