//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! while a report is being edited or rendered.

use crate::constants::{
    CURRENT_REPORT_FILENAME, DEFAULT_DATA_DIR, DEFAULT_UNIT_NUMBER, REPORTS_FILENAME,
};
use crate::{NonEmptyText, PcrError, PcrResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    default_unit: NonEmptyText,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PcrError::InvalidInput` if `default_unit` is blank.
    pub fn new(data_dir: PathBuf, default_unit: impl AsRef<str>) -> PcrResult<Self> {
        let default_unit = NonEmptyText::new(default_unit)
            .map_err(|_| PcrError::InvalidInput("default_unit cannot be empty".into()))?;

        Ok(Self {
            data_dir,
            default_unit,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn reports_file(&self) -> PathBuf {
        self.data_dir.join(REPORTS_FILENAME)
    }

    pub fn current_report_file(&self) -> PathBuf {
        self.data_dir.join(CURRENT_REPORT_FILENAME)
    }

    /// Unit identifier pre-filled on new reports.
    pub fn default_unit(&self) -> &str {
        self.default_unit.as_str()
    }
}

/// Resolve the data directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolve the default unit identifier from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_UNIT_NUMBER`].
pub fn default_unit_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_UNIT_NUMBER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_paths() {
        let cfg = CoreConfig::new(PathBuf::from("/tmp/pcr"), "Medic 7").unwrap();
        assert_eq!(cfg.reports_file(), PathBuf::from("/tmp/pcr/reports.json"));
        assert_eq!(
            cfg.current_report_file(),
            PathBuf::from("/tmp/pcr/current_report.json")
        );
        assert_eq!(cfg.default_unit(), "Medic 7");
    }

    #[test]
    fn test_core_config_rejects_blank_unit() {
        let result = CoreConfig::new(PathBuf::from("/tmp/pcr"), "   ");
        assert!(matches!(result, Err(PcrError::InvalidInput(_))));
    }

    #[test]
    fn test_env_values_fall_back_to_defaults() {
        assert_eq!(data_dir_from_env_value(None), PathBuf::from("pcr_data"));
        assert_eq!(
            data_dir_from_env_value(Some("  ".into())),
            PathBuf::from("pcr_data")
        );
        assert_eq!(
            data_dir_from_env_value(Some(" /var/pcr ".into())),
            PathBuf::from("/var/pcr")
        );
        assert_eq!(default_unit_from_env_value(None), "112");
        assert_eq!(default_unit_from_env_value(Some("Rescue 4".into())), "Rescue 4");
    }
}
