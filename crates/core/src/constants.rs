//! Constants used throughout the PCR core crate.
//!
//! File names, display literals and defaults live here so the store, the narrative generator
//! and the CLI agree on them.

/// Default directory for report storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "pcr_data";

/// Unit identifier pre-filled on every new report unless configured otherwise.
pub const DEFAULT_UNIT_NUMBER: &str = "112";

/// Filename for the list of completed reports.
pub const REPORTS_FILENAME: &str = "reports.json";

/// Filename for the in-progress report slot.
pub const CURRENT_REPORT_FILENAME: &str = "current_report.json";

/// Title line of every generated narrative.
pub const NARRATIVE_TITLE: &str = "# PCR NARRATIVE REPORT";

/// Closing line of every generated narrative.
pub const NARRATIVE_DISCLAIMER: &str =
    "*This narrative was generated from PCR form data and should be reviewed for accuracy and completeness.*";

/// Shown in the header when a report has no identifier.
pub const MISSING_REPORT_ID: &str = "N/A";

/// Subheading fallback for a vitals set without a recorded time.
pub const VITALS_TIME_FALLBACK: &str = "Time not recorded";

/// Filled into blank readings of a vitals set appended from the CLI.
pub const UNRECORDED_VITAL: &str = "within normal limits";

/// Localized date/time layout, e.g. `6/10/2024, 2:05:09 PM`.
pub const DISPLAY_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Layout of the pre-filled incident number, e.g. `2024-06-10 14:05`.
pub const INCIDENT_NUMBER_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Prefix of exported narrative files.
pub const EXPORT_FILE_PREFIX: &str = "PCR";

/// Extension of exported narrative files.
pub const EXPORT_FILE_EXTENSION: &str = "md";
