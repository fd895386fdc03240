//! Narrative export.
//!
//! A rendered narrative is saved as `PCR_<report id>_<YYYY-MM-DD>.md` so that exports of the
//! same report on different days sit side by side.

use crate::constants::{EXPORT_FILE_EXTENSION, EXPORT_FILE_PREFIX};
use crate::id::ReportId;
use crate::validation::validate_report_id_safe_for_file_name;
use crate::{PcrError, PcrResult};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for a narrative export, e.g. `PCR_1718028309123_2024-06-10.md`.
///
/// # Errors
///
/// Returns `PcrError::InvalidInput` if the id cannot be embedded in a file name.
pub fn export_file_name(id: &ReportId, date: NaiveDate) -> PcrResult<String> {
    validate_report_id_safe_for_file_name(id.as_str())?;
    Ok(format!(
        "{}_{}_{}.{}",
        EXPORT_FILE_PREFIX,
        id,
        date.format("%Y-%m-%d"),
        EXPORT_FILE_EXTENSION
    ))
}

/// Writes `narrative` into `dir`, creating the directory if needed.
///
/// Returns the path of the written file. An existing export with the same name is overwritten.
pub fn write_narrative(
    dir: &Path,
    id: &ReportId,
    date: NaiveDate,
    narrative: &str,
) -> PcrResult<PathBuf> {
    let file_name = export_file_name(id, date)?;
    fs::create_dir_all(dir).map_err(PcrError::StorageDirCreation)?;

    let path = dir.join(file_name);
    fs::write(&path, narrative).map_err(PcrError::FileWrite)?;

    tracing::info!(report_id = %id, path = %path.display(), "exported narrative");
    Ok(path)
}
