//! Report persistence.
//!
//! The store owns two documents under the configured data directory:
//!
//! ```text
//! <data_dir>/
//!   reports.json          # saved reports, in the order they were saved
//!   current_report.json   # the report being filled in
//! ```
//!
//! Every mutation is written through immediately. Documents are written to a sibling temp file
//! and renamed into place, so a crash mid-write leaves the previous version intact. If a write
//! fails the error is returned and the caller can retry: edits to the in-progress report are
//! kept in memory, and the saved list only changes once its new version is on disk.

use crate::config::CoreConfig;
use crate::id::ReportId;
use crate::report::{
    Assessment, AssessmentNotes, ChiefComplaint, DispatchInfo, PatientHistory, Report,
    SectionUpdate, Transport, Treatment, VitalSigns,
};
use crate::wire::parse_json;
use crate::{PcrError, PcrResult};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Saved reports plus the in-progress report, backed by JSON files.
#[derive(Debug)]
pub struct ReportStore {
    cfg: Arc<CoreConfig>,
    reports: Vec<Report>,
    current: Report,
}

impl ReportStore {
    /// Opens the store, creating the data directory if needed.
    ///
    /// A missing document means "no saved reports" or "start a fresh report".
    ///
    /// # Errors
    ///
    /// Returns `PcrError::Deserialization` with the failing field's path if either document
    /// is corrupt; corrupt documents are never silently replaced.
    pub fn open(cfg: Arc<CoreConfig>) -> PcrResult<Self> {
        fs::create_dir_all(cfg.data_dir()).map_err(PcrError::StorageDirCreation)?;

        let reports: Vec<Report> = load_json(&cfg.reports_file())?.unwrap_or_default();
        let current = match load_json(&cfg.current_report_file())? {
            Some(report) => report,
            None => fresh_report(&cfg),
        };

        tracing::debug!(
            data_dir = %cfg.data_dir().display(),
            saved = reports.len(),
            "opened report store"
        );

        Ok(Self {
            cfg,
            reports,
            current,
        })
    }

    pub fn current(&self) -> &Report {
        &self.current
    }

    /// Copy of the in-progress report, for handing to the narrative generator.
    pub fn snapshot(&self) -> Report {
        self.current.clone()
    }

    /// Saved reports, oldest first.
    pub fn list(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| r.id.as_ref() == Some(id))
    }

    pub fn update_dispatch(&mut self, section: DispatchInfo) -> PcrResult<()> {
        self.update_section(SectionUpdate::Dispatch(section))
    }

    pub fn update_chief_complaint(&mut self, section: ChiefComplaint) -> PcrResult<()> {
        self.update_section(SectionUpdate::ChiefComplaint(section))
    }

    pub fn update_history(&mut self, section: PatientHistory) -> PcrResult<()> {
        self.update_section(SectionUpdate::History(section))
    }

    pub fn update_assessment_notes(&mut self, section: AssessmentNotes) -> PcrResult<()> {
        self.update_section(SectionUpdate::AssessmentNotes(section))
    }

    pub fn update_assessment(&mut self, section: Assessment) -> PcrResult<()> {
        self.update_section(SectionUpdate::Assessment(section))
    }

    pub fn update_treatment(&mut self, section: Treatment) -> PcrResult<()> {
        self.update_section(SectionUpdate::Treatment(section))
    }

    pub fn update_transport(&mut self, section: Transport) -> PcrResult<()> {
        self.update_section(SectionUpdate::Transport(section))
    }

    /// Replaces one section of the current report wholesale and persists it.
    pub fn update_section(&mut self, update: SectionUpdate) -> PcrResult<()> {
        let kind = update.kind();
        self.current.apply(update);
        tracing::debug!(section = %kind, "updated section");
        self.persist_current()
    }

    /// Appends a vitals set to the current report.
    ///
    /// Sets are kept in the order they were added; the assessment section is created if the
    /// report has none.
    pub fn add_vital_signs(&mut self, vitals: VitalSigns) -> PcrResult<()> {
        self.current
            .assessment
            .get_or_insert_with(Assessment::default)
            .vital_signs
            .push(vitals);
        self.persist_current()
    }

    /// Saves the current report and starts a fresh one.
    ///
    /// A report without an id is given one. Saving a report that was reopened from the list
    /// replaces the saved copy in place. If the list cannot be written, the list is untouched
    /// and the current report stays in place, so the save can be retried.
    pub fn save_current(&mut self) -> PcrResult<ReportId> {
        let id = self
            .current
            .id
            .get_or_insert_with(ReportId::generate)
            .clone();

        let mut reports = self.reports.clone();
        match reports.iter_mut().find(|r| r.id.as_ref() == Some(&id)) {
            Some(existing) => *existing = self.current.clone(),
            None => reports.push(self.current.clone()),
        }
        write_json(&self.cfg.reports_file(), &reports)?;
        self.reports = reports;

        self.current = fresh_report(&self.cfg);
        self.persist_current()?;
        tracing::info!(report_id = %id, "saved report");
        Ok(id)
    }

    /// Discards the current report and starts a fresh one.
    pub fn clear_current(&mut self) -> PcrResult<()> {
        self.current = fresh_report(&self.cfg);
        self.persist_current()?;
        tracing::info!(report_id = self.current.id_str(), "started fresh report");
        Ok(())
    }

    /// Copies a saved report into the current slot.
    ///
    /// # Errors
    ///
    /// Returns `PcrError::NotFound` if no saved report has the id.
    pub fn open_report(&mut self, id: &ReportId) -> PcrResult<&Report> {
        let report = self
            .get(id)
            .cloned()
            .ok_or_else(|| PcrError::NotFound(id.to_string()))?;
        self.current = report;
        self.persist_current()?;
        tracing::info!(report_id = %id, "opened saved report");
        Ok(&self.current)
    }

    /// Removes a saved report.
    ///
    /// # Errors
    ///
    /// Returns `PcrError::NotFound` if no saved report has the id.
    pub fn delete_report(&mut self, id: &ReportId) -> PcrResult<Report> {
        let index = self
            .reports
            .iter()
            .position(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| PcrError::NotFound(id.to_string()))?;
        let mut reports = self.reports.clone();
        let removed = reports.remove(index);
        write_json(&self.cfg.reports_file(), &reports)?;
        self.reports = reports;
        tracing::info!(report_id = %id, "deleted report");
        Ok(removed)
    }

    fn persist_current(&self) -> PcrResult<()> {
        write_json(&self.cfg.current_report_file(), &self.current)
    }
}

fn fresh_report(cfg: &CoreConfig) -> Report {
    Report::new_at(Local::now(), cfg.default_unit())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> PcrResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PcrError::FileRead(e)),
    };

    parse_json(&text).map(Some).inspect_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to load report document");
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PcrResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(PcrError::Serialization)?;

    let tmp = path.with_extension("json.tmp");
    let result = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to persist report document");
        PcrError::FileWrite(e)
    })
}
