//! # PCR Core
//!
//! Core logic for prehospital patient care reports (PCRs).
//!
//! This crate contains:
//! - The report model and its JSON/YAML wire format ([`report`])
//! - The pertinent negatives sentence ([`pertinent_negatives`])
//! - Narrative rendering to markdown ([`NarrativeService`])
//! - File-backed persistence of saved and in-progress reports ([`ReportStore`])
//! - Narrative export to `PCR_<id>_<date>.md` files ([`export`])
//!
//! **No UI concerns**: argument parsing, logging setup and terminal output belong in the `pcr`
//! binary. Configuration is resolved once by the caller and passed in as [`CoreConfig`].

pub mod choices;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod id;
pub mod narrative;
pub mod pertinent_negatives;
pub mod report;
pub mod store;
pub mod validation;
pub mod wire;

pub use pcr_types::{is_present, NonEmptyText, TextError};

pub use choices::{
    AllergyType, InformationSource, LevelOfConsciousness, MedicationType, PatientPosition,
    Priority, TransportMode,
};
pub use config::CoreConfig;
pub use error::{PcrError, PcrResult};
pub use id::ReportId;
pub use narrative::NarrativeService;
pub use pertinent_negatives::DeniedSymptom;
pub use report::{
    Assessment, AssessmentNotes, ChiefComplaint, DispatchInfo, DocumentFormat, PatientHistory,
    PertinentNegatives, Report, SectionKind, SectionUpdate, Transport, Treatment, VitalSigns,
};
pub use store::ReportStore;
