//! Patient care report domain model.
//!
//! A [`Report`] is the record a crew fills in while documenting a call. It is partial by
//! nature: every section is optional and every field may be blank. The narrative generator
//! reads it; the [`ReportStore`](crate::store::ReportStore) owns and persists it.
//!
//! Wire format is the JSON the form app writes: camelCase keys, with the pertinent negatives
//! flattened into the history object under their `pn_*` keys. Missing keys load as blank and
//! unknown keys are ignored.

use crate::choices::{
    AllergyType, InformationSource, LevelOfConsciousness, MedicationType, PatientPosition,
    Priority, TransportMode,
};
use crate::constants::{INCIDENT_NUMBER_FORMAT, UNRECORDED_VITAL};
use crate::id::ReportId;
use crate::wire::{blank_as_default, blank_as_none, parse_json, parse_yaml};
use crate::{PcrError, PcrResult};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use pcr_types::is_present;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A patient care report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ReportId>,

    /// ISO 8601 creation timestamp, kept as written.
    pub created_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chief_complaint: Option<ChiefComplaint>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<PatientHistory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_notes: Option<AssessmentNotes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchInfo {
    /// ISO 8601 date/time of the call; localized at render time.
    pub date_time: String,
    pub unit_number: String,
    pub incident_number: String,
    pub location: String,
    pub nature_of_call: String,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

/// OPQRST-style description of the presenting complaint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChiefComplaint {
    pub complaint: String,
    pub onset: String,
    pub duration: String,
    /// Expected 1-10, stored and rendered as typed.
    pub severity: String,
    pub quality: String,
    pub radiation: String,
    pub associated_symptoms: String,
    pub aggravating_factors: String,
    pub alleviating_factors: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientHistory {
    pub age: String,
    pub gender: String,
    pub allergies: String,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub allergy_type: Option<AllergyType>,
    pub medications: String,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub medication_type: Option<MedicationType>,
    pub past_medical_history: String,
    pub last_oral_intake: String,
    /// Events leading to the injury or illness.
    pub events: String,
    #[serde(flatten)]
    pub pertinent_negatives: PertinentNegatives,
}

/// Symptoms asked about and denied, plus who answered.
///
/// The ten flags are independent; the order they are reported in is fixed by
/// [`DeniedSymptom::ALL`](crate::pertinent_negatives::DeniedSymptom::ALL), never by the order
/// they were ticked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PertinentNegatives {
    #[serde(rename = "pn_source", deserialize_with = "blank_as_default")]
    pub source: InformationSource,
    #[serde(rename = "pn_unobtainable")]
    pub unobtainable: bool,
    #[serde(rename = "pn_unobtainable_reason")]
    pub unobtainable_reason: String,
    #[serde(rename = "pn_chest_pain")]
    pub chest_pain: bool,
    #[serde(rename = "pn_sob")]
    pub shortness_of_breath: bool,
    #[serde(rename = "pn_head_pain")]
    pub head_pain: bool,
    #[serde(rename = "pn_neck_pain")]
    pub neck_pain: bool,
    #[serde(rename = "pn_back_pain")]
    pub back_pain: bool,
    #[serde(rename = "pn_weakness")]
    pub weakness: bool,
    #[serde(rename = "pn_dizziness")]
    pub dizziness: bool,
    #[serde(rename = "pn_nausea")]
    pub nausea: bool,
    #[serde(rename = "pn_vomiting")]
    pub vomiting: bool,
    #[serde(rename = "pn_diarrhea")]
    pub diarrhea: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentNotes {
    pub general_impression: String,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub level_of_consciousness: Option<LevelOfConsciousness>,
    pub airway: String,
    pub breathing: String,
    pub circulation: String,
    pub skin_condition: String,
    pub pupils: String,
    pub additional_findings: String,
}

/// One time-stamped set of vital signs. Readings are free text as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalSigns {
    pub time: String,
    pub blood_pressure: String,
    pub pulse: String,
    pub respirations: String,
    #[serde(rename = "spO2")]
    pub sp_o2: String,
    pub temperature: String,
    pub blood_glucose: String,
    /// Glasgow Coma Scale.
    pub gcs: String,
    pub pain_scale: String,
}

impl VitalSigns {
    /// Prepares a vitals set captured on the form for appending.
    ///
    /// At least one of blood pressure, pulse or respirations must be recorded, otherwise
    /// `None` is returned. The set is stamped with `time` and every blank reading is filled
    /// with "within normal limits".
    pub fn with_unrecorded_defaults(self, time: impl Into<String>) -> Option<Self> {
        if !is_present(&self.blood_pressure)
            && !is_present(&self.pulse)
            && !is_present(&self.respirations)
        {
            return None;
        }

        fn or_unrecorded(value: String) -> String {
            if is_present(&value) {
                value
            } else {
                UNRECORDED_VITAL.to_string()
            }
        }

        Some(Self {
            time: time.into(),
            blood_pressure: or_unrecorded(self.blood_pressure),
            pulse: or_unrecorded(self.pulse),
            respirations: or_unrecorded(self.respirations),
            sp_o2: or_unrecorded(self.sp_o2),
            temperature: or_unrecorded(self.temperature),
            blood_glucose: or_unrecorded(self.blood_glucose),
            gcs: or_unrecorded(self.gcs),
            pain_scale: or_unrecorded(self.pain_scale),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assessment {
    /// Append-only; rendered in the order recorded.
    pub vital_signs: Vec<VitalSigns>,
    pub physical_exam: String,
    pub working_diagnosis: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Treatment {
    pub interventions: Vec<String>,
    pub medications: Vec<String>,
    pub procedures: Vec<String>,
    pub response: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transport {
    pub destination: String,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub transport_mode: Option<TransportMode>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<PatientPosition>,
    pub changes_during_transport: String,
    pub transfer_of_care: String,
    pub receiving_provider: String,
}

impl Report {
    /// Starts a fresh report at `now`.
    ///
    /// All seven sections are present and blank, except for the values a crew never types
    /// by hand: dispatch date/time, the unit, and an incident number derived from `now`.
    /// Pertinent negatives default to the patient as source.
    pub fn new_at<Tz>(now: DateTime<Tz>, unit_number: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let iso = now
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            id: Some(ReportId::generate()),
            created_at: iso.clone(),
            dispatch: Some(DispatchInfo {
                date_time: iso,
                unit_number: unit_number.to_string(),
                incident_number: now.format(INCIDENT_NUMBER_FORMAT).to_string(),
                ..DispatchInfo::default()
            }),
            chief_complaint: Some(ChiefComplaint::default()),
            history: Some(PatientHistory::default()),
            assessment_notes: Some(AssessmentNotes::default()),
            assessment: Some(Assessment::default()),
            treatment: Some(Treatment::default()),
            transport: Some(Transport::default()),
        }
    }

    /// Parse a report from JSON text.
    pub fn from_json_str(text: &str) -> PcrResult<Self> {
        parse_json(text)
    }

    /// Parse a report from YAML text.
    pub fn from_yaml_str(text: &str) -> PcrResult<Self> {
        parse_yaml(text)
    }

    /// Serialise the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> PcrResult<String> {
        serde_json::to_string_pretty(self).map_err(PcrError::Serialization)
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().map(ReportId::as_str)
    }

    /// Replaces one section wholesale.
    pub fn apply(&mut self, update: SectionUpdate) {
        match update {
            SectionUpdate::Dispatch(s) => self.dispatch = Some(s),
            SectionUpdate::ChiefComplaint(s) => self.chief_complaint = Some(s),
            SectionUpdate::History(s) => self.history = Some(s),
            SectionUpdate::AssessmentNotes(s) => self.assessment_notes = Some(s),
            SectionUpdate::Assessment(s) => self.assessment = Some(s),
            SectionUpdate::Treatment(s) => self.treatment = Some(s),
            SectionUpdate::Transport(s) => self.transport = Some(s),
        }
    }
}

/// The seven report sections, in narrative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Dispatch,
    ChiefComplaint,
    History,
    AssessmentNotes,
    Assessment,
    Treatment,
    Transport,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Dispatch,
        SectionKind::ChiefComplaint,
        SectionKind::History,
        SectionKind::AssessmentNotes,
        SectionKind::Assessment,
        SectionKind::Treatment,
        SectionKind::Transport,
    ];

    /// Heading used for the section's block in the narrative.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Dispatch => "DISPATCH",
            SectionKind::ChiefComplaint => "CHIEF COMPLAINT",
            SectionKind::History => "PATIENT HISTORY",
            SectionKind::AssessmentNotes => "ASSESSMENT NOTES",
            SectionKind::Assessment => "ASSESSMENT",
            SectionKind::Treatment => "TREATMENT",
            SectionKind::Transport => "TRANSPORT",
        }
    }

    /// Kebab-case name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Dispatch => "dispatch",
            SectionKind::ChiefComplaint => "chief-complaint",
            SectionKind::History => "history",
            SectionKind::AssessmentNotes => "assessment-notes",
            SectionKind::Assessment => "assessment",
            SectionKind::Treatment => "treatment",
            SectionKind::Transport => "transport",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = PcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PcrError::UnknownSection(s.to_string()))
    }
}

/// A replacement value for one section of a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionUpdate {
    Dispatch(DispatchInfo),
    ChiefComplaint(ChiefComplaint),
    History(PatientHistory),
    AssessmentNotes(AssessmentNotes),
    Assessment(Assessment),
    Treatment(Treatment),
    Transport(Transport),
}

/// Text format of a section or report document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks YAML for `.yaml`/`.yml` paths and JSON for everything else.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, text: &str) -> PcrResult<T> {
        match self {
            DocumentFormat::Json => parse_json(text),
            DocumentFormat::Yaml => parse_yaml(text),
        }
    }

    /// Parse a whole report.
    pub fn parse_report(&self, text: &str) -> PcrResult<Report> {
        self.parse(text)
    }
}

impl SectionUpdate {
    /// Parse the body of one section.
    pub fn parse(kind: SectionKind, format: DocumentFormat, text: &str) -> PcrResult<Self> {
        Ok(match kind {
            SectionKind::Dispatch => SectionUpdate::Dispatch(format.parse(text)?),
            SectionKind::ChiefComplaint => SectionUpdate::ChiefComplaint(format.parse(text)?),
            SectionKind::History => SectionUpdate::History(format.parse(text)?),
            SectionKind::AssessmentNotes => SectionUpdate::AssessmentNotes(format.parse(text)?),
            SectionKind::Assessment => SectionUpdate::Assessment(format.parse(text)?),
            SectionKind::Treatment => SectionUpdate::Treatment(format.parse(text)?),
            SectionKind::Transport => SectionUpdate::Transport(format.parse(text)?),
        })
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            SectionUpdate::Dispatch(_) => SectionKind::Dispatch,
            SectionUpdate::ChiefComplaint(_) => SectionKind::ChiefComplaint,
            SectionUpdate::History(_) => SectionKind::History,
            SectionUpdate::AssessmentNotes(_) => SectionKind::AssessmentNotes,
            SectionUpdate::Assessment(_) => SectionKind::Assessment,
            SectionUpdate::Treatment(_) => SectionKind::Treatment,
            SectionUpdate::Transport(_) => SectionKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const FORM_APP_RECORD: &str = r#"{
        "id": "1718028309123",
        "createdAt": "2024-06-10T14:05:09.123Z",
        "dispatch": {
            "dateTime": "2024-06-10T14:05:09.123Z",
            "unitNumber": "112",
            "incidentNumber": "2024-06-10 14:05",
            "location": "",
            "natureOfCall": "Chest pain",
            "priority": "Level 1",
            "dispatchTime": "14:03"
        },
        "history": {
            "age": "67",
            "gender": "Male",
            "allergies": "NKDA",
            "allergyType": "nkda",
            "medications": "",
            "pn_source": "Spouse/Guardian",
            "pn_unobtainable": false,
            "pn_unobtainable_reason": "",
            "pn_chest_pain": false,
            "pn_sob": true
        },
        "assessment": {
            "vitalSigns": [
                { "time": "2:10:00 PM", "bloodPressure": "150/90", "spO2": "94%" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_form_app_record() {
        let report = Report::from_json_str(FORM_APP_RECORD).unwrap();

        assert_eq!(report.id_str(), Some("1718028309123"));
        let dispatch = report.dispatch.as_ref().unwrap();
        assert_eq!(dispatch.priority, Some(Priority::Level1));
        assert_eq!(dispatch.location, "");

        let history = report.history.as_ref().unwrap();
        assert_eq!(history.allergy_type, Some(AllergyType::Nkda));
        assert_eq!(
            history.pertinent_negatives.source,
            InformationSource::SpouseGuardian
        );
        assert!(history.pertinent_negatives.shortness_of_breath);
        assert!(!history.pertinent_negatives.chest_pain);
        assert!(!history.pertinent_negatives.diarrhea);

        let vitals = &report.assessment.as_ref().unwrap().vital_signs;
        assert_eq!(vitals.len(), 1);
        assert_eq!(vitals[0].sp_o2, "94%");
        assert_eq!(vitals[0].pulse, "");

        assert!(report.chief_complaint.is_none());
        assert!(report.transport.is_none());
    }

    #[test]
    fn test_blank_choices_load_as_absent() {
        let report = Report::from_json_str(
            r#"{ "dispatch": { "priority": "" }, "history": { "pn_source": "" },
                 "transport": { "transportMode": "  ", "position": null } }"#,
        )
        .unwrap();

        assert_eq!(report.dispatch.unwrap().priority, None);
        assert_eq!(
            report.history.unwrap().pertinent_negatives.source,
            InformationSource::Patient
        );
        let transport = report.transport.unwrap();
        assert_eq!(transport.transport_mode, None);
        assert_eq!(transport.position, None);
        assert!(report.id.is_none());
    }

    #[test]
    fn test_serialise_keeps_wire_names() {
        let mut history = PatientHistory::default();
        history.pertinent_negatives.shortness_of_breath = true;
        let report = Report {
            history: Some(history),
            ..Report::default()
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["history"]["pn_sob"], serde_json::json!(true));
        assert_eq!(value["history"]["pn_source"], serde_json::json!("Patient"));
        assert_eq!(value["history"]["pastMedicalHistory"], serde_json::json!(""));
        assert!(value.get("dispatch").is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_report() {
        let report = Report::from_json_str(FORM_APP_RECORD).unwrap();
        let text = report.to_json_pretty().unwrap();
        assert_eq!(Report::from_json_str(&text).unwrap(), report);
    }

    #[test]
    fn test_invalid_json_reports_field_path() {
        let err = Report::from_json_str(r#"{ "assessment": { "vitalSigns": [{ "pulse": 88 }] } }"#)
            .unwrap_err();
        match err {
            PcrError::Deserialization { path, .. } => {
                assert!(path.starts_with("assessment.vitalSigns"));
                assert!(path.ends_with("pulse"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_yaml_report() {
        let yaml = "id: abc\nchiefComplaint:\n  complaint: chest pain\n  severity: '8'\n";
        let report = Report::from_yaml_str(yaml).unwrap();
        let cc = report.chief_complaint.unwrap();
        assert_eq!(cc.complaint, "chest pain");
        assert_eq!(cc.severity, "8");
    }

    #[test]
    fn test_new_at_prefills_dispatch() {
        let offset = FixedOffset::west_opt(4 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 6, 10, 10, 5, 9).unwrap();

        let report = Report::new_at(now, "112");

        assert!(report.id.is_some());
        assert_eq!(report.created_at, "2024-06-10T14:05:09.000Z");
        let dispatch = report.dispatch.as_ref().unwrap();
        assert_eq!(dispatch.date_time, "2024-06-10T14:05:09.000Z");
        assert_eq!(dispatch.unit_number, "112");
        assert_eq!(dispatch.incident_number, "2024-06-10 10:05");
        assert!(SectionKind::ALL.iter().all(|kind| match kind {
            SectionKind::Dispatch => report.dispatch.is_some(),
            SectionKind::ChiefComplaint => report.chief_complaint.is_some(),
            SectionKind::History => report.history.is_some(),
            SectionKind::AssessmentNotes => report.assessment_notes.is_some(),
            SectionKind::Assessment => report.assessment.is_some(),
            SectionKind::Treatment => report.treatment.is_some(),
            SectionKind::Transport => report.transport.is_some(),
        }));
        assert_eq!(
            report.history.unwrap().pertinent_negatives.source,
            InformationSource::Patient
        );
    }

    #[test]
    fn test_vitals_unrecorded_defaults() {
        let captured = VitalSigns {
            pulse: "88".into(),
            ..VitalSigns::default()
        };
        let vitals = captured.with_unrecorded_defaults("2:10:00 PM").unwrap();
        assert_eq!(vitals.time, "2:10:00 PM");
        assert_eq!(vitals.pulse, "88");
        assert_eq!(vitals.blood_pressure, "within normal limits");
        assert_eq!(vitals.pain_scale, "within normal limits");

        let only_spo2 = VitalSigns {
            sp_o2: "98%".into(),
            ..VitalSigns::default()
        };
        assert!(only_spo2.with_unrecorded_defaults("2:15:00 PM").is_none());
    }

    #[test]
    fn test_section_kind_names_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.name().parse::<SectionKind>().unwrap(), kind);
        }
        assert!(matches!(
            "vitals".parse::<SectionKind>(),
            Err(PcrError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_section_update_replaces_wholesale() {
        let mut report = Report {
            transport: Some(Transport {
                destination: "Corewell Butterworth".into(),
                receiving_provider: "RN Jones".into(),
                ..Transport::default()
            }),
            ..Report::default()
        };

        let update = SectionUpdate::parse(
            SectionKind::Transport,
            DocumentFormat::Yaml,
            "destination: Holland Community Hospital\ntransportMode: Priority 2\n",
        )
        .unwrap();
        assert_eq!(update.kind(), SectionKind::Transport);
        report.apply(update);

        let transport = report.transport.unwrap();
        assert_eq!(transport.destination, "Holland Community Hospital");
        assert_eq!(transport.transport_mode, Some(TransportMode::Priority2));
        assert_eq!(transport.receiving_provider, "");
    }

    #[test]
    fn test_document_format_from_path() {
        use std::path::Path;
        assert_eq!(
            DocumentFormat::from_path(Path::new("cc.yml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("report.json")),
            DocumentFormat::Json
        );
        assert_eq!(DocumentFormat::from_path(Path::new("notes")), DocumentFormat::Json);
    }
}
