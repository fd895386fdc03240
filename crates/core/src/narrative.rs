//! Narrative generation for patient care reports.
//!
//! Renders a [`Report`] into a markdown document for handoff and documentation. Rendering is
//! total: blank fields are omitted, absent sections are skipped, and nothing is validated or
//! rewritten. Free text goes into the document verbatim.
//!
//! Document layout:
//! ```markdown
//! # PCR NARRATIVE REPORT
//!
//! **Generated:** 6/10/2024, 2:30:00 PM
//! **Report ID:** <id>
//!
//! ---
//!
//! ## DISPATCH
//! **Unit:** 112
//!
//! ## CHIEF COMPLAINT
//! Patient presents with chest pain.
//!
//! ---
//!
//! *This narrative was generated from PCR form data and should be reviewed for accuracy and completeness.*
//! ```
//!
//! Each section present on the report contributes its heading, its body lines and a blank
//! line, in the fixed order of [`SectionKind::ALL`].

use crate::constants::{
    DISPLAY_DATETIME_FORMAT, MISSING_REPORT_ID, NARRATIVE_DISCLAIMER, NARRATIVE_TITLE,
    VITALS_TIME_FALLBACK,
};
use crate::pertinent_negatives;
use crate::report::{
    Assessment, AssessmentNotes, ChiefComplaint, DispatchInfo, PatientHistory, Report,
    SectionKind, Transport, Treatment, VitalSigns,
};
use chrono::{DateTime, Local, TimeZone};
use pcr_types::is_present;
use std::fmt::Display;

/// Service rendering reports into narrative markdown.
#[derive(Debug, Clone, Default)]
pub struct NarrativeService;

impl NarrativeService {
    /// Creates a new `NarrativeService` instance.
    pub fn new() -> Self {
        Self
    }

    /// Renders the narrative, stamping it with the current local time.
    pub fn render(&self, report: &Report) -> String {
        self.render_at(report, Local::now())
    }

    /// Renders the narrative as generated at `generated_at`.
    ///
    /// The instant only feeds the header's "Generated" line. Its timezone is also used to
    /// localize the dispatch date/time, with the rules in force at the dispatch instant.
    /// Section content depends on the report and the timezone alone.
    pub fn render_at<Tz>(&self, report: &Report, generated_at: DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let tz = generated_at.timezone();

        let mut lines: Vec<String> = Vec::new();

        lines.push(NARRATIVE_TITLE.to_string());
        lines.push(format!(
            "\n**Generated:** {}",
            generated_at.format(DISPLAY_DATETIME_FORMAT)
        ));
        lines.push(format!(
            "**Report ID:** {}\n",
            report.id_str().unwrap_or(MISSING_REPORT_ID)
        ));
        lines.push("---\n".to_string());

        for kind in SectionKind::ALL {
            let body = match kind {
                SectionKind::Dispatch => report.dispatch.as_ref().map(|d| dispatch_lines(d, &tz)),
                SectionKind::ChiefComplaint => {
                    report.chief_complaint.as_ref().map(chief_complaint_lines)
                }
                SectionKind::History => report.history.as_ref().map(history_lines),
                SectionKind::AssessmentNotes => {
                    report.assessment_notes.as_ref().map(assessment_notes_lines)
                }
                SectionKind::Assessment => report.assessment.as_ref().map(assessment_lines),
                SectionKind::Treatment => report.treatment.as_ref().map(treatment_lines),
                SectionKind::Transport => report.transport.as_ref().map(transport_lines),
            };

            if let Some(body) = body {
                lines.push(format!("## {}", kind.heading()));
                lines.extend(body);
                lines.push(String::new());
            }
        }

        lines.push("---".to_string());
        lines.push(format!("\n{}", NARRATIVE_DISCLAIMER));

        let narrative = lines.join("\n");
        tracing::debug!(
            report_id = report.id_str().unwrap_or(MISSING_REPORT_ID),
            len = narrative.len(),
            "rendered narrative"
        );
        narrative
    }
}

/// `**Label:** value`, or nothing when the value is blank.
fn labelled(lines: &mut Vec<String>, label: &str, value: &str) {
    if is_present(value) {
        lines.push(format!("**{}:** {}", label, value));
    }
}

/// Localizes an RFC 3339 timestamp; anything else is shown as written.
fn localized<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format(DISPLAY_DATETIME_FORMAT)
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn dispatch_lines<Tz>(d: &DispatchInfo, tz: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();
    if is_present(&d.date_time) {
        lines.push(format!("**Date/Time:** {}", localized(&d.date_time, tz)));
    }
    labelled(&mut lines, "Unit", &d.unit_number);
    labelled(&mut lines, "Incident #", &d.incident_number);
    labelled(&mut lines, "Location", &d.location);
    labelled(&mut lines, "Nature of Call", &d.nature_of_call);
    if let Some(priority) = &d.priority {
        labelled(&mut lines, "Priority", priority.as_str());
    }
    lines
}

/// The chief complaint reads as prose rather than a field list.
///
/// The presenting sentence gathers complaint, onset, duration and severity; quality and
/// radiation form a second sentence; associated, aggravating and alleviating factors follow
/// as one sentence each. Nothing is rendered without a complaint.
fn chief_complaint_lines(cc: &ChiefComplaint) -> Vec<String> {
    if !is_present(&cc.complaint) {
        return Vec::new();
    }

    let mut presenting = vec![format!("Patient presents with {}", cc.complaint)];
    if is_present(&cc.onset) {
        presenting.push(format!("with onset {}", cc.onset));
    }
    if is_present(&cc.duration) {
        presenting.push(format!("lasting {}", cc.duration));
    }
    if is_present(&cc.severity) {
        presenting.push(format!("rated {}/10 in severity", cc.severity));
    }

    let mut sentences = vec![presenting.join(", ")];

    let mut details = Vec::new();
    if is_present(&cc.quality) {
        details.push(format!("described as {}", cc.quality));
    }
    if is_present(&cc.radiation) {
        details.push(format!("radiating to {}", cc.radiation));
    }
    if !details.is_empty() {
        sentences.push(details.join(", "));
    }

    if is_present(&cc.associated_symptoms) {
        sentences.push(format!(
            "Associated symptoms include: {}",
            cc.associated_symptoms
        ));
    }
    if is_present(&cc.aggravating_factors) {
        sentences.push(format!("Aggravated by: {}", cc.aggravating_factors));
    }
    if is_present(&cc.alleviating_factors) {
        sentences.push(format!("Alleviated by: {}", cc.alleviating_factors));
    }

    vec![format!("{}.", sentences.join(". "))]
}

fn history_lines(h: &PatientHistory) -> Vec<String> {
    let mut lines = Vec::new();

    let mut demographics = Vec::new();
    if is_present(&h.age) {
        demographics.push(format!("{} year old", h.age));
    }
    if is_present(&h.gender) {
        demographics.push(h.gender.clone());
    }
    if !demographics.is_empty() {
        lines.push(format!("**Demographics:** {}", demographics.join(" ")));
    }

    // NKDA / See Med List / None are display defaults only; the record keeps its blank field.
    let allergy_default = h.allergy_type.as_ref().and_then(|t| t.display_default());
    labelled(
        &mut lines,
        "Allergies",
        with_display_default(&h.allergies, allergy_default),
    );
    let medication_default = h.medication_type.as_ref().and_then(|t| t.display_default());
    labelled(
        &mut lines,
        "Medications",
        with_display_default(&h.medications, medication_default),
    );

    labelled(&mut lines, "PMH", &h.past_medical_history);
    labelled(&mut lines, "Last Oral Intake", &h.last_oral_intake);
    labelled(&mut lines, "Events", &h.events);

    let sentence = pertinent_negatives::compose(h);
    if is_present(&sentence) {
        lines.push(sentence);
    }

    lines
}

fn with_display_default<'a>(value: &'a str, default: Option<&'static str>) -> &'a str {
    match default {
        Some(default) if !is_present(value) => default,
        _ => value,
    }
}

fn assessment_notes_lines(an: &AssessmentNotes) -> Vec<String> {
    let mut lines = Vec::new();
    labelled(&mut lines, "General Impression", &an.general_impression);
    if let Some(loc) = &an.level_of_consciousness {
        labelled(&mut lines, "LOC", loc.as_str());
    }

    let primary: Vec<String> = [
        ("Airway", &an.airway),
        ("Breathing", &an.breathing),
        ("Circulation", &an.circulation),
    ]
    .into_iter()
    .filter(|(_, value)| is_present(value))
    .map(|(label, value)| format!("{}: {}", label, value))
    .collect();
    if !primary.is_empty() {
        lines.push(format!("**Primary Assessment:** {}", primary.join(", ")));
    }

    labelled(&mut lines, "Skin", &an.skin_condition);
    labelled(&mut lines, "Pupils", &an.pupils);
    labelled(&mut lines, "Additional Findings", &an.additional_findings);
    lines
}

fn assessment_lines(a: &Assessment) -> Vec<String> {
    let mut lines = Vec::new();

    if !a.vital_signs.is_empty() {
        lines.push("### Vital Signs".to_string());
        for (index, vitals) in a.vital_signs.iter().enumerate() {
            vitals_set_lines(&mut lines, index + 1, vitals);
        }
        lines.push(String::new());
    }

    labelled(&mut lines, "Physical Exam", &a.physical_exam);
    labelled(&mut lines, "Working Diagnosis", &a.working_diagnosis);
    lines
}

fn vitals_set_lines(lines: &mut Vec<String>, number: usize, vs: &VitalSigns) {
    let time = if is_present(&vs.time) {
        vs.time.as_str()
    } else {
        VITALS_TIME_FALLBACK
    };
    lines.push(format!("\n**Set {} ({})**", number, time));

    let readings = [
        ("BP", &vs.blood_pressure),
        ("Pulse", &vs.pulse),
        ("Resp", &vs.respirations),
        ("SpO2", &vs.sp_o2),
        ("Temp", &vs.temperature),
        ("BGL", &vs.blood_glucose),
        ("GCS", &vs.gcs),
    ];
    for (label, value) in readings {
        if is_present(value) {
            lines.push(format!("- {}: {}", label, value));
        }
    }
    if is_present(&vs.pain_scale) {
        lines.push(format!("- Pain: {}/10", vs.pain_scale));
    }
}

fn treatment_lines(t: &Treatment) -> Vec<String> {
    let mut lines = Vec::new();

    let lists = [
        ("Interventions", &t.interventions),
        ("Medications", &t.medications),
        ("Procedures", &t.procedures),
    ];
    for (position, (label, items)) in lists.into_iter().enumerate() {
        if items.is_empty() {
            continue;
        }
        // Later lists are set off by a blank line.
        let lead = if position == 0 { "" } else { "\n" };
        lines.push(format!("{}**{}:**", lead, label));
        lines.extend(items.iter().map(|item| format!("- {}", item)));
    }

    if is_present(&t.response) {
        lines.push(format!("\n**Patient Response:** {}", t.response));
    }
    lines
}

fn transport_lines(t: &Transport) -> Vec<String> {
    let mut lines = Vec::new();
    labelled(&mut lines, "Destination", &t.destination);
    if let Some(mode) = &t.transport_mode {
        labelled(&mut lines, "Mode", mode.as_str());
    }
    if let Some(position) = &t.position {
        labelled(&mut lines, "Position", position.as_str());
    }
    labelled(&mut lines, "Changes During Transport", &t.changes_during_transport);
    labelled(&mut lines, "Transfer of Care", &t.transfer_of_care);
    labelled(&mut lines, "Receiving Provider", &t.receiving_provider);
    lines
}
