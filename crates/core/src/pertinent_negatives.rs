//! Pertinent negatives sentence.
//!
//! Turns the ten "denied symptom" flags of a patient history, plus who answered and whether
//! answers could be obtained at all, into a single sentence for the narrative.
//!
//! Three rules apply, first match wins:
//! 1. Unobtainable: `"Unable to obtain pertinent negatives[ due to <reason>]."`, or, for a
//!    named source with a reason, `"<source> unable to provide pertinent negatives due to
//!    <reason>."`. Denial flags are ignored.
//! 2. Denials: `"Patient denies <list>."` or `"<source> reports patient denies <list>."`, the
//!    list following [`DeniedSymptom::ALL`].
//! 3. Otherwise the sentence is empty and the caller omits the line.

use crate::report::{PatientHistory, PertinentNegatives};
use crate::InformationSource;
use pcr_types::is_present;

/// A symptom that can be documented as denied, in canonical reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeniedSymptom {
    ChestPain,
    ShortnessOfBreath,
    HeadPain,
    NeckPain,
    BackPain,
    Weakness,
    Dizziness,
    Nausea,
    Vomiting,
    Diarrhea,
}

impl DeniedSymptom {
    /// Canonical order. Denials are always listed in this order.
    pub const ALL: [DeniedSymptom; 10] = [
        DeniedSymptom::ChestPain,
        DeniedSymptom::ShortnessOfBreath,
        DeniedSymptom::HeadPain,
        DeniedSymptom::NeckPain,
        DeniedSymptom::BackPain,
        DeniedSymptom::Weakness,
        DeniedSymptom::Dizziness,
        DeniedSymptom::Nausea,
        DeniedSymptom::Vomiting,
        DeniedSymptom::Diarrhea,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DeniedSymptom::ChestPain => "chest pain",
            DeniedSymptom::ShortnessOfBreath => "shortness of breath",
            DeniedSymptom::HeadPain => "head pain",
            DeniedSymptom::NeckPain => "neck pain",
            DeniedSymptom::BackPain => "back pain",
            DeniedSymptom::Weakness => "weakness",
            DeniedSymptom::Dizziness => "dizziness",
            DeniedSymptom::Nausea => "nausea",
            DeniedSymptom::Vomiting => "vomiting",
            DeniedSymptom::Diarrhea => "diarrhea",
        }
    }
}

impl PertinentNegatives {
    pub fn is_denied(&self, symptom: DeniedSymptom) -> bool {
        *self.flag(symptom)
    }

    pub fn set_denied(&mut self, symptom: DeniedSymptom, denied: bool) {
        *self.flag_mut(symptom) = denied;
    }

    /// Denied symptoms in canonical order.
    pub fn denied(&self) -> impl Iterator<Item = DeniedSymptom> + '_ {
        DeniedSymptom::ALL
            .into_iter()
            .filter(move |symptom| self.is_denied(*symptom))
    }

    fn flag(&self, symptom: DeniedSymptom) -> &bool {
        match symptom {
            DeniedSymptom::ChestPain => &self.chest_pain,
            DeniedSymptom::ShortnessOfBreath => &self.shortness_of_breath,
            DeniedSymptom::HeadPain => &self.head_pain,
            DeniedSymptom::NeckPain => &self.neck_pain,
            DeniedSymptom::BackPain => &self.back_pain,
            DeniedSymptom::Weakness => &self.weakness,
            DeniedSymptom::Dizziness => &self.dizziness,
            DeniedSymptom::Nausea => &self.nausea,
            DeniedSymptom::Vomiting => &self.vomiting,
            DeniedSymptom::Diarrhea => &self.diarrhea,
        }
    }

    fn flag_mut(&mut self, symptom: DeniedSymptom) -> &mut bool {
        match symptom {
            DeniedSymptom::ChestPain => &mut self.chest_pain,
            DeniedSymptom::ShortnessOfBreath => &mut self.shortness_of_breath,
            DeniedSymptom::HeadPain => &mut self.head_pain,
            DeniedSymptom::NeckPain => &mut self.neck_pain,
            DeniedSymptom::BackPain => &mut self.back_pain,
            DeniedSymptom::Weakness => &mut self.weakness,
            DeniedSymptom::Dizziness => &mut self.dizziness,
            DeniedSymptom::Nausea => &mut self.nausea,
            DeniedSymptom::Vomiting => &mut self.vomiting,
            DeniedSymptom::Diarrhea => &mut self.diarrhea,
        }
    }
}

/// Composes the pertinent negatives sentence for a patient history.
///
/// Returns an empty string when nothing was documented.
pub fn compose(history: &PatientHistory) -> String {
    let pn = &history.pertinent_negatives;

    if pn.unobtainable {
        return unobtainable_sentence(&pn.source, &pn.unobtainable_reason);
    }

    let denied: Vec<&str> = pn.denied().map(|symptom| symptom.label()).collect();
    if denied.is_empty() {
        return String::new();
    }

    let list = denied.join(", ");
    match &pn.source {
        InformationSource::Patient => format!("Patient denies {}.", list),
        source => format!("{} reports patient denies {}.", source, list),
    }
}

fn unobtainable_sentence(source: &InformationSource, reason: &str) -> String {
    if !is_present(reason) {
        return "Unable to obtain pertinent negatives.".to_string();
    }

    if source.is_impersonal() {
        format!("Unable to obtain pertinent negatives due to {}.", reason)
    } else {
        format!(
            "{} unable to provide pertinent negatives due to {}.",
            source, reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with(pn: PertinentNegatives) -> PatientHistory {
        PatientHistory {
            pertinent_negatives: pn,
            ..PatientHistory::default()
        }
    }

    #[test]
    fn test_patient_denies_in_canonical_order() {
        let pn = PertinentNegatives {
            chest_pain: true,
            shortness_of_breath: true,
            ..PertinentNegatives::default()
        };
        assert_eq!(
            compose(&history_with(pn)),
            "Patient denies chest pain, shortness of breath."
        );
    }

    #[test]
    fn test_named_source_with_reason() {
        let pn = PertinentNegatives {
            source: InformationSource::SpouseGuardian,
            unobtainable: true,
            unobtainable_reason: "AMS".into(),
            ..PertinentNegatives::default()
        };
        assert_eq!(
            compose(&history_with(pn)),
            "Spouse/Guardian unable to provide pertinent negatives due to AMS."
        );
    }

    #[test]
    fn test_unobtainable_without_reason_ignores_source() {
        let sources = [
            InformationSource::Patient,
            InformationSource::SpouseGuardian,
            InformationSource::Police,
            InformationSource::OtherEms,
            InformationSource::StaffFacility,
            InformationSource::Unknown,
            InformationSource::Other("Bystander".into()),
        ];
        for source in sources {
            let pn = PertinentNegatives {
                source,
                unobtainable: true,
                ..PertinentNegatives::default()
            };
            assert_eq!(
                compose(&history_with(pn)),
                "Unable to obtain pertinent negatives."
            );
        }
    }

    #[test]
    fn test_impersonal_sources_with_reason() {
        for source in [InformationSource::Patient, InformationSource::Unknown] {
            let pn = PertinentNegatives {
                source,
                unobtainable: true,
                unobtainable_reason: "language barrier".into(),
                ..PertinentNegatives::default()
            };
            assert_eq!(
                compose(&history_with(pn)),
                "Unable to obtain pertinent negatives due to language barrier."
            );
        }
    }

    #[test]
    fn test_nothing_selected_is_empty() {
        assert_eq!(compose(&PatientHistory::default()), "");

        let pn = PertinentNegatives {
            source: InformationSource::Police,
            unobtainable_reason: "combative".into(),
            ..PertinentNegatives::default()
        };
        assert_eq!(compose(&history_with(pn)), "");
    }

    #[test]
    fn test_unobtainable_wins_over_denials() {
        let mut pn = PertinentNegatives {
            source: InformationSource::Police,
            unobtainable: true,
            unobtainable_reason: "intoxication".into(),
            ..PertinentNegatives::default()
        };
        for symptom in DeniedSymptom::ALL {
            pn.set_denied(symptom, true);
        }

        let sentence = compose(&history_with(pn));
        assert_eq!(
            sentence,
            "Police unable to provide pertinent negatives due to intoxication."
        );
        assert!(!sentence.contains("denies"));
    }

    #[test]
    fn test_order_ignores_order_flags_were_set() {
        let mut pn = PertinentNegatives {
            source: InformationSource::OtherEms,
            ..PertinentNegatives::default()
        };
        for symptom in [
            DeniedSymptom::Diarrhea,
            DeniedSymptom::Dizziness,
            DeniedSymptom::ChestPain,
            DeniedSymptom::NeckPain,
        ] {
            pn.set_denied(symptom, true);
        }

        assert_eq!(
            compose(&history_with(pn)),
            "Other EMS reports patient denies chest pain, neck pain, dizziness, diarrhea."
        );
    }

    #[test]
    fn test_all_ten_denied() {
        let mut pn = PertinentNegatives::default();
        for symptom in DeniedSymptom::ALL.into_iter().rev() {
            pn.set_denied(symptom, true);
        }

        assert_eq!(
            compose(&history_with(pn)),
            "Patient denies chest pain, shortness of breath, head pain, neck pain, back pain, \
             weakness, dizziness, nausea, vomiting, diarrhea."
        );
    }

    #[test]
    fn test_unknown_source_names_itself_for_denials() {
        let pn = PertinentNegatives {
            source: InformationSource::Unknown,
            nausea: true,
            ..PertinentNegatives::default()
        };
        assert_eq!(
            compose(&history_with(pn)),
            "Unknown reports patient denies nausea."
        );
    }

    #[test]
    fn test_denied_iterator_and_set_denied() {
        let mut pn = PertinentNegatives::default();
        pn.set_denied(DeniedSymptom::Vomiting, true);
        pn.set_denied(DeniedSymptom::HeadPain, true);
        pn.set_denied(DeniedSymptom::Vomiting, false);

        assert!(pn.head_pain);
        assert!(!pn.vomiting);
        assert_eq!(pn.denied().collect::<Vec<_>>(), vec![DeniedSymptom::HeadPain]);
    }
}
