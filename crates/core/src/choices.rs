//! Closed choice types for form fields picked from a button set.
//!
//! The form offers a fixed set of values for fields such as dispatch priority or transport
//! mode, but records may still carry free text (older records, hand-edited files, custom
//! entries). Every choice type therefore has an `Other` arm holding the text verbatim; parsing
//! never fails and unknown text round-trips unchanged.

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $s:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Text outside the predefined choices, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Wire/display values of the predefined choices, in form order.
            pub const LABELS: &'static [&'static str] = &[$($s),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $s,)+
                    Self::Other(text) => text,
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $($s $(| $alias)* => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(text) => text,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(
    /// Dispatch priority level.
    Priority {
        Level1 => "Level 1",
        Level2 => "Level 2",
        Level3 => "Level 3",
    }
);

choice_enum!(
    /// AVPU level of consciousness.
    LevelOfConsciousness {
        Alert => "Alert",
        Verbal => "Verbal",
        Pain => "Pain",
        Unresponsive => "Unresponsive",
    }
);

choice_enum!(
    /// How the allergy field was filled in.
    AllergyType {
        /// No known drug allergies.
        Nkda => "nkda",
        /// Allergies are documented on the medication list.
        SeeMedList => "seemedlist" | "seemed list",
        Custom => "custom",
    }
);

choice_enum!(
    /// How the medication field was filled in.
    MedicationType {
        /// Patient takes no medications.
        NoMedications => "none",
        Custom => "custom",
    }
);

choice_enum!(
    /// Who provided the pertinent negatives.
    InformationSource {
        Patient => "Patient",
        SpouseGuardian => "Spouse/Guardian",
        Police => "Police",
        OtherEms => "Other EMS",
        StaffFacility => "Staff/Facility",
        Unknown => "Unknown",
    }
);

choice_enum!(
    /// Transport mode / priority to the destination.
    TransportMode {
        Priority1 => "Priority 1",
        Priority2 => "Priority 2",
        Priority3 => "Priority 3",
    }
);

choice_enum!(
    /// Patient position during transport.
    PatientPosition {
        Supine => "Supine",
        SemiFowler => "Semi-Fowler",
        Fowler => "Fowler",
        LeftLateral => "Left Lateral",
        RightLateral => "Right Lateral",
        Trendelenburg => "Trendelenburg",
    }
);

impl AllergyType {
    /// Text shown on the narrative when the allergy field itself is blank.
    pub fn display_default(&self) -> Option<&'static str> {
        match self {
            AllergyType::Nkda => Some("NKDA"),
            AllergyType::SeeMedList => Some("See Med List"),
            AllergyType::Custom | AllergyType::Other(_) => None,
        }
    }
}

impl MedicationType {
    /// Text shown on the narrative when the medication field itself is blank.
    pub fn display_default(&self) -> Option<&'static str> {
        match self {
            MedicationType::NoMedications => Some("None"),
            MedicationType::Custom | MedicationType::Other(_) => None,
        }
    }
}

impl Default for InformationSource {
    fn default() -> Self {
        InformationSource::Patient
    }
}

impl InformationSource {
    /// Whether the sentence should be phrased without naming the source.
    ///
    /// Information from the patient (or of unknown origin) is reported impersonally; any
    /// other source is named in the sentence.
    pub fn is_impersonal(&self) -> bool {
        matches!(self, InformationSource::Patient | InformationSource::Unknown)
    }
}
