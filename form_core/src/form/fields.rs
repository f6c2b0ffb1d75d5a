//! Form field catalogue and the values a form currently holds

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    SpecificTopic,
    KeyMessage,
    TargetAudience,
    FocusArea,
    CallToAction,
    ContentType,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::SpecificTopic,
        FormField::KeyMessage,
        FormField::TargetAudience,
        FormField::FocusArea,
        FormField::CallToAction,
        FormField::ContentType,
    ];

    pub const REQUIRED: [FormField; 3] = [
        FormField::SpecificTopic,
        FormField::KeyMessage,
        FormField::TargetAudience,
    ];

    /// Name used in the outbound payload and in HTML `name` attributes.
    pub fn name(self) -> &'static str {
        match self {
            FormField::SpecificTopic => "specificTopic",
            FormField::KeyMessage => "keyMessage",
            FormField::TargetAudience => "targetAudience",
            FormField::FocusArea => "focusArea",
            FormField::CallToAction => "callToAction",
            FormField::ContentType => "contentType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::SpecificTopic => "Specific Topic",
            FormField::KeyMessage => "Key Message",
            FormField::TargetAudience => "Target Audience",
            FormField::FocusArea => "Focus Area",
            FormField::CallToAction => "Call to Action",
            FormField::ContentType => "Content Type",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Minimum trimmed length in characters, for fields that have one.
    pub fn min_length(self) -> Option<usize> {
        match self {
            FormField::SpecificTopic => Some(10),
            FormField::KeyMessage => Some(20),
            FormField::TargetAudience => Some(5),
            _ => None,
        }
    }

    /// Value substituted into the payload when the field is left empty.
    pub fn payload_default(self) -> Option<&'static str> {
        match self {
            FormField::FocusArea => Some("General"),
            FormField::CallToAction => Some("webinar"),
            FormField::ContentType => Some("both"),
            _ => None,
        }
    }

    /// Value written into an empty field when the form is initialised or reset.
    pub fn prefill(self) -> Option<&'static str> {
        match self {
            FormField::SpecificTopic => Some(GENERAL_TOPIC),
            FormField::KeyMessage => Some(GENERAL_MESSAGE),
            FormField::TargetAudience => Some("Risk Managers, CROs, Industry Leaders"),
            FormField::CallToAction => Some("webinar"),
            FormField::ContentType => Some("both"),
            FormField::FocusArea => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) const GENERAL_TOPIC: &str = "Latest industry developments and trends";
pub(crate) const GENERAL_MESSAGE: &str = "Strategic insights for modern RMIS implementation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusArea {
    Defence,
    Healthcare,
    Financial,
    Manufacturing,
    General,
}

impl FocusArea {
    pub const ALL: [FocusArea; 5] = [
        FocusArea::Defence,
        FocusArea::Healthcare,
        FocusArea::Financial,
        FocusArea::Manufacturing,
        FocusArea::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FocusArea::Defence => "Defence",
            FocusArea::Healthcare => "Healthcare",
            FocusArea::Financial => "Financial",
            FocusArea::Manufacturing => "Manufacturing",
            FocusArea::General => "General",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == value)
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, untrimmed field values keyed by field.
///
/// Deserializes from a flat `{ "specificTopic": "...", ... }` map; unknown
/// keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FormValues(BTreeMap<FormField, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn trimmed(&self, field: FormField) -> &str {
        self.get(field).trim()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = Self::new();
        for (key, value) in pairs {
            if let Some(field) = FormField::from_name(key.as_ref()) {
                values.set(field, value);
            }
        }
        values
    }
}

impl From<HashMap<String, String>> for FormValues {
    fn from(map: HashMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<FormValues> for BTreeMap<String, String> {
    fn from(values: FormValues) -> Self {
        values
            .0
            .into_iter()
            .map(|(field, value)| (field.name().to_string(), value))
            .collect()
    }
}
