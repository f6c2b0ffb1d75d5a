//! Outbound submission payload

use super::fields::{FormField, FormValues};
use serde::{Deserialize, Serialize};

/// Flat, trimmed snapshot of the form sent to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub specific_topic: String,
    pub key_message: String,
    pub target_audience: String,
    pub focus_area: String,
    pub call_to_action: String,
    pub content_type: String,
}

impl SubmissionPayload {
    pub fn from_values(values: &FormValues) -> Self {
        let read = |field: FormField| -> String {
            let value = values.trimmed(field);
            match field.payload_default() {
                Some(default) if value.is_empty() => default.to_string(),
                _ => value.to_string(),
            }
        };

        Self {
            specific_topic: read(FormField::SpecificTopic),
            key_message: read(FormField::KeyMessage),
            target_audience: read(FormField::TargetAudience),
            focus_area: read(FormField::FocusArea),
            call_to_action: read(FormField::CallToAction),
            content_type: read(FormField::ContentType),
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormValues {
        FormValues::new()
            .with(FormField::SpecificTopic, "  Supply chain resilience ")
            .with(FormField::KeyMessage, "Risk data belongs in one place")
            .with(FormField::TargetAudience, "CROs")
    }

    #[test]
    fn test_defaults_applied_to_empty_optional_fields() {
        let values = filled().with(FormField::FocusArea, "   ");
        let payload = SubmissionPayload::from_values(&values);

        assert_eq!(payload.specific_topic, "Supply chain resilience");
        assert_eq!(payload.focus_area, "General");
        assert_eq!(payload.call_to_action, "webinar");
        assert_eq!(payload.content_type, "both");
    }

    #[test]
    fn test_explicit_optional_values_are_kept() {
        let values = filled()
            .with(FormField::FocusArea, "Defence")
            .with(FormField::CallToAction, " demo ")
            .with(FormField::ContentType, "blog");
        let payload = SubmissionPayload::from_values(&values);

        assert_eq!(payload.focus_area, "Defence");
        assert_eq!(payload.call_to_action, "demo");
        assert_eq!(payload.content_type, "blog");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let payload = SubmissionPayload::from_values(&filled());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["specificTopic"], "Supply chain resilience");
        assert_eq!(json["targetAudience"], "CROs");
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let pretty = SubmissionPayload::from_values(&filled()).to_pretty_json().unwrap();
        assert!(pretty.contains("\n  \"specificTopic\": \"Supply chain resilience\""));
    }
}
