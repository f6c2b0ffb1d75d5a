//! Per-field validation rules

use crate::form::FormField;
use std::borrow::Cow;
use thiserror::Error;
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .field.label())]
    RequiredFieldMissing { field: FormField },

    #[error("{}", too_short_message(.field, .min))]
    TooShort { field: FormField, min: usize },
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::RequiredFieldMissing { field } | FieldError::TooShort { field, .. } => *field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FieldError::RequiredFieldMissing { .. } => "required",
            FieldError::TooShort { .. } => "too_short",
        }
    }
}

fn too_short_message(field: &FormField, min: &usize) -> String {
    match *field {
        FormField::SpecificTopic => {
            format!("Please provide a more detailed topic (minimum {} characters)", min)
        }
        FormField::KeyMessage => {
            format!("Please provide a more detailed key message (minimum {} characters)", min)
        }
        FormField::TargetAudience => "Please specify your target audience".to_string(),
        other => format!("{} must be at least {} characters", other.label(), min),
    }
}

impl From<FieldError> for ValidationError {
    fn from(err: FieldError) -> Self {
        let mut validation_error = ValidationError::new(err.code());
        validation_error.message = Some(Cow::Owned(err.to_string()));
        validation_error
    }
}

/// Checks a raw value against the rules of `field`. The value is trimmed and
/// its length counted in characters.
pub fn check_field(field: FormField, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();

    if field.is_required() && value.is_empty() {
        return Err(FieldError::RequiredFieldMissing { field });
    }

    if let Some(min) = field.min_length() {
        if value.chars().count() < min {
            return Err(FieldError::TooShort { field, min });
        }
    }

    Ok(())
}

pub fn validate_specific_topic(value: &str) -> Result<(), ValidationError> {
    check_field(FormField::SpecificTopic, value).map_err(ValidationError::from)
}

pub fn validate_key_message(value: &str) -> Result<(), ValidationError> {
    check_field(FormField::KeyMessage, value).map_err(ValidationError::from)
}

pub fn validate_target_audience(value: &str) -> Result<(), ValidationError> {
    check_field(FormField::TargetAudience, value).map_err(ValidationError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_required_fields_fail_as_missing() {
        for field in FormField::REQUIRED {
            assert_eq!(check_field(field, ""), Err(FieldError::RequiredFieldMissing { field }));
            assert_eq!(check_field(field, "   \t "), Err(FieldError::RequiredFieldMissing { field }));
        }
    }

    #[test]
    fn test_specific_topic_boundary() {
        assert_eq!(
            check_field(FormField::SpecificTopic, "123456789"),
            Err(FieldError::TooShort { field: FormField::SpecificTopic, min: 10 })
        );
        assert!(check_field(FormField::SpecificTopic, "1234567890").is_ok());
        assert!(check_field(FormField::SpecificTopic, "  1234567890  ").is_ok());
    }

    #[test]
    fn test_key_message_boundary() {
        assert!(check_field(FormField::KeyMessage, &"a".repeat(19)).is_err());
        assert!(check_field(FormField::KeyMessage, &"a".repeat(20)).is_ok());
    }

    #[test]
    fn test_target_audience_boundary() {
        assert!(check_field(FormField::TargetAudience, " CRO ").is_err());
        assert!(check_field(FormField::TargetAudience, "CROs!").is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(check_field(FormField::TargetAudience, "éééé").is_err());
        assert!(check_field(FormField::TargetAudience, "ééééé").is_ok());
    }

    #[test]
    fn test_optional_fields_accept_empty() {
        assert!(check_field(FormField::FocusArea, "").is_ok());
        assert!(check_field(FormField::CallToAction, "").is_ok());
        assert!(check_field(FormField::ContentType, "").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FieldError::RequiredFieldMissing { field: FormField::KeyMessage }.to_string(),
            "Key Message is required"
        );
        assert_eq!(
            FieldError::TooShort { field: FormField::SpecificTopic, min: 10 }.to_string(),
            "Please provide a more detailed topic (minimum 10 characters)"
        );
        assert_eq!(
            FieldError::TooShort { field: FormField::TargetAudience, min: 5 }.to_string(),
            "Please specify your target audience"
        );
    }

    #[test]
    fn test_conversion_keeps_code_and_message() {
        let err: ValidationError = FieldError::TooShort { field: FormField::KeyMessage, min: 20 }.into();
        assert_eq!(err.code, "too_short");
        assert_eq!(
            err.message.as_deref(),
            Some("Please provide a more detailed key message (minimum 20 characters)")
        );
    }
}
