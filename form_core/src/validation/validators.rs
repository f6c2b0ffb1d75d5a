//! Form-level validator over the required fields

use super::{rules::*, Validatable, ValidationResult};
use crate::form::{FormField, FormValues};
use validator::Validate;

/// Required fields of a content request. Every field is checked on each run
/// so all errors surface together.
#[derive(Debug, Clone, Validate)]
pub struct ContentRequestValidator {
    #[validate(custom(function = "validate_specific_topic"))]
    pub specific_topic: String,

    #[validate(custom(function = "validate_key_message"))]
    pub key_message: String,

    #[validate(custom(function = "validate_target_audience"))]
    pub target_audience: String,
}

impl ContentRequestValidator {
    pub fn from_values(values: &FormValues) -> Self {
        Self {
            specific_topic: values.get(FormField::SpecificTopic).to_string(),
            key_message: values.get(FormField::KeyMessage).to_string(),
            target_audience: values.get(FormField::TargetAudience).to_string(),
        }
    }
}

pub fn validate_required_fields(values: &FormValues) -> ValidationResult {
    ContentRequestValidator::from_values(values).validate_comprehensive()
}
