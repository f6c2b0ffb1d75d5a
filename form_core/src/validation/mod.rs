//! Validation of form input before anything leaves the process

pub mod rules;
pub mod validators;

pub use rules::{check_field, FieldError};
pub use validators::{validate_required_fields, ContentRequestValidator};

use crate::form::FormField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Outcome of validating a whole form, keyed by payload field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
    pub field_errors: BTreeMap<String, FieldValidationError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub errors: Vec<String>,
    pub error_codes: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (key, field_errors) in errors.field_errors() {
            let field = payload_name(key.as_ref());
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.push(&field, message, error.code.to_string());
            }
        }

        result
    }

    pub fn add_field_error(&mut self, error: &FieldError) {
        let field = error.field().name();
        self.push(field, error.to_string(), error.code().to_string());
    }

    pub fn field_error(&self, field: FormField) -> Option<&FieldValidationError> {
        self.field_errors.get(field.name())
    }

    /// First message per field, in field order.
    pub fn first_messages(&self) -> Vec<(FormField, String)> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| {
                self.errors
                    .get(field.name())
                    .and_then(|messages| messages.first())
                    .map(|message| (field, message.clone()))
            })
            .collect()
    }

    fn push(&mut self, field: &str, message: String, code: String) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.clone());

        let entry = self
            .field_errors
            .entry(field.to_string())
            .or_insert_with(|| FieldValidationError {
                field: field.to_string(),
                errors: Vec::new(),
                error_codes: Vec::new(),
            });
        entry.errors.push(message);
        entry.error_codes.push(code);
    }
}

/// Maps a validator struct key (`specific_topic`) to the payload name
/// (`specificTopic`).
fn payload_name(key: &str) -> String {
    FormField::ALL
        .into_iter()
        .find(|field| snake_case(field.name()) == key)
        .map(|field| field.name().to_string())
        .unwrap_or_else(|| key.to_string())
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_name_mapping() {
        assert_eq!(payload_name("specific_topic"), "specificTopic");
        assert_eq!(payload_name("call_to_action"), "callToAction");
        assert_eq!(payload_name("unknown_key"), "unknown_key");
    }

    #[test]
    fn test_add_field_error() {
        let mut result = ValidationResult::success();
        result.add_field_error(&FieldError::RequiredFieldMissing {
            field: FormField::TargetAudience,
        });

        assert!(!result.is_valid);
        let error = result.field_error(FormField::TargetAudience).unwrap();
        assert_eq!(error.errors, vec!["Target Audience is required".to_string()]);
        assert_eq!(error.error_codes, vec!["required".to_string()]);
    }

    #[test]
    fn test_first_messages_in_field_order() {
        let mut result = ValidationResult::success();
        result.add_field_error(&FieldError::TooShort { field: FormField::TargetAudience, min: 5 });
        result.add_field_error(&FieldError::RequiredFieldMissing { field: FormField::SpecificTopic });

        let fields: Vec<FormField> = result.first_messages().into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![FormField::SpecificTopic, FormField::TargetAudience]);
    }
}
