//! Field accessors and rendering sink the controller drives

use super::fields::{FormField, FormValues};
use crate::ui::StatusBanner;
use std::collections::BTreeMap;

/// Everything the controller reads from or writes to the visible form.
pub trait FormView: Send + 'static {
    fn value(&self, field: FormField) -> String;

    fn set_value(&mut self, field: FormField, value: &str);

    fn show_field_error(&mut self, field: FormField, message: &str);

    fn clear_field_error(&mut self, field: FormField);

    fn set_controls_enabled(&mut self, enabled: bool);

    /// `None` hides the banner.
    fn render_status(&mut self, banner: Option<&StatusBanner>);

    fn show_preview(&mut self, json: &str);

    fn hide_preview(&mut self);

    fn values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in FormField::ALL {
            values.set(field, self.value(field));
        }
        values
    }

    fn clear(&mut self) {
        for field in FormField::ALL {
            self.set_value(field, "");
        }
    }
}

/// View backed by plain memory. Serves request-scoped forms in the HTTP
/// layer and stands in for a real UI in tests.
#[derive(Debug, Clone)]
pub struct InMemoryForm {
    values: FormValues,
    field_errors: BTreeMap<FormField, String>,
    controls_enabled: bool,
    status: Option<StatusBanner>,
    preview: Option<String>,
}

impl Default for InMemoryForm {
    fn default() -> Self {
        Self {
            values: FormValues::new(),
            field_errors: BTreeMap::new(),
            controls_enabled: true,
            status: None,
            preview: None,
        }
    }
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: FormValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<FormField, String> {
        &self.field_errors
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn status(&self) -> Option<&StatusBanner> {
        self.status.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }
}

impl FormView for InMemoryForm {
    fn value(&self, field: FormField) -> String {
        self.values.get(field).to_string()
    }

    fn set_value(&mut self, field: FormField, value: &str) {
        self.values.set(field, value);
    }

    fn show_field_error(&mut self, field: FormField, message: &str) {
        self.field_errors.insert(field, message.to_string());
    }

    fn clear_field_error(&mut self, field: FormField) {
        self.field_errors.remove(&field);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn render_status(&mut self, banner: Option<&StatusBanner>) {
        self.status = banner.cloned();
    }

    fn show_preview(&mut self, json: &str) {
        self.preview = Some(json.to_string());
    }

    fn hide_preview(&mut self) {
        self.preview = None;
    }

    fn values(&self) -> FormValues {
        self.values.clone()
    }
}
