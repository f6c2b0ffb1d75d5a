//! The content request form: fields, payload, view seam and controller

pub mod controller;
pub mod fields;
pub mod payload;
pub mod suggestions;
pub mod view;

pub use controller::{ConnectionReport, FormController, SubmitOutcome, UiTimings};
pub use fields::{FocusArea, FormField, FormValues};
pub use payload::SubmissionPayload;
pub use view::{FormView, InMemoryForm};
