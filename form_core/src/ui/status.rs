//! Status banner shown above the form

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// Loading banners stay until replaced; the others hide themselves.
    pub fn auto_hides(self) -> bool {
        !matches!(self, StatusKind::Loading)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            StatusKind::Loading => "\u{23F3}",
            StatusKind::Success => "\u{2714}",
            StatusKind::Error => "\u{2716}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBanner {
    pub kind: StatusKind,
    pub message: String,
    pub details: String,
    /// Increases with every banner shown by the same controller.
    pub generation: u64,
}

impl StatusBanner {
    pub fn new(kind: StatusKind, message: impl Into<String>, details: impl Into<String>, generation: u64) -> Self {
        Self {
            kind,
            message: message.into(),
            details: details.into(),
            generation,
        }
    }
}
