//! Visual state of the form

use super::status::StatusKind;
use serde::Serialize;

/// Mutually exclusive UI states.
///
/// ```text
/// Idle ──submit(valid)──▶ Submitting ──settled──▶ StatusShown(kind)
///  ▲                                                  │
///  └────────────── auto-hide (current banner) / reset ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "status", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    StatusShown(StatusKind),
}

impl UiState {
    pub fn is_submitting(self) -> bool {
        matches!(self, UiState::Submitting)
    }

    pub fn controls_enabled(self) -> bool {
        !self.is_submitting()
    }

    pub fn begin_submit(self) -> Option<UiState> {
        match self {
            UiState::Submitting => None,
            _ => Some(UiState::Submitting),
        }
    }

    /// State after a banner of `kind` is displayed. Only settling leaves
    /// `Submitting`; banners shown meanwhile do not.
    pub fn show_status(self, kind: StatusKind) -> UiState {
        match self {
            UiState::Submitting => UiState::Submitting,
            _ => UiState::StatusShown(kind),
        }
    }

    pub fn settle(self) -> UiState {
        match self {
            UiState::Submitting => UiState::Idle,
            other => other,
        }
    }

    pub fn hide_status(self) -> UiState {
        match self {
            UiState::StatusShown(_) => UiState::Idle,
            other => other,
        }
    }
}
