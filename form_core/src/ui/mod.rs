pub mod state;
pub mod status;

pub use state::UiState;
pub use status::{StatusBanner, StatusKind};
