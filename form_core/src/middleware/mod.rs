//! Middleware components for the form host

pub mod cors;
pub mod logging;
