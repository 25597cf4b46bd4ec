//! Models module for the Go Botany widgets
//!
//! This module contains the data models shared by the widgets.

pub mod units;

// Re-export commonly used types
pub use units::*;
