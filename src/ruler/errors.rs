//! Error types for ruler construction
//!
//! All ruler failures happen at construction time; once a layout exists the
//! value display only formats numbers that already passed validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulerError {
    /// A granularity with a zero, negative or non-finite interval
    #[error("Invalid unit spec at index {index}: interval length {interval_length_mm} mm must be positive")]
    InvalidUnitSpec {
        index: usize,
        interval_length_mm: f64,
    },

    /// Empty or inverted slider range, or a non-positive pixel width
    #[error("Invalid ruler range: {0}")]
    InvalidRange(String),

    /// Missing container node or slider control
    #[error("Ruler construction failed: {0}")]
    ConstructionError(String),
}
