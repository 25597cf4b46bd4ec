//! Error types for the sighting form

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SightingError {
    /// Restriction lookup returned something other than a list of taxa
    #[error("Invalid restrictions response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Restriction dialog template failed to compile or render
    #[error("Dialog template error: {0}")]
    Template(#[from] mustache::Error),

    /// No randomness available for offsetting map markers
    #[error("Random source unavailable: {0}")]
    Random(String),
}
