//! Shared types for the WASM API
//!
//! This module contains result types returned to JavaScript by more than one
//! API function.

use crate::sighting::{RestrictionStatus, VisibilityUpdate};

/// Result of checking a plant name and location for restrictions
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct RestrictionCheck {
    pub status: RestrictionStatus,
    pub update: VisibilityUpdate,
}

/// Result of feeding an upload event to the form
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct UploadResult {
    /// Photo ids to submit with the sighting
    pub attached: Vec<u32>,

    /// Location to put in the location field (geotagged photo)
    pub location: Option<String>,
}
