//! Go Botany widgets WASM API
//!
//! This module provides the JavaScript-facing API for the widgets. It
//! includes shared utilities for serialization and error handling, as well
//! as the API functions organized by widget.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `types`: Result types shared between API functions
//! - `bootstrap`: Configuration install and module resolution
//! - `ruler`: Ruler layout and value formatting
//! - `sighting`: Sighting form handle, restrictions and coordinates

pub mod helpers;
pub mod types;
pub mod bootstrap;
pub mod ruler;
pub mod sighting;

pub use bootstrap::{install_config, install_config_json, resolve_module};
pub use ruler::{compute_ruler_layout, compute_ruler_rows, format_ruler_value, pretty_length_js};
pub use sighting::{evaluate_restrictions, offset_coordinate_js, parse_lat_long_js, restrictions_url_js, SightingFormHandle};
