//! Go Botany Widgets WASM Module
//!
//! Browser-side widgets for the Go Botany plant identification site: the
//! ruler slider used for length characters and the PlantShare sighting
//! form logic.

pub mod models;
pub mod config;
pub mod ruler;
pub mod sighting;
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use models::units::{LengthUnit, UnitSpec, UnitSystem};
pub use ruler::{bind_value_display, pretty_length, RulerConfig, RulerDisplayList, RulerError, RulerLayout, RulerLayoutEngine, RulerRange, RulerRow, ValueDisplay};
pub use config::{AppConfig, ConfigError};
pub use dom::RulerSlider;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    init_logging();

    log::info!("Go Botany widgets WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        crate::wasm_warn!("logger already initialized: {}", e);
    }
}
