//! DOM rendering for the widgets
//!
//! Thin layer over `web-sys`; all layout decisions are made beforehand in
//! pure code.

pub mod ruler_slider;

pub use ruler_slider::RulerSlider;

use wasm_bindgen::JsValue;
use web_sys::Document;
use crate::ruler::RulerError;

/// The page's document
pub fn document() -> Result<Document, RulerError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| RulerError::ConstructionError("no document available".to_string()))
}

/// Wrap a failed DOM call as a construction error
pub fn dom_error(error: JsValue) -> RulerError {
    RulerError::ConstructionError(format!("DOM operation failed: {:?}", error))
}
