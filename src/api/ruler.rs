//! Ruler API
//!
//! Layout and formatting entry points for pages that draw the ruler
//! themselves. `RulerSlider` (in `crate::dom`) covers the common case of
//! letting this module build the whole widget.

use wasm_bindgen::prelude::*;
use crate::config;
use crate::models::units::{LengthUnit, UnitSpec};
use crate::ruler::{bind_value_display, pretty_length, RulerDisplayList, RulerLayout, RulerLayoutEngine, RulerRange};
use crate::{wasm_info, wasm_log};
use super::helpers::{deserialize, js_error, serialize, validation_error};

/// Compute the full dual-scale ruler as a display list
///
/// # Parameters
/// - `min_mm`, `max_mm`: slider range in millimetres
/// - `pixel_width`: rendered width of the slider
///
/// # Returns
/// `RulerDisplayList` with metric rows first, then English rows
#[wasm_bindgen(js_name = computeRulerLayout)]
pub fn compute_ruler_layout(min_mm: f64, max_mm: f64, pixel_width: f64) -> Result<JsValue, JsValue> {
    wasm_info!("computeRulerLayout called: {}..{} mm over {}px", min_mm, max_mm, pixel_width);

    let range = RulerRange::new(min_mm, max_mm, pixel_width)
        .map_err(|e| js_error("Invalid ruler", e))?;
    let layout = RulerLayout::compute(range, config::current().ruler)
        .map_err(|e| js_error("Ruler layout failed", e))?;
    let display_list = RulerDisplayList::from_layout(&layout);

    wasm_log!("  {} rows", display_list.rows.len());
    serialize(&display_list, "Failed to serialize ruler layout")
}

/// Compute rows for a caller-supplied list of granularities
///
/// # Parameters
/// - `unit_specs_js`: array of `{interval_length_mm, label, label_step_multiplier}`,
///   finest first
/// - `use_vulgar_fractions`: write labels with eighth glyphs
#[wasm_bindgen(js_name = computeRulerRows)]
pub fn compute_ruler_rows(
    unit_specs_js: JsValue,
    use_vulgar_fractions: bool,
    min_mm: f64,
    max_mm: f64,
    pixel_width: f64,
) -> Result<JsValue, JsValue> {
    let unit_specs: Vec<UnitSpec> = deserialize(unit_specs_js, "Invalid unit specs")?;
    let range = RulerRange::new(min_mm, max_mm, pixel_width)
        .map_err(|e| js_error("Invalid ruler", e))?;
    let rows = RulerLayoutEngine::new(range, config::current().ruler)
        .compute_ruler(&unit_specs, use_vulgar_fractions)
        .map_err(|e| js_error("Ruler layout failed", e))?;
    serialize(&rows, "Failed to serialize ruler rows")
}

/// Readout text for a slider value: `{metric_lines, metric_text, english_text}`
#[wasm_bindgen(js_name = formatRulerValue)]
pub fn format_ruler_value(value_mm: f64) -> Result<JsValue, JsValue> {
    serialize(&bind_value_display(value_mm), "Failed to serialize value display")
}

/// Format a millimetre length in the unit named by `unit` ("m", "cm", "mm", "in", "ft")
#[wasm_bindgen(js_name = prettyLength)]
pub fn pretty_length_js(unit: &str, value_mm: f64) -> Result<String, JsValue> {
    let unit = LengthUnit::from_symbol(unit)
        .ok_or_else(|| validation_error(format!("Unknown length unit: '{}'", unit)))?;
    Ok(pretty_length(unit, value_mm))
}
