//! Sighting form API
//!
//! `SightingFormHandle` is created once per form page. Every handler returns
//! an array of actions (`{action: "geocode", location: ...}` and so on) that
//! the page carries out; AJAX and geocoder results come back through
//! `onRestrictions` and `onGeocoded`.

use wasm_bindgen::prelude::*;
use crate::sighting::{
    dispatch, offset_coordinate, parse_lat_long, restrictions_url, visibility_update, Coordinates,
    FormAction, PhotoGallery, RestrictionStatus, SightingError, SightingForm, TaxonRestriction,
    UploadEvent,
};
use crate::wasm_log;
use super::helpers::{deserialize, js_error, serialize};
use super::types::{RestrictionCheck, UploadResult};

fn actions_to_js(result: Result<Vec<FormAction>, SightingError>) -> Result<JsValue, JsValue> {
    let actions = result.map_err(|e| js_error("Sighting form error", e))?;
    wasm_log!("  {} form actions", actions.len());
    serialize(&actions, "Failed to serialize form actions")
}

/// Query URL for the restrictions endpoint
#[wasm_bindgen(js_name = restrictionsUrl)]
pub fn restrictions_url_js(plant_name: &str, location: &str) -> String {
    restrictions_url(plant_name, location)
}

/// Fold restriction records into a status and the visibility changes it implies
#[wasm_bindgen(js_name = evaluateRestrictions)]
pub fn evaluate_restrictions(
    records_js: JsValue,
    show_dialog: bool,
    is_new_sighting: bool,
) -> Result<JsValue, JsValue> {
    let records: Vec<TaxonRestriction> = deserialize(records_js, "Invalid restrictions response")?;
    let status = RestrictionStatus::evaluate(&records);
    let update = visibility_update(&status, show_dialog, is_new_sighting)
        .map_err(|e| js_error("Restriction dialog failed", e))?;
    serialize(&RestrictionCheck { status, update }, "Failed to serialize restriction check")
}

/// `{latitude, longitude}` for typed coordinates, `null` for place names
#[wasm_bindgen(js_name = parseLatLong)]
pub fn parse_lat_long_js(text: &str) -> Result<JsValue, JsValue> {
    serialize(&parse_lat_long(text), "Failed to serialize coordinates")
}

/// Nudge a geocoded coordinate so map markers do not overlap
#[wasm_bindgen(js_name = offsetCoordinate)]
pub fn offset_coordinate_js(coordinate: f64) -> Result<f64, JsValue> {
    offset_coordinate(coordinate).map_err(|e| js_error("Offset failed", e))
}

/// Form state and photo gallery of one sighting page
#[wasm_bindgen]
pub struct SightingFormHandle {
    form: SightingForm,
    gallery: PhotoGallery,
}

#[wasm_bindgen]
impl SightingFormHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(is_new_sighting: bool) -> SightingFormHandle {
        SightingFormHandle {
            form: SightingForm::new(is_new_sighting),
            gallery: PhotoGallery::new(),
        }
    }

    #[wasm_bindgen(js_name = onLoad)]
    pub fn on_load(&mut self, identification: &str, location: &str) -> Result<JsValue, JsValue> {
        actions_to_js(Ok(self.form.on_load(identification, location)))
    }

    #[wasm_bindgen(js_name = onIdentificationBlur)]
    pub fn on_identification_blur(&mut self, value: &str) -> Result<JsValue, JsValue> {
        actions_to_js(Ok(self.form.on_identification_blur(value)))
    }

    #[wasm_bindgen(js_name = onIdentificationKeyup)]
    pub fn on_identification_keyup(&mut self, value: &str, enter: bool) -> Result<JsValue, JsValue> {
        actions_to_js(self.form.on_identification_keyup(value, enter))
    }

    #[wasm_bindgen(js_name = onLocationBlur)]
    pub fn on_location_blur(&mut self, value: &str) -> Result<JsValue, JsValue> {
        actions_to_js(self.form.on_location_blur(value))
    }

    #[wasm_bindgen(js_name = onLocationKeyup)]
    pub fn on_location_keyup(&mut self, value: &str, enter: bool) -> Result<JsValue, JsValue> {
        actions_to_js(Ok(self.form.on_location_keyup(value, enter)))
    }

    #[wasm_bindgen(js_name = onRestrictions)]
    pub fn on_restrictions(&mut self, records_js: JsValue, show_dialog: bool) -> Result<JsValue, JsValue> {
        let records: Vec<TaxonRestriction> = deserialize(records_js, "Invalid restrictions response")?;
        actions_to_js(self.form.on_restrictions_result(&records, show_dialog))
    }

    #[wasm_bindgen(js_name = onGeocoded)]
    pub fn on_geocoded(&self, latitude: f64, longitude: f64) -> Result<JsValue, JsValue> {
        actions_to_js(self.form.on_geocoded(Coordinates { latitude, longitude }))
    }

    /// Feed an upload dialog event (`{event: "started" | "completed" | "error", data}`)
    #[wasm_bindgen(js_name = onUploadEvent)]
    pub fn on_upload_event(&mut self, event_js: JsValue) -> Result<JsValue, JsValue> {
        let event: UploadEvent = deserialize(event_js, "Invalid upload event")?;
        dispatch(&mut self.gallery, &event);
        let result = UploadResult {
            attached: self.gallery.attached.clone(),
            location: self.gallery.take_location(),
        };
        serialize(&result, "Failed to serialize upload result")
    }

    /// Forget a photo after the server confirmed its removal
    #[wasm_bindgen(js_name = removePhoto)]
    pub fn remove_photo(&mut self, id: u32) -> bool {
        self.gallery.remove(id)
    }

    #[wasm_bindgen(js_name = rejectUrl)]
    pub fn reject_url(id: u32) -> String {
        PhotoGallery::reject_url(id)
    }

    /// Thumbnail frames to draw
    pub fn gallery(&self) -> Result<JsValue, JsValue> {
        serialize(&self.gallery.frames, "Failed to serialize gallery")
    }
}
