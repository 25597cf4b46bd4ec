//! Page bootstrap API
//!
//! Installs the application configuration before any widget is built.

use wasm_bindgen::prelude::*;
use crate::config::{self, AppConfig};
use crate::wasm_info;
use super::helpers::{deserialize, js_error};

/// Install the configuration from a JavaScript object
#[wasm_bindgen(js_name = installConfig)]
pub fn install_config(config_js: JsValue) -> Result<(), JsValue> {
    let app_config: AppConfig = deserialize(config_js, "Invalid configuration")?;
    install(app_config)
}

/// Install the configuration from JSON text
#[wasm_bindgen(js_name = installConfigJson)]
pub fn install_config_json(text: &str) -> Result<(), JsValue> {
    let app_config = AppConfig::from_json(text).map_err(|e| js_error("Invalid configuration", e))?;
    install(app_config)
}

fn install(app_config: AppConfig) -> Result<(), JsValue> {
    let debug = app_config.is_debug;
    config::install(app_config).map_err(|e| js_error("Configuration rejected", e))?;
    if debug {
        wasm_info!("debug configuration installed");
    }
    Ok(())
}

/// Script URL for a module id under the installed configuration
#[wasm_bindgen(js_name = resolveModule)]
pub fn resolve_module(module_id: &str) -> String {
    config::current().resolve_module(module_id)
}
