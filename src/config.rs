//! Application configuration
//!
//! The page bootstraps the widgets with one configuration value describing
//! where scripts live and how the widgets behave. It is installed once at
//! start-up and read-only afterwards.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::ruler::RulerConfig;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration has already been installed")]
    AlreadyInstalled,
}

/// A named script package and its directory relative to `base_url`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PackageLocation {
    pub name: String,
    pub location: String,
}

impl PackageLocation {
    fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
        }
    }
}

/// Module loader and widget settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub is_debug: bool,
    pub base_url: String,
    pub locale: String,
    pub async_loading: bool,
    pub parse_on_load: bool,
    pub packages: Vec<PackageLocation>,
    pub ruler: RulerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            is_debug: false,
            base_url: "/static/scripts".to_string(),
            locale: "en-us".to_string(),
            async_loading: false,
            parse_on_load: true,
            packages: vec![
                PackageLocation::new("dojo", "lib/dojo"),
                PackageLocation::new("dojox", "lib/dojox"),
                PackageLocation::new("dijit", "lib/dijit"),
                PackageLocation::new("jquery", "lib/jquery"),
                PackageLocation::new("tools", "lib/tools"),
                PackageLocation::new("gobotany", "../gobotany"),
                PackageLocation::new("simplekey", "simplekey"),
                PackageLocation::new("bridge", "bridge"),
                PackageLocation::new("util", "util"),
            ],
            ruler: RulerConfig::default(),
        }
    }
}

/// Collapse `.` and `..` segments of a slash separated path
fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().map_or(true, |s| *s == "..") {
                    if !absolute {
                        segments.push("..");
                    }
                } else {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn package(&self, name: &str) -> Option<&PackageLocation> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Script URL for a module id such as `gobotany/sk/RulerSlider`.
    ///
    /// A bare package name loads that package's `main` module; ids outside
    /// any package resolve against `base_url`.
    pub fn resolve_module(&self, module_id: &str) -> String {
        let module_id = module_id.trim_end_matches(".js");
        let (head, rest) = match module_id.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (module_id, None),
        };
        let path = match self.package(head) {
            Some(package) => format!(
                "{}/{}/{}.js",
                self.base_url,
                package.location,
                rest.unwrap_or("main")
            ),
            None => format!("{}/{}.js", self.base_url, module_id),
        };
        normalize_path(&path)
    }
}

/// Install the configuration for the lifetime of the page
pub fn install(config: AppConfig) -> Result<(), ConfigError> {
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInstalled)?;
    log::info!("application configuration installed");
    Ok(())
}

/// The installed configuration, or the defaults before bootstrap
pub fn current() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn is_installed() -> bool {
    CONFIG.get().is_some()
}
