//! Settings stored in `settings.toml` under the platform config directory.
//!
//! ```toml
//! source = "https://example.com/api/banners/public"
//! api_token = "..."
//! placeholder_image = "assets/placeholder.jpg"
//!
//! [rotator]
//! fallback_title = "Our Services"
//! slide_duration_secs = 4
//! fade_delay_ms = 500
//! advance_policy = "sequential"   # or "random"
//! reset_countdown_on_jump = false
//! pause_on_hover = false
//! subtitle_fallback = true
//! ```

use crate::error::ConfigError;
use crate::rotator::RotatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "BannerRotator";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Manifest path, image directory, or http(s) endpoint
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub placeholder_image: Option<String>,
    #[serde(default)]
    pub rotator: RotatorConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotator.slide_duration_secs == 0 {
            return Err(ConfigError::Invalid(
                "rotator.slide_duration_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config, ConfigError> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    info!("No settings file, using defaults");
    Ok(Config::default())
}

/// Read settings; a file that does not parse yields defaults.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => {
            info!("Settings loaded from {}", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to parse {}, using defaults: {}", path.display(), e);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
