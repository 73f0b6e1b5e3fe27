//! Persistence of [`NoteOverlayConfig`] for standalone hosts.
//!
//! Stored as TOML via `confy`, either in the platform config directory or at
//! an explicit path.

use std::path::{Path, PathBuf};

use notemark_types::NoteOverlayConfig;

use crate::error::ConfigError;

const APP_NAME: &str = "notemark";
const CONFIG_NAME: &str = "overlay";

/// Load the overlay config from `path`, creating the file with defaults if missing
pub fn load_config_from(path: &Path) -> Result<NoteOverlayConfig, ConfigError> {
    confy::load_path(path).map_err(ConfigError::Load)
}

/// Write the overlay config to `path`
pub fn save_config_to(path: &Path, config: &NoteOverlayConfig) -> Result<(), ConfigError> {
    confy::store_path(path, config).map_err(ConfigError::Save)
}

/// Path of the config file in the platform config directory
pub fn config_path() -> Result<PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
}

/// Load the overlay config from the platform config directory
pub fn load_config() -> Result<NoteOverlayConfig, ConfigError> {
    load_config_from(&config_path()?)
}

/// Write the overlay config to the platform config directory
pub fn save_config(config: &NoteOverlayConfig) -> Result<(), ConfigError> {
    save_config_to(&config_path()?, config)
}

/// Load the config, falling back to defaults (with a warning) on any error
pub fn load_config_or_default() -> NoteOverlayConfig {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load overlay config, using defaults");
            NoteOverlayConfig::default()
        }
    }
}
