//! Application configuration loading from config.toml
//!
//! Every key is optional. A missing file is not an error: [`load_or_default`]
//! falls back to [`AppConfig::default`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Media URL resolution settings
    pub media: MediaConfig,
    /// Catalog behaviour toggles
    pub catalog: CatalogConfig,
}

/// `[media]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MediaConfig {
    /// Prefix prepended to `{media id}/{file name}` when resolving file URLs
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "/storage".to_string(),
        }
    }
}

/// `[catalog]` section
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Soft-delete order copies together with the catalog product they came from
    pub cascade_delete_to_order_copies: bool,
}

/// Loads the application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration at `path`, or the defaults if the file does not exist.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("No config file at {}, using defaults", path.display());
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [media]
            base_url = "https://cdn.example.com/media"

            [catalog]
            cascade_delete_to_order_copies = true
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.media.base_url, "https://cdn.example.com/media");
        assert!(config.catalog.cascade_delete_to_order_copies);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.media.base_url, "/storage");
        assert!(!config.catalog.cascade_delete_to_order_copies);

        let config = parse_config("[catalog]\n").unwrap();
        assert_eq!(config.media.base_url, "/storage");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_config("[media\nbase_url = 1");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_or_default("definitely/not/here/config.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
