//! MISP configuration file loading
//!
//! Handles loading connection parameters from a JSON config file. Keys are
//! PascalCase on disk (`Proto`, `Host`, `APIKey`, `APIURL`), the schema the
//! MISP automation guides use.

use crate::error::MispError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection parameters for a MISP instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MispConfig {
    /// URL scheme, usually "https"
    #[serde(rename = "Proto")]
    pub proto: String,

    /// Host name (and optional port) of the MISP instance
    #[serde(rename = "Host")]
    pub host: String,

    /// Automation API key
    #[serde(rename = "APIKey")]
    pub api_key: String,

    /// Path prefix of the API, "" or e.g. "/misp"
    #[serde(rename = "APIURL", default)]
    pub api_url: String,
}

impl MispConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MispError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| MispError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: MispConfig =
            serde_json::from_str(&content).map_err(|e| MispError::ConfigParse {
                path: path.display().to_string(),
                source: e,
            })?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Default configuration file path: `config.json` next to the executable
///
/// Falls back to `config.json` in the current directory when the
/// executable path cannot be resolved.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config.json")))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}
