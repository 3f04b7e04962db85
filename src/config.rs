//! On-disk configuration: API key and default user id.
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/soterm/config.json` on Linux). A missing file is an empty
//! config; an unreadable or corrupt file is surfaced as [`Error::Config`]
//! so the caller can tell the user to delete it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::Error;

/// Persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Stack Exchange API key, sent as the `key` parameter when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Default user id for `--user` with no argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf, Error> {
    let base = dirs::config_dir()
        .ok_or_else(|| Error::Config("could not determine a config directory".into()))?;
    Ok(base.join("soterm").join("config.json"))
}

/// Load the config at `path`. A missing file yields the default config.
pub fn load(path: &Path) -> Result<Config, Error> {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!(
                "could not parse {}: {}\nDelete it with `soterm --del` and retry.",
                path.display(),
                e
            ))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(Error::Config(format!(
            "could not read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write the config to `path`, creating parent directories as needed.
pub fn save(path: &Path, config: &Config) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("could not create {}: {}", parent.display(), e)))?;
    }
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("could not serialize config: {}", e)))?;
    fs::write(path, raw)
        .map_err(|e| Error::Config(format!("could not write {}: {}", path.display(), e)))
}

/// Delete the config file. Missing file reports [`Error::Config`] so the
/// user learns nothing was saved in the first place.
pub fn delete(path: &Path) -> Result<(), Error> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Config(
            "no configuration file found. Use `soterm --user` or `soterm --api-key` to create one."
                .into(),
        )),
        Err(e) => Err(Error::Config(format!(
            "could not delete {}: {}",
            path.display(),
            e
        ))),
    }
}

// ============================================================================
// TESTS
// ============================================================================
