pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".workload-audit.toml";

/// Get the global config file path (~/.workload-audit.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.workload-audit.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration.
///
/// An explicit file must exist and parse. Otherwise the local config in
/// the working directory is tried first, then the global one, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let local = local_config_path(Path::new("."));
    if local.exists() {
        return read_config(&local);
    }

    if let Some(global) = global_config_path() {
        if global.exists() {
            return read_config(&global);
        }
    }

    log::debug!("No configuration file found, using defaults");
    Ok(types::Config::default())
}

/// Read and parse a single config file.
pub fn read_config(path: &Path) -> Result<types::Config> {
    log::debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&content)
}

/// Parse configuration from TOML.
pub fn parse_config(content: &str) -> Result<types::Config> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}
