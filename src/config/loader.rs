//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// File name looked up in the default search paths.
pub const CONFIG_FILE_NAME: &str = "notebook-service.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without semantic checks.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Default locations, most specific first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("config").join(CONFIG_FILE_NAME)];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".notebook-service").join(CONFIG_FILE_NAME));
    }
    paths.push(Path::new("/etc/notebook-service").join(CONFIG_FILE_NAME));
    paths
}

/// Read `explicit` if given, otherwise the first existing file from
/// `candidates`. Returns defaults and `None` when nothing is found.
///
/// An explicit path that does not exist is an error.
pub fn discover_config(
    explicit: Option<&Path>,
    candidates: &[PathBuf],
) -> Result<(ServiceConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        return Ok((read_config(path)?, Some(path.to_path_buf())));
    }

    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => Ok((read_config(path)?, Some(path.clone()))),
        None => Ok((ServiceConfig::default(), None)),
    }
}
