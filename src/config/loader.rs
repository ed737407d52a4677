use std::path::{Path, PathBuf};

use crate::args::DEFAULT_CONFIG_FILES;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Loads a configuration file from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when no config file can be found, or when the file
/// cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<ConfigFile> {
    if let Some(path) = path {
        return load_config_file(Path::new(path));
    }

    let found = DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists());
    match found {
        Some(candidate) => load_config_file(&candidate),
        None => Err(AppError::config(ConfigError::NotFound {
            candidates: DEFAULT_CONFIG_FILES.join(", "),
        })),
    }
}

/// Reads one config file, choosing the parser by extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or does not deserialize into a [`ConfigFile`].
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => parse_yaml(path, &content),
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

fn parse_yaml(path: &Path, content: &str) -> AppResult<ConfigFile> {
    // An empty document deserializes as unit; treat it as "no keys set".
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|err| {
        AppError::config(ConfigError::ParseYaml {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
