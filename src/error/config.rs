use super::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML config '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .yml, .yaml, .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have a .yml, .yaml, .toml or .json extension.")]
    MissingExtension,
    #[error("No config file given and none of {candidates} found in the working directory.")]
    NotFound { candidates: String },
    #[error("Config is missing required key '{key}'.")]
    MissingKey { key: &'static str },
    #[error("Config 'pages' must list at least one path.")]
    NoPages,
    #[error("Config '{field}' must be >= 1: {source}")]
    FieldMustBePositive {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid config '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
