use thiserror::Error;

use super::{ConfigError, HttpError, ReportError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    /// Configuration problems are caught before any request is sent.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        match self {
            Self::Validation(ValidationError::Cancelled) => false,
            Self::Config(_) | Self::Validation(_) | Self::Clap { .. } => true,
            Self::Io { .. } | Self::Http(_) | Self::Report(_) => false,
        }
    }
}
