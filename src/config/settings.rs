use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::args::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_OUTPUT_PATH, DEFAULT_REQUEST_TIMEOUT, PositiveU64, RunArgs,
};
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::resolve_base_url;

use super::types::{ConfigFile, DurationValue};

/// Fully validated inputs for one measurement run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Base URL normalized to exactly one trailing slash.
    pub base_url: String,
    pub host: String,
    pub pages: Vec<String>,
    pub requests: PositiveU64,
    pub ttfb: bool,
    /// Connections are pooled between attempts only when set.
    pub keepalive: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub output: PathBuf,
}

/// Merges CLI overrides onto the config file and validates the result.
///
/// # Errors
///
/// Returns a configuration error when `base`, `pages` or `requests` are
/// missing or invalid, or when a timeout cannot be parsed.
pub fn resolve_settings(args: &RunArgs, file: ConfigFile) -> AppResult<RunSettings> {
    let raw_base = args
        .base
        .clone()
        .or(file.base)
        .ok_or_else(|| AppError::config(ConfigError::MissingKey { key: "base" }))?;
    let base_url = resolve_base_url(&raw_base);
    let host = validate_base_url(&base_url)?;

    let pages = file
        .pages
        .ok_or_else(|| AppError::config(ConfigError::MissingKey { key: "pages" }))?;
    if pages.is_empty() {
        return Err(AppError::config(ConfigError::NoPages));
    }

    let requests = match args.requests {
        Some(requests) => requests,
        None => {
            let value = file
                .requests
                .ok_or_else(|| {
                    AppError::config(ConfigError::MissingKey { key: "requests" })
                })?;
            PositiveU64::try_from(value).map_err(|err| {
                AppError::config(ConfigError::FieldMustBePositive {
                    field: "requests",
                    source: err,
                })
            })?
        }
    };

    let request_timeout = resolve_timeout(
        args.timeout,
        file.timeout.as_ref(),
        "timeout",
        DEFAULT_REQUEST_TIMEOUT,
    )?;
    let connect_timeout = resolve_timeout(
        args.connect_timeout,
        file.connect_timeout.as_ref(),
        "connect_timeout",
        DEFAULT_CONNECT_TIMEOUT,
    )?;

    let output = args
        .output
        .clone()
        .or(file.output)
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH), PathBuf::from);

    Ok(RunSettings {
        base_url,
        host,
        pages,
        requests,
        ttfb: args.ttfb.or(file.ttfb).unwrap_or(false),
        keepalive: args.keepalive.or(file.keepalive).unwrap_or(false),
        request_timeout,
        connect_timeout,
        output,
    })
}

fn validate_base_url(base_url: &str) -> AppResult<String> {
    let parsed = Url::parse(base_url).map_err(|err| {
        AppError::config(ConfigError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::config(ConfigError::UnsupportedScheme {
            url: base_url.to_owned(),
        }));
    }
    let host = parsed.host_str().unwrap_or_default();
    Ok(parsed
        .port()
        .map_or_else(|| host.to_owned(), |port| format!("{}:{}", host, port)))
}

fn resolve_timeout(
    cli: Option<Duration>,
    file: Option<&DurationValue>,
    field: &'static str,
    default: Duration,
) -> AppResult<Duration> {
    if let Some(value) = cli {
        return Ok(value);
    }
    file.map_or(Ok(default), |value| {
        value
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
    })
}
