use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

/// On-disk benchmark definition. Every key is optional here so CLI flags can
/// fill gaps; required keys are enforced by `resolve_settings`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base: Option<String>,
    pub pages: Option<Vec<String>>,
    pub requests: Option<u64>,
    pub ttfb: Option<bool>,
    pub keepalive: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
