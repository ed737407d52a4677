use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("pagetime/", env!("CARGO_PKG_VERSION"));

/// Config filenames checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 4] = [
    "pagetime.yml",
    "pagetime.yaml",
    "pagetime.toml",
    "pagetime.json",
];

pub(crate) const DEFAULT_OUTPUT_PATH: &str = "pagetime-report.csv";

/// Upper bound for one attempt; a stalled endpoint becomes a failed sample.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
