use clap::Parser;
use std::time::Duration;

use super::parsers::{
    no_color_requested, parse_bool_env, parse_duration_arg, parse_positive_u64,
};
use super::types::PositiveU64;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Sequential HTTP endpoint latency benchmark: header-only and full-body timings per page, reported as CSV and a console table."
)]
pub struct RunArgs {
    /// Path to config file (YAML/TOML/JSON). Defaults to ./pagetime.yml (or .yaml/.toml/.json) if present.
    #[arg(long, short = 'c', env = "PAGETIME_CONFIG")]
    pub config: Option<String>,

    /// Base URL the configured pages are resolved against (overrides config `base`)
    #[arg(long, short = 'b', env = "PAGETIME_BASE")]
    pub base: Option<String>,

    /// Requests per page and mode (overrides config `requests`)
    #[arg(long, short = 'n', env = "PAGETIME_REQUESTS", value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Also report time-to-first-byte statistics (overrides config `ttfb`)
    #[arg(long, env = "PAGETIME_TTFB", value_parser = parse_bool_env, num_args = 0..=1, default_missing_value = "true")]
    pub ttfb: Option<bool>,

    /// Timeout for one request attempt (supports ms/s/m/h)
    #[arg(long, env = "PAGETIME_TIMEOUT", value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Timeout for establishing a connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", env = "PAGETIME_CONNECT_TIMEOUT", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Reuse connections between attempts (overrides config `keepalive`)
    #[arg(long, env = "PAGETIME_KEEPALIVE", value_parser = parse_bool_env, num_args = 0..=1, default_missing_value = "true")]
    pub keepalive: Option<bool>,

    /// CSV report path (defaults to ./pagetime-report.csv)
    #[arg(long, short = 'o', env = "PAGETIME_OUTPUT")]
    pub output: Option<String>,

    /// Do not render the report table on stdout
    #[arg(long = "no-table")]
    pub no_table: bool,

    /// Do not print a progress glyph per request
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Disable color output (also disabled by a non-empty NO_COLOR)
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by PAGETIME_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl RunArgs {
    /// `--no-color`, or any non-empty `NO_COLOR` in the environment.
    #[must_use]
    pub fn color_disabled(&self) -> bool {
        self.no_color || no_color_requested(std::env::var_os("NO_COLOR").as_deref())
    }
}
