//! Core library for the `pagetime` CLI.
//!
//! Measures HTTP endpoints sequentially in two modes (response head only and
//! full body) with cache-busting URLs, aggregates the timings per endpoint and
//! writes them as a CSV report and a console table. The primary user-facing
//! interface is the `pagetime` command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod shutdown;
pub mod shutdown_handlers;

mod entry;
mod logger;

pub use entry::run;
