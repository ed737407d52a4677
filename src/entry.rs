use std::io::IsTerminal;

use clap::Parser;

use crate::args::RunArgs;
use crate::config::{RunSettings, load_config, resolve_settings};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientOptions, HttpSampler, resolve_pages};
use crate::report::{
    ConsoleProgress, build_table, print_console_table, print_run_header, write_csv,
};
use crate::runner::{MeasurementRunner, RunnerConfig};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

/// Parses the command line, runs the benchmark and writes the report.
///
/// # Errors
///
/// Returns an error for invalid configuration, an HTTP client that cannot be
/// built, a CSV file that cannot be written, or a cancelled run.
pub fn run() -> AppResult<()> {
    let args = RunArgs::parse();

    crate::logger::init_logging(args.verbose, args.color_disabled());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args)).inspect_err(|err| {
        tracing::error!("{}", err);
        if err.is_configuration() {
            tracing::error!("See `pagetime --help` for the available options.");
        }
    })
}

async fn run_async(args: &RunArgs) -> AppResult<()> {
    let file = load_config(args.config.as_deref())?;
    let settings = resolve_settings(args, file)?;
    let endpoints = resolve_pages(&settings.base_url, &settings.pages);
    if endpoints.len() != settings.pages.len() {
        tracing::warn!(
            "Ignoring {} duplicate page(s).",
            settings.pages.len().saturating_sub(endpoints.len())
        );
    }

    let color = !args.color_disabled();
    let stdout_color = color && std::io::stdout().is_terminal();
    let stderr_color = color && std::io::stderr().is_terminal();
    print_run_header(
        &mut std::io::stdout().lock(),
        &settings,
        endpoints.len(),
        stdout_color,
    )?;

    let sampler = HttpSampler::new(&client_options(&settings))?;
    let runner = MeasurementRunner::new(
        sampler,
        RunnerConfig {
            requests: settings.requests,
            include_ttfb: settings.ttfb,
        },
    );

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let mut progress = ConsoleProgress::new(!args.no_progress, stderr_color);

    let report = runner.run(&endpoints, &mut progress, &mut shutdown_rx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::debug!("Signal handler task ended abnormally: {}", err);
    }

    let table = build_table(&report.records, settings.ttfb);
    write_csv(&settings.output, &table).await?;
    tracing::info!(
        "Wrote {} record(s) ({} failed) to {}",
        report.records.len(),
        report.failures(),
        settings.output.display()
    );

    if !args.no_table {
        print_console_table(&mut std::io::stdout().lock(), &table, stdout_color)?;
    }

    if report.cancelled {
        return Err(AppError::validation(ValidationError::Cancelled));
    }
    Ok(())
}

const fn client_options(settings: &RunSettings) -> ClientOptions {
    ClientOptions {
        request_timeout: settings.request_timeout,
        connect_timeout: settings.connect_timeout,
        keepalive: settings.keepalive,
    }
}
