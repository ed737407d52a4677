use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber. Output goes to stderr so stdout only
/// carries the report table.
pub fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var("PAGETIME_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level(verbose)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
