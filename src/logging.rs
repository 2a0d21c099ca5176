use tracing_subscriber::EnvFilter;

/// Variable holding an `EnvFilter` directive that overrides `--debug`.
pub const LOG_ENV: &str = "BURROW_LOG";

/// Installs the stderr subscriber. Calling it twice is harmless.
pub fn init(debug: bool) {
    let default_level = if debug { "burrow=debug" } else { "warn" };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
