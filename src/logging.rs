use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `QURAN_VOCAB_LOG=debug`.
pub const LOG_ENV_VAR: &str = "QURAN_VOCAB_LOG";

/// Installs a stderr subscriber. Defaults to `warn` when the variable is unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
