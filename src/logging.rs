use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding an `EnvFilter` directive, e.g. `grepctx=debug`
pub const LOG_ENV: &str = "GREPCTX_LOG";

/// Install the global subscriber; logs go to stderr so stdout stays parseable
pub fn init_logging(verbose: bool, quiet: bool, ansi: bool) -> Result<()> {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("logging initialized");
    Ok(())
}
