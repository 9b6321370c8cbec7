//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; command output stays on stdout.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "buildplan=warn";

/// Install the global subscriber.
///
/// The level comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
/// (or `buildplan=debug` when `verbose` is set). Installing twice is an error.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fallback = if verbose {
        "buildplan=debug"
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_without_panicking() {
        let _ = init(false);
        assert!(init(true).is_err());

        tracing::debug!("logging initialized");
    }
}
