//! Logging setup.
//!
//! Events go to stderr so stdout carries only command output. The filter is
//! taken from `RUST_LOG` when set, otherwise from the requested default level.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "debstats={0},package_statistics={0}",
            default_level
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init("warn");
        init("debug");
        tracing::debug!("logging initialised");
    }
}
