//! Miscellaneous helper utilities.

use tracing_subscriber::{EnvFilter, fmt};

/// Log filter used when `RUST_LOG` is unset: crate events at `info`, ethers
/// transport noise at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "info,ethers_providers=warn";

/// Initialize `tracing` subscriber with env-based filter.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
        tracing::info!("[TEST] logging initialized twice");
    }
}
