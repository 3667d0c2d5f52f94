//! Tracing subscriber setup for hosts that do not install their own

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directives used when `RUST_LOG` is unset: provider lifecycle events
/// at `info`, everything else at `warn`.
pub const DEFAULT_DIRECTIVES: &str = "warn,provider_core=info,provider_meta=info";

/// Install a global subscriber that reports provider instantiation and
/// configuration.
///
/// `RUST_LOG` overrides [`DEFAULT_DIRECTIVES`]. Fails if a global
/// subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVES)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;

    Ok(())
}
