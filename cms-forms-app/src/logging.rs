//! Logging initialisation
//!
//! Library crates log through the `log` facade; the subscriber installed here
//! also receives those records.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppError;

/// Install the fmt subscriber writing to stderr.
///
/// `RUST_LOG` overrides `default_level` (e.g. `RUST_LOG=cms_forms_provider=debug`).
/// Fails when a global subscriber is already set.
pub fn init_logging(default_level: tracing::Level) -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
