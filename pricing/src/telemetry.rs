//! Tracing subscriber setup.

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult};

/// Install a JSON tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this when
/// a global subscriber is already installed is a no-op.
pub fn init_tracing(config: &PricingConfig) -> PricingResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| PricingError::Config(format!("Invalid log level: {}", e)))?;

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
    {
        debug!(error = %e, "Tracing subscriber already installed");
    }

    Ok(())
}
