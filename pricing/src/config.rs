//! Pricing configuration.

use crate::error::{PricingError, PricingResult};

/// Default number of conversions kept in the session history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Main pricing configuration.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Platform fee applied when a request does not set one, in basis points.
    pub default_fee_bps: u32,
    /// Slippage tolerance applied when a request does not set one, in percent.
    pub default_slippage_pct: f64,
    /// Maximum fee accepted on a request, in basis points.
    pub max_fee_bps: u32,
    /// Number of conversions kept in history.
    pub history_capacity: usize,
    /// Log level.
    pub log_level: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_fee_bps: 0,
            default_slippage_pct: 0.0,
            max_fee_bps: 10_000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}

impl PricingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(fee) = std::env::var("PRICING_FEE_BPS") {
            if let Ok(fee) = fee.parse() {
                config.default_fee_bps = fee;
            }
        }

        if let Ok(slippage) = std::env::var("PRICING_SLIPPAGE_PCT") {
            if let Ok(slippage) = slippage.parse() {
                config.default_slippage_pct = slippage;
            }
        }

        if let Ok(max_fee) = std::env::var("PRICING_MAX_FEE_BPS") {
            if let Ok(max_fee) = max_fee.parse() {
                config.max_fee_bps = max_fee;
            }
        }

        if let Ok(capacity) = std::env::var("PRICING_HISTORY_CAPACITY") {
            if let Ok(capacity) = capacity.parse() {
                config.history_capacity = capacity;
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> PricingResult<()> {
        if !(0.0..=100.0).contains(&self.default_slippage_pct) {
            return Err(PricingError::Config(format!(
                "Default slippage {}% must be within 0..=100",
                self.default_slippage_pct
            )));
        }

        if self.default_fee_bps > self.max_fee_bps {
            return Err(PricingError::Config(
                "Default fee cannot exceed max fee".to_string(),
            ));
        }

        if self.history_capacity == 0 {
            return Err(PricingError::Config(
                "History capacity cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}
