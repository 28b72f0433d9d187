//! Pricing error types.

use thiserror::Error;
use tokenswap_common::Currency;

/// Errors raised by the layer that guards and drives conversions.
///
/// The arithmetic in [`crate::conversion`] never fails; everything here is
/// a precondition checked before it runs, or an intake failure.
#[derive(Debug, Error)]
pub enum PricingError {
    /// No usable quote for the currency in the current table.
    #[error("Price not available for {0}")]
    PriceUnavailable(Currency),

    /// Source and target currency are the same.
    #[error("Cannot convert {0} to itself")]
    SameCurrency(Currency),

    /// Amount is not finite and positive.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Slippage tolerance outside 0..=100 percent.
    #[error("Invalid slippage: {0}%")]
    InvalidSlippage(f64),

    /// Fee exceeds the configured maximum.
    #[error("Fee {fee_bps} bps exceeds maximum {max_bps} bps")]
    FeeTooHigh { fee_bps: u32, max_bps: u32 },

    /// Wallet cannot cover the requested amount.
    #[error("Insufficient {currency} balance: requested {requested}, available {available}")]
    InsufficientBalance {
        currency: Currency,
        requested: f64,
        available: f64,
    },

    /// Feed payload could not be read at all.
    #[error("Feed error: {0}")]
    Feed(String),

    /// Price source failed to deliver records.
    #[error("Price source error: {0}")]
    Source(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PricingError {
    /// Get a stable error code for UI messages.
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::PriceUnavailable(_) => "PRICE_UNAVAILABLE",
            PricingError::SameCurrency(_) => "SAME_CURRENCY",
            PricingError::InvalidAmount(_) => "INVALID_AMOUNT",
            PricingError::InvalidSlippage(_) => "INVALID_SLIPPAGE",
            PricingError::FeeTooHigh { .. } => "FEE_TOO_HIGH",
            PricingError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            PricingError::Feed(_) => "FEED_ERROR",
            PricingError::Source(_) => "SOURCE_ERROR",
            PricingError::Config(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether retrying the same request later may succeed.
    ///
    /// Only failures tied to the price snapshot or its source qualify; a
    /// refresh can bring a missing price back.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PricingError::PriceUnavailable(_) | PricingError::Source(_)
        )
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::Feed(err.to_string())
    }
}

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
