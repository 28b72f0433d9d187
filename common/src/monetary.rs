//! Currency types and price-unit helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator for basis-point fees.
pub const BPS_DENOMINATOR: f64 = 10_000.0;

/// Token symbol identifying a currency.
///
/// Symbols are case-sensitive (`stATOM` and `STATOM` are different tokens).
/// Only surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let trimmed = symbol.trim();
        if trimmed.len() == symbol.len() {
            Self(symbol)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the symbol.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// A usable symbol is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    /// Common tokens
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn usdc() -> Self {
        Self::new("USDC")
    }

    pub fn eth() -> Self {
        Self::new("ETH")
    }

    pub fn atom() -> Self {
        Self::new("ATOM")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An ordered pair of currencies for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being sold.
    pub from: Currency,
    /// Currency being bought.
    pub to: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }

    /// Get the inverse pair.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Whether both sides name the same currency.
    pub fn is_same_currency(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// A price is usable only when it is finite and strictly positive.
pub fn is_usable_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
