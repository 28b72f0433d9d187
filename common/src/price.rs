//! Price observations and reduced quotes.

use serde::Serialize;

use crate::error::ObservationError;
use crate::monetary::{is_usable_price, Currency};
use crate::time::{parse_timestamp, Timestamp};

/// One reported price sample, in USD.
///
/// The price is kept as reported, including zero, negative or non-finite
/// values. Whether the sample is usable is decided when a price table is
/// reduced, after the latest sample per currency has been selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceObservation {
    pub currency: Currency,
    pub price: f64,
    pub observed_at: Timestamp,
}

impl PriceObservation {
    /// Create an observation from typed parts.
    pub fn new(
        currency: Currency,
        price: f64,
        observed_at: Timestamp,
    ) -> Result<Self, ObservationError> {
        if !currency.is_valid() {
            return Err(ObservationError::EmptyCurrency);
        }

        Ok(Self {
            currency,
            price,
            observed_at,
        })
    }

    /// Create an observation from raw feed strings.
    pub fn parse(currency: &str, price: f64, date: &str) -> Result<Self, ObservationError> {
        let observed_at = parse_timestamp(date)?;
        Self::new(Currency::new(currency), price, observed_at)
    }

    /// Whether the reported price is finite and positive.
    pub fn has_usable_price(&self) -> bool {
        is_usable_price(self.price)
    }

    /// Turn into a quote, or `None` when the price is unusable.
    pub fn into_quote(self) -> Option<CurrencyQuote> {
        CurrencyQuote::new(self.currency, self.price, self.observed_at)
    }
}

/// The authoritative USD price for one currency.
///
/// `price_usd` is always finite and strictly positive; the only way to build
/// a quote is through [`CurrencyQuote::new`], which enforces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyQuote {
    currency: Currency,
    price_usd: f64,
    as_of: Timestamp,
}

impl CurrencyQuote {
    /// Create a quote, or `None` when `price_usd` is not finite and positive.
    pub fn new(currency: Currency, price_usd: f64, as_of: Timestamp) -> Option<Self> {
        if !currency.is_valid() || !is_usable_price(price_usd) {
            return None;
        }

        Some(Self {
            currency,
            price_usd,
            as_of,
        })
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn price_usd(&self) -> f64 {
        self.price_usd
    }

    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn test_observation_keeps_raw_price() {
        let obs = PriceObservation::parse("ETH", 0.0, "2024-01-01").unwrap();
        assert_eq!(obs.price, 0.0);
        assert!(!obs.has_usable_price());
        assert!(obs.into_quote().is_none());
    }

    #[test]
    fn test_observation_rejects_empty_currency() {
        assert_eq!(
            PriceObservation::parse(" ", 1.0, "2024-01-01"),
            Err(ObservationError::EmptyCurrency)
        );
    }

    #[test]
    fn test_observation_rejects_bad_date() {
        assert!(matches!(
            PriceObservation::parse("ETH", 1.0, "01/02/2024"),
            Err(ObservationError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_quote_requires_usable_price() {
        let ts = now();
        assert!(CurrencyQuote::new(Currency::eth(), 3100.0, ts).is_some());
        assert!(CurrencyQuote::new(Currency::eth(), 0.0, ts).is_none());
        assert!(CurrencyQuote::new(Currency::eth(), -1.0, ts).is_none());
        assert!(CurrencyQuote::new(Currency::eth(), f64::NAN, ts).is_none());
        assert!(CurrencyQuote::new(Currency::new(""), 1.0, ts).is_none());
    }

    #[test]
    fn test_quote_accessors() {
        let obs = PriceObservation::parse("USDC", 1.0, "2024-01-01").unwrap();
        let as_of = obs.observed_at;
        let quote = obs.into_quote().unwrap();

        assert_eq!(quote.currency(), &Currency::usdc());
        assert_eq!(quote.price_usd(), 1.0);
        assert_eq!(quote.as_of(), as_of);
    }
}
