//! Conversion arithmetic and conversion records.
//!
//! Every conversion routes through the common USD unit: there is no pairwise
//! rate table. The steps below run in a fixed order so identical inputs give
//! bit-identical results.

use serde::{Deserialize, Serialize};
use tokenswap_common::{
    ConversionId, Currency, CurrencyPair, CurrencyQuote, Timestamp, BPS_DENOMINATOR,
};

/// Outcome of converting an amount between two quoted currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Units of the target currency per unit of the source currency.
    pub rate: f64,
    /// Gross output before fee and slippage.
    pub amount_out: f64,
    /// Platform fee, in the target currency.
    pub fee_amount: f64,
    /// Guaranteed minimum after slippage tolerance and fee.
    pub min_received: f64,
}

/// Convert `amount_in` of `from` into `to`.
///
/// Inputs are not validated and nothing is clamped: a slippage above 100%
/// or a large fee yields a negative `min_received`. Validation belongs to
/// [`crate::engine::ConversionEngine`].
pub fn convert(
    from: &CurrencyQuote,
    to: &CurrencyQuote,
    amount_in: f64,
    fee_bps: u32,
    slippage_pct: f64,
) -> ConversionResult {
    let rate = from.price_usd() / to.price_usd();
    let amount_out = amount_in * rate;
    let fee_amount = amount_out * (f64::from(fee_bps) / BPS_DENOMINATOR);
    let min_received = amount_out * (1.0 - slippage_pct / 100.0) - fee_amount;

    ConversionResult {
        rate,
        amount_out,
        fee_amount,
        min_received,
    }
}

/// Convert with no fee and no slippage tolerance.
pub fn convert_simple(from: &CurrencyQuote, to: &CurrencyQuote, amount_in: f64) -> ConversionResult {
    convert(from, to, amount_in, 0, 0.0)
}

/// Request to perform a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Currency being sold.
    pub from: Currency,
    /// Currency being bought.
    pub to: Currency,
    /// Amount of `from` to sell.
    pub amount_in: f64,
    /// Platform fee in basis points; engine default when unset.
    pub fee_bps: Option<u32>,
    /// Slippage tolerance in percent; engine default when unset.
    pub slippage_pct: Option<f64>,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(from: Currency, to: Currency, amount_in: f64) -> Self {
        Self {
            from,
            to,
            amount_in,
            fee_bps: None,
            slippage_pct: None,
        }
    }

    /// Apply a platform fee.
    pub fn with_fee_bps(mut self, fee_bps: u32) -> Self {
        self.fee_bps = Some(fee_bps);
        self
    }

    /// Apply a slippage tolerance.
    pub fn with_slippage_pct(mut self, slippage_pct: f64) -> Self {
        self.slippage_pct = Some(slippage_pct);
        self
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }
}

/// A completed conversion, as kept in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: ConversionId,
    pub from: Currency,
    pub to: Currency,
    pub amount_in: f64,
    pub fee_bps: u32,
    pub slippage_pct: f64,
    pub result: ConversionResult,
    pub executed_at: Timestamp,
}

impl ConversionRecord {
    /// Create a new conversion record.
    pub fn new(
        pair: CurrencyPair,
        amount_in: f64,
        fee_bps: u32,
        slippage_pct: f64,
        result: ConversionResult,
    ) -> Self {
        Self {
            id: ConversionId::new(),
            from: pair.from,
            to: pair.to,
            amount_in,
            fee_bps,
            slippage_pct,
            result,
            executed_at: tokenswap_common::now(),
        }
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tokenswap_common::now;

    const EPSILON: f64 = 1e-9;

    fn quote(currency: Currency, price_usd: f64) -> CurrencyQuote {
        CurrencyQuote::new(currency, price_usd, now()).unwrap()
    }

    #[test]
    fn test_convert_without_fee_or_slippage() {
        let eth = quote(Currency::eth(), 3100.0);
        let usdc = quote(Currency::usdc(), 1.0);

        let result = convert(&eth, &usdc, 2.0, 0, 0.0);

        assert_eq!(result.rate, 3100.0);
        assert_eq!(result.amount_out, 6200.0);
        assert_eq!(result.fee_amount, 0.0);
        assert_eq!(result.min_received, 6200.0);
    }

    #[test]
    fn test_convert_with_fee_and_slippage() {
        let eth = quote(Currency::eth(), 3100.0);
        let usdc = quote(Currency::usdc(), 1.0);

        let result = convert(&eth, &usdc, 2.0, 20, 0.5);

        assert_eq!(result.amount_out, 6200.0);
        assert!((result.fee_amount - 12.4).abs() < EPSILON);
        // 6200 * 0.995 = 6169, minus the 12.4 fee.
        assert!((result.min_received - 6156.6).abs() < EPSILON);
    }

    #[test]
    fn test_same_quote_is_identity() {
        let atom = quote(Currency::atom(), 7.186_657_333_333_334);

        let result = convert_simple(&atom, &atom, 123.456);

        assert_eq!(result.rate, 1.0);
        assert_eq!(result.amount_out, 123.456);
        assert_eq!(result.min_received, 123.456);
    }

    #[test]
    fn test_convert_is_referentially_transparent() {
        let from = quote(Currency::new("OSMO"), 0.377_414_437_500_000_04);
        let to = quote(Currency::new("stATOM"), 8.651_285_929_364_89);

        let first = convert(&from, &to, 17.3, 35, 1.25);
        let second = convert(&from, &to, 17.3, 35, 1.25);

        assert_eq!(first.rate.to_bits(), second.rate.to_bits());
        assert_eq!(first.amount_out.to_bits(), second.amount_out.to_bits());
        assert_eq!(first.fee_amount.to_bits(), second.fee_amount.to_bits());
        assert_eq!(first.min_received.to_bits(), second.min_received.to_bits());
    }

    #[test]
    fn test_out_of_range_slippage_is_not_clamped() {
        let eth = quote(Currency::eth(), 3100.0);
        let usdc = quote(Currency::usdc(), 1.0);

        let result = convert(&eth, &usdc, 1.0, 0, 150.0);

        assert!(result.min_received < 0.0);
        assert!((result.min_received + 1550.0).abs() < EPSILON);
    }

    #[test]
    fn test_request_builder() {
        let request = ConversionRequest::new(Currency::eth(), Currency::usdc(), 2.0)
            .with_fee_bps(20)
            .with_slippage_pct(0.5);

        assert_eq!(request.fee_bps, Some(20));
        assert_eq!(request.slippage_pct, Some(0.5));
        assert_eq!(request.pair().to_string(), "ETH/USDC");
    }

    #[test]
    fn test_record_serializes() {
        let eth = quote(Currency::eth(), 3100.0);
        let usdc = quote(Currency::usdc(), 1.0);
        let result = convert_simple(&eth, &usdc, 2.0);

        let record = ConversionRecord::new(
            CurrencyPair::new(Currency::eth(), Currency::usdc()),
            2.0,
            0,
            0.0,
            result,
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["from"], "ETH");
        assert_eq!(json["to"], "USDC");
        assert_eq!(json["result"]["amount_out"], 6200.0);
        assert_eq!(record.pair().to_string(), "ETH/USDC");
    }

    fn arb_price() -> impl Strategy<Value = f64> {
        prop_oneof![1e-6f64..1.0, 1.0f64..1_000_000.0]
    }

    proptest! {
        #[test]
        fn prop_same_quote_is_identity(price in arb_price(), amount_in in 1e-6f64..1e9) {
            let q = quote(Currency::eth(), price);

            let result = convert_simple(&q, &q, amount_in);

            prop_assert_eq!(result.rate, 1.0);
            prop_assert_eq!(result.amount_out, amount_in);
            prop_assert_eq!(result.fee_amount, 0.0);
            prop_assert_eq!(result.min_received, amount_in);
        }

        #[test]
        fn prop_convert_is_bit_identical(
            from_price in arb_price(),
            to_price in arb_price(),
            amount_in in 1e-6f64..1e9,
            fee_bps in 0u32..=10_000,
            slippage_pct in 0.0f64..=100.0,
        ) {
            let from = quote(Currency::eth(), from_price);
            let to = quote(Currency::usdc(), to_price);

            let first = convert(&from, &to, amount_in, fee_bps, slippage_pct);
            let second = convert(&from, &to, amount_in, fee_bps, slippage_pct);

            prop_assert_eq!(first.rate.to_bits(), second.rate.to_bits());
            prop_assert_eq!(first.amount_out.to_bits(), second.amount_out.to_bits());
            prop_assert_eq!(first.fee_amount.to_bits(), second.fee_amount.to_bits());
            prop_assert_eq!(first.min_received.to_bits(), second.min_received.to_bits());
            prop_assert_eq!(first.rate.to_bits(), (from_price / to_price).to_bits());
        }
    }
}
