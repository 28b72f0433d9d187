//! Conversion engine: validates requests against the current price table.

use std::sync::Arc;

use parking_lot::RwLock;
use tokenswap_common::{Currency, CurrencyQuote};
use tracing::{debug, info, instrument};

use crate::config::PricingConfig;
use crate::conversion::{convert, ConversionRecord, ConversionRequest, ConversionResult};
use crate::error::{PricingError, PricingResult};
use crate::feed::{parse_rows, FeedBatch};
use crate::history::ConversionHistory;
use crate::provider::PriceSource;
use crate::table::PriceTable;
use crate::wallet::Wallet;

/// The conversion engine.
///
/// Holds the current price snapshot and the session history. All checks a
/// caller needs before [`convert`] runs live here; the arithmetic itself
/// stays a pure function.
pub struct ConversionEngine {
    table: RwLock<Arc<PriceTable>>,
    history: ConversionHistory,
    config: PricingConfig,
}

impl ConversionEngine {
    /// Create a new engine with an empty price table.
    pub fn new(config: PricingConfig) -> Self {
        Self {
            table: RwLock::new(Arc::new(PriceTable::new())),
            history: ConversionHistory::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Create an engine over an existing table.
    pub fn with_table(table: PriceTable, config: PricingConfig) -> Self {
        let engine = Self::new(config);
        engine.replace_table(table);
        engine
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Current price snapshot.
    pub fn table(&self) -> Arc<PriceTable> {
        self.table.read().clone()
    }

    /// Install a new price snapshot.
    pub fn replace_table(&self, table: PriceTable) {
        *self.table.write() = Arc::new(table);
    }

    /// Fetch rows from `source`, reduce them and swap in the new snapshot.
    ///
    /// A failed fetch leaves the current snapshot in place.
    #[instrument(skip(self, source), fields(source = source.name()))]
    pub async fn refresh(&self, source: &dyn PriceSource) -> PricingResult<FeedBatch> {
        let rows = source.fetch_records().await?;
        let batch = parse_rows(&rows);

        let table = PriceTable::from_observations(batch.observations.iter().cloned());

        info!(
            rows = batch.total(),
            rejected = batch.rejected,
            currencies = table.len(),
            "Price table refreshed"
        );

        self.replace_table(table);
        Ok(batch)
    }

    /// Look up the quote for a currency.
    pub fn quote_for(&self, currency: &Currency) -> PricingResult<CurrencyQuote> {
        self.table
            .read()
            .quote(currency)
            .cloned()
            .ok_or_else(|| PricingError::PriceUnavailable(currency.clone()))
    }

    /// Validate a request and compute its result.
    #[instrument(skip(self, request), fields(pair = %request.pair(), amount_in = request.amount_in))]
    pub fn quote(&self, request: &ConversionRequest) -> PricingResult<ConversionResult> {
        let (fee_bps, slippage_pct) = self.validate(request)?;

        let table = self.table();
        let from = table
            .quote(&request.from)
            .ok_or_else(|| PricingError::PriceUnavailable(request.from.clone()))?;
        let to = table
            .quote(&request.to)
            .ok_or_else(|| PricingError::PriceUnavailable(request.to.clone()))?;

        let result = convert(from, to, request.amount_in, fee_bps, slippage_pct);

        debug!(
            rate = result.rate,
            amount_out = result.amount_out,
            min_received = result.min_received,
            "Conversion quoted"
        );

        Ok(result)
    }

    /// Check the wallet covers the amount, then quote.
    pub fn quote_from_wallet(
        &self,
        wallet: &Wallet,
        request: &ConversionRequest,
    ) -> PricingResult<ConversionResult> {
        self.validate(request)?;
        wallet.ensure_sufficient(&request.from, request.amount_in)?;
        self.quote(request)
    }

    /// Quote a request and append it to the history.
    pub fn execute(&self, request: &ConversionRequest) -> PricingResult<ConversionRecord> {
        let result = self.quote(request)?;
        let (fee_bps, slippage_pct) = self.effective_terms(request);

        let record = ConversionRecord::new(
            request.pair(),
            request.amount_in,
            fee_bps,
            slippage_pct,
            result,
        );

        info!(
            conversion_id = %record.id,
            pair = %request.pair(),
            amount_out = result.amount_out,
            "Conversion completed"
        );

        self.history.record(record.clone());
        Ok(record)
    }

    /// Recent conversions, newest first.
    pub fn history(&self) -> Vec<ConversionRecord> {
        self.history.recent()
    }

    /// Clear the conversion history.
    pub fn clear_history(&self) {
        self.history.clear();
        debug!("Conversion history cleared");
    }

    /// Fee and slippage after applying configured defaults.
    fn effective_terms(&self, request: &ConversionRequest) -> (u32, f64) {
        (
            request.fee_bps.unwrap_or(self.config.default_fee_bps),
            request
                .slippage_pct
                .unwrap_or(self.config.default_slippage_pct),
        )
    }

    /// Precondition checks, in order: same currency, amount, slippage, fee.
    fn validate(&self, request: &ConversionRequest) -> PricingResult<(u32, f64)> {
        if request.from == request.to {
            return Err(PricingError::SameCurrency(request.from.clone()));
        }

        if !request.amount_in.is_finite() || request.amount_in <= 0.0 {
            return Err(PricingError::InvalidAmount(request.amount_in));
        }

        let (fee_bps, slippage_pct) = self.effective_terms(request);

        if !(0.0..=100.0).contains(&slippage_pct) {
            return Err(PricingError::InvalidSlippage(slippage_pct));
        }

        if fee_bps > self.config.max_fee_bps {
            return Err(PricingError::FeeTooHigh {
                fee_bps,
                max_bps: self.config.max_fee_bps,
            });
        }

        Ok((fee_bps, slippage_pct))
    }
}
