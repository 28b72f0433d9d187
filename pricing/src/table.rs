//! Latest-price reduction and the quote lookup table.

use std::collections::HashMap;

use tokenswap_common::{Currency, CurrencyQuote, PriceObservation, Timestamp};
use tracing::debug;

/// A snapshot of one usable quote per currency.
///
/// Built once per fetch cycle and read by the conversion layer. Lookups go
/// through a single map; callers pick the fallback explicitly with
/// [`PriceTable::price_usd_or`].
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    quotes: HashMap<Currency, CurrencyQuote>,
}

impl PriceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce raw observations to one latest, usable quote per currency.
    ///
    /// For each currency the observation with the greatest `observed_at`
    /// is selected; on equal timestamps the one later in the input wins.
    /// The selected observation is then dropped if its price is not finite
    /// and positive, so a bad latest sample hides older good ones.
    ///
    /// Output is sorted by currency symbol.
    pub fn reduce<I>(observations: I) -> Vec<CurrencyQuote>
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        let mut latest: HashMap<Currency, PriceObservation> = HashMap::new();

        for observation in observations {
            let replaces = latest
                .get(&observation.currency)
                .map_or(true, |current| observation.observed_at >= current.observed_at);

            if replaces {
                latest.insert(observation.currency.clone(), observation);
            }
        }

        let mut quotes: Vec<CurrencyQuote> = latest
            .into_values()
            .filter_map(|observation| {
                let currency = observation.currency.clone();
                let quote = observation.into_quote();
                if quote.is_none() {
                    debug!(currency = %currency, "Dropping unusable latest price");
                }
                quote
            })
            .collect();

        quotes.sort_by(|a, b| a.currency().cmp(b.currency()));
        quotes
    }

    /// Build a table from raw observations.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = PriceObservation>,
    {
        Self::from_quotes(Self::reduce(observations))
    }

    /// Build a table from quotes. A later quote for the same currency replaces an earlier one.
    pub fn from_quotes<I>(quotes: I) -> Self
    where
        I: IntoIterator<Item = CurrencyQuote>,
    {
        let quotes = quotes
            .into_iter()
            .map(|quote| (quote.currency().clone(), quote))
            .collect();
        Self { quotes }
    }

    /// Get the quote for a currency.
    pub fn quote(&self, currency: &Currency) -> Option<&CurrencyQuote> {
        self.quotes.get(currency)
    }

    /// Get the USD price of a currency, or `fallback` when it is not quoted.
    pub fn price_usd_or(&self, currency: &Currency, fallback: f64) -> f64 {
        self.quotes
            .get(currency)
            .map(CurrencyQuote::price_usd)
            .unwrap_or(fallback)
    }

    /// Check if a currency is quoted.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.quotes.contains_key(currency)
    }

    /// All quotes, sorted by currency symbol.
    pub fn quotes(&self) -> Vec<CurrencyQuote> {
        let mut quotes: Vec<CurrencyQuote> = self.quotes.values().cloned().collect();
        quotes.sort_by(|a, b| a.currency().cmp(b.currency()));
        quotes
    }

    /// All quoted currencies, sorted.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.quotes.keys().cloned().collect();
        currencies.sort();
        currencies
    }

    /// Most recent `as_of` across the table.
    pub fn latest_as_of(&self) -> Option<Timestamp> {
        self.quotes.values().map(CurrencyQuote::as_of).max()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
