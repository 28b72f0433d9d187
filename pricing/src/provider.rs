//! Price source trait and implementations.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{PricingError, PricingResult};
use crate::feed::RawPriceRecord;

/// Source of raw price feed rows.
///
/// Implementations own the transport; rows come back undecoded so the feed
/// parser can validate each one.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Fetch the current batch of raw rows.
    async fn fetch_records(&self) -> PricingResult<Vec<Value>>;
}

/// In-memory price source, for mock prices and tests.
pub struct StaticPriceSource {
    name: String,
    records: RwLock<Vec<Value>>,
    outage: RwLock<Option<String>>,
}

impl StaticPriceSource {
    /// Create an empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(Vec::new()),
            outage: RwLock::new(None),
        }
    }

    /// Create a source serving a JSON feed payload.
    pub fn from_json(name: impl Into<String>, payload: &str) -> PricingResult<Self> {
        let records = match serde_json::from_str::<Value>(payload)? {
            Value::Array(rows) => rows,
            _ => {
                return Err(PricingError::Feed(
                    "Expected an array of price records".to_string(),
                ))
            }
        };

        Ok(Self {
            name: name.into(),
            records: RwLock::new(records),
            outage: RwLock::new(None),
        })
    }

    /// Add a record.
    pub fn push(&self, record: RawPriceRecord) -> PricingResult<()> {
        let value = serde_json::to_value(record)?;
        self.records.write().push(value);
        Ok(())
    }

    /// Add an arbitrary row, valid or not.
    pub fn push_raw(&self, row: Value) {
        self.records.write().push(row);
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Make fetches fail with `reason` until [`StaticPriceSource::recover`] is called.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.outage.write() = Some(reason.into());
    }

    /// Serve records again after [`StaticPriceSource::fail_with`].
    pub fn recover(&self) {
        *self.outage.write() = None;
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_records(&self) -> PricingResult<Vec<Value>> {
        if let Some(reason) = self.outage.read().clone() {
            return Err(PricingError::Source(format!("{}: {}", self.name, reason)));
        }

        Ok(self.records.read().clone())
    }
}
