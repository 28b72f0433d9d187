//! Intake of the raw price feed.
//!
//! The feed is a JSON array of `{ "currency", "price", "date" }` rows. It is
//! untrusted: each row is checked on its own and turned into a typed
//! [`PriceObservation`] or skipped. One bad row never sinks the batch.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tokenswap_common::{ObservationError, PriceObservation};
use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult};

/// Wire shape of one feed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    pub currency: String,
    pub price: f64,
    pub date: String,
}

impl RawPriceRecord {
    pub fn new(currency: impl Into<String>, price: f64, date: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            price,
            date: date.into(),
        }
    }

    /// Validate into an observation.
    pub fn to_observation(&self) -> Result<PriceObservation, ObservationError> {
        PriceObservation::parse(&self.currency, self.price, &self.date)
    }
}

/// Observations admitted from one feed payload.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    /// Rows that passed validation, in input order.
    pub observations: Vec<PriceObservation>,
    /// Number of rows skipped.
    pub rejected: usize,
}

impl FeedBatch {
    /// Total rows seen.
    pub fn total(&self) -> usize {
        self.observations.len() + self.rejected
    }
}

/// Parse a feed payload.
///
/// Fails only when the payload is not JSON or its top level is not an array.
pub fn parse_feed(payload: &str) -> PricingResult<FeedBatch> {
    let value: Value = serde_json::from_str(payload)?;

    match value {
        Value::Array(rows) => Ok(parse_rows(&rows)),
        other => Err(PricingError::Feed(format!(
            "Expected an array of price records, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Validate already-decoded rows.
pub fn parse_rows(rows: &[Value]) -> FeedBatch {
    let mut batch = FeedBatch::default();

    for (index, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Ok(observation) => batch.observations.push(observation),
            Err(e) => {
                warn!(
                    index,
                    code = e.error_code(),
                    error = %e,
                    "Skipping malformed price record"
                );
                batch.rejected += 1;
            }
        }
    }

    debug!(
        admitted = batch.observations.len(),
        rejected = batch.rejected,
        "Parsed price feed"
    );

    batch
}

/// Validate a single row.
pub fn parse_row(row: &Value) -> Result<PriceObservation, ObservationError> {
    let fields = row.as_object().ok_or(ObservationError::NotAnObject)?;

    let currency = match fields.get("currency") {
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(ObservationError::WrongType {
                field: "currency",
                expected: "string",
            })
        }
        None => return Err(ObservationError::MissingField("currency")),
    };

    let price = match fields.get("price") {
        Some(Value::Number(n)) => number_to_f64(n)?,
        Some(_) => {
            return Err(ObservationError::WrongType {
                field: "price",
                expected: "number",
            })
        }
        None => return Err(ObservationError::MissingField("price")),
    };

    let date = match fields.get("date") {
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(ObservationError::WrongType {
                field: "date",
                expected: "string",
            })
        }
        None => return Err(ObservationError::MissingField("date")),
    };

    PriceObservation::parse(currency, price, date)
}

/// Read a JSON number as `f64`, keeping literals that overflow as infinity.
fn number_to_f64(n: &Number) -> Result<f64, ObservationError> {
    n.as_f64()
        .or_else(|| n.to_string().parse::<f64>().ok())
        .ok_or(ObservationError::WrongType {
            field: "price",
            expected: "number",
        })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
