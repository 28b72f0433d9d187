//! TokenSwap Pricing
//!
//! Price table reduction and conversion arithmetic for a token-swap front end.
//!
//! # Features
//!
//! - Validation of the raw `{currency, price, date}` price feed
//! - Latest-price deduplication into one quote per currency
//! - Cross-rate conversion through USD with fee and slippage math
//! - Bounded session history of executed conversions
//! - Wallet balances ordered by blockchain priority
//!
//! # Example
//!
//! ```rust,ignore
//! use tokenswap_pricing::{ConversionEngine, ConversionRequest, PricingConfig, StaticPriceSource};
//! use tokenswap_common::Currency;
//!
//! let engine = ConversionEngine::new(PricingConfig::default());
//! engine.refresh(&source).await?;
//!
//! let request = ConversionRequest::new(Currency::eth(), Currency::usdc(), 2.0)
//!     .with_fee_bps(20)
//!     .with_slippage_pct(0.5);
//! let record = engine.execute(&request)?;
//! ```

pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod feed;
pub mod history;
pub mod provider;
pub mod table;
pub mod telemetry;
pub mod wallet;

pub use config::PricingConfig;
pub use conversion::{
    convert, convert_simple, ConversionRecord, ConversionRequest, ConversionResult,
};
pub use engine::ConversionEngine;
pub use error::{PricingError, PricingResult};
pub use feed::{parse_feed, FeedBatch, RawPriceRecord};
pub use history::ConversionHistory;
pub use provider::{PriceSource, StaticPriceSource};
pub use table::PriceTable;
pub use telemetry::init_tracing;
pub use wallet::{PriorityTable, Wallet, WalletBalance, WalletRow};
