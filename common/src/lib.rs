//! TokenSwap Common Types
//!
//! This crate contains the types shared across the TokenSwap pricing core,
//! including currency symbols, price observations and quotes, identifiers
//! and timestamp handling.

pub mod identifiers;
pub mod monetary;
pub mod price;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use price::*;
pub use error::*;
pub use time::*;
