//! Wallet balances and blockchain priority ordering.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tokenswap_common::Currency;

use crate::error::{PricingError, PricingResult};
use crate::table::PriceTable;

/// Priority given to blockchains missing from the table.
pub const UNKNOWN_PRIORITY: i32 = -99;

/// Blockchain display priority, with a fallback for unknown chains.
#[derive(Debug, Clone)]
pub struct PriorityTable {
    priorities: HashMap<String, i32>,
    fallback: i32,
}

impl PriorityTable {
    /// Create an empty table with the given fallback.
    pub fn new(fallback: i32) -> Self {
        Self {
            priorities: HashMap::new(),
            fallback,
        }
    }

    /// Set the priority for a blockchain.
    pub fn with(mut self, blockchain: impl Into<String>, priority: i32) -> Self {
        self.priorities.insert(blockchain.into(), priority);
        self
    }

    /// Get the priority for a blockchain, or the fallback.
    pub fn priority(&self, blockchain: &str) -> i32 {
        self.priorities
            .get(blockchain)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Whether a blockchain has an explicit entry above the fallback.
    pub fn is_ranked(&self, blockchain: &str) -> bool {
        self.priority(blockchain) > self.fallback
    }

    pub fn fallback(&self) -> i32 {
        self.fallback
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self::new(UNKNOWN_PRIORITY)
            .with("Osmosis", 100)
            .with("Ethereum", 50)
            .with("Arbitrum", 30)
            .with("Zilliqa", 20)
            .with("Neo", 20)
    }
}

/// A balance held on one blockchain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub currency: Currency,
    pub amount: f64,
    pub blockchain: String,
}

impl WalletBalance {
    pub fn new(currency: Currency, amount: f64, blockchain: impl Into<String>) -> Self {
        Self {
            currency,
            amount,
            blockchain: blockchain.into(),
        }
    }
}

/// A balance ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletRow {
    pub balance: WalletBalance,
    pub priority: i32,
    /// Amount rounded to two decimal places.
    pub formatted: Decimal,
    /// USD value; zero when the currency has no quote.
    pub usd_value: f64,
}

/// A set of balances, e.g. the mock balances backing a swap form.
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    balances: Vec<WalletBalance>,
}

impl Wallet {
    pub fn new(balances: Vec<WalletBalance>) -> Self {
        Self { balances }
    }

    /// Add a balance.
    pub fn push(&mut self, balance: WalletBalance) {
        self.balances.push(balance);
    }

    pub fn balances(&self) -> &[WalletBalance] {
        &self.balances
    }

    /// Total amount held in a currency across chains; zero when absent.
    pub fn balance_of(&self, currency: &Currency) -> f64 {
        self.balances
            .iter()
            .filter(|b| &b.currency == currency && b.amount.is_finite())
            .map(|b| b.amount)
            .sum()
    }

    /// Check the wallet can cover `amount` of `currency`.
    pub fn ensure_sufficient(&self, currency: &Currency, amount: f64) -> PricingResult<()> {
        let available = self.balance_of(currency);

        if amount > available {
            return Err(PricingError::InsufficientBalance {
                currency: currency.clone(),
                requested: amount,
                available,
            });
        }

        Ok(())
    }

    /// Display rows: ranked chains with positive amounts, highest priority first.
    ///
    /// The sort is stable, so equal priorities keep wallet order.
    pub fn rows(&self, prices: &PriceTable, priorities: &PriorityTable) -> Vec<WalletRow> {
        let mut rows: Vec<WalletRow> = self
            .balances
            .iter()
            .filter(|b| {
                priorities.is_ranked(&b.blockchain) && b.amount.is_finite() && b.amount > 0.0
            })
            .map(|b| WalletRow {
                balance: b.clone(),
                priority: priorities.priority(&b.blockchain),
                formatted: format_amount(b.amount),
                usd_value: prices.price_usd_or(&b.currency, 0.0) * b.amount,
            })
            .collect();

        rows.sort_by(|a, b| b.priority.cmp(&a.priority));
        rows
    }
}

fn format_amount(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}
