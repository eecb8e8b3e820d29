//! Shared types
//!
//! Data structures passed between the config loader, the fetchers and the
//! aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest units (duffs) per whole coin
pub const UNITS_PER_COIN: u64 = 100_000_000;

// =============================================================================
// Address Entries
// =============================================================================

/// A labeled address read from the address file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub label: String,
    #[serde(rename = "addr", alias = "address")]
    pub address: String,
}

impl AddressEntry {
    pub fn new(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
        }
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// Signed fixed-point coin amount, stored in duffs (1e-8 of a coin)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_sat(units: i64) -> Self {
        Amount(units)
    }

    pub const fn to_sat(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Lossy conversion for display in logs
    pub fn as_coins(self) -> f64 {
        self.0 as f64 / UNITS_PER_COIN as f64
    }
}

impl fmt::Display for Amount {
    /// Decimal coin value with trailing zeros trimmed: `1.5`, `0`, `-0.25`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let units = self.0.unsigned_abs();
        let whole = units / UNITS_PER_COIN;
        let frac = units % UNITS_PER_COIN;

        if frac == 0 {
            return write!(f, "{}{}", sign, whole);
        }

        let digits = format!("{:08}", frac);
        write!(f, "{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of one successful lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResult {
    pub entry: AddressEntry,
    pub balance: Amount,
}
