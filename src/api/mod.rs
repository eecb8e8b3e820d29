//! API Module
//!
//! Balance lookup clients. The aggregator only sees [`BalanceFetcher`];
//! [`InsightClient`] is the production implementation.

mod insight;

pub use insight::*;

use crate::error::ScanResult;
use crate::types::Amount;
use async_trait::async_trait;

/// Look up the current balance of a single address
#[async_trait]
pub trait BalanceFetcher: Send + Sync {
    async fn fetch_balance(&self, address: &str) -> ScanResult<Amount>;
}
