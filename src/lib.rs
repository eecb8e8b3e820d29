//! Insight Balances
//!
//! Looks up the balances of a list of labeled addresses on an Insight API
//! deployment and reports each balance plus the total.
//!
//! # Architecture
//!
//! - **config**: address file loading and run settings
//! - **api**: the [`BalanceFetcher`] trait and the Insight client
//! - **aggregator**: bounded-concurrency fan-out/fan-in of lookups
//! - **report**: plain-text output
//! - **utils**: HTTP client construction and structured logging
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_balances::{scan, Settings};
//!
//! let total = scan(&Settings::default(), std::io::stdout()).await?;
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod types;
pub mod utils;

pub use aggregator::BalanceAggregator;
pub use api::{BalanceFetcher, InsightAddressResponse, InsightClient};
pub use config::{load_entries, Settings};
pub use error::{ErrorCode, ErrorKind, ScanError, ScanResult};
pub use report::Reporter;
pub use types::*;

use std::io::Write;
use std::sync::Arc;

/// Run a full scan: load the address file, look up every balance on the
/// configured Insight endpoint and write the report to `out`.
///
/// Config problems are returned before any request is made.
pub async fn scan<W: Write>(settings: &Settings, out: W) -> ScanResult<Amount> {
    let client = Arc::new(InsightClient::from_settings(settings)?);
    let entries = load_entries(&settings.config_path)?;

    scan_with(entries, client, settings.max_concurrency, out).await
}

/// Look up `entries` through `fetcher` and write the report to `out`.
///
/// On failure nothing past the already-completed balance lines is written;
/// in particular there is no total line.
pub async fn scan_with<F, W>(
    entries: Vec<AddressEntry>,
    fetcher: Arc<F>,
    max_concurrency: usize,
    out: W,
) -> ScanResult<Amount>
where
    F: BalanceFetcher + ?Sized + 'static,
    W: Write,
{
    let aggregator = BalanceAggregator::new(max_concurrency)?;
    let mut reporter = Reporter::new(out);

    let total = aggregator
        .run(entries, fetcher, |result| reporter.balance(result))
        .await?;

    reporter.total(total)?;
    Ok(total)
}
