//! Concurrent balance aggregation
//!
//! Fans out one lookup task per address, with at most `max_concurrency`
//! lookups in flight, and fans the results back in to a single total.
//!
//! Each task hands its balance back to the join loop, which reports it and
//! adds it to the total. No task touches shared mutable state.
//!
//! The first failed lookup aborts the whole run: the limiter is closed so
//! queued tasks never start their lookup, in-flight tasks are aborted, and
//! the error is returned instead of a total.

use crate::api::BalanceFetcher;
use crate::error::{ScanError, ScanResult};
use crate::types::{AddressEntry, Amount, BalanceResult};
use crate::{log_debug, log_error, log_info};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;


/// Bounded-concurrency balance aggregator
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    max_concurrency: usize,
}

impl BalanceAggregator {
    pub fn new(max_concurrency: usize) -> ScanResult<Self> {
        if max_concurrency == 0 {
            return Err(ScanError::invalid_config(
                "concurrency limit must be at least 1",
            ));
        }
        if max_concurrency > Semaphore::MAX_PERMITS {
            return Err(ScanError::invalid_config(format!(
                "concurrency limit must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self { max_concurrency })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Fetch every entry's balance and return the total.
    ///
    /// `on_result` is called once per entry, in completion order. An error
    /// from `on_result` aborts the run like a failed lookup.
    pub async fn run<F, R>(
        &self,
        entries: Vec<AddressEntry>,
        fetcher: Arc<F>,
        mut on_result: R,
    ) -> ScanResult<Amount>
    where
        F: BalanceFetcher + ?Sized + 'static,
        R: FnMut(&BalanceResult) -> ScanResult<()>,
    {
        let scheduled = entries.len();
        log_info!(
            "aggregator",
            "Starting balance scan",
            entries = scheduled,
            concurrency = self.max_concurrency,
        );

        let limiter = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for entry in entries {
            let limiter = Arc::clone(&limiter);
            let fetcher = Arc::clone(&fetcher);
            tasks.spawn(fetch_one(entry, fetcher, limiter));
        }

        let mut total = Amount::ZERO;
        let mut completed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(ScanError::from)
                .and_then(|result| result)
                .and_then(|fetched| match fetched {
                    Some(result) => {
                        total = total.checked_add(result.balance).ok_or(ScanError::Overflow)?;
                        on_result(&result)?;
                        Ok(true)
                    }
                    // Only skipped once the limiter is closed, so an error is still pending
                    None => Ok(false),
                });

            match outcome {
                Ok(reported) => completed += usize::from(reported),
                Err(e) => {
                    limiter.close();
                    tasks.abort_all();
                    log_error!(
                        "aggregator",
                        "Balance scan aborted",
                        error = e,
                        completed = completed,
                        scheduled = scheduled,
                    );
                    return Err(e);
                }
            }
        }

        log_info!("aggregator", "Balance scan complete", entries = completed, total = total);
        Ok(total)
    }
}

/// One unit of work: wait for a permit, then look up a single address.
///
/// Returns `Ok(None)` when the run was cancelled before the lookup started.
async fn fetch_one<F>(
    entry: AddressEntry,
    fetcher: Arc<F>,
    limiter: Arc<Semaphore>,
) -> ScanResult<Option<BalanceResult>>
where
    F: BalanceFetcher + ?Sized,
{
    let permit = match Arc::clone(&limiter).acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => return Ok(None),
    };

    match fetcher.fetch_balance(&entry.address).await {
        Ok(balance) => {
            drop(permit);
            log_debug!(
                "aggregator",
                "Fetched balance",
                label = entry.label,
                address = entry.address,
                balance = balance,
            );
            Ok(Some(BalanceResult { entry, balance }))
        }
        Err(e) => {
            // Close before the permit is released so no queued lookup can start
            limiter.close();
            drop(permit);
            Err(e)
        }
    }
}
