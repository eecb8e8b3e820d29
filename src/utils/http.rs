//! HTTP Client
//!
//! One pooled async client per scan, shared by every lookup task.

use reqwest::Client;
use std::time::Duration;

use crate::config::DEFAULT_MAX_CONCURRENCY;
use crate::error::{ScanError, ScanResult};

const USER_AGENT: &str = concat!("insight-balances/", env!("CARGO_PKG_VERSION"));

/// Connection options for the lookup client
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Idle connections kept per host; match the concurrency cap
    pub max_idle_per_host: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_idle_per_host: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Build the shared HTTP client
pub fn build_client(options: &HttpOptions) -> ScanResult<Client> {
    Client::builder()
        .timeout(options.timeout)
        .connect_timeout(options.connect_timeout.min(options.timeout))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(options.max_idle_per_host)
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ScanError::Runtime(format!("Failed to create HTTP client: {}", e)))
}
