//! Insight API Client
//!
//! Fetches address balances from an Insight-API deployment
//! (`GET {base}/addr/{address}`).

use crate::api::BalanceFetcher;
use crate::config::Settings;
use crate::error::{ScanError, ScanResult};
use crate::log_debug;
use crate::types::Amount;
use crate::utils::{build_client, HttpOptions};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Response of the Insight `addr` endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightAddressResponse {
    #[serde(rename = "addrStr")]
    pub address: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(rename = "balanceSat")]
    pub balance_sat: i64,
    #[serde(default)]
    pub total_received: f64,
    #[serde(default, rename = "totalReceivedSat")]
    pub total_received_sat: i64,
    #[serde(default)]
    pub total_sent: f64,
    #[serde(default, rename = "totalSentSat")]
    pub total_sent_sat: i64,
    #[serde(default)]
    pub unconfirmed_balance: f64,
    #[serde(default, rename = "unconfirmedBalanceSat")]
    pub unconfirmed_balance_sat: i64,
    /// Field name as spelled by the Insight API
    #[serde(default, rename = "unconfirmedTxApperances")]
    pub unconfirmed_tx_appearances: u64,
    #[serde(default, rename = "txApperances")]
    pub tx_appearances: u64,
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl InsightAddressResponse {
    /// Confirmed balance
    pub fn balance_amount(&self) -> Amount {
        Amount::from_sat(self.balance_sat)
    }
}

/// Client for a single Insight deployment
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: Client,
    base_url: Url,
}

impl InsightClient {
    pub fn new(base_url: Url, options: &HttpOptions) -> ScanResult<Self> {
        let client = build_client(options)?;
        Ok(Self { client, base_url })
    }

    /// Build a client from validated run settings
    pub fn from_settings(settings: &Settings) -> ScanResult<Self> {
        let base_url = settings.validate()?;
        let options = HttpOptions {
            timeout: settings.request_timeout,
            max_idle_per_host: settings.max_concurrency,
            ..HttpOptions::default()
        };
        Self::new(base_url, &options)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL for one address. The address is encoded as a single path segment.
    pub fn address_url(&self, address: &str) -> ScanResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ScanError::invalid_endpoint(self.base_url.as_str(), "URL cannot be used as a base")
            })?
            .pop_if_empty()
            .push("addr")
            .push(address);
        Ok(url)
    }

    /// Fetch the full address summary
    pub async fn fetch_address(&self, address: &str) -> ScanResult<InsightAddressResponse> {
        let url = self.address_url(address)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScanError::request(address, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ScanError::request(address, e))?;

        serde_json::from_slice(&body).map_err(|e| ScanError::decode(address, e.to_string()))
    }
}

#[async_trait]
impl BalanceFetcher for InsightClient {
    async fn fetch_balance(&self, address: &str) -> ScanResult<Amount> {
        let info = self.fetch_address(address).await?;

        log_debug!(
            "insight",
            "Address summary",
            address = address,
            balance_sat = info.balance_sat,
            unconfirmed_sat = info.unconfirmed_balance_sat,
            tx_appearances = info.tx_appearances,
        );

        Ok(info.balance_amount())
    }
}
