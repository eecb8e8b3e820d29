//! Run Configuration
//!
//! Loads the labeled address list and validates run settings:
//! - YAML address file (top-level sequence of `{label, addr}`)
//! - Concurrency cap
//! - Insight API endpoint (URL format, http/https only)

use crate::error::{ScanError, ScanResult};
use crate::types::AddressEntry;
use crate::{log_debug, log_warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Address file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "addresses.yaml";

/// Maximum number of lookups in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Mainnet Insight deployment
pub const DEFAULT_API_URL: &str = "https://mainnet-insight.dashevo.org/insight-api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for a single scan
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub max_concurrency: usize,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Check everything that can be checked without touching the network.
    /// Returns the parsed API endpoint.
    pub fn validate(&self) -> ScanResult<Url> {
        if self.max_concurrency == 0 {
            return Err(ScanError::invalid_config(
                "concurrency limit must be at least 1",
            ));
        }
        if self.max_concurrency > Semaphore::MAX_PERMITS {
            return Err(ScanError::invalid_config(format!(
                "concurrency limit must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ScanError::invalid_config("request timeout must be non-zero"));
        }
        validate_endpoint(&self.api_url)
    }
}

/// Read and parse the address file at `path`
pub fn load_entries(path: impl AsRef<Path>) -> ScanResult<Vec<AddressEntry>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_entries(&text, path)?;
    log_debug!("config", "Loaded address file", path = path.display(), entries = entries.len());
    Ok(entries)
}

/// Parse address file contents. `origin` is only used in error messages.
pub fn parse_entries(text: &str, origin: &Path) -> ScanResult<Vec<AddressEntry>> {
    // An empty file is an empty list, not a parse error
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Option<Vec<AddressEntry>> =
        serde_yaml::from_str(text).map_err(|source| ScanError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
    let entries = entries.unwrap_or_default();

    for (index, entry) in entries.iter().enumerate() {
        if entry.address.trim().is_empty() {
            return Err(ScanError::invalid_config(format!(
                "entry {} ('{}') has an empty address",
                index + 1,
                entry.label
            )));
        }
    }

    Ok(entries)
}

/// Validate a balance API base URL
pub fn validate_endpoint(url: &str) -> ScanResult<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| ScanError::invalid_endpoint(url, format!("invalid URL format: {}", e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            if !is_loopback(&parsed) {
                log_warn!("config", "Using unencrypted HTTP endpoint", endpoint = parsed);
            }
        }
        other => {
            return Err(ScanError::invalid_endpoint(
                url,
                format!("unsupported scheme '{}', expected http or https", other),
            ));
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ScanError::invalid_endpoint(url, "missing host"));
    }
    if parsed.cannot_be_a_base() {
        return Err(ScanError::invalid_endpoint(url, "URL cannot be used as a base"));
    }

    Ok(parsed)
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorKind};

    fn origin() -> &'static Path {
        Path::new("addresses.yaml")
    }

    #[test]
    fn test_parse_entries() {
        let text = "\
- label: Cold storage
  addr: XpESxaUmonkq8RaLLp46Brx2K39ggQe226
- label: Hot wallet
  address: Xs8ttvXdHFsdEBSa5M2EyUKkAs6KU9wkeV
";
        let entries = parse_entries(text, origin()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Cold storage");
        assert_eq!(entries[0].address, "XpESxaUmonkq8RaLLp46Brx2K39ggQe226");
        assert_eq!(entries[1].address, "Xs8ttvXdHFsdEBSa5M2EyUKkAs6KU9wkeV");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let text = "- {label: a, addr: X1}\n- {label: a, addr: X1}\n";
        let entries = parse_entries(text, origin()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_empty_file_is_empty_list() {
        assert!(parse_entries("", origin()).unwrap().is_empty());
        assert!(parse_entries("  \n", origin()).unwrap().is_empty());
        assert!(parse_entries("[]", origin()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_entries("label: not-a-list", origin()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigParse);
        assert_eq!(err.kind(), ErrorKind::ConfigLoad);

        let err = parse_entries("- label: missing address\n", origin()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigParse);
    }

    #[test]
    fn test_blank_address_rejected() {
        let err = parse_entries("- {label: a, addr: '  '}\n", origin()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_missing_file() {
        let err = load_entries("/definitely/not/here/addresses.yaml").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);
        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint(DEFAULT_API_URL).is_ok());
        assert!(validate_endpoint("http://127.0.0.1:3001/insight-api").is_ok());
        assert!(validate_endpoint("ftp://example.com").is_err());
        assert!(validate_endpoint("not a url").is_err());
        assert!(validate_endpoint("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_settings_validation() {
        assert!(Settings::default().validate().is_ok());

        let settings = Settings {
            max_concurrency: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validate().unwrap_err().code(), ErrorCode::InvalidConfig);

        let settings = Settings {
            max_concurrency: usize::MAX,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
        assert!(err.to_string().contains("concurrency limit must be at most"));

        let settings = Settings {
            max_concurrency: Semaphore::MAX_PERMITS,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
