//! Error types for balance scans
//!
//! Every failure is a [`ScanError`]. Callers that only care about the broad
//! category use [`ScanError::kind`]; logs and machine consumers use the
//! stable [`ErrorCode`].

use serde::Serialize;
use std::path::PathBuf;

/// Main error type for all scan operations
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Request for {address} failed: {source}")]
    Request {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Balance service returned HTTP {status} for {address}")]
    HttpStatus { address: String, status: u16 },

    #[error("Failed to decode balance response for {address}: {message}")]
    Decode { address: String, message: String },

    #[error("Fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Total overflowed the amount range")]
    Overflow,

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Broad failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The address list or settings could not be loaded. Raised before any fetch.
    ConfigLoad,
    /// A single address lookup failed.
    Fetch,
    Internal,
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Config errors
    ConfigNotFound,
    ConfigUnreadable,
    ConfigParse,
    InvalidConfig,
    InvalidEndpoint,

    // Network errors
    NetworkError,
    Timeout,
    HttpStatus,

    // Parse errors
    JsonError,

    // Internal
    TaskFailed,
    Overflow,
    Internal,
}

/// Result type alias for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        ScanError::InvalidConfig(msg.into())
    }

    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ScanError::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn request(address: impl Into<String>, source: reqwest::Error) -> Self {
        ScanError::Request {
            address: address.into(),
            source,
        }
    }

    pub fn decode(address: impl Into<String>, message: impl Into<String>) -> Self {
        ScanError::Decode {
            address: address.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::ConfigRead { .. }
            | ScanError::ConfigParse { .. }
            | ScanError::InvalidConfig(_)
            | ScanError::InvalidEndpoint { .. } => ErrorKind::ConfigLoad,
            ScanError::Request { .. } | ScanError::HttpStatus { .. } | ScanError::Decode { .. } => {
                ErrorKind::Fetch
            }
            ScanError::Task(_)
            | ScanError::Overflow
            | ScanError::Output(_)
            | ScanError::Runtime(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScanError::ConfigRead { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    ErrorCode::ConfigNotFound
                } else {
                    ErrorCode::ConfigUnreadable
                }
            }
            ScanError::ConfigParse { .. } => ErrorCode::ConfigParse,
            ScanError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            ScanError::InvalidEndpoint { .. } => ErrorCode::InvalidEndpoint,
            ScanError::Request { source, .. } => {
                if source.is_timeout() {
                    ErrorCode::Timeout
                } else {
                    ErrorCode::NetworkError
                }
            }
            ScanError::HttpStatus { .. } => ErrorCode::HttpStatus,
            ScanError::Decode { .. } => ErrorCode::JsonError,
            ScanError::Task(_) => ErrorCode::TaskFailed,
            ScanError::Overflow => ErrorCode::Overflow,
            ScanError::Output(_) | ScanError::Runtime(_) => ErrorCode::Internal,
        }
    }

    /// The address this error concerns, if it came from a lookup
    pub fn address(&self) -> Option<&str> {
        match self {
            ScanError::Request { address, .. }
            | ScanError::HttpStatus { address, .. }
            | ScanError::Decode { address, .. } => Some(address),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_config_load() {
        let err = ScanError::ConfigRead {
            path: PathBuf::from("addresses.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(err.kind(), ErrorKind::ConfigLoad);
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);
        assert!(err.to_string().contains("addresses.yaml"));
        assert!(err.address().is_none());
    }

    #[test]
    fn test_http_status_is_fetch() {
        let err = ScanError::HttpStatus {
            address: "XqZ1".to_string(),
            status: 404,
        };

        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.code(), ErrorCode::HttpStatus);
        assert_eq!(err.address(), Some("XqZ1"));
        assert_eq!(err.to_string(), "Balance service returned HTTP 404 for XqZ1");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ConfigNotFound).unwrap();
        assert_eq!(json, "\"config_not_found\"");
    }
}
