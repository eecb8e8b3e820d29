//! Utilities Module
//!
//! Common utilities used across the crate.

pub mod http;
pub mod logging;

pub use http::*;
