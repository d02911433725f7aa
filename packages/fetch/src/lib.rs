//! # jsonlight-fetch
//!
//! Byte fetching for jsonlight documents.
//!
//! A source is either an `http://`/`https://` URL, fetched with a blocking
//! reqwest client, or anything else, read as a local path (`file://` URLs
//! included).
//!
//! ## Status codes
//!
//! Remote fetches report the HTTP status of the response; a non-2xx response
//! is still returned as [`Fetched`]. Local reads report 200 on success and
//! fail with a [`FetchError::Io`] carrying 404 (not found), 403 (permission
//! denied) or 500 (anything else).
//!
//! ```ignore
//! use std::time::Duration;
//! use jsonlight_fetch::{FetchConfig, Fetcher};
//!
//! let fetcher = Fetcher::new(Duration::from_secs(5))?;
//! let (config, status) = fetcher.fetch_object("https://example.com/config.json")?;
//!
//! // Opt in explicitly to skip certificate checks.
//! let insecure = Fetcher::from_config(
//!     FetchConfig::default().danger_accept_invalid_certs(true),
//! )?;
//! ```

mod error;
mod fetcher;
pub mod transport;

use std::time::Duration;

pub use error::FetchError;
pub use fetcher::{FetchConfig, Fetched, Fetcher};
pub use transport::{ReqwestTransport, Transport};

/// Fetch `source` with a one-off fetcher using `timeout`.
pub fn fetch(source: &str, timeout: Duration) -> Result<Fetched, FetchError> {
    Fetcher::new(timeout)?.fetch(source)
}
