//! Remote transport abstraction for testing.
//!
//! This module provides a trait for fetching remote URLs that can be mocked
//! in tests, avoiding the need for actual network calls.

use std::time::Duration;

use jsonlight_core::Bytes;
use reqwest::blocking::Client;
use url::Url;

use crate::error::FetchError;
use crate::Fetched;

/// Trait for fetching the body behind a URL.
pub trait Transport: Send + Sync {
    /// GET `url`. Any response, whatever its status, is returned as
    /// [`Fetched`]; only transport failures are errors.
    fn get(&self, url: &Url) -> Result<Fetched, FetchError>;
}

/// Production transport using a blocking reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout.
    ///
    /// Certificates are verified unless `accept_invalid_certs` is set.
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(30), false)
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<Fetched, FetchError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let body: Bytes = response.bytes()?;
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(Fetched { status, body })
    }
}
