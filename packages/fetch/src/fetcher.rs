use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jsonlight_core::{Bytes, JsonObject};
use url::Url;

use crate::error::FetchError;
use crate::transport::{ReqwestTransport, Transport};

/// Body and status of a fetched source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fetched {
    /// HTTP status for remote sources; 200 for a successful local read.
    pub status: u16,
    pub body: Bytes,
}

impl Fetched {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Options for building a [`Fetcher`].
#[derive(Clone, Debug)]
pub struct FetchConfig {
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl FetchConfig {
    /// Timeout for the whole remote request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification for remote sources.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

enum Source {
    Remote(Url),
    Local(PathBuf),
}

fn classify(source: &str) -> Result<Source, FetchError> {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Source::Remote(url)),
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(Source::Local)
            .map_err(|()| FetchError::InvalidFileUrl {
                url: source.to_string(),
            }),
        // Relative paths and Windows drive letters land here.
        _ => Ok(Source::Local(PathBuf::from(source))),
    }
}

/// Status code a failed local read reports.
pub(crate) fn io_status(error: &io::Error) -> u16 {
    match error.kind() {
        io::ErrorKind::NotFound => 404,
        io::ErrorKind::PermissionDenied => 403,
        _ => 500,
    }
}

fn read_local(path: &Path) -> Result<Fetched, FetchError> {
    match std::fs::read(path) {
        Ok(body) => {
            log::debug!("read {} ({} bytes)", path.display(), body.len());
            Ok(Fetched {
                status: 200,
                body: Bytes::from(body),
            })
        }
        Err(source) => {
            let status = io_status(&source);
            log::debug!("read {} failed with status {}: {}", path.display(), status, source);
            Err(FetchError::Io { status, source })
        }
    }
}

/// Fetches bytes from local paths, `file://` URLs and HTTP(S) URLs.
pub struct Fetcher {
    transport: Box<dyn Transport>,
}

impl Fetcher {
    /// Create a fetcher with the given timeout and verified TLS.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::from_config(FetchConfig::default().timeout(timeout))
    }

    pub fn from_config(config: FetchConfig) -> Result<Self, FetchError> {
        if config.accept_invalid_certs {
            log::debug!("TLS certificate verification disabled");
        }
        let transport = ReqwestTransport::new(config.timeout, config.accept_invalid_certs)?;
        Ok(Self::with_transport(transport))
    }

    /// Create a fetcher over a custom remote transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Fetch the bytes behind `source`.
    ///
    /// Remote responses are returned whatever their status. Local read
    /// failures are errors carrying 404, 403 or 500.
    pub fn fetch(&self, source: &str) -> Result<Fetched, FetchError> {
        match classify(source)? {
            Source::Remote(url) => self.transport.get(&url),
            Source::Local(path) => read_local(&path),
        }
    }

    /// Fetch `source` and decode it as a JSON object.
    ///
    /// Returns the status alongside the object. A body that is not a JSON
    /// object is a [`FetchError::Decode`] carrying the status.
    pub fn fetch_object(&self, source: &str) -> Result<(JsonObject, u16), FetchError> {
        let fetched = self.fetch(source)?;
        let status = fetched.status;
        let object = JsonObject::from_slice(&fetched.body)
            .map_err(|source| FetchError::Decode { status, source })?;
        Ok((object, status))
    }
}
