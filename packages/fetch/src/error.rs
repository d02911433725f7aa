use jsonlight_core::JsonError;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("I/O error (status {status}): {source}")]
    Io {
        status: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid file URL: {url}")]
    InvalidFileUrl { url: String },

    #[error("Decode error (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: JsonError,
    },
}

impl FetchError {
    /// Status code associated with the failure, 0 when the request never
    /// produced one.
    pub fn status(&self) -> u16 {
        match self {
            FetchError::Io { status, .. } | FetchError::Decode { status, .. } => *status,
            FetchError::Http(e) => e.status().map_or(0, |s| s.as_u16()),
            FetchError::UrlParse(_) | FetchError::InvalidFileUrl { .. } => 0,
        }
    }
}
