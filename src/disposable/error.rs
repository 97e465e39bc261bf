use thiserror::Error;

/// Errors raised while fetching a disposable-domain list.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} did not return a JSON array of domains: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RefreshError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }
}
