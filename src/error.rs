use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    UpstreamFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("response body from {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(
        "field counts differ on {url}: {links} links, {titles} titles, {prices} prices, {conditions} conditions"
    )]
    ExtractionMismatch {
        url: String,
        links: usize,
        titles: usize,
        prices: usize,
        conditions: usize,
    },

    #[error("proxy pool is empty, nothing to rotate through")]
    EmptyProxyPool,

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// True for failures caused by the remote side (transport or status).
    pub fn is_upstream(&self) -> bool {
        matches!(self, ScrapeError::UpstreamFetch { .. } | ScrapeError::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_upstream() {
        let err = ScrapeError::HttpStatus {
            url: "https://example.com/p/0/".to_string(),
            status: 503,
        };
        assert!(err.is_upstream());
        assert_eq!(err.to_string(), "https://example.com/p/0/ returned HTTP 503");
        assert!(!ScrapeError::EmptyProxyPool.is_upstream());
    }
}
