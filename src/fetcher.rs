use crate::error::{Result, ScrapeError};
use crate::models::ProxyAddress;
use log::debug;
use reqwest::blocking::Client;
use reqwest::Proxy;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetches a page body as text, optionally through a proxy.
pub trait PageFetcher {
    fn fetch(&self, url: &str, proxy: Option<&ProxyAddress>) -> Result<String>;
}

/// Blocking reqwest fetcher. A fresh client is built per request so each
/// request can go out through a different proxy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            accept_invalid_certs: false,
        }
    }

    /// Skip TLS certificate verification. Off unless explicitly enabled.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Create a reqwest client, routed through `proxy` for both HTTP and HTTPS when given
    pub fn create_client(&self, proxy: Option<&ProxyAddress>) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        builder = match proxy {
            Some(proxy) => {
                let proxy_url = proxy.to_url();
                let proxy = Proxy::all(&proxy_url).map_err(|source| ScrapeError::UpstreamFetch {
                    url: proxy_url.clone(),
                    source,
                })?;
                builder.proxy(proxy)
            }
            // direct means direct, even when HTTP_PROXY is set
            None => builder.no_proxy(),
        };

        builder.build().map_err(|source| ScrapeError::UpstreamFetch {
            url: String::new(),
            source,
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str, proxy: Option<&ProxyAddress>) -> Result<String> {
        match proxy {
            Some(p) => debug!("GET {} via {}", url, p),
            None => debug!("GET {}", url),
        }

        let client = self.create_client(proxy)?;
        let upstream = |source| ScrapeError::UpstreamFetch {
            url: url.to_string(),
            source,
        };

        let response = client.get(url).send().map_err(upstream)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(upstream)?;
        String::from_utf8(bytes.to_vec()).map_err(|source| ScrapeError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
