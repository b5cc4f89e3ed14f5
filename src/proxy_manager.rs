use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::models::ProxyAddress;
use crate::selector;
use log::{info, warn};
use scraper::{ElementRef, Html};
use std::collections::HashSet;

pub const PROXIES_SOURCE: &str = "https://free-proxy-list.net/";

// 1-based column positions in the proxy list table
const HOST_COLUMN: usize = 1;
const PORT_COLUMN: usize = 2;
const HTTPS_COLUMN: usize = 7;

/// Ordered, de-duplicated proxy pool with round-robin rotation.
#[derive(Debug, Clone, Default)]
pub struct ProxyManager {
    proxies: Vec<ProxyAddress>,
    current_index: usize,
}

impl ProxyManager {
    /// Build a pool from addresses, keeping the first occurrence of each.
    pub fn new(addresses: impl IntoIterator<Item = ProxyAddress>) -> Self {
        let mut seen = HashSet::new();
        let proxies = addresses
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();

        Self {
            proxies,
            current_index: 0,
        }
    }

    /// Fetch the proxy list page once and keep every HTTPS-capable row.
    /// Fetch and parse failures are returned as-is; nothing is retried.
    pub fn build_proxy_pool<F: PageFetcher + ?Sized>(fetcher: &F, source_url: &str) -> Result<Self> {
        let body = fetcher.fetch(source_url, None)?;
        let manager = Self::new(parse_proxy_table(&body)?);

        if manager.proxies.is_empty() {
            warn!("No HTTPS proxies found at {}", source_url);
        } else {
            info!("✓ Loaded {} HTTPS proxies from {}", manager.proxies.len(), source_url);
        }

        Ok(manager)
    }

    /// Get the next proxy in rotation
    pub fn get_next_proxy(&mut self) -> Result<ProxyAddress> {
        if self.proxies.is_empty() {
            return Err(ScrapeError::EmptyProxyPool);
        }

        let proxy = self.proxies[self.current_index].clone();
        self.current_index = (self.current_index + 1) % self.proxies.len();

        Ok(proxy)
    }

    pub fn get_all_proxies(&self) -> &[ProxyAddress] {
        &self.proxies
    }

    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}

/// Extract `host:port` for every table row whose HTTPS column says "yes".
/// Returned in document order; duplicates are left for `ProxyManager::new`.
pub fn parse_proxy_table(body: &str) -> Result<Vec<ProxyAddress>> {
    let document = Html::parse_document(body);
    let row_selector = selector("tbody tr")?;
    let cell_selector = selector("td")?;

    let mut proxies = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < HTTPS_COLUMN {
            continue;
        }

        let https = cell_text(&cells[HTTPS_COLUMN - 1]);
        if !https.contains("yes") {
            continue;
        }

        let host = cell_text(&cells[HOST_COLUMN - 1]);
        let port = cell_text(&cells[PORT_COLUMN - 1]);
        if host.is_empty() || port.is_empty() {
            continue;
        }

        proxies.push(ProxyAddress::new(&host, &port));
    }

    Ok(proxies)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const PROXY_TABLE: &str = r#"
        <html><body><table>
          <thead><tr><th>IP Address</th><th>Port</th><th>Code</th><th>Country</th>
            <th>Anonymity</th><th>Google</th><th>Https</th><th>Last Checked</th></tr></thead>
          <tbody>
            <tr><td>10.0.0.1</td><td>8080</td><td>NL</td><td>Netherlands</td><td>anonymous</td><td>no</td><td>yes</td><td>1 min ago</td></tr>
            <tr><td>10.0.0.2</td><td>3128</td><td>DE</td><td>Germany</td><td>elite proxy</td><td>no</td><td>no</td><td>1 min ago</td></tr>
            <tr><td>10.0.0.3</td><td>80</td><td>FR</td><td>France</td><td>transparent</td><td>yes</td><td> yes </td><td>2 mins ago</td></tr>
            <tr><td>10.0.0.1</td><td>8080</td><td>NL</td><td>Netherlands</td><td>anonymous</td><td>no</td><td>yes</td><td>5 mins ago</td></tr>
            <tr><td>10.0.0.4</td><td>8000</td><td>US</td></tr>
            <tr><td>10.0.0.5</td><td>8888</td><td>BE</td><td>Belgium</td><td>anonymous</td><td>no</td><td>YES</td><td>1 min ago</td></tr>
          </tbody>
        </table></body></html>
    "#;

    struct StaticFetcher {
        body: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl PageFetcher for StaticFetcher {
        fn fetch(&self, url: &str, proxy: Option<&ProxyAddress>) -> Result<String> {
            assert!(proxy.is_none());
            self.requested.borrow_mut().push(url.to_string());
            Ok(self.body.to_string())
        }
    }

    #[test]
    fn test_only_https_rows_are_kept() {
        // 10.0.0.5 is flagged "YES"; the marker match is case-sensitive
        let proxies = parse_proxy_table(PROXY_TABLE).unwrap();
        let addrs: Vec<&str> = proxies.iter().map(|p| p.as_str()).collect();
        assert_eq!(addrs, vec!["10.0.0.1:8080", "10.0.0.3:80", "10.0.0.1:8080"]);
    }

    #[test]
    fn test_build_proxy_pool_deduplicates() {
        let fetcher = StaticFetcher {
            body: PROXY_TABLE,
            requested: RefCell::new(Vec::new()),
        };
        let manager = ProxyManager::build_proxy_pool(&fetcher, PROXIES_SOURCE).unwrap();

        assert_eq!(*fetcher.requested.borrow(), vec![PROXIES_SOURCE.to_string()]);
        assert_eq!(manager.proxy_count(), 2);
        assert_eq!(
            manager.get_all_proxies(),
            &[ProxyAddress::from("10.0.0.1:8080"), ProxyAddress::from("10.0.0.3:80")]
        );
    }

    #[test]
    fn test_unexpected_markup_yields_empty_pool() {
        let fetcher = StaticFetcher {
            body: "<html><body><p>maintenance</p></body></html>",
            requested: RefCell::new(Vec::new()),
        };
        let manager = ProxyManager::build_proxy_pool(&fetcher, PROXIES_SOURCE).unwrap();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_rotation_wraps() {
        let mut manager = ProxyManager::new(vec![
            ProxyAddress::from("a:1"),
            ProxyAddress::from("b:2"),
            ProxyAddress::from("c:3"),
        ]);

        let picked: Vec<String> = (0..7)
            .map(|_| manager.get_next_proxy().unwrap().to_string())
            .collect();
        assert_eq!(picked, vec!["a:1", "b:2", "c:3", "a:1", "b:2", "c:3", "a:1"]);
    }

    #[test]
    fn test_empty_pool_fails_fast() {
        let mut manager = ProxyManager::new(Vec::new());
        assert!(matches!(
            manager.get_next_proxy(),
            Err(ScrapeError::EmptyProxyPool)
        ));
    }
}
