use crate::config::CollectorConfig;
use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::listing_scraper::scrape_page;
use crate::models::CollectedResult;
use crate::proxy_manager::ProxyManager;
use log::{debug, info};
use std::time::Duration;

/// Blocks between page requests.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Page URL for a zero-based page index: `{prefix}{index}/`.
pub fn page_url(prefix: &str, index: u32) -> String {
    format!("{}{}/", prefix, index)
}

/// Scrape `config.page_count` pages in ascending order and concatenate them.
///
/// When `proxies` is given, each request takes the next proxy in rotation.
/// The configured delay is slept after every page, the last one included.
/// The first failing page aborts the whole collection.
pub fn collect<F, S>(
    fetcher: &F,
    sleeper: &S,
    config: &CollectorConfig,
    mut proxies: Option<&mut ProxyManager>,
) -> Result<CollectedResult>
where
    F: PageFetcher + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut result = CollectedResult::new();
    if config.page_count == 0 {
        return Ok(result);
    }

    if let Some(pool) = proxies.as_deref() {
        if pool.is_empty() {
            return Err(ScrapeError::EmptyProxyPool);
        }
    }

    let delay = Duration::from_secs(config.delay_seconds);

    for i in 0..config.page_count {
        let url = page_url(&config.base_url, i);

        let proxy = match proxies.as_deref_mut() {
            Some(pool) => Some(pool.get_next_proxy()?),
            None => None,
        };
        if let Some(p) = &proxy {
            debug!("Page {} via proxy {}", i, p);
        }

        let page = scrape_page(fetcher, &url, proxy.as_ref())?;
        result.append(page);

        info!(
            "[{}/{}] {} rows so far, waiting {}s...",
            i + 1,
            config.page_count,
            result.len(),
            config.delay_seconds
        );
        sleeper.sleep(delay);
    }

    Ok(result)
}
