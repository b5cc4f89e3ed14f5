pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod listing_scraper;
pub mod logger;
pub mod models;
pub mod proxy_manager;
pub mod runner;

use scraper::Selector;

// Re-export main types
pub use collector::{collect, Sleeper, ThreadSleeper};
pub use config::{CollectorConfig, OutputFormat, Settings};
pub use error::{Result, ScrapeError};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use listing_scraper::{parse_listings, scrape_page};
pub use models::{CollectedResult, ListingRecord, PageResult, ProxyAddress};
pub use proxy_manager::ProxyManager;
pub use runner::run;

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}
