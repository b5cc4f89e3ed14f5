use crate::error::{Result, ScrapeError};
use crate::fetcher::HttpFetcher;
use crate::proxy_manager::PROXIES_SOURCE;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const BASE_URL_TEMPLATE: &str =
    "https://www.marktplaats.nl/l/fietsen-en-brommers/fietsen-GENDER-GENDERfietsen/p/";
pub const PLACEHOLDER: &str = "GENDER";
/// Men's and women's bikes.
pub const CATEGORIES: [&str; 2] = ["heren", "dames"];
pub const PAGE_COUNT: u32 = 100;
pub const DELAY_SECONDS: u64 = 30;

/// Settings for one collector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Prefix the zero-based page index and a trailing `/` are appended to.
    pub base_url: String,
    pub page_count: u32,
    pub delay_seconds: u64,
    pub proxy_pool_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ScrapeError::Config(format!(
                "unknown output format '{}', use csv or json",
                other
            ))),
        }
    }
}

/// Whole-run settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url_template: String,
    pub placeholder: String,
    pub categories: Vec<String>,
    pub page_count: u32,
    pub delay_seconds: u64,
    pub use_proxies: bool,
    pub proxy_source_url: String,
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub request_timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url_template: BASE_URL_TEMPLATE.to_string(),
            placeholder: PLACEHOLDER.to_string(),
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            page_count: PAGE_COUNT,
            delay_seconds: DELAY_SECONDS,
            use_proxies: true,
            proxy_source_url: PROXIES_SOURCE.to_string(),
            output_dir: PathBuf::from("."),
            output_format: OutputFormat::Csv,
            request_timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl Settings {
    /// Load settings from process environment variables, after `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("MP_BASE_URL_TEMPLATE") {
            settings.base_url_template = v;
        }
        if let Some(v) = get("MP_PLACEHOLDER") {
            settings.placeholder = v;
        }
        if let Some(v) = get("MP_CATEGORIES") {
            settings.categories = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = get("MP_PAGE_COUNT") {
            settings.page_count = parse_value("MP_PAGE_COUNT", &v)?;
        }
        if let Some(v) = get("MP_DELAY_SECONDS") {
            settings.delay_seconds = parse_value("MP_DELAY_SECONDS", &v)?;
        }
        if let Some(v) = get("MP_USE_PROXIES") {
            settings.use_proxies = parse_value("MP_USE_PROXIES", &v.to_lowercase())?;
        }
        if let Some(v) = get("MP_PROXY_SOURCE_URL") {
            settings.proxy_source_url = v;
        }
        if let Some(v) = get("MP_OUTPUT_DIR") {
            settings.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get("MP_OUTPUT_FORMAT") {
            settings.output_format = v.parse()?;
        }
        if let Some(v) = get("MP_REQUEST_TIMEOUT_SECS") {
            settings.request_timeout =
                Duration::from_secs(parse_value("MP_REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("MP_ACCEPT_INVALID_CERTS") {
            settings.accept_invalid_certs =
                parse_value("MP_ACCEPT_INVALID_CERTS", &v.to_lowercase())?;
        }

        if settings.categories.is_empty() {
            return Err(ScrapeError::Config("MP_CATEGORIES lists no category".to_string()));
        }

        Ok(settings)
    }

    /// Collector settings for one category variant.
    pub fn collector_config(&self, category: &str) -> CollectorConfig {
        CollectorConfig {
            base_url: self.base_url_template.replace(&self.placeholder, category),
            page_count: self.page_count,
            delay_seconds: self.delay_seconds,
            proxy_pool_enabled: self.use_proxies,
        }
    }

    pub fn http_fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.request_timeout).accept_invalid_certs(self.accept_invalid_certs)
    }

    /// Output path for one category variant, e.g. `./heren.csv`.
    pub fn output_path(&self, category: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", category, self.output_format.extension()))
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScrapeError::Config(format!("{} has invalid value '{}'", key, value)))
}
