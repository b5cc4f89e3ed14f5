use crate::collector::{collect, Sleeper};
use crate::config::Settings;
use crate::error::Result;
use crate::export;
use crate::fetcher::PageFetcher;
use crate::proxy_manager::ProxyManager;
use log::info;
use std::path::PathBuf;

/// Scrape every configured category and write one output file per category.
///
/// When proxies are enabled, a fresh pool is fetched for every category and
/// rotation starts at its first entry. Returns the written paths in category
/// order. A failure stops the run; files of categories finished earlier are kept.
pub fn run<F, S>(settings: &Settings, fetcher: &F, sleeper: &S) -> Result<Vec<PathBuf>>
where
    F: PageFetcher + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut written = Vec::with_capacity(settings.categories.len());

    for category in &settings.categories {
        let config = settings.collector_config(category);

        let mut pool = if config.proxy_pool_enabled {
            Some(ProxyManager::build_proxy_pool(fetcher, &settings.proxy_source_url)?)
        } else {
            None
        };

        info!(
            "Collecting '{}': {} pages from {}",
            category, config.page_count, config.base_url
        );

        let result = collect(fetcher, sleeper, &config, pool.as_mut())?;

        let path = settings.output_path(category);
        export::save(&result, &path, settings.output_format)?;
        info!("✓ Saved {} listings to {}", result.len(), path.display());

        written.push(path);
    }

    Ok(written)
}
