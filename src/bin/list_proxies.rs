use marktplaats_scraper::{logger, ProxyManager, Settings};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let settings = Settings::from_env()?;

    println!("Fetching proxy list");
    println!("===================");
    println!("Source: {}\n", settings.proxy_source_url);

    let fetcher = settings.http_fetcher();
    let manager = ProxyManager::build_proxy_pool(&fetcher, &settings.proxy_source_url)?;

    for (i, proxy) in manager.get_all_proxies().iter().enumerate() {
        println!("  {:>3}. {}", i + 1, proxy);
    }

    println!("\nSummary:");
    println!("  HTTPS proxies: {}", manager.proxy_count());

    Ok(())
}
