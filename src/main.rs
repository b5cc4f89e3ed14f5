use marktplaats_scraper::{logger, run, Settings, ThreadSleeper};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();

    let settings = Settings::from_env()?;

    info!("Marktplaats bike scraper");
    info!("  Categories: {}", settings.categories.join(", "));
    info!("  Pages per category: {}", settings.page_count);
    info!("  Delay between pages: {}s", settings.delay_seconds);
    info!("  Proxy rotation: {}", if settings.use_proxies { "on" } else { "off" });

    let fetcher = settings.http_fetcher();
    let written = run(&settings, &fetcher, &ThreadSleeper)?;

    info!("✓ Done, wrote {} file(s)", written.len());
    Ok(())
}
