use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::models::{ListingRecord, PageResult, ProxyAddress};
use crate::selector;
use log::{info, warn};
use scraper::{ElementRef, Html, Selector};

const CARD: &str = "li.mp-Listing";
const LINK: &str = "a.mp-Listing-coverLink";
const TITLE: &str = "h3.mp-Listing-title";
const PRICE: &str = "span.mp-Listing-price.mp-text-price-label";
const CONDITION: &str = "div.mp-Listing-attributes";

struct ListingSelectors {
    card: Selector,
    link: Selector,
    title: Selector,
    price: Selector,
    condition: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            card: selector(CARD)?,
            link: selector(LINK)?,
            title: selector(TITLE)?,
            price: selector(PRICE)?,
            condition: selector(CONDITION)?,
        })
    }
}

/// Fetch one listing page and extract its records.
pub fn scrape_page<F: PageFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    proxy: Option<&ProxyAddress>,
) -> Result<PageResult> {
    let body = fetcher.fetch(url, proxy)?;
    let records = parse_listings(&body, url)?;
    info!("Scraped {} listings from {}", records.len(), url);
    Ok(records)
}

/// Extract listing records from a page body.
///
/// Each `li.mp-Listing` card yields one record with all four fields taken
/// from inside the card. Cards without a cover link are skipped. When the
/// page has no cards at all, the four fields are selected across the whole
/// document and paired by position; differing counts are an
/// `ExtractionMismatch`. `url` is only used for diagnostics.
pub fn parse_listings(body: &str, url: &str) -> Result<PageResult> {
    let document = Html::parse_document(body);
    let selectors = ListingSelectors::new()?;

    let cards: Vec<ElementRef> = document.select(&selectors.card).collect();
    if cards.is_empty() {
        return parse_columns(&document, &selectors, url);
    }

    let mut records = Vec::with_capacity(cards.len());
    for card in cards {
        let Some(link) = first_text(&card, &selectors.link) else {
            continue;
        };

        let bike_name = first_text(&card, &selectors.title);
        let price = first_text(&card, &selectors.price);
        let condition = first_text(&card, &selectors.condition);

        if bike_name.is_none() || price.is_none() || condition.is_none() {
            warn!("Listing '{}' on {} is missing fields", link, url);
        }

        records.push(ListingRecord {
            link,
            bike_name: bike_name.unwrap_or_default(),
            price: price.unwrap_or_default(),
            condition: condition.unwrap_or_default(),
        });
    }

    Ok(records)
}

fn parse_columns(document: &Html, selectors: &ListingSelectors, url: &str) -> Result<PageResult> {
    let column = |sel: &Selector| -> Vec<String> {
        document.select(sel).map(|el| element_text(&el)).collect()
    };

    let links = column(&selectors.link);
    let titles = column(&selectors.title);
    let prices = column(&selectors.price);
    let conditions = column(&selectors.condition);

    let n = links.len();
    if titles.len() != n || prices.len() != n || conditions.len() != n {
        return Err(ScrapeError::ExtractionMismatch {
            url: url.to_string(),
            links: n,
            titles: titles.len(),
            prices: prices.len(),
            conditions: conditions.len(),
        });
    }

    Ok(links
        .into_iter()
        .zip(titles)
        .zip(prices)
        .zip(conditions)
        .map(|(((link, bike_name), price), condition)| ListingRecord {
            link,
            bike_name,
            price,
            condition,
        })
        .collect())
}

fn first_text(scope: &ElementRef, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(|el| element_text(&el))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
