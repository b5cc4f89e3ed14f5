use serde::{Deserialize, Serialize};
use std::fmt;

/// A proxy in `host:port` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    pub fn new(host: &str, port: &str) -> Self {
        Self(format!("{}:{}", host.trim(), port.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Proxy URL usable for both HTTP and HTTPS traffic.
    /// Addresses that already carry a scheme are passed through.
    pub fn to_url(&self) -> String {
        if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("http://{}", self.0)
        }
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProxyAddress {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

/// One scraped listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub link: String,
    pub bike_name: String,
    pub price: String,
    pub condition: String,
}

impl ListingRecord {
    pub fn new(
        link: impl Into<String>,
        bike_name: impl Into<String>,
        price: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            bike_name: bike_name.into(),
            price: price.into(),
            condition: condition.into(),
        }
    }
}

/// Listings of a single page in document order.
pub type PageResult = Vec<ListingRecord>;

/// Listings from every page of one run, in page order.
/// The row index is the position in `records`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedResult {
    records: Vec<ListingRecord>,
}

/// A record paired with its synthetic row index, as exported.
#[derive(Debug, Serialize)]
pub struct IndexedRecord<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub record: &'a ListingRecord,
}

impl CollectedResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, page: PageResult) {
        self.records.extend(page);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn indexed(&self) -> impl Iterator<Item = IndexedRecord<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| IndexedRecord { index, record })
    }
}

impl From<Vec<ListingRecord>> for CollectedResult {
    fn from(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_address_formats() {
        let proxy = ProxyAddress::new(" 10.0.0.1 ", "8080\n");
        assert_eq!(proxy.as_str(), "10.0.0.1:8080");
        assert_eq!(proxy.to_url(), "http://10.0.0.1:8080");

        let socks = ProxyAddress::from("socks5://10.0.0.2:1080");
        assert_eq!(socks.to_url(), "socks5://10.0.0.2:1080");
    }

    #[test]
    fn test_index_is_reassigned_across_pages() {
        let mut result = CollectedResult::new();
        result.append(vec![ListingRecord::new("a", "A", "€1", "Used")]);
        result.append(vec![]);
        result.append(vec![
            ListingRecord::new("b", "B", "€2", "New"),
            ListingRecord::new("c", "C", "€3", "Used"),
        ]);

        let indexed: Vec<(usize, &str)> = result
            .indexed()
            .map(|r| (r.index, r.record.link.as_str()))
            .collect();
        assert_eq!(indexed, vec![(0, "a"), (1, "b"), (2, "c")]);
    }
}
