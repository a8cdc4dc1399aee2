use std::cmp::Ordering;

use serde::Serialize;
use time::macros::format_description;
use time::UtcOffset;

use crate::config::CatalogConfig;
use crate::types::price_feed::PriceFeedEntry;

/// Placeholder for a missing price or contract.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Symbol,
    Blockchain,
    Price,
    ContractAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One rendered price feed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub symbol: String,
    pub blockchain: String,
    pub price: String,
    pub contract_address: String,
    pub updated_at: Option<String>,
}

/// Sortable, truncated view of the live price feed.
#[derive(Debug, Clone)]
pub struct PriceTable {
    sort_key: SortKey,
    direction: SortDirection,
    limit: usize,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

impl PriceTable {
    pub fn new(limit: usize) -> Self {
        Self {
            sort_key: SortKey::Symbol,
            direction: SortDirection::Asc,
            limit,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.price_table_limit)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Sort by `key`; picking the active key again flips the direction.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Asc;
        }
    }

    /// All entries in the current order.
    pub fn sorted<'a>(&self, entries: &'a [PriceFeedEntry]) -> Vec<&'a PriceFeedEntry> {
        let mut sorted: Vec<&PriceFeedEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = compare(self.sort_key, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        sorted
    }

    /// The first `limit` rows in the current order.
    pub fn rows(&self, entries: &[PriceFeedEntry]) -> Vec<PriceRow> {
        self.sorted(entries)
            .into_iter()
            .take(self.limit)
            .map(render_row)
            .collect()
    }

    /// `"Showing 50 of 120 tokens"` when rows were cut off.
    pub fn overflow_note(&self, total: usize) -> Option<String> {
        (total > self.limit).then(|| format!("Showing {} of {} tokens", self.limit, total))
    }
}

fn compare(key: SortKey, a: &PriceFeedEntry, b: &PriceFeedEntry) -> Ordering {
    match key {
        SortKey::Symbol => compare_text(&a.symbol, &b.symbol),
        SortKey::Blockchain => compare_text(&a.blockchain, &b.blockchain),
        SortKey::ContractAddress => compare_text(
            a.contract_address.as_deref().unwrap_or_default(),
            b.contract_address.as_deref().unwrap_or_default(),
        ),
        SortKey::Price => a.price.unwrap_or(0.0).total_cmp(&b.price.unwrap_or(0.0)),
    }
}

/// Unicode lowercase, then code-point order. Accents and punctuation are
/// not folded the way a locale collator would: `_x` sorts before `a` and
/// `é` after `z`.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn render_row(entry: &PriceFeedEntry) -> PriceRow {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    PriceRow {
        symbol: entry.symbol.clone(),
        blockchain: entry.blockchain.clone(),
        price: entry
            .price
            .map(|p| format!("${}", format_price(p)))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        contract_address: entry
            .contract_address()
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        updated_at: entry
            .updated_at()
            .and_then(|dt| dt.to_offset(UtcOffset::UTC).format(format).ok()),
    }
}

/// Human price: prices of at least 1 get thousands separators and up to
/// two decimals, smaller ones keep eight decimals.
pub fn format_price(price: f64) -> String {
    if price < 1.0 {
        return format!("{price:.8}");
    }

    let fixed = format!("{price:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, blockchain: &str, price: Option<f64>, address: Option<&str>) -> PriceFeedEntry {
        PriceFeedEntry {
            symbol: symbol.to_string(),
            blockchain: blockchain.to_string(),
            price,
            contract_address: address.map(str::to_string),
            ..Default::default()
        }
    }

    fn feed() -> Vec<PriceFeedEntry> {
        vec![
            entry("wNEAR", "near", Some(2.79), Some("wrap.near")),
            entry("BTC", "btc", Some(84000.5), None),
            entry("aurora", "near", Some(0.0912), Some("aaaa")),
            entry("ETH", "eth", Some(1890.0), None),
        ]
    }

    fn symbols(entries: Vec<&PriceFeedEntry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(84000.5), "84,000.5");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
        assert_eq!(format_price(1890.0), "1,890");
        assert_eq!(format_price(2.79), "2.79");
        assert_eq!(format_price(1.0), "1");
        assert_eq!(format_price(0.0912), "0.09120000");
        assert_eq!(format_price(0.0), "0.00000000");
    }

    #[test]
    fn test_default_sort_case_insensitive() {
        let feed = feed();
        let table = PriceTable::default();
        assert_eq!(symbols(table.sorted(&feed)), vec!["aurora", "BTC", "ETH", "wNEAR"]);
    }

    #[test]
    fn test_text_order_is_code_point_after_lowercasing() {
        assert_eq!(compare_text("eth", "ETH"), Ordering::Equal);
        assert_eq!(compare_text("_x", "a"), Ordering::Less);
        assert_eq!(compare_text("Zeta", "éclair"), Ordering::Less);

        // Case-only ties keep feed order.
        let feed = vec![
            entry("usdc", "eth", None, None),
            entry("USDC", "sol", None, None),
            entry("Aave", "eth", None, None),
        ];
        let sorted = PriceTable::default().sorted(&feed);
        let order: Vec<&str> = sorted.iter().map(|e| e.blockchain.as_str()).collect();
        assert_eq!(order, vec!["eth", "eth", "sol"]);
        assert_eq!(sorted[0].symbol, "Aave");
        assert_eq!(sorted[1].symbol, "usdc");
    }

    #[test]
    fn test_sort_toggle() {
        let feed = feed();
        let mut table = PriceTable::new(50);

        table.sort_by(SortKey::Price);
        assert_eq!(table.direction(), SortDirection::Asc);
        assert_eq!(symbols(table.sorted(&feed)), vec!["aurora", "wNEAR", "ETH", "BTC"]);

        table.sort_by(SortKey::Price);
        assert_eq!(table.direction(), SortDirection::Desc);
        assert_eq!(symbols(table.sorted(&feed)), vec!["BTC", "ETH", "wNEAR", "aurora"]);

        table.sort_by(SortKey::Blockchain);
        assert_eq!(table.sort_key(), SortKey::Blockchain);
        assert_eq!(table.direction(), SortDirection::Asc);
        assert_eq!(symbols(table.sorted(&feed)), vec!["BTC", "ETH", "wNEAR", "aurora"]);
    }

    #[test]
    fn test_rows_truncated() {
        let feed = feed();
        let table = PriceTable::new(2);
        let rows = table.rows(&feed);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "aurora");
        assert_eq!(rows[0].price, "$0.09120000");
        assert_eq!(rows[1].contract_address, PLACEHOLDER);
        assert_eq!(table.overflow_note(feed.len()).as_deref(), Some("Showing 2 of 4 tokens"));
        assert_eq!(PriceTable::new(50).overflow_note(feed.len()), None);
    }

    #[test]
    fn test_row_timestamp() {
        let mut row_entry = entry("wNEAR", "near", None, None);
        row_entry.price_updated_at = Some("2025-03-28T12:23:00.070Z".to_string());

        let rows = PriceTable::new(50).rows(&[row_entry]);
        assert_eq!(rows[0].price, PLACEHOLDER);
        assert_eq!(rows[0].updated_at.as_deref(), Some("2025-03-28 12:23:00 UTC"));
    }
}
