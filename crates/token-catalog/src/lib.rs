pub mod chain;
pub mod config;
pub mod error;
pub mod explorer;
pub mod merger;
pub mod normalizer;
pub mod price_table;
pub mod resolver;
pub mod source;
pub mod types;

use error::Error;

// Re-exports for convenience
pub use chain::CanonicalChain;
pub use config::CatalogConfig;
pub use explorer::{AddressPanel, Explorer, Side};
pub use merger::MergedCatalog;
pub use normalizer::{SupportedPair, TokenOption};
pub use resolver::{AddressResult, PairResolver};
pub use source::{CatalogSnapshot, CatalogSource, StaticCatalogSource};
pub use types::price_feed::PriceFeedEntry;
pub use types::reference::{ReferenceEntry, TokenListDocument};

#[cfg(feature = "http")]
pub use source::HttpCatalogSource;

/// Resolve the address of `symbol` on `chain` against raw catalogs.
///
/// Builds the merged view on every call; hold a [`MergedCatalog`] for
/// repeated lookups.
pub fn resolve_address(
    reference: &TokenListDocument,
    price_feed: &[PriceFeedEntry],
    symbol: &str,
    chain: &str,
) -> AddressResult {
    let pairs = normalizer::flatten_to_pairs(&reference.tokens);
    PairResolver::new(&pairs, price_feed).resolve_address(symbol, chain)
}

/// High-level convenience: fetch both catalogs then merge them.
pub async fn load(source: &dyn CatalogSource) -> Result<MergedCatalog, Error> {
    let snapshot = source::load_catalogs(source).await?;
    Ok(snapshot.merge())
}
