use std::collections::{BTreeSet, HashSet};

use crate::chain::{canonicalize, CanonicalChain};
use crate::normalizer::{flatten_to_pairs, unique_tokens, SupportedPair, TokenOption};
use crate::resolver::{AddressResult, PairResolver};
use crate::types::price_feed::PriceFeedEntry;
use crate::types::reference::ReferenceEntry;

/// Merge token options from both catalogs.
///
/// Reference tokens come first, sorted by symbol. Symbols only the price
/// feed knows are appended in first-seen order with the bare symbol as
/// label; the appended tail is not re-sorted.
pub fn merge_tokens(
    reference: &[ReferenceEntry],
    price_feed: &[PriceFeedEntry],
) -> Vec<TokenOption> {
    let mut merged = unique_tokens(reference);
    let mut seen: HashSet<String> = merged.iter().map(|t| t.symbol.clone()).collect();

    for entry in price_feed {
        if entry.symbol.is_empty() || seen.contains(&entry.symbol) {
            continue;
        }
        seen.insert(entry.symbol.clone());
        merged.push(TokenOption {
            symbol: entry.symbol.clone(),
            label: entry.symbol.clone(),
        });
    }
    merged
}

/// Union of canonical chains from the flattened reference pairs and the
/// price feed, sorted case-insensitively.
pub fn merge_chains(pairs: &[SupportedPair], price_feed: &[PriceFeedEntry]) -> Vec<CanonicalChain> {
    let raw_names = pairs
        .iter()
        .map(|pair| pair.chain_name.as_str())
        .chain(price_feed.iter().map(|entry| entry.blockchain.as_str()))
        .filter(|name| !name.trim().is_empty());

    let set: BTreeSet<CanonicalChain> = raw_names.map(canonicalize).collect();
    let mut chains: Vec<CanonicalChain> = set.into_iter().collect();
    chains.sort_by_key(|chain| chain.as_str().to_lowercase());
    chains
}

/// Everything derived from one snapshot of the two catalogs.
///
/// Rebuilt wholesale from the sources; never patched in place.
#[derive(Debug, Clone, Default)]
pub struct MergedCatalog {
    pairs: Vec<SupportedPair>,
    price_feed: Vec<PriceFeedEntry>,
    tokens: Vec<TokenOption>,
    chains: Vec<CanonicalChain>,
}

impl MergedCatalog {
    /// Build the merged view. Either source may be empty.
    pub fn build(reference: &[ReferenceEntry], price_feed: Vec<PriceFeedEntry>) -> Self {
        let pairs = flatten_to_pairs(reference);
        let tokens = merge_tokens(reference, &price_feed);
        let chains = merge_chains(&pairs, &price_feed);

        tracing::debug!(
            pairs = pairs.len(),
            price_feed = price_feed.len(),
            tokens = tokens.len(),
            chains = chains.len(),
            "merged token catalogs"
        );

        Self {
            pairs,
            price_feed,
            tokens,
            chains,
        }
    }

    pub fn pairs(&self) -> &[SupportedPair] {
        &self.pairs
    }

    pub fn price_feed(&self) -> &[PriceFeedEntry] {
        &self.price_feed
    }

    /// Token selector options.
    pub fn tokens(&self) -> &[TokenOption] {
        &self.tokens
    }

    /// Every known canonical chain.
    pub fn chains(&self) -> &[CanonicalChain] {
        &self.chains
    }

    pub fn resolver(&self) -> PairResolver<'_> {
        PairResolver::new(&self.pairs, &self.price_feed)
    }

    /// Resolve the address of `symbol` on `chain`.
    pub fn resolve_address(&self, symbol: &str, chain: &str) -> AddressResult {
        self.resolver().resolve_address(symbol, chain)
    }
}
