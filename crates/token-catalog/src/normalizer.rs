use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::chain::{canonicalize, CanonicalChain};
use crate::types::reference::{AddressKind, Deployment, ReferenceEntry};

/// One (token, chain) deployment flattened out of the reference list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportedPair {
    pub symbol: String,
    pub name: String,
    /// Raw chain name from the deployment, not canonicalized.
    pub chain_name: String,
    pub asset_id: Option<String>,
    pub decimals: Option<u8>,
    pub address: Option<String>,
    pub kind: AddressKind,
    pub bridge: Option<String>,
    pub origin_chain_name: Option<String>,
}

/// A token selector option: `symbol` plus a display `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenOption {
    pub symbol: String,
    pub label: String,
}

impl SupportedPair {
    fn new(
        symbol: &str,
        name: &str,
        asset_id: Option<&String>,
        origin_chain_name: Option<&String>,
        deployment: &Deployment,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            chain_name: deployment.chain_name.clone(),
            asset_id: asset_id.cloned(),
            decimals: deployment.decimals,
            address: deployment.address.clone(),
            kind: deployment.kind.clone(),
            bridge: deployment.bridge.clone(),
            origin_chain_name: origin_chain_name
                .or(deployment.origin_chain_name.as_ref())
                .cloned(),
        }
    }
}

/// Flatten reference entries into one pair per deployment.
///
/// Output follows catalog order: entries, then sub-assets of grouped
/// entries, then deployments. Resolution relies on this order for its
/// first-match tie-break, so it is never re-sorted.
pub fn flatten_to_pairs(entries: &[ReferenceEntry]) -> Vec<SupportedPair> {
    let mut pairs = Vec::new();
    for entry in entries {
        match entry {
            ReferenceEntry::Grouped(grouped) => {
                for token in &grouped.grouped_tokens {
                    for deployment in &token.deployments {
                        pairs.push(SupportedPair::new(
                            &token.symbol,
                            &token.name,
                            token.defuse_asset_id.as_ref(),
                            token.origin_chain_name.as_ref(),
                            deployment,
                        ));
                    }
                }
            }
            ReferenceEntry::Flat(flat) => {
                for deployment in &flat.deployments {
                    pairs.push(SupportedPair::new(
                        &flat.symbol,
                        &flat.name,
                        flat.defuse_asset_id.as_ref(),
                        flat.origin_chain_name.as_ref(),
                        deployment,
                    ));
                }
            }
        }
    }
    tracing::debug!(entries = entries.len(), pairs = pairs.len(), "flattened token list");
    pairs
}

fn token_label(symbol: &str, name: &str) -> String {
    if name.is_empty() {
        symbol.to_string()
    } else {
        format!("{symbol} ({name})")
    }
}

/// One option per first-seen entry symbol, sorted by symbol (ordinal).
pub fn unique_tokens(entries: &[ReferenceEntry]) -> Vec<TokenOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut tokens = Vec::new();
    for entry in entries {
        if !seen.insert(entry.symbol()) {
            continue;
        }
        tokens.push(TokenOption {
            symbol: entry.symbol().to_string(),
            label: token_label(entry.symbol(), entry.name()),
        });
    }
    tokens.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    tokens
}

/// Canonical chains present in `pairs`, deduplicated and sorted.
pub fn unique_chains(pairs: &[SupportedPair]) -> Vec<CanonicalChain> {
    pairs
        .iter()
        .map(|pair| canonicalize(&pair.chain_name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
