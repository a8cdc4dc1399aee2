use std::fmt;

use serde::Serialize;

use crate::chain::{canonicalize, expand, matches};
use crate::normalizer::SupportedPair;
use crate::types::price_feed::PriceFeedEntry;

/// Marker rendered for native assets in place of an address.
pub const NATIVE_MARKER: &str = "native";

/// Outcome of an address lookup for a (token, chain) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "address", rename_all = "camelCase")]
pub enum AddressResult {
    /// The asset is the chain's base currency and has no contract.
    Native,
    Found(String),
    NotFound,
}

impl AddressResult {
    /// True for `Native` as well as `Found`: either has something to show
    /// and copy. Only `NotFound` is unavailable.
    pub fn is_available(&self) -> bool {
        !matches!(self, AddressResult::NotFound)
    }

    /// The address, the literal `native`, or an empty string on a miss.
    pub fn as_str(&self) -> &str {
        match self {
            AddressResult::Native => NATIVE_MARKER,
            AddressResult::Found(address) => address,
            AddressResult::NotFound => "",
        }
    }
}

impl fmt::Display for AddressResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up addresses in the reference pairs first, then the price feed.
#[derive(Debug, Clone, Copy)]
pub struct PairResolver<'a> {
    pairs: &'a [SupportedPair],
    price_feed: &'a [PriceFeedEntry],
}

impl<'a> PairResolver<'a> {
    pub fn new(pairs: &'a [SupportedPair], price_feed: &'a [PriceFeedEntry]) -> Self {
        Self { pairs, price_feed }
    }

    /// Resolve the address of `symbol` on `chain`.
    ///
    /// Symbols compare case-insensitively; chains are alias-aware. When
    /// several reference pairs match, the first in flattening order wins,
    /// even if it is a native deployment and a later one carries a wrapped
    /// contract on the same chain. A reference hit with no address is a
    /// miss and does not fall through to the price feed.
    pub fn resolve_address(&self, symbol: &str, chain: &str) -> AddressResult {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() || chain.trim().is_empty() {
            return AddressResult::NotFound;
        }

        if let Some(pair) = self.find_pair(&symbol, chain) {
            if pair.kind.is_native() {
                return AddressResult::Native;
            }
            return match pair.address.as_deref() {
                Some(address) if !address.is_empty() => AddressResult::Found(address.to_string()),
                _ => {
                    tracing::debug!(%symbol, chain, "reference deployment has no address");
                    AddressResult::NotFound
                }
            };
        }

        match self.find_price_feed_address(&symbol, chain) {
            Some(address) => AddressResult::Found(address.to_string()),
            None => AddressResult::NotFound,
        }
    }

    fn find_pair(&self, symbol: &str, chain: &str) -> Option<&'a SupportedPair> {
        let spellings = expand(canonicalize(chain).as_str());
        self.pairs.iter().find(|pair| {
            pair.symbol.to_uppercase() == symbol
                && spellings.contains(&pair.chain_name.trim().to_lowercase())
        })
    }

    fn find_price_feed_address(&self, symbol: &str, chain: &str) -> Option<&'a str> {
        self.price_feed
            .iter()
            .filter(|entry| entry.symbol.to_uppercase() == symbol)
            .filter(|entry| matches(&entry.blockchain, chain))
            .find_map(|entry| entry.contract_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::flatten_to_pairs;
    use crate::types::reference::TokenListDocument;

    fn pairs(json: &str) -> Vec<SupportedPair> {
        flatten_to_pairs(&TokenListDocument::from_json(json).unwrap().tokens)
    }

    fn feed(symbol: &str, blockchain: &str, address: Option<&str>) -> PriceFeedEntry {
        PriceFeedEntry {
            symbol: symbol.to_string(),
            blockchain: blockchain.to_string(),
            contract_address: address.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_native_via_alias() {
        let pairs = pairs(
            r#"{"tokens": [{"symbol": "NEAR", "name": "NEAR", "deployments": [
                {"chainName": "Near Protocol", "decimals": 24, "address": null, "type": "native"}
            ]}]}"#,
        );
        let resolver = PairResolver::new(&pairs, &[]);
        assert_eq!(resolver.resolve_address("near", "near"), AddressResult::Native);
        assert_eq!(resolver.resolve_address("NEAR", "Near Protocol"), AddressResult::Native);
        assert_eq!(resolver.resolve_address("near", "near").as_str(), "native");
    }

    #[test]
    fn test_found_case_insensitive_symbol() {
        let pairs = pairs(
            r#"{"tokens": [{"symbol": "USDC", "deployments": [
                {"chainName": "Ethereum", "decimals": 6, "address": "0x1234", "type": "erc20"}
            ]}]}"#,
        );
        let resolver = PairResolver::new(&pairs, &[]);
        assert_eq!(
            resolver.resolve_address("usdc", "eth"),
            AddressResult::Found("0x1234".to_string())
        );
        assert_eq!(resolver.resolve_address("usdc", "sol"), AddressResult::NotFound);
    }

    #[test]
    fn test_first_match_wins() {
        let pairs = pairs(
            r#"{"tokens": [
                {"symbol": "ETH", "deployments": [
                    {"chainName": "eth", "decimals": 18, "type": "native"},
                    {"chainName": "Ethereum", "decimals": 18, "address": "0xc02a", "type": "erc20"}
                ]},
                {"symbol": "USDC", "deployments": [
                    {"chainName": "solana", "decimals": 6, "address": "first", "type": "spl"},
                    {"chainName": "sol", "decimals": 6, "address": "second", "type": "spl"}
                ]}
            ]}"#,
        );
        let resolver = PairResolver::new(&pairs, &[]);
        assert_eq!(resolver.resolve_address("eth", "eth"), AddressResult::Native);
        assert_eq!(
            resolver.resolve_address("USDC", "sol"),
            AddressResult::Found("first".to_string())
        );
    }

    #[test]
    fn test_price_feed_fallback() {
        let price_feed = vec![
            feed("DAI", "solana", None),
            feed("DAI", "solana", Some("So111")),
        ];
        let resolver = PairResolver::new(&[], &price_feed);
        assert_eq!(
            resolver.resolve_address("DAI", "sol"),
            AddressResult::Found("So111".to_string())
        );
        assert_eq!(resolver.resolve_address("DAI", "eth"), AddressResult::NotFound);
    }

    #[test]
    fn test_reference_without_address_is_not_found() {
        let pairs = pairs(
            r#"{"tokens": [{"symbol": "ABC", "deployments": [
                {"chainName": "base", "decimals": 18, "type": "erc20"}
            ]}]}"#,
        );
        let price_feed = vec![feed("ABC", "base", Some("0xfeed"))];
        let resolver = PairResolver::new(&pairs, &price_feed);
        assert_eq!(resolver.resolve_address("ABC", "base"), AddressResult::NotFound);
    }

    #[test]
    fn test_not_found_anywhere() {
        let resolver = PairResolver::new(&[], &[]);
        assert_eq!(resolver.resolve_address("XYZ", "btc"), AddressResult::NotFound);
        assert_eq!(resolver.resolve_address("", "btc"), AddressResult::NotFound);
        assert_eq!(resolver.resolve_address("XYZ", ""), AddressResult::NotFound);
        assert_eq!(AddressResult::NotFound.as_str(), "");
    }

    #[test]
    fn test_availability() {
        assert!(AddressResult::Native.is_available());
        assert!(AddressResult::Found("0x1234".to_string()).is_available());
        assert!(!AddressResult::NotFound.is_available());
    }
}
