use serde::Serialize;

use crate::chain::CanonicalChain;
use crate::merger::MergedCatalog;
use crate::normalizer::TokenOption;
use crate::resolver::AddressResult;
use crate::source::CatalogSnapshot;
use crate::types::price_feed::PriceFeedEntry;
use crate::types::reference::TokenListDocument;

/// Shown in an address panel when the pair resolves to nothing.
pub const NOT_AVAILABLE: &str = "Not available";

/// Which end of the transfer a selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Destination,
}

/// Token and chain picked for one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub token: Option<String>,
    pub chain: Option<String>,
}

impl Selection {
    fn is_complete(&self) -> bool {
        self.token.is_some() && self.chain.is_some()
    }
}

/// Resolved address for one side, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPanel {
    pub side: Side,
    pub token: String,
    pub chain: String,
    pub result: AddressResult,
}

impl AddressPanel {
    /// The address, `native`, or [`NOT_AVAILABLE`].
    pub fn display_value(&self) -> &str {
        match self.result {
            AddressResult::NotFound => NOT_AVAILABLE,
            _ => self.result.as_str(),
        }
    }

    /// Text offered for copying; `native` for base currencies, `None` on a
    /// miss.
    pub fn copy_text(&self) -> Option<&str> {
        self.result.is_available().then(|| self.result.as_str())
    }

    /// Explanation shown under a miss.
    pub fn missing_note(&self) -> Option<String> {
        match self.result {
            AddressResult::NotFound => Some(format!("{} on {} not in list", self.token, self.chain)),
            _ => None,
        }
    }
}

/// Source/destination selection state over a merged catalog.
///
/// Replacing either catalog snapshot rebuilds the merged view from scratch.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    snapshot: CatalogSnapshot,
    catalog: MergedCatalog,
    source: Selection,
    destination: Selection,
    show_final: bool,
}

impl Explorer {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let catalog = snapshot.merge();
        Self {
            snapshot,
            catalog,
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> &MergedCatalog {
        &self.catalog
    }

    pub fn update_reference(&mut self, reference: TokenListDocument) {
        self.snapshot.reference = reference;
        self.catalog = self.snapshot.merge();
    }

    pub fn update_price_feed(&mut self, price_feed: Vec<PriceFeedEntry>) {
        self.snapshot.price_feed = price_feed;
        self.catalog = self.snapshot.merge();
    }

    pub fn tokens(&self) -> &[TokenOption] {
        self.catalog.tokens()
    }

    /// Chain options for `side`; empty until that side has a token.
    pub fn chains_for(&self, side: Side) -> &[CanonicalChain] {
        if self.selection(side).token.is_some() {
            self.catalog.chains()
        } else {
            &[]
        }
    }

    pub fn selection(&self, side: Side) -> &Selection {
        match side {
            Side::Source => &self.source,
            Side::Destination => &self.destination,
        }
    }

    fn selection_mut(&mut self, side: Side) -> &mut Selection {
        match side {
            Side::Source => &mut self.source,
            Side::Destination => &mut self.destination,
        }
    }

    /// Pick a token. Clears that side's chain; an empty symbol clears the token.
    pub fn select_token(&mut self, side: Side, symbol: &str) {
        let selection = self.selection_mut(side);
        selection.token = Some(symbol.to_string()).filter(|s| !s.is_empty());
        selection.chain = None;
        self.show_final = false;
    }

    pub fn select_chain(&mut self, side: Side, chain: &str) {
        self.selection_mut(side).chain = Some(chain.to_string()).filter(|c| !c.is_empty());
        self.show_final = false;
    }

    pub fn can_finalize(&self) -> bool {
        self.source.is_complete() && self.destination.is_complete()
    }

    /// Reveal the address panels. Returns `false` while a selection is incomplete.
    pub fn finalize(&mut self) -> bool {
        self.show_final = self.can_finalize();
        self.show_final
    }

    pub fn clear(&mut self) {
        self.source = Selection::default();
        self.destination = Selection::default();
        self.show_final = false;
    }

    /// Source and destination panels, once finalized.
    pub fn addresses(&self) -> Option<(AddressPanel, AddressPanel)> {
        if !(self.show_final && self.can_finalize()) {
            return None;
        }
        Some((self.panel(Side::Source)?, self.panel(Side::Destination)?))
    }

    fn panel(&self, side: Side) -> Option<AddressPanel> {
        let selection = self.selection(side);
        let token = selection.token.clone()?;
        let chain = selection.chain.clone()?;
        let result = self.catalog.resolve_address(&token, &chain);
        Some(AddressPanel {
            side,
            token,
            chain,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explorer() -> Explorer {
        let reference = TokenListDocument::from_json(
            r#"{"tokens": [
                {"symbol": "NEAR", "name": "NEAR", "deployments": [
                    {"chainName": "Near Protocol", "decimals": 24, "type": "native"}
                ]},
                {"symbol": "USDC", "name": "USD Coin", "deployments": [
                    {"chainName": "Ethereum", "decimals": 6, "address": "0x1234", "type": "erc20"}
                ]}
            ]}"#,
        )
        .unwrap();
        Explorer::new(CatalogSnapshot {
            reference,
            price_feed: Vec::new(),
        })
    }

    #[test]
    fn test_chains_need_token() {
        let mut explorer = explorer();
        assert!(explorer.chains_for(Side::Source).is_empty());

        explorer.select_token(Side::Source, "USDC");
        assert_eq!(explorer.chains_for(Side::Source), &["eth", "near"]);
        assert!(explorer.chains_for(Side::Destination).is_empty());
    }

    #[test]
    fn test_token_change_resets_chain() {
        let mut explorer = explorer();
        explorer.select_token(Side::Source, "USDC");
        explorer.select_chain(Side::Source, "eth");
        explorer.select_token(Side::Source, "NEAR");
        assert_eq!(explorer.selection(Side::Source).chain, None);
    }

    #[test]
    fn test_finalize_and_panels() {
        let mut explorer = explorer();
        assert!(!explorer.finalize());

        explorer.select_token(Side::Source, "USDC");
        explorer.select_chain(Side::Source, "eth");
        explorer.select_token(Side::Destination, "NEAR");
        explorer.select_chain(Side::Destination, "near");
        assert!(explorer.addresses().is_none());
        assert!(explorer.finalize());

        let (source, destination) = explorer.addresses().unwrap();
        assert_eq!(source.display_value(), "0x1234");
        assert_eq!(source.copy_text(), Some("0x1234"));
        assert_eq!(destination.result, AddressResult::Native);
        assert_eq!(destination.display_value(), "native");
        assert_eq!(destination.copy_text(), Some("native"));

        // Any change hides the panels again.
        explorer.select_chain(Side::Destination, "eth");
        assert!(explorer.addresses().is_none());
        assert!(explorer.finalize());

        let (_, destination) = explorer.addresses().unwrap();
        assert_eq!(destination.display_value(), NOT_AVAILABLE);
        assert_eq!(destination.copy_text(), None);
        assert_eq!(destination.missing_note().as_deref(), Some("NEAR on eth not in list"));
    }

    #[test]
    fn test_clear() {
        let mut explorer = explorer();
        explorer.select_token(Side::Source, "USDC");
        explorer.select_chain(Side::Source, "eth");
        explorer.clear();
        assert_eq!(*explorer.selection(Side::Source), Selection::default());
        assert!(!explorer.can_finalize());
    }

    #[test]
    fn test_price_feed_update_recomputes() {
        let mut explorer = explorer();
        assert_eq!(explorer.tokens().len(), 2);

        explorer.update_price_feed(vec![PriceFeedEntry {
            symbol: "DAI".to_string(),
            blockchain: "solana".to_string(),
            contract_address: Some("So111".to_string()),
            ..Default::default()
        }]);
        assert_eq!(explorer.tokens().len(), 3);
        assert_eq!(explorer.catalog().chains().len(), 3);
        assert_eq!(
            explorer.catalog().resolve_address("DAI", "sol"),
            AddressResult::Found("So111".to_string())
        );

        explorer.update_reference(TokenListDocument::default());
        assert_eq!(explorer.tokens().len(), 1);
    }
}
