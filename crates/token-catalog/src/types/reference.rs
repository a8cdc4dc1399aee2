use serde::{Deserialize, Deserializer, Serialize};

use super::decode_lenient;

/// Top-level reference token list (`tokenlist.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenListDocument {
    /// Entries in catalog order. Entries that are neither grouped nor flat
    /// are dropped while parsing.
    #[serde(default, deserialize_with = "deserialize_entries")]
    pub tokens: Vec<ReferenceEntry>,
}

impl TokenListDocument {
    /// Parse a token list from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn deserialize_entries<'de, D>(deserializer: D) -> Result<Vec<ReferenceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(decode_lenient(raw.unwrap_or_default(), "token list entry"))
}

fn deserialize_grouped_tokens<'de, D>(deserializer: D) -> Result<Vec<GroupedToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(decode_lenient(raw, "grouped token"))
}

/// A bad deployment is dropped on its own; its siblings and the owning
/// entry survive.
fn deserialize_deployments<'de, D>(deserializer: D) -> Result<Vec<Deployment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(decode_lenient(raw, "deployment"))
}

/// One logical asset in the reference list — either grouped (sub-assets
/// with their own deployments) or flat (deployments attached directly).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceEntry {
    Grouped(GroupedEntry),
    Flat(FlatEntry),
}

impl ReferenceEntry {
    pub fn is_grouped(&self) -> bool {
        matches!(self, ReferenceEntry::Grouped(_))
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, ReferenceEntry::Flat(_))
    }

    pub fn symbol(&self) -> &str {
        match self {
            ReferenceEntry::Grouped(g) => &g.symbol,
            ReferenceEntry::Flat(f) => &f.symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ReferenceEntry::Grouped(g) => &g.name,
            ReferenceEntry::Flat(f) => &f.name,
        }
    }
}

/// An asset listed under different symbols per chain family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedEntry {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "originChainName")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_chain_name: Option<String>,

    #[serde(rename = "groupedTokens", deserialize_with = "deserialize_grouped_tokens")]
    pub grouped_tokens: Vec<GroupedToken>,
}

/// A sub-asset of a [`GroupedEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedToken {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "defuseAssetId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defuse_asset_id: Option<String>,

    #[serde(rename = "originChainName")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_chain_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_deployments")]
    pub deployments: Vec<Deployment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatEntry {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "defuseAssetId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defuse_asset_id: Option<String>,

    #[serde(rename = "originChainName")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_chain_name: Option<String>,

    #[serde(deserialize_with = "deserialize_deployments")]
    pub deployments: Vec<Deployment>,
}

/// A token's presence on one chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    /// Raw chain name as spelled by the catalog (not canonical).
    #[serde(rename = "chainName")]
    pub chain_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,

    /// Absent for native assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: AddressKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,

    #[serde(rename = "originChainName")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_chain_name: Option<String>,
}

/// Deployment `type`: `native` for base currencies, anything else is a
/// contract standard (`erc20`, `nep141`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AddressKind {
    Native,
    Contract(String),
}

impl AddressKind {
    pub fn is_native(&self) -> bool {
        matches!(self, AddressKind::Native)
    }
}

impl Default for AddressKind {
    fn default() -> Self {
        AddressKind::Contract(String::new())
    }
}

impl From<String> for AddressKind {
    fn from(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("native") {
            AddressKind::Native
        } else {
            AddressKind::Contract(raw)
        }
    }
}

impl From<AddressKind> for String {
    fn from(kind: AddressKind) -> Self {
        match kind {
            AddressKind::Native => "native".to_string(),
            AddressKind::Contract(raw) => raw,
        }
    }
}
