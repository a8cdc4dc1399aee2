use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::decode_lenient;

/// One row of the live price feed (`/v0/tokens`): a token on one chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceFeedEntry {
    #[serde(default)]
    pub symbol: String,

    /// Raw chain name as spelled by the feed.
    #[serde(default)]
    pub blockchain: String,

    #[serde(rename = "contractAddress")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(rename = "priceUpdatedAt")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,

    #[serde(rename = "assetId")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

impl PriceFeedEntry {
    /// Contract address, if present and non-empty.
    pub fn contract_address(&self) -> Option<&str> {
        self.contract_address
            .as_deref()
            .filter(|address| !address.is_empty())
    }

    /// `priceUpdatedAt` parsed as RFC 3339; `None` when absent or malformed.
    pub fn updated_at(&self) -> Option<OffsetDateTime> {
        self.price_updated_at
            .as_deref()
            .and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
    }
}

/// Parse the price feed body. Anything other than a JSON array yields an
/// empty feed; rows that do not decode are skipped.
pub fn parse_price_feed(json: &str) -> Result<Vec<PriceFeedEntry>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(rows) => Ok(decode_lenient(rows, "price feed row")),
        _ => {
            tracing::warn!("price feed body is not an array, ignoring it");
            Ok(Vec::new())
        }
    }
}
