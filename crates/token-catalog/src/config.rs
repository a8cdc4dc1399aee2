use std::env;

use serde::Deserialize;

use crate::error::Error;

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_reference_path() -> String {
    "/data/tokenlist.json".to_string()
}

fn default_reference_fallback_path() -> String {
    "/data/tokenlist.schema.json".to_string()
}

fn default_price_feed_url() -> String {
    "https://1click.chaindefuser.com/v0/tokens".to_string()
}

fn default_price_table_limit() -> usize {
    50
}

/// Where the two catalogs live and how much of the price table to show.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Origin serving the reference token list.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_reference_path")]
    pub reference_path: String,

    /// Tried once when the primary reference list fails.
    #[serde(default = "default_reference_fallback_path")]
    pub reference_fallback_path: String,

    #[serde(default = "default_price_feed_url")]
    pub price_feed_url: String,

    #[serde(default = "default_price_table_limit")]
    pub price_table_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            reference_path: default_reference_path(),
            reference_fallback_path: default_reference_fallback_path(),
            price_feed_url: default_price_feed_url(),
            price_table_limit: default_price_table_limit(),
        }
    }
}

impl CatalogConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Defaults overridden by `TOKEN_CATALOG_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env::var("TOKEN_CATALOG_BASE_URL").unwrap_or(defaults.base_url),
            reference_path: env::var("TOKEN_CATALOG_REFERENCE_PATH")
                .unwrap_or(defaults.reference_path),
            reference_fallback_path: env::var("TOKEN_CATALOG_REFERENCE_FALLBACK_PATH")
                .unwrap_or(defaults.reference_fallback_path),
            price_feed_url: env::var("TOKEN_CATALOG_PRICE_FEED_URL")
                .unwrap_or(defaults.price_feed_url),
            price_table_limit: match env::var("TOKEN_CATALOG_PRICE_TABLE_LIMIT") {
                Ok(raw) => raw.parse().map_err(|e| {
                    Error::Config(format!("TOKEN_CATALOG_PRICE_TABLE_LIMIT={raw}: {e}"))
                })?,
                Err(_) => defaults.price_table_limit,
            },
        })
    }

    pub fn reference_url(&self) -> String {
        join_url(&self.base_url, &self.reference_path)
    }

    pub fn reference_fallback_url(&self) -> String {
        join_url(&self.base_url, &self.reference_fallback_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = CatalogConfig::from_json("{}").unwrap();
        assert_eq!(config.price_table_limit, 50);
        assert_eq!(config.reference_url(), "http://localhost:3000/data/tokenlist.json");
        assert_eq!(
            config.reference_fallback_url(),
            "http://localhost:3000/data/tokenlist.schema.json"
        );
        assert_eq!(config.price_feed_url, "https://1click.chaindefuser.com/v0/tokens");
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_json(
            r#"{"base_url": "https://intents.example/", "price_table_limit": 10}"#,
        )
        .unwrap();
        assert_eq!(config.reference_url(), "https://intents.example/data/tokenlist.json");
        assert_eq!(config.price_table_limit, 10);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CatalogConfig::from_json(r#"{"price_table_limit": "many"}"#),
            Err(Error::Config(_))
        ));
    }
}
