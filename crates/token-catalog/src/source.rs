//! Catalog loading.
//!
//! Both catalogs are fetched once per session. The reference list and the
//! price feed are requested concurrently; a failed reference list gets one
//! fallback attempt, a failed price feed degrades to an empty feed.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, FetchError};
use crate::merger::MergedCatalog;
use crate::types::price_feed::PriceFeedEntry;
use crate::types::reference::TokenListDocument;

/// Trait for catalog sources (embedded, HTTP, ...).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the primary reference token list.
    async fn fetch_reference(&self) -> Result<TokenListDocument, FetchError>;

    /// Fetch the alternate reference list, used once if the primary fails.
    async fn fetch_reference_fallback(&self) -> Result<TokenListDocument, FetchError>;

    /// Fetch the live price feed.
    async fn fetch_price_feed(&self) -> Result<Vec<PriceFeedEntry>, FetchError>;
}

/// Raw snapshot of both catalogs as fetched.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub reference: TokenListDocument,
    pub price_feed: Vec<PriceFeedEntry>,
}

impl CatalogSnapshot {
    pub fn merge(&self) -> MergedCatalog {
        MergedCatalog::build(&self.reference.tokens, self.price_feed.clone())
    }
}

/// Fetch both catalogs.
///
/// Fails with [`Error::Unavailable`] only when the reference list and its
/// fallback both fail.
pub async fn load_catalogs(source: &dyn CatalogSource) -> Result<CatalogSnapshot, Error> {
    let (reference, price_feed) =
        tokio::join!(load_reference(source), source.fetch_price_feed());

    let reference = reference?;
    let price_feed = price_feed.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "price feed unavailable, continuing with token list only");
        Vec::new()
    });

    tracing::debug!(
        reference = reference.tokens.len(),
        price_feed = price_feed.len(),
        "loaded token catalogs"
    );
    Ok(CatalogSnapshot {
        reference,
        price_feed,
    })
}

/// Like [`load_catalogs`], but yields `Ok(None)` once `cancel` fires so a
/// torn-down caller never applies a late result.
pub async fn load_catalogs_until(
    source: &dyn CatalogSource,
    cancel: &CancellationToken,
) -> Result<Option<CatalogSnapshot>, Error> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("catalog load abandoned");
            Ok(None)
        }
        result = load_catalogs(source) => {
            if cancel.is_cancelled() {
                return Ok(None);
            }
            result.map(Some)
        }
    }
}

async fn load_reference(source: &dyn CatalogSource) -> Result<TokenListDocument, Error> {
    match source.fetch_reference().await {
        Ok(document) => Ok(document),
        Err(primary) => {
            tracing::warn!(error = %primary, "token list fetch failed, trying fallback");
            source
                .fetch_reference_fallback()
                .await
                .map_err(|fallback| Error::Unavailable { primary, fallback })
        }
    }
}

/// In-memory catalog source. Legs left unset fail with HTTP 404.
#[derive(Debug, Default)]
pub struct StaticCatalogSource {
    reference: Option<TokenListDocument>,
    reference_fallback: Option<TokenListDocument>,
    price_feed: Option<Vec<PriceFeedEntry>>,
    fallback_requests: AtomicUsize,
}

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference(mut self, document: TokenListDocument) -> Self {
        self.reference = Some(document);
        self
    }

    pub fn with_reference_fallback(mut self, document: TokenListDocument) -> Self {
        self.reference_fallback = Some(document);
        self
    }

    pub fn with_price_feed(mut self, feed: Vec<PriceFeedEntry>) -> Self {
        self.price_feed = Some(feed);
        self
    }

    /// How many times the fallback reference list was requested.
    pub fn fallback_requests(&self) -> usize {
        self.fallback_requests.load(Ordering::Relaxed)
    }

    fn missing(what: &str) -> FetchError {
        FetchError::Status {
            url: format!("static://{what}"),
            status: 404,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_reference(&self) -> Result<TokenListDocument, FetchError> {
        self.reference
            .clone()
            .ok_or_else(|| Self::missing("tokenlist"))
    }

    async fn fetch_reference_fallback(&self) -> Result<TokenListDocument, FetchError> {
        self.fallback_requests.fetch_add(1, Ordering::Relaxed);
        self.reference_fallback
            .clone()
            .ok_or_else(|| Self::missing("tokenlist-fallback"))
    }

    async fn fetch_price_feed(&self) -> Result<Vec<PriceFeedEntry>, FetchError> {
        self.price_feed
            .clone()
            .ok_or_else(|| Self::missing("tokens"))
    }
}

#[cfg(feature = "http")]
pub use http::HttpCatalogSource;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;

    use super::CatalogSource;
    use crate::config::CatalogConfig;
    use crate::error::FetchError;
    use crate::types::price_feed::{parse_price_feed, PriceFeedEntry};
    use crate::types::reference::TokenListDocument;

    /// Fetches both catalogs over plain HTTP GET.
    #[derive(Debug, Clone)]
    pub struct HttpCatalogSource {
        client: reqwest::Client,
        config: CatalogConfig,
    }

    impl HttpCatalogSource {
        pub fn new(config: CatalogConfig) -> Self {
            Self::with_client(reqwest::Client::new(), config)
        }

        pub fn with_client(client: reqwest::Client, config: CatalogConfig) -> Self {
            Self { client, config }
        }

        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            tracing::debug!(url, "fetching catalog");
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            response
                .text()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))
        }
    }

    #[async_trait]
    impl CatalogSource for HttpCatalogSource {
        async fn fetch_reference(&self) -> Result<TokenListDocument, FetchError> {
            let body = self.get_text(&self.config.reference_url()).await?;
            Ok(TokenListDocument::from_json(&body)?)
        }

        async fn fetch_reference_fallback(&self) -> Result<TokenListDocument, FetchError> {
            let body = self.get_text(&self.config.reference_fallback_url()).await?;
            Ok(TokenListDocument::from_json(&body)?)
        }

        async fn fetch_price_feed(&self) -> Result<Vec<PriceFeedEntry>, FetchError> {
            let body = self.get_text(&self.config.price_feed_url).await?;
            Ok(parse_price_feed(&body)?)
        }
    }
}
