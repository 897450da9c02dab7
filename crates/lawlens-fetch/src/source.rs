//! Statute sources: the seam between consumers and the network.

use std::future::Future;
use std::sync::Arc;

use lawlens_core::LawQuery;

use crate::cache::DocumentCache;
use crate::client::LawApiClient;
use crate::config::LawApiConfig;
use crate::document::StatuteDocument;
use crate::error::FetchError;

/// Anything that can resolve a [`LawQuery`] to a statute document.
///
/// Implementations decide their own caching. The production implementation
/// is [`StatuteFetcher`]; tests drive consumers with in-memory sources.
pub trait StatuteSource {
    /// Resolve a query to its document.
    fn fetch(
        &self,
        query: &LawQuery,
    ) -> impl Future<Output = Result<Arc<StatuteDocument>, FetchError>>;
}

/// Caching statute fetcher.
///
/// Cheaply cloneable; clones share the same cache.
#[derive(Debug, Clone)]
pub struct StatuteFetcher {
    client: LawApiClient,
    cache: Arc<DocumentCache>,
}

impl StatuteFetcher {
    /// Create a fetcher with a fresh cache.
    pub fn new(config: &LawApiConfig) -> Result<Self, FetchError> {
        Ok(Self::with_cache(LawApiClient::new(config)?, Arc::new(DocumentCache::new())))
    }

    /// Create a fetcher over an existing client and cache.
    pub fn with_cache(client: LawApiClient, cache: Arc<DocumentCache>) -> Self {
        Self { client, cache }
    }

    /// The underlying API client.
    pub fn client(&self) -> &LawApiClient {
        &self.client
    }

    /// The shared document cache.
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Fetch a statute document, consulting the cache first.
    ///
    /// At most one network request is made per distinct query for the
    /// lifetime of the cache, unless requests fail.
    pub async fn fetch(&self, query: &LawQuery) -> Result<Arc<StatuteDocument>, FetchError> {
        let url = self.client.request_url(query);
        let key = url.to_string();
        let result = self.cache.get_or_fetch(&key, || self.client.get(&url)).await;
        if let Err(e) = &result {
            tracing::warn!(%query, error = %e, "statute fetch failed");
        }
        result
    }
}

impl StatuteSource for StatuteFetcher {
    async fn fetch(&self, query: &LawQuery) -> Result<Arc<StatuteDocument>, FetchError> {
        StatuteFetcher::fetch(self, query).await
    }
}
