//! In-process statute document cache.
//!
//! One slot per canonical request URL. A slot is a `tokio::sync::OnceCell`:
//! the first caller runs the fetch, concurrent callers for the same URL wait
//! on it, and later callers read the stored value. A failed fetch leaves the
//! slot empty so the next caller fetches again.
//!
//! The slot map sits behind a `parking_lot::Mutex` that is never held across
//! an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::document::StatuteDocument;
use crate::error::FetchError;

type Slot = Arc<OnceCell<Arc<StatuteDocument>>>;

/// URL-keyed, never-evicting document cache shared by all consumers.
#[derive(Debug, Default)]
pub struct DocumentCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl DocumentCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored document for `key`, if a fetch for it has succeeded.
    pub fn get(&self, key: &str) -> Option<Arc<StatuteDocument>> {
        self.slots.lock().get(key).and_then(|slot| slot.get().cloned())
    }

    /// Return the stored document for `key`, or run `fetch` to produce it.
    ///
    /// `fetch` runs at most once per key across all concurrent callers unless
    /// it fails, in which case nothing is stored.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &str,
        fetch: F,
    ) -> Result<Arc<StatuteDocument>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StatuteDocument, FetchError>>,
    {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        if let Some(doc) = slot.get() {
            tracing::debug!(key, "statute cache hit");
            return Ok(Arc::clone(doc));
        }

        let doc = slot
            .get_or_try_init(move || async move {
                let doc = fetch().await?;
                tracing::debug!(key, "statute cache filled");
                Ok::<_, FetchError>(Arc::new(doc))
            })
            .await?;
        Ok(Arc::clone(doc))
    }

    /// Number of documents stored.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Whether no document is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawlens_core::StatuteNode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn doc(text: &str) -> StatuteDocument {
        StatuteDocument::from_full_text(StatuteNode::text(text))
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let cache = DocumentCache::new();
        let calls = AtomicU32::new(0);

        let first = cache
            .get_or_fetch("k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(doc("a"))
            })
            .await
            .unwrap();
        let second = cache
            .get_or_fetch("k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(doc("b"))
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get("k").as_deref(), Some(&doc("a")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_stored() {
        let cache = DocumentCache::new();
        let failed = cache
            .get_or_fetch("k", || async {
                Err(FetchError::Status {
                    url: "k".into(),
                    status: 503,
                    body: String::new(),
                })
            })
            .await;
        assert!(matches!(failed, Err(FetchError::Status { status: 503, .. })));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());

        let retried = cache.get_or_fetch("k", || async { Ok(doc("ok")) }).await.unwrap();
        assert_eq!(*retried, doc("ok"));
    }

    #[tokio::test]
    async fn distinct_keys_are_independent() {
        let cache = DocumentCache::new();
        cache.get_or_fetch("a", || async { Ok(doc("a")) }).await.unwrap();
        cache.get_or_fetch("b", || async { Ok(doc("b")) }).await.unwrap();
        assert_eq!(cache.len(), 2);
    }
}
