//! Content-addressed embedding cache.
//!
//! Memoizes vectors by a deterministic hash of the input text so re-scoring
//! a lightly edited CV does not recompute every unchanged section. The cache
//! guarantees at-most-once computation per key under concurrent access: the
//! first caller starts the embed, concurrent callers with the same key await
//! the same in-flight cell. Failures are not cached — a later call retries.
//! Purely a performance layer; correctness never depends on it.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use siphasher::sip::SipHasher13;
use tokio::sync::{Mutex, OnceCell};

use super::{EmbedError, EmbeddingProvider};

const KEY_SEED_K0: u64 = 0x2d90_44e1_a7cb_5f38;
const KEY_SEED_K1: u64 = 0xe6b3_1c57_f982_0ad4;

type Cell = Arc<OnceCell<Vec<f32>>>;

pub struct CachedProvider {
    inner: Arc<dyn EmbeddingProvider>,
    entries: Mutex<HashMap<u64, Cell>>,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(text: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(KEY_SEED_K0, KEY_SEED_K1);
        text.hash(&mut hasher);
        hasher.finish()
    }
}

#[async_trait]
impl EmbeddingProvider for CachedProvider {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(Self::key(text)).or_default().clone()
        };
        // The map lock is released before awaiting the embed, so distinct
        // keys compute concurrently; same-key callers rendezvous on the cell.
        let vector = cell
            .get_or_try_init(|| self.inner.embed(text))
            .await?;
        Ok(vector.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Counts embeds and can be switched to fail, for retry behavior.
    struct CountingEmbedder {
        calls: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(fail_first),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn dimension(&self) -> usize {
            4
        }

        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self
                .fail_first
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(EmbedError::Unavailable("induced failure".into()));
            }
            Ok(vec![text.len() as f32, 0.0, 0.0, 1.0])
        }
    }

    #[tokio::test]
    async fn test_repeat_embeds_hit_the_cache() {
        let counting = Arc::new(CountingEmbedder::new(0));
        let calls = Arc::clone(&counting);
        let cached = CachedProvider::new(counting);

        let first = cached.embed("same text").await.unwrap();
        let second = cached.embed("same text").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_texts_compute_separately() {
        let counting = Arc::new(CountingEmbedder::new(0));
        let calls = Arc::clone(&counting);
        let cached = CachedProvider::new(counting);

        cached.embed("one").await.unwrap();
        cached.embed("two").await.unwrap();
        assert_eq!(calls.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_key_computes_at_most_once() {
        let counting = Arc::new(CountingEmbedder::new(0));
        let calls = Arc::clone(&counting);
        let cached = Arc::new(CachedProvider::new(counting));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cached = Arc::clone(&cached);
            handles.push(tokio::spawn(
                async move { cached.embed("shared key").await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(calls.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let counting = Arc::new(CountingEmbedder::new(1));
        let calls = Arc::clone(&counting);
        let cached = CachedProvider::new(counting);

        assert!(cached.embed("text").await.is_err());
        // Second call retries instead of replaying the failure.
        assert!(cached.embed("text").await.is_ok());
        assert_eq!(calls.calls.load(Ordering::SeqCst), 2);
    }
}
