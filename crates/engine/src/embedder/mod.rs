//! Embedding provider boundary.
//!
//! The engine never computes embeddings itself — it asks an
//! `EmbeddingProvider` for a fixed-length vector per section string and only
//! does cosine math on the results. Any provider failure (network, parse,
//! timeout) is treated identically: the semantic channel reports
//! unavailable and the engine reweights, it never hard-fails a run.

pub mod cache;
pub mod hash;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use cache::CachedProvider;
pub use hash::HashEmbedder;
pub use http::{HttpEmbedder, HttpEmbedderConfig};

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider returned an empty vector")]
    EmptyVector,
}

/// A source of fixed-length text embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Implementation name, recorded for report transparency.
    fn name(&self) -> &'static str;

    /// Embedding dimension this provider produces.
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

/// Cosine similarity clamped to [0, 1]. Dimension mismatch logs and scores
/// zero rather than panicking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let a = vec![1.0, 0.0, 2.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_opposed_vectors_clamp_to_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_scores_zero() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
