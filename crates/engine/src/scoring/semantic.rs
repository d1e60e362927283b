//! SemanticMatcher — section-to-section similarity with safety rails.
//!
//! Delegates vectors to the embedding provider and computes cosine locally.
//! A match only keeps full weight when the CV section is high-value
//! (Experience/Projects) or co-locates a hard anchor found by the extractor;
//! otherwise its similarity is halved. Provider failure or timeout takes the
//! degraded path: score 0, `available = false`, weights reassigned by the
//! hybrid scorer — never a silent failure, never a hard error.

use std::time::Duration;

use tokio::time::timeout;

use crate::embedder::{cosine_similarity, EmbeddingProvider};
use crate::models::{Document, SemanticMatch};
use crate::scoring::round1;

/// Output of the semantic pass.
#[derive(Debug, Default)]
pub struct SemanticOutcome {
    pub available: bool,
    pub score: f64,
    /// Best pairing per JD section, rails applied.
    pub matches: Vec<SemanticMatch>,
    /// Per JD section: best raw similarity to any CV section (no rails) —
    /// input to the semantic-gap floor.
    pub jd_best_raw: Vec<f32>,
    /// Per JD section: index of the best CV section under the rails —
    /// input to placement suggestions.
    pub jd_best_cv: Vec<Option<usize>>,
}

impl SemanticOutcome {
    fn unavailable(reason: &str) -> Self {
        tracing::warn!(reason, "semantic matching unavailable; degrading");
        Self {
            available: false,
            ..Self::default()
        }
    }
}

/// Runs the full semantic pass. `cv_anchors` is parallel to
/// `cv.sections` and marks hard-anchored sections.
pub async fn analyze(
    provider: &dyn EmbeddingProvider,
    embed_timeout: Duration,
    jd: &Document,
    cv: &Document,
    cv_anchors: &[bool],
) -> SemanticOutcome {
    if jd.sections.is_empty() || cv.sections.is_empty() {
        // Nothing to compare; the provider is fine.
        return SemanticOutcome {
            available: true,
            ..SemanticOutcome::default()
        };
    }

    let jd_vectors = match embed_sections(provider, embed_timeout, jd).await {
        Ok(vectors) => vectors,
        Err(reason) => return SemanticOutcome::unavailable(&reason),
    };
    let cv_vectors = match embed_sections(provider, embed_timeout, cv).await {
        Ok(vectors) => vectors,
        Err(reason) => return SemanticOutcome::unavailable(&reason),
    };

    let mut matches = Vec::with_capacity(jd.sections.len());
    let mut jd_best_raw = Vec::with_capacity(jd.sections.len());
    let mut jd_best_cv = Vec::with_capacity(jd.sections.len());
    let mut effective_sum = 0.0f64;

    for (jd_idx, jd_vector) in jd_vectors.iter().enumerate() {
        let mut best_raw = 0.0f32;
        let mut best_effective = 0.0f32;
        let mut best_cv: Option<usize> = None;

        for (cv_idx, cv_vector) in cv_vectors.iter().enumerate() {
            let raw = cosine_similarity(jd_vector, cv_vector);
            best_raw = best_raw.max(raw);

            let section = &cv.sections[cv_idx];
            let anchored = cv_anchors.get(cv_idx).copied().unwrap_or(false);
            let effective = if section.label.is_high_value() || anchored {
                raw
            } else {
                raw * 0.5
            };
            if effective > best_effective || best_cv.is_none() {
                best_effective = effective;
                best_cv = Some(cv_idx);
            }
        }

        if let Some(cv_idx) = best_cv {
            let section = &cv.sections[cv_idx];
            matches.push(SemanticMatch {
                jd_section: jd.sections[jd_idx].label.as_str().to_string(),
                cv_section: section.label.as_str().to_string(),
                similarity: best_effective,
                is_high_value: section.label.is_high_value(),
            });
        }
        jd_best_raw.push(best_raw);
        jd_best_cv.push(best_cv);
        effective_sum += f64::from(best_effective);
    }

    let score = round1(effective_sum / jd.sections.len() as f64 * 100.0);
    tracing::debug!(score, matches = matches.len(), "semantic pass complete");

    SemanticOutcome {
        available: true,
        score,
        matches,
        jd_best_raw,
        jd_best_cv,
    }
}

/// Embeds every section of a document. Any failure or timeout aborts the
/// whole pass with a reason string; the caller degrades.
async fn embed_sections(
    provider: &dyn EmbeddingProvider,
    embed_timeout: Duration,
    document: &Document,
) -> Result<Vec<Vec<f32>>, String> {
    let mut vectors = Vec::with_capacity(document.sections.len());
    for section in &document.sections {
        match timeout(embed_timeout, provider.embed(&section.text)).await {
            Ok(Ok(vector)) => vectors.push(vector),
            Ok(Err(error)) => return Err(error.to_string()),
            Err(_elapsed) => return Err(format!(
                "embed call exceeded {}ms",
                embed_timeout.as_millis()
            )),
        }
    }
    Ok(vectors)
}
