//! Engine façade: one call from document pair to `MatchReport`.
//!
//! A scoring run is a pure function of `(cv_text, jd_text, company_name,
//! weights)` plus the embedding call; runs share no mutable state and may
//! execute fully in parallel. Within a run the pipeline is a fork-join:
//! normalization and extraction first, then lexical, semantic, and evidence
//! concurrently, then hybrid composition and gap derivation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{CategoryWeights, EngineConfig};
use crate::embedder::EmbeddingProvider;
use crate::errors::EngineError;
use crate::extract::{self, Extraction};
use crate::models::{
    Document, MatchReport, ParsedEntities, SectionAnalysis, SectionSummary, SemanticAnalysis,
};
use crate::normalize::normalize_document;
use crate::scoring::{evidence, gaps, hybrid, lexical, semantic};
use crate::stopwords::StopwordSet;

pub struct MatchEngine {
    provider: Arc<dyn EmbeddingProvider>,
    config: EngineConfig,
}

impl MatchEngine {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: Arc<dyn EmbeddingProvider>, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    /// Scores one CV against one JD and explains the result.
    ///
    /// Only an oversized document is a hard error. Everything else — empty
    /// input, unparsable dates, an unreachable embedding provider — degrades
    /// into a best-effort report with warnings, because the caller's UX
    /// depends on always having something to display.
    pub async fn analyze(
        &self,
        cv_text: &str,
        jd_text: &str,
        company_name: Option<&str>,
        weights: Option<CategoryWeights>,
    ) -> Result<MatchReport, EngineError> {
        self.check_size("cv", cv_text)?;
        self.check_size("jd", jd_text)?;

        let mut warnings: Vec<String> = Vec::new();

        let cv_doc = normalize_document(cv_text);
        let jd_doc = normalize_document(jd_text);
        let stopwords = StopwordSet::resolve(company_name, jd_text);

        let jd = extract::extract_jd(&jd_doc, &stopwords);
        let cv = extract::extract(&cv_doc);
        if cv.years.low_confidence {
            warnings.push(
                "years of experience is low-confidence: most dated entries failed to parse"
                    .to_string(),
            );
        }

        let (category_weights, config_warning) = weights
            .unwrap_or_else(|| self.config.category_weights.clone())
            .normalized();
        if let Some(warning) = config_warning {
            warnings.push(warning.to_string());
        }

        // Fork-join: the three matchers are independent of each other.
        let top_n = self.config.top_terms_per_category;
        let (lexical_outcome, semantic_outcome, evidence_analysis) = tokio::join!(
            async {
                lexical::score(
                    &jd,
                    &cv,
                    &cv_doc.canonical_text,
                    &stopwords,
                    &category_weights,
                    top_n,
                )
            },
            semantic::analyze(
                self.provider.as_ref(),
                self.config.embed_timeout,
                &jd_doc,
                &cv_doc,
                &cv.section_hard_anchors,
            ),
            async {
                let matched_hard = lexical::matched_hard_skills(
                    &jd,
                    &cv,
                    &cv_doc.canonical_text,
                    &stopwords,
                    top_n,
                );
                evidence::analyze(&cv_doc, &matched_hard)
            },
        );

        if !semantic_outcome.available {
            warnings.push(
                "embedding provider unavailable; semantic weight redistributed to lexical and evidence"
                    .to_string(),
            );
        }

        let evidence_score = evidence::score(&evidence_analysis);
        let hybrid_scoring = hybrid::compose(
            lexical_outcome.score,
            semantic_outcome.score,
            semantic_outcome.available,
            evidence_score,
            self.config.hybrid_weights,
        );

        let gap_analysis = gaps::analyze(
            &lexical_outcome,
            &evidence_analysis,
            &semantic_outcome,
            &jd,
            &cv_doc,
            cv.years.years,
            self.config.semantic_gap_floor,
        );

        let eligibility = hybrid::eligibility(
            gap_analysis.critical_gaps.len(),
            gap_analysis.experience_gaps.gap,
            self.config.experience_tolerance_years,
        );

        let recommendation = gaps::recommendation(hybrid_scoring.final_score, &gap_analysis);

        info!(
            score = hybrid_scoring.final_score,
            ?eligibility,
            semantic_available = semantic_outcome.available,
            "scoring run complete"
        );

        Ok(MatchReport {
            score: hybrid_scoring.final_score,
            matched: lexical_outcome.matched,
            total: lexical_outcome.total,
            missing_keywords: lexical_outcome.missing_keywords,
            matched_keywords: lexical_outcome.matched_keywords,
            scores_by_category: lexical_outcome.categories,
            section_analysis: SectionAnalysis {
                cv_sections: section_summaries(&cv_doc, &cv),
                jd_sections: section_summaries(&jd_doc, &jd.base),
            },
            evidence_analysis,
            parsed_entities: ParsedEntities {
                cv: cv.entities,
                jd: jd.base.entities,
            },
            hybrid_scoring,
            semantic_analysis: SemanticAnalysis {
                available: semantic_outcome.available,
                score: semantic_outcome.score,
                matches: semantic_outcome.matches,
            },
            eligibility,
            gap_analysis,
            recommendation,
            warnings,
        })
    }

    fn check_size(&self, which: &'static str, text: &str) -> Result<(), EngineError> {
        let max = self.config.max_document_bytes;
        if text.len() > max {
            debug!(which, len = text.len(), max, "rejecting oversized document");
            return Err(EngineError::InputTooLarge {
                which,
                len: text.len(),
                max,
            });
        }
        Ok(())
    }
}

fn section_summaries(document: &Document, extraction: &Extraction) -> Vec<SectionSummary> {
    document
        .sections
        .iter()
        .enumerate()
        .map(|(idx, section)| SectionSummary {
            label: section.label.as_str().to_string(),
            chars: section.text.len(),
            entity_count: extraction
                .section_entities
                .get(idx)
                .map(Vec::len)
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::embedder::{EmbedError, HashEmbedder};
    use crate::models::Eligibility;

    const ACME_JD: &str = "Must have Python and AWS. Nice to have Docker. \
5+ years experience required. Company: Acme Corp.";

    const ACME_CV: &str = "Senior Engineer at Beta Inc, 2018-2024. \
Used Python to automate deployments on AWS, reducing cost by 20%.";

    struct DownEmbedder;

    #[async_trait]
    impl EmbeddingProvider for DownEmbedder {
        fn name(&self) -> &'static str {
            "down"
        }
        fn dimension(&self) -> usize {
            8
        }
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Err(EmbedError::Unavailable("connection refused".into()))
        }
    }

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(HashEmbedder::default()))
    }

    async fn score(cv: &str, jd: &str) -> MatchReport {
        engine().analyze(cv, jd, None, None).await.unwrap()
    }

    #[tokio::test]
    async fn test_acme_scenario() {
        let report = score(ACME_CV, ACME_JD).await;

        let critical = &report.scores_by_category["critical_keywords"];
        assert!(critical.items_matched.contains(&"python".to_string()));
        assert!(critical.items_matched.contains(&"aws".to_string()));
        assert_eq!(critical.missing, 0);

        assert!(report.matched_keywords.contains(&"aws".to_string()));
        for list in [&report.matched_keywords, &report.missing_keywords] {
            assert!(!list.contains(&"acme".to_string()));
            assert!(!list.contains(&"corp".to_string()));
        }

        assert_eq!(report.gap_analysis.experience_gaps.gap, 0);
        // Docker missing is preferred, not critical: at_risk or better.
        assert_ne!(report.eligibility, Eligibility::NotEligible);
    }

    #[tokio::test]
    async fn test_score_bounds_and_category_invariant() {
        let report = score(ACME_CV, ACME_JD).await;
        assert!(report.score >= 0.0 && report.score <= 100.0);
        for (name, category) in &report.scores_by_category {
            assert_eq!(
                (category.matched + category.missing) as usize,
                category.items_matched.len() + category.items_missing.len(),
                "invariant broken for {name}"
            );
        }
    }

    #[tokio::test]
    async fn test_idempotence_with_deterministic_provider() {
        let first = score(ACME_CV, ACME_JD).await;
        let second = score(ACME_CV, ACME_JD).await;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_monotonicity_adding_missing_critical_keyword() {
        let jd = "Must have Python and Docker. 3+ years experience required.";
        let cv_without = "Experience\nEngineer, 2019-2024. Led Python automation, cutting costs by 25%.\n";
        let cv_with = "Experience\nEngineer, 2019-2024. Led Python automation, cutting costs by 25%.\n\
Led Docker rollout across the fleet, reducing deploy time by 30%.\n";

        let before = score(cv_without, jd).await;
        let after = score(cv_with, jd).await;

        assert!(
            after.score >= before.score,
            "adding a missing critical keyword dropped the score: {} -> {}",
            before.score,
            after.score
        );
        let before_critical = &before.scores_by_category["critical_keywords"];
        let after_critical = &after.scores_by_category["critical_keywords"];
        assert!(before_critical.items_missing.contains(&"docker".to_string()));
        assert!(after_critical.items_matched.contains(&"docker".to_string()));
    }

    #[tokio::test]
    async fn test_citi_company_name_never_a_keyword() {
        let jd = "Citi is hiring. Must have Python. Citi offers great problems.";
        let cv = "Worked at Citi on Python tooling, 2018-2022.";
        let report = engine().analyze(cv, jd, Some("Citi"), None).await.unwrap();

        for list in [&report.matched_keywords, &report.missing_keywords] {
            assert!(!list.contains(&"citi".to_string()), "citi leaked: {list:?}");
        }
    }

    #[tokio::test]
    async fn test_acronym_equivalence_both_directions() {
        let report = score(
            "Built Machine Learning models in production, 2019-2024.",
            "Must have ML experience.",
        )
        .await;
        assert!(report.scores_by_category["hard_skills"]
            .items_matched
            .contains(&"machine learning".to_string()));

        let report = score(
            "Shipped ML pipelines, 2019-2024.",
            "Must have Machine Learning experience.",
        )
        .await;
        assert!(report.scores_by_category["hard_skills"]
            .items_matched
            .contains(&"machine learning".to_string()));
    }

    #[tokio::test]
    async fn test_provider_unavailable_degrades_weights() {
        let engine = MatchEngine::new(Arc::new(DownEmbedder));
        let report = engine.analyze(ACME_CV, ACME_JD, None, None).await.unwrap();

        assert!(!report.semantic_analysis.available);
        assert_eq!(report.hybrid_scoring.semantic_score, 0.0);
        assert_eq!(report.hybrid_scoring.weights.semantic, 0.0);
        assert!(
            (report.hybrid_scoring.weights.lexical + report.hybrid_scoring.weights.evidence - 1.0)
                .abs()
                < 1e-9
        );
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("embedding provider unavailable")));
    }

    #[tokio::test]
    async fn test_oversized_document_rejected() {
        let oversized = "x".repeat(200 * 1024 + 1);
        let result = engine().analyze(&oversized, ACME_JD, None, None).await;
        assert!(matches!(
            result,
            Err(EngineError::InputTooLarge { which: "cv", .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_cv_yields_best_effort_report() {
        let report = score("", ACME_JD).await;
        assert!(report.score >= 0.0);
        assert!(report.matched_keywords.is_empty());
        // Both critical keywords missing and a 5-year gap: gated out, but
        // still a full report rather than an error.
        assert_eq!(report.eligibility, Eligibility::NotEligible);
        assert!(!report.recommendation.is_empty());
    }

    #[tokio::test]
    async fn test_unnormalized_weights_warn_not_error() {
        let mut weights = CategoryWeights::technical();
        weights.hard_skills = 0.9; // sum now 1.6
        let report = engine()
            .analyze(ACME_CV, ACME_JD, None, Some(weights))
            .await
            .unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("normalized")));
    }

    #[tokio::test]
    async fn test_report_serializes_to_contract_shape() {
        let report = score(ACME_CV, ACME_JD).await;
        let value = serde_json::to_value(&report).unwrap();
        for field in [
            "score",
            "matched",
            "total",
            "missing_keywords",
            "matched_keywords",
            "scores_by_category",
            "section_analysis",
            "evidence_analysis",
            "parsed_entities",
            "hybrid_scoring",
            "semantic_analysis",
        ] {
            assert!(value.get(field).is_some(), "missing contract field {field}");
        }
    }

    #[tokio::test]
    async fn test_runs_share_no_state() {
        // Concurrent runs over different pairs must not interfere.
        let engine = Arc::new(engine());
        let a = Arc::clone(&engine);
        let b = Arc::clone(&engine);
        let (first, second) = tokio::join!(
            a.analyze(ACME_CV, ACME_JD, None, None),
            b.analyze("Rust services, 2020-2024.", "Must have Rust.", None, None),
        );
        assert!(first.unwrap().score >= 0.0);
        assert!(second.unwrap().score >= 0.0);
    }
}
