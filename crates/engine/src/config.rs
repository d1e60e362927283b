use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Warning raised when caller-supplied weights had to be adjusted. Surfaced
/// in `MatchReport::warnings`, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub message: String,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config warning: {}", self.message)
    }
}

/// Per-category weights used inside the lexical score. Callers pick a named
/// preset or supply explicit weights; anything not summing to 1.0 is
/// normalized with a `ConfigWarning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub critical_keywords: f64,
    pub required: f64,
    pub hard_skills: f64,
    pub soft_skills: f64,
    pub preferred: f64,
    pub certifications: f64,
    pub industry_terms: f64,
}

impl CategoryWeights {
    /// IC/engineering roles: hard skills dominate.
    pub fn technical() -> Self {
        Self {
            critical_keywords: 0.20,
            required: 0.15,
            hard_skills: 0.30,
            soft_skills: 0.05,
            preferred: 0.10,
            certifications: 0.05,
            industry_terms: 0.15,
        }
    }

    /// Management roles: soft skills and domain language weigh more.
    pub fn leadership() -> Self {
        Self {
            critical_keywords: 0.20,
            required: 0.15,
            hard_skills: 0.10,
            soft_skills: 0.25,
            preferred: 0.05,
            certifications: 0.05,
            industry_terms: 0.20,
        }
    }

    /// Early-career roles: eligibility keywords over depth.
    pub fn junior() -> Self {
        Self {
            critical_keywords: 0.25,
            required: 0.20,
            hard_skills: 0.20,
            soft_skills: 0.15,
            preferred: 0.05,
            certifications: 0.10,
            industry_terms: 0.05,
        }
    }

    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::CriticalKeywords => self.critical_keywords,
            Category::Required => self.required,
            Category::HardSkills => self.hard_skills,
            Category::SoftSkills => self.soft_skills,
            Category::Preferred => self.preferred,
            Category::Certifications => self.certifications,
            Category::IndustryTerms => self.industry_terms,
        }
    }

    fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.weight(*c)).sum()
    }

    /// Returns weights guaranteed to sum to 1.0, plus a warning if the input
    /// had to be normalized. All-zero weights fall back to the technical
    /// preset.
    pub fn normalized(self) -> (Self, Option<ConfigWarning>) {
        let sum = self.sum();
        if (sum - 1.0).abs() < 1e-6 {
            return (self, None);
        }
        if sum <= 0.0 {
            return (
                Self::technical(),
                Some(ConfigWarning {
                    message: "category weights sum to zero; using technical preset".into(),
                }),
            );
        }
        let scaled = Self {
            critical_keywords: self.critical_keywords / sum,
            required: self.required / sum,
            hard_skills: self.hard_skills / sum,
            soft_skills: self.soft_skills / sum,
            preferred: self.preferred / sum,
            certifications: self.certifications / sum,
            industry_terms: self.industry_terms / sum,
        };
        (
            scaled,
            Some(ConfigWarning {
                message: format!("category weights summed to {sum:.3}; normalized to 1.0"),
            }),
        )
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::technical()
    }
}

/// Weights for composing the lexical, semantic, and evidence sub-scores into
/// the final score. Independent of the category sub-weights above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub lexical: f64,
    pub semantic: f64,
    pub evidence: f64,
}

impl HybridWeights {
    /// Weights used when the embedding provider is unavailable: the semantic
    /// weight is redistributed proportionally onto lexical and evidence.
    pub fn degraded(&self) -> Self {
        let rest = self.lexical + self.evidence;
        if rest <= 0.0 {
            return Self {
                lexical: 1.0,
                semantic: 0.0,
                evidence: 0.0,
            };
        }
        Self {
            lexical: self.lexical / rest,
            semantic: 0.0,
            evidence: self.evidence / rest,
        }
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            lexical: 0.55,
            semantic: 0.35,
            evidence: 0.10,
        }
    }
}

/// Tunables for one engine instance. One scoring run is a pure function of
/// `(cv_text, jd_text, company_name, weights)` under a fixed config.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard size bound per document, enforced before any processing.
    pub max_document_bytes: usize,
    /// Top-N ranked JD terms considered per category.
    pub top_terms_per_category: usize,
    pub hybrid_weights: HybridWeights,
    pub category_weights: CategoryWeights,
    /// Years of slack allowed before the experience gate trips.
    pub experience_tolerance_years: u32,
    /// Minimum JD-section similarity for a missing concept to count as an
    /// "implied but unstated" semantic gap.
    pub semantic_gap_floor: f32,
    /// Timeout for a single embedding call; elapsed is treated exactly like
    /// provider-unavailable.
    pub embed_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 200 * 1024,
            top_terms_per_category: 30,
            hybrid_weights: HybridWeights::default(),
            category_weights: CategoryWeights::default(),
            experience_tolerance_years: 0,
            semantic_gap_floor: 0.4,
            embed_timeout: Duration::from_secs(5),
        }
    }
}
