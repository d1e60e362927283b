use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::HybridWeights;
use crate::models::Entity;

/// Fixed scoring categories. Every run scores all seven; a category whose JD
/// universe is empty is carried with zero counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CriticalKeywords,
    Required,
    HardSkills,
    SoftSkills,
    Preferred,
    Certifications,
    IndustryTerms,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::CriticalKeywords,
        Category::Required,
        Category::HardSkills,
        Category::SoftSkills,
        Category::Preferred,
        Category::Certifications,
        Category::IndustryTerms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CriticalKeywords => "critical_keywords",
            Category::Required => "required",
            Category::HardSkills => "hard_skills",
            Category::SoftSkills => "soft_skills",
            Category::Preferred => "preferred",
            Category::Certifications => "certifications",
            Category::IndustryTerms => "industry_terms",
        }
    }
}

/// Per-category match counts. Invariant: `matched + missing` equals the size
/// of the category's JD universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub matched: u32,
    pub missing: u32,
    pub items_matched: Vec<String>,
    pub items_missing: Vec<String>,
}

/// Best section-to-section pairing for one JD section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub jd_section: String,
    pub cv_section: String,
    /// Effective similarity in [0, 1], after the safety-rail halving.
    pub similarity: f32,
    pub is_high_value: bool,
}

/// Semantic sub-analysis. `available == false` means the embedding provider
/// was unreachable (or timed out) and the semantic weight was redistributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    pub available: bool,
    pub score: f64,
    pub matches: Vec<SemanticMatch>,
}

/// How well a claimed skill is substantiated by concrete context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    Weak,
    Moderate,
    Strong,
}

impl EvidenceStrength {
    pub fn numeric(&self) -> f64 {
        match self {
            EvidenceStrength::Weak => 0.0,
            EvidenceStrength::Moderate => 0.5,
            EvidenceStrength::Strong => 1.0,
        }
    }
}

/// Evidence classification for one matched hard skill. `supporting_context`
/// quotes the original sentence, not the canonical stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub skill: String,
    pub strength: EvidenceStrength,
    pub supporting_context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceAnalysis {
    pub records: Vec<EvidenceRecord>,
    /// Mean numeric strength over matched hard skills. Skills missing from
    /// the CV are gaps, not weak evidence, and are excluded.
    pub average_strength: f64,
}

/// Composed score and the weights that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridScoring {
    pub lexical_score: f64,
    pub semantic_score: f64,
    pub evidence_score: f64,
    pub weights: HybridWeights,
    pub final_score: f64,
}

/// Eligibility label set by the constraint gates. Gates never zero the
/// score — the score stays continuous and comparable across re-runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    AtRisk,
    NotEligible,
}

/// Shape summary of one detected section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub label: String,
    pub chars: usize,
    pub entity_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub cv_sections: Vec<SectionSummary>,
    pub jd_sections: Vec<SectionSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntities {
    pub cv: Vec<Entity>,
    pub jd: Vec<Entity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceGap {
    pub cv_years: u32,
    pub jd_years: u32,
    pub gap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPriority {
    High,
    Medium,
    Low,
}

/// Where a gap skill would land best in the CV, by semantic affinity to the
/// JD section that carries the skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSuggestion {
    pub skill: String,
    pub recommended_section: String,
    pub priority: GapPriority,
}

/// Read-only derived view over a finished report. Built without re-scanning
/// any text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub critical_gaps: Vec<String>,
    pub evidence_gaps: Vec<String>,
    pub semantic_gaps: Vec<String>,
    pub experience_gaps: ExperienceGap,
    pub actionable_suggestions: Vec<PlacementSuggestion>,
}

impl Default for GapPriority {
    fn default() -> Self {
        GapPriority::Low
    }
}

/// Full result of one scoring run. Field names follow the caller's
/// `ATSAnalysisData` JSON contract; collections use deterministic ordering so
/// identical inputs serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: f64,
    pub matched: u32,
    pub total: u32,
    pub missing_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub scores_by_category: BTreeMap<String, CategoryScore>,
    pub section_analysis: SectionAnalysis,
    pub evidence_analysis: EvidenceAnalysis,
    pub parsed_entities: ParsedEntities,
    pub hybrid_scoring: HybridScoring,
    pub semantic_analysis: SemanticAnalysis,
    pub eligibility: Eligibility,
    pub gap_analysis: GapAnalysis,
    pub recommendation: String,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_snake_case() {
        assert_eq!(Category::CriticalKeywords.as_str(), "critical_keywords");
        assert_eq!(Category::IndustryTerms.as_str(), "industry_terms");
    }

    #[test]
    fn test_category_all_covers_seven() {
        assert_eq!(Category::ALL.len(), 7);
    }

    #[test]
    fn test_evidence_strength_numeric_scale() {
        assert_eq!(EvidenceStrength::Weak.numeric(), 0.0);
        assert_eq!(EvidenceStrength::Moderate.numeric(), 0.5);
        assert_eq!(EvidenceStrength::Strong.numeric(), 1.0);
    }

    #[test]
    fn test_eligibility_serializes_snake_case() {
        let json = serde_json::to_string(&Eligibility::NotEligible).unwrap();
        assert_eq!(json, "\"not_eligible\"");
    }

    #[test]
    fn test_category_score_roundtrip() {
        let score = CategoryScore {
            matched: 2,
            missing: 1,
            items_matched: vec!["python".into(), "aws".into()],
            items_missing: vec!["docker".into()],
        };
        let json = serde_json::to_string(&score).unwrap();
        let back: CategoryScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, score);
    }
}
