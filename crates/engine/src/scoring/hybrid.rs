//! HybridScorer — composes the three sub-scores and applies the
//! eligibility gates.
//!
//! Gates only set the eligibility label. The score itself is never
//! hard-zeroed, so re-runs of an evolving CV stay comparable for trend
//! tracking.

use crate::config::HybridWeights;
use crate::models::{Eligibility, HybridScoring};
use crate::scoring::round1;

/// Blends the sub-scores. When semantics are unavailable the semantic
/// weight is redistributed proportionally onto lexical and evidence; the
/// caller flags this in the report warnings.
pub fn compose(
    lexical_score: f64,
    semantic_score: f64,
    semantic_available: bool,
    evidence_score: f64,
    weights: HybridWeights,
) -> HybridScoring {
    let effective = if semantic_available {
        weights
    } else {
        weights.degraded()
    };
    let semantic_score = if semantic_available { semantic_score } else { 0.0 };

    let final_score = round1(
        (lexical_score * effective.lexical
            + semantic_score * effective.semantic
            + evidence_score * effective.evidence)
            .clamp(0.0, 100.0),
    );

    HybridScoring {
        lexical_score,
        semantic_score,
        evidence_score,
        weights: effective,
        final_score,
    }
}

/// Applies the constraint gates.
///
/// - `Eligible`: no missing critical requirements and the experience gap is
///   within tolerance.
/// - `NotEligible`: at least one missing critical keyword AND the gap
///   exceeds two years.
/// - `AtRisk`: everything in between.
pub fn eligibility(
    missing_critical: usize,
    experience_gap_years: u32,
    tolerance_years: u32,
) -> Eligibility {
    if missing_critical == 0 && experience_gap_years <= tolerance_years {
        Eligibility::Eligible
    } else if missing_critical >= 1 && experience_gap_years > 2 {
        Eligibility::NotEligible
    } else {
        Eligibility::AtRisk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight_composition() {
        let scoring = compose(80.0, 60.0, true, 50.0, HybridWeights::default());
        // 80*0.55 + 60*0.35 + 50*0.10 = 44 + 21 + 5 = 70
        assert_eq!(scoring.final_score, 70.0);
        assert_eq!(scoring.weights, HybridWeights::default());
    }

    #[test]
    fn test_degraded_composition_drops_semantic() {
        let scoring = compose(80.0, 60.0, false, 50.0, HybridWeights::default());
        assert_eq!(scoring.semantic_score, 0.0);
        assert_eq!(scoring.weights.semantic, 0.0);
        assert!((scoring.weights.lexical + scoring.weights.evidence - 1.0).abs() < 1e-9);
        // 80 * (0.55/0.65) + 50 * (0.10/0.65) ≈ 67.7 + 7.7
        assert!((scoring.final_score - 75.4).abs() < 0.1);
    }

    #[test]
    fn test_final_score_bounded() {
        let scoring = compose(100.0, 100.0, true, 100.0, HybridWeights::default());
        assert!(scoring.final_score <= 100.0);
        let scoring = compose(0.0, 0.0, true, 0.0, HybridWeights::default());
        assert!(scoring.final_score >= 0.0);
    }

    #[test]
    fn test_clean_run_is_eligible() {
        assert_eq!(eligibility(0, 0, 0), Eligibility::Eligible);
    }

    #[test]
    fn test_tolerance_allows_small_gap() {
        assert_eq!(eligibility(0, 1, 1), Eligibility::Eligible);
        assert_eq!(eligibility(0, 2, 1), Eligibility::AtRisk);
    }

    #[test]
    fn test_missing_critical_with_big_gap_is_not_eligible() {
        assert_eq!(eligibility(1, 3, 0), Eligibility::NotEligible);
        assert_eq!(eligibility(4, 10, 0), Eligibility::NotEligible);
    }

    #[test]
    fn test_missing_critical_alone_is_at_risk() {
        assert_eq!(eligibility(1, 0, 0), Eligibility::AtRisk);
        assert_eq!(eligibility(1, 2, 0), Eligibility::AtRisk);
    }

    #[test]
    fn test_gap_alone_is_at_risk() {
        assert_eq!(eligibility(0, 5, 0), Eligibility::AtRisk);
    }
}
