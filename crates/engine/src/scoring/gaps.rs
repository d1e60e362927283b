//! GapAnalyzer — derived gap views and placement suggestions.
//!
//! Works entirely off the other components' outputs; nothing here re-scans
//! document text.

use std::collections::BTreeSet;

use crate::extract::JdExtraction;
use crate::models::{
    Document, EvidenceAnalysis, EvidenceStrength, ExperienceGap, GapAnalysis, GapPriority,
    PlacementSuggestion,
};
use crate::scoring::lexical::LexicalOutcome;
use crate::scoring::semantic::SemanticOutcome;

/// Builds the full gap view.
pub fn analyze(
    lexical: &LexicalOutcome,
    evidence: &EvidenceAnalysis,
    semantic: &SemanticOutcome,
    jd: &JdExtraction,
    cv_doc: &Document,
    cv_years: u32,
    semantic_gap_floor: f32,
) -> GapAnalysis {
    let critical_gaps: Vec<String> = lexical
        .categories
        .get("critical_keywords")
        .map(|c| c.items_missing.clone())
        .unwrap_or_default();

    let evidence_gaps: Vec<String> = evidence
        .records
        .iter()
        .filter(|r| r.strength == EvidenceStrength::Weak)
        .map(|r| r.skill.clone())
        .collect();

    // A missing JD concept counts as "implied but unstated" when some JD
    // section carrying it still resonates with the CV above the floor.
    let semantic_gaps: Vec<String> = if semantic.available {
        lexical
            .missing_keywords
            .iter()
            .filter(|term| {
                jd.term_sections.get(*term).is_some_and(|sections| {
                    sections.iter().any(|&idx| {
                        semantic.jd_best_raw.get(idx).copied().unwrap_or(0.0)
                            >= semantic_gap_floor
                    })
                })
            })
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let jd_years = jd.years_required.unwrap_or(0);
    let experience_gaps = ExperienceGap {
        cv_years,
        jd_years,
        gap: jd_years.saturating_sub(cv_years),
    };

    let actionable_suggestions =
        suggestions(&critical_gaps, &evidence_gaps, &semantic_gaps, jd, semantic, cv_doc);

    GapAnalysis {
        critical_gaps,
        evidence_gaps,
        semantic_gaps,
        experience_gaps,
        actionable_suggestions,
    }
}

/// One suggestion per gap skill, highest-priority origin first. The
/// recommended section is the CV section most semantically similar to the
/// JD section carrying the skill; without semantics it defaults to
/// Experience, where concrete evidence belongs.
fn suggestions(
    critical_gaps: &[String],
    evidence_gaps: &[String],
    semantic_gaps: &[String],
    jd: &JdExtraction,
    semantic: &SemanticOutcome,
    cv_doc: &Document,
) -> Vec<PlacementSuggestion> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut suggestions = Vec::new();

    let groups: [(&[String], GapPriority); 3] = [
        (critical_gaps, GapPriority::High),
        (evidence_gaps, GapPriority::Medium),
        (semantic_gaps, GapPriority::Low),
    ];

    for (gap_list, priority) in groups {
        for skill in gap_list {
            if !seen.insert(skill.as_str()) {
                continue;
            }
            suggestions.push(PlacementSuggestion {
                skill: skill.clone(),
                recommended_section: recommended_section(skill, jd, semantic, cv_doc),
                priority,
            });
        }
    }

    suggestions
}

fn recommended_section(
    skill: &str,
    jd: &JdExtraction,
    semantic: &SemanticOutcome,
    cv_doc: &Document,
) -> String {
    if let Some(jd_sections) = jd.term_sections.get(skill) {
        // Pick the carrying JD section whose best CV pairing is strongest.
        let best = jd_sections
            .iter()
            .filter_map(|&idx| {
                let cv_idx = semantic.jd_best_cv.get(idx).copied().flatten()?;
                let raw = semantic.jd_best_raw.get(idx).copied()?;
                Some((raw, cv_idx))
            })
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        if let Some((_, cv_idx)) = best {
            if let Some(section) = cv_doc.sections.get(cv_idx) {
                return section.label.as_str().to_string();
            }
        }
    }
    "experience".to_string()
}

/// Human-readable one-liner for the report, from the final score and the
/// top gaps.
pub fn recommendation(final_score: f64, gaps: &GapAnalysis) -> String {
    let top_gaps: Vec<&str> = gaps
        .critical_gaps
        .iter()
        .chain(gaps.evidence_gaps.iter())
        .chain(gaps.semantic_gaps.iter())
        .take(3)
        .map(String::as_str)
        .collect();

    if final_score >= 80.0 {
        "Strong match. The CV directly covers the key JD requirements.".to_string()
    } else if final_score >= 60.0 {
        if top_gaps.is_empty() {
            format!("Moderate match ({final_score}/100). Strengthen evidence for existing skills.")
        } else {
            format!(
                "Moderate match ({final_score}/100). Consider addressing: {}.",
                top_gaps.join(", ")
            )
        }
    } else if top_gaps.is_empty() {
        format!("Low match ({final_score}/100). The CV and JD share little ground.")
    } else {
        format!(
            "Low match ({final_score}/100). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    }
}
