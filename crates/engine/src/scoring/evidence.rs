//! EvidenceAnalyzer — does the CV back its matched skills with substance?
//!
//! For each lexically-matched hard skill, finds its occurrences in the CV's
//! Experience/Projects prose and grades the best supporting sentence:
//! quantified outcome + ownership verb → Strong, one of the two → Moderate,
//! neither (or a bare Skills-list mention) → Weak. Context is quoted from
//! the original text, not the canonical stream.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::aliases;
use crate::models::{Document, EvidenceAnalysis, EvidenceRecord, EvidenceStrength};
use crate::scoring::round1;

lazy_static! {
    // Quantified outcomes: percentages, currency, or numbers adjacent to an
    // outcome verb/noun.
    static ref METRIC_RE: Regex = Regex::new(
        r"(?ix)
        \d+(?:\.\d+)?\s*%
        | [$€£]\s*\d
        | \b(?:increased|reduced|improved|decreased|saved|grew|cut|cutting|boosted|lowered|accelerated|doubled|tripled)\b [^.!?]{0,40} \d
        | \d [^.!?]{0,40} \b(?:increase|reduction|improvement|growth|savings|faster)\b
        "
    )
    .unwrap();
    // Ownership language.
    static ref OWNERSHIP_RE: Regex = Regex::new(
        r"(?i)\b(?:led|leading|delivered|delivering|owned|owning|built|building|drove|driving|shipped|launched|spearheaded|architected)\b"
    )
    .unwrap();
}

/// Grades every matched hard skill. Skills with no CV occurrence at all are
/// gaps, not weak evidence — the lexical matcher never hands those in, so
/// every record here contributes to the average.
pub fn analyze(cv: &Document, matched_hard_skills: &[String]) -> EvidenceAnalysis {
    let mut records: Vec<EvidenceRecord> = matched_hard_skills
        .iter()
        .map(|skill| grade_skill(cv, skill))
        .collect();
    records.sort_by(|a, b| a.skill.cmp(&b.skill));

    let average_strength = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.strength.numeric()).sum::<f64>() / records.len() as f64
    };

    EvidenceAnalysis {
        records,
        average_strength,
    }
}

/// The evidence sub-score on the 0–100 scale.
pub fn score(analysis: &EvidenceAnalysis) -> f64 {
    round1(analysis.average_strength * 100.0)
}

fn grade_skill(cv: &Document, skill: &str) -> EvidenceRecord {
    let surfaces = aliases::surfaces_of(skill);

    let mut best_signals = 0u8;
    let mut best_sentence: Option<String> = None;
    let mut found_prose = false;

    for section in &cv.sections {
        if !section.label.is_high_value() {
            continue;
        }
        for sentence in split_raw_sentences(&section.raw_text) {
            let lower = sentence.to_lowercase();
            if !surfaces.iter().any(|s| contains_term(&lower, s)) {
                continue;
            }
            found_prose = true;
            let signals = u8::from(METRIC_RE.is_match(&lower)) + u8::from(OWNERSHIP_RE.is_match(&lower));
            if signals >= best_signals {
                if signals > best_signals || best_sentence.is_none() {
                    best_sentence = Some(sentence.trim().to_string());
                }
                best_signals = signals.max(best_signals);
            }
        }
    }

    let strength = match (found_prose, best_signals) {
        (true, 2) => EvidenceStrength::Strong,
        (true, 1) => EvidenceStrength::Moderate,
        // Prose mention with no signals, or a skills-list-only mention.
        _ => EvidenceStrength::Weak,
    };

    EvidenceRecord {
        skill: skill.to_string(),
        strength,
        supporting_context: if found_prose { best_sentence } else { None },
    }
}

fn split_raw_sentences(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Word-boundary containment check on lowercase text.
fn contains_term(haystack: &str, term: &str) -> bool {
    let mut search_from = 0;
    while let Some(pos) = haystack[search_from..].find(term) {
        let start = search_from + pos;
        let end = start + term.len();
        let before_ok = start == 0
            || haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let after_ok = end == haystack.len()
            || haystack[end..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_document;

    const CV: &str = "\
Skills
Python, Terraform, Kafka

Experience
Led the migration to Python services, reducing deploy time by 40%.
Maintained Terraform modules for the platform team.
";

    fn run(matched: &[&str]) -> EvidenceAnalysis {
        let doc = normalize_document(CV);
        let skills: Vec<String> = matched.iter().map(|s| s.to_string()).collect();
        analyze(&doc, &skills)
    }

    #[test]
    fn test_metric_plus_ownership_is_strong() {
        let analysis = run(&["python"]);
        assert_eq!(analysis.records[0].strength, EvidenceStrength::Strong);
        let context = analysis.records[0].supporting_context.as_deref().unwrap();
        assert!(context.contains("Led the migration"));
    }

    #[test]
    fn test_prose_without_signals_is_weak() {
        let analysis = run(&["terraform"]);
        assert_eq!(analysis.records[0].strength, EvidenceStrength::Weak);
        // Still quotes the sentence it found.
        assert!(analysis.records[0]
            .supporting_context
            .as_deref()
            .unwrap()
            .contains("Terraform modules"));
    }

    #[test]
    fn test_skills_list_only_is_weak_without_context() {
        let analysis = run(&["kafka"]);
        assert_eq!(analysis.records[0].strength, EvidenceStrength::Weak);
        assert!(analysis.records[0].supporting_context.is_none());
    }

    #[test]
    fn test_single_signal_is_moderate() {
        let doc = normalize_document(
            "Experience\nUsed Kafka daily, cutting consumer lag by 60%.\n",
        );
        let analysis = analyze(&doc, &["kafka".to_string()]);
        assert_eq!(analysis.records[0].strength, EvidenceStrength::Moderate);
    }

    #[test]
    fn test_average_strength_over_matched_skills() {
        let analysis = run(&["python", "terraform", "kafka"]);
        // strong(1.0) + weak(0.0) + weak(0.0) over 3
        assert!((analysis.average_strength - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_matched_skills_scores_zero() {
        let analysis = run(&[]);
        assert_eq!(analysis.average_strength, 0.0);
        assert_eq!(score(&analysis), 0.0);
    }

    #[test]
    fn test_acronym_surface_found_in_original_text() {
        let doc = normalize_document(
            "Experience\nBuilt ML feature pipelines, improving precision by 12%.\n",
        );
        let analysis = analyze(&doc, &["machine learning".to_string()]);
        assert_eq!(analysis.records[0].strength, EvidenceStrength::Strong);
        assert!(analysis.records[0]
            .supporting_context
            .as_deref()
            .unwrap()
            .contains("ML feature pipelines"));
    }

    #[test]
    fn test_records_sorted_by_skill() {
        let analysis = run(&["terraform", "kafka", "python"]);
        let names: Vec<_> = analysis.records.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(names, vec!["kafka", "python", "terraform"]);
    }
}
