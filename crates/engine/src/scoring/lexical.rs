//! LexicalMatcher — category-weighted keyword overlap between JD and CV.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CategoryWeights;
use crate::extract::{Extraction, JdExtraction};
use crate::models::{Category, CategoryScore, EntityKind, RequirementStrength};
use crate::scoring::round1;
use crate::stopwords::StopwordSet;

/// Output of the lexical pass.
#[derive(Debug, Default)]
pub struct LexicalOutcome {
    pub score: f64,
    pub categories: BTreeMap<String, CategoryScore>,
    /// Union across category universes, matched side, sorted.
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub matched: u32,
    pub total: u32,
    /// Matched JD hard skills, input to the evidence analyzer.
    pub matched_hard_skills: Vec<String>,
}

/// Scores every category and blends the per-category match rates by the
/// configured weights. Categories whose JD universe is empty are skipped and
/// the remaining weights renormalized.
pub fn score(
    jd: &JdExtraction,
    cv: &Extraction,
    cv_canonical_text: &str,
    stopwords: &StopwordSet,
    weights: &CategoryWeights,
    top_n: usize,
) -> LexicalOutcome {
    let mut outcome = LexicalOutcome::default();
    let mut union_matched: BTreeSet<String> = BTreeSet::new();
    let mut union_missing: BTreeSet<String> = BTreeSet::new();
    let mut weighted_rate = 0.0f64;
    let mut weight_mass = 0.0f64;

    for category in Category::ALL {
        let universe = category_universe(jd, stopwords, category, top_n);
        let mut score = CategoryScore::default();

        for term in &universe {
            if cv.mentions(term, cv_canonical_text) {
                score.matched += 1;
                score.items_matched.push(term.clone());
                union_matched.insert(term.clone());
            } else {
                score.missing += 1;
                score.items_missing.push(term.clone());
                union_missing.insert(term.clone());
            }
        }

        debug_assert_eq!((score.matched + score.missing) as usize, universe.len());

        if !universe.is_empty() {
            let rate = f64::from(score.matched) / universe.len() as f64;
            let weight = weights.weight(category);
            weighted_rate += rate * weight;
            weight_mass += weight;

            if category == Category::HardSkills {
                outcome.matched_hard_skills = score.items_matched.clone();
            }
        }

        outcome
            .categories
            .insert(category.as_str().to_string(), score);
    }

    // A term matched in one category never counts as missing overall.
    let union_missing: BTreeSet<String> = union_missing
        .difference(&union_matched)
        .cloned()
        .collect();

    outcome.score = if weight_mass > 0.0 {
        round1(weighted_rate / weight_mass * 100.0)
    } else {
        0.0
    };
    outcome.matched = union_matched.len() as u32;
    outcome.total = (union_matched.len() + union_missing.len()) as u32;
    outcome.matched_keywords = union_matched.into_iter().collect();
    outcome.missing_keywords = union_missing.into_iter().collect();
    outcome
}

/// Matched JD hard skills on their own, so the evidence analyzer can run
/// concurrently with the full lexical pass. Same universe, same membership
/// test.
pub fn matched_hard_skills(
    jd: &JdExtraction,
    cv: &Extraction,
    cv_canonical_text: &str,
    stopwords: &StopwordSet,
    top_n: usize,
) -> Vec<String> {
    category_universe(jd, stopwords, Category::HardSkills, top_n)
        .into_iter()
        .filter(|term| cv.mentions(term, cv_canonical_text))
        .collect()
}

/// The JD-side universe for one category: deduplicated canonical terms,
/// stopword-filtered, ranked by JD frequency (ties alphabetical), truncated
/// to the top N.
fn category_universe(
    jd: &JdExtraction,
    stopwords: &StopwordSet,
    category: Category,
    top_n: usize,
) -> Vec<String> {
    let mut terms: Vec<String> = match category {
        Category::CriticalKeywords => requirement_terms(jd, RequirementStrength::Critical),
        Category::Preferred => requirement_terms(jd, RequirementStrength::Preferred),
        Category::HardSkills => kind_terms(jd, &[EntityKind::HardSkill]),
        Category::SoftSkills => kind_terms(jd, &[EntityKind::SoftSkill]),
        Category::Certifications => kind_terms(jd, &[EntityKind::Certification]),
        Category::IndustryTerms => kind_terms(jd, &[EntityKind::Domain, EntityKind::Methodology]),
        Category::Required => {
            // General ranked keyword inventory, net of the critical set.
            let critical: BTreeSet<String> =
                requirement_terms(jd, RequirementStrength::Critical)
                    .into_iter()
                    .collect();
            jd.term_frequencies
                .keys()
                .filter(|term| !critical.contains(*term))
                .cloned()
                .collect()
        }
    };

    terms.retain(|term| !stopwords.contains(term));
    terms.sort_unstable();
    terms.dedup();
    terms.sort_by(|a, b| {
        let freq_a = jd.term_frequencies.get(a).copied().unwrap_or(0);
        let freq_b = jd.term_frequencies.get(b).copied().unwrap_or(0);
        freq_b.cmp(&freq_a).then_with(|| a.cmp(b))
    });
    terms.truncate(top_n);
    terms
}

fn requirement_terms(jd: &JdExtraction, strength: RequirementStrength) -> Vec<String> {
    jd.requirements
        .iter()
        .filter(|r| r.strength == strength)
        .map(|r| r.entity.canonical_form.clone())
        .collect()
}

fn kind_terms(jd: &JdExtraction, kinds: &[EntityKind]) -> Vec<String> {
    jd.base
        .entities
        .iter()
        .filter(|e| kinds.contains(&e.kind))
        .map(|e| e.canonical_form.clone())
        .collect()
}
