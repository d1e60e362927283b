//! EntityExtractor — structured entities, requirement strengths, and
//! employment-span years out of a normalized document.
//!
//! Extraction is dictionary- and pattern-based against the fixed taxonomy
//! and alias table; it never throws on malformed input.

pub mod aliases;
pub mod requirements;
pub mod taxonomy;
pub mod temporal;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::models::{Document, Entity, Requirement, RequirementStrength, SectionLabel};
use crate::stopwords::StopwordSet;

pub use temporal::YearsOutcome;

/// Everything the extractor learns about one document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Unique entities, sorted by (kind, canonical) for determinism.
    pub entities: Vec<Entity>,
    /// Unique entities per section, parallel to `document.sections`.
    pub section_entities: Vec<Vec<Entity>>,
    /// Whether each section co-locates a hard anchor (tool, certification,
    /// hard skill, or a bare number) — input to the semantic safety rails.
    pub section_hard_anchors: Vec<bool>,
    /// All canonical entity forms.
    pub canonical_set: HashSet<String>,
    /// All canonicalized free tokens of the document.
    pub token_set: HashSet<String>,
    pub years: YearsOutcome,
}

impl Extraction {
    /// Membership test used by the lexical matcher: canonical entities first,
    /// then free tokens, then a phrase scan of longer terms.
    pub fn mentions(&self, canonical_term: &str, canonical_text: &str) -> bool {
        if self.canonical_set.contains(canonical_term) || self.token_set.contains(canonical_term) {
            return true;
        }
        canonical_term.contains(' ') && canonical_text.contains(canonical_term)
    }
}

/// JD-side extraction: the base extraction plus requirement annotations and
/// the ranked term inventory.
#[derive(Debug, Default)]
pub struct JdExtraction {
    pub base: Extraction,
    /// One requirement per unique JD entity, sorted by canonical form.
    pub requirements: Vec<Requirement>,
    pub years_required: Option<u32>,
    /// Canonical term → JD occurrence count, stopword-filtered.
    pub term_frequencies: BTreeMap<String, u32>,
    /// Canonical term → JD section indices containing it.
    pub term_sections: BTreeMap<String, Vec<usize>>,
}

/// Runs recognition over every section of a normalized document.
pub fn extract(document: &Document) -> Extraction {
    let mut section_entities = Vec::with_capacity(document.sections.len());
    let mut section_hard_anchors = Vec::with_capacity(document.sections.len());
    let mut unique: BTreeMap<(crate::models::EntityKind, String), Entity> = BTreeMap::new();
    let mut canonical_set = HashSet::new();

    for section in &document.sections {
        let recognized = taxonomy::recognize(&section.text);
        let mut per_section: BTreeMap<String, Entity> = BTreeMap::new();
        let mut anchored = section.text.chars().any(|c| c.is_ascii_digit());
        for entity in recognized.occurrences {
            anchored = anchored || entity.kind.is_hard_anchor();
            canonical_set.insert(entity.canonical_form.clone());
            per_section
                .entry(entity.canonical_form.clone())
                .or_insert_with(|| entity.clone());
            unique
                .entry((entity.kind, entity.canonical_form.clone()))
                .or_insert(entity);
        }
        section_entities.push(per_section.into_values().collect());
        section_hard_anchors.push(anchored);
    }

    let token_set = canonical_tokens(&document.canonical_text);

    let experience_texts: Vec<&str> = document
        .sections_labeled(SectionLabel::Experience)
        .map(|s| s.text.as_str())
        .collect();
    // No detected Experience section degrades to scanning the whole
    // document, mirroring the section-detection fallback.
    let years = if experience_texts.is_empty() {
        temporal::years_from_texts([document.canonical_text.as_str()])
    } else {
        temporal::years_from_texts(experience_texts)
    };

    Extraction {
        entities: unique.into_values().collect(),
        section_entities,
        section_hard_anchors,
        canonical_set,
        token_set,
        years,
    }
}

/// JD extraction: base recognition plus requirement strengths, years
/// required, and the stopword-filtered term inventory.
pub fn extract_jd(document: &Document, stopwords: &StopwordSet) -> JdExtraction {
    let base = extract(document);

    let sentences = requirements::split_sentences(&document.canonical_text);
    let years_required = requirements::years_required(&sentences);

    // Strength per canonical term: critical wins over preferred wins over
    // the no-trigger default.
    let mut strengths: HashMap<String, RequirementStrength> = HashMap::new();
    for sentence in &sentences {
        let Some(strength) = requirements::classify_sentence(sentence) else {
            continue;
        };
        for entity in taxonomy::recognize(sentence).occurrences {
            strengths
                .entry(entity.canonical_form)
                .and_modify(|existing| {
                    if strength == RequirementStrength::Critical {
                        *existing = RequirementStrength::Critical;
                    }
                })
                .or_insert(strength);
        }
    }

    // Term inventory over the whole canonical stream: dictionary occurrences
    // plus free tokens outside claimed spans.
    let recognized = taxonomy::recognize(&document.canonical_text);
    let mut term_frequencies: BTreeMap<String, u32> = BTreeMap::new();
    for entity in &recognized.occurrences {
        if stopwords.contains(&entity.canonical_form) {
            continue;
        }
        *term_frequencies
            .entry(entity.canonical_form.clone())
            .or_insert(0) += 1;
    }
    for (token, _) in free_tokens(&document.canonical_text, &recognized.spans) {
        let canonical = aliases::canonicalize(token);
        if canonical.len() < 2 || canonical.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if stopwords.contains(token) || stopwords.contains(&canonical) {
            continue;
        }
        *term_frequencies.entry(canonical).or_insert(0) += 1;
    }

    // Term → section index map, for gap placement suggestions.
    let mut term_sections: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, section) in document.sections.iter().enumerate() {
        let recognized = taxonomy::recognize(&section.text);
        let mut seen: BTreeSet<String> = recognized
            .occurrences
            .iter()
            .map(|e| e.canonical_form.clone())
            .collect();
        for (token, _) in free_tokens(&section.text, &recognized.spans) {
            seen.insert(aliases::canonicalize(token));
        }
        for term in seen {
            let sections = term_sections.entry(term).or_default();
            if sections.last() != Some(&idx) {
                sections.push(idx);
            }
        }
    }

    let mut requirements: Vec<Requirement> = base
        .entities
        .iter()
        .map(|entity| Requirement {
            strength: strengths
                .get(&entity.canonical_form)
                .copied()
                .unwrap_or(RequirementStrength::Preferred),
            frequency: term_frequencies
                .get(&entity.canonical_form)
                .copied()
                .unwrap_or(0),
            entity: entity.clone(),
        })
        .collect();
    requirements.sort_by(|a, b| a.entity.canonical_form.cmp(&b.entity.canonical_form));

    tracing::debug!(
        entities = base.entities.len(),
        requirements = requirements.len(),
        ?years_required,
        "extracted JD"
    );

    JdExtraction {
        base,
        requirements,
        years_required,
        term_frequencies,
        term_sections,
    }
}

/// Canonicalized token set of a canonical text stream.
fn canonical_tokens(text: &str) -> HashSet<String> {
    let recognized = taxonomy::recognize(text);
    let mut set: HashSet<String> = recognized
        .occurrences
        .iter()
        .map(|e| e.canonical_form.clone())
        .collect();
    for (token, _) in free_tokens(text, &recognized.spans) {
        set.insert(aliases::canonicalize(token));
    }
    set
}

/// Tokens of canonical text with byte positions, skipping any token that
/// overlaps a recognized dictionary span.
fn free_tokens<'a>(text: &'a str, claimed_spans: &[(usize, usize)]) -> Vec<(&'a str, usize)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    let flush = |tokens: &mut Vec<(&'a str, usize)>, start: usize, end: usize| {
        if claimed_spans
            .iter()
            .any(|&(s, e)| start < e && end > s)
        {
            return;
        }
        tokens.push((&text[start..end], start));
    };

    for (idx, ch) in text.char_indices() {
        let is_token_char = ch.is_alphanumeric() || ch == '+' || ch == '#';
        match (is_token_char, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                flush(&mut tokens, s, idx);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        flush(&mut tokens, s, text.len());
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_document;

    const JD: &str = "\
Senior Data Engineer

Requirements
Must have Python and AWS. Minimum 5 years experience required.
Nice to have Docker and Kafka.
Company: Acme Corp.
";

    fn jd_extraction() -> JdExtraction {
        let doc = normalize_document(JD);
        let stopwords = StopwordSet::resolve(None, JD);
        extract_jd(&doc, &stopwords)
    }

    #[test]
    fn test_entities_found_across_sections() {
        let jd = jd_extraction();
        assert!(jd.base.canonical_set.contains("python"));
        assert!(jd.base.canonical_set.contains("aws"));
        assert!(jd.base.canonical_set.contains("docker"));
    }

    #[test]
    fn test_critical_strength_from_must_have_sentence() {
        let jd = jd_extraction();
        let strength_of = |term: &str| {
            jd.requirements
                .iter()
                .find(|r| r.entity.canonical_form == term)
                .map(|r| r.strength)
        };
        assert_eq!(strength_of("python"), Some(RequirementStrength::Critical));
        assert_eq!(strength_of("aws"), Some(RequirementStrength::Critical));
        assert_eq!(strength_of("docker"), Some(RequirementStrength::Preferred));
    }

    #[test]
    fn test_years_required_extracted() {
        let jd = jd_extraction();
        assert_eq!(jd.years_required, Some(5));
    }

    #[test]
    fn test_company_tokens_never_enter_term_inventory() {
        let jd = jd_extraction();
        assert!(!jd.term_frequencies.contains_key("acme"));
        assert!(!jd.term_frequencies.contains_key("corp"));
    }

    #[test]
    fn test_untriggered_entity_defaults_to_preferred() {
        let doc = normalize_document("We use Terraform daily.\n");
        let stopwords = StopwordSet::resolve(None, "");
        let jd = extract_jd(&doc, &stopwords);
        assert_eq!(
            jd.requirements
                .iter()
                .find(|r| r.entity.canonical_form == "terraform")
                .map(|r| r.strength),
            Some(RequirementStrength::Preferred)
        );
    }

    #[test]
    fn test_acronym_in_text_lands_on_canonical() {
        let doc = normalize_document("Looking for ML and SEO expertise.\n");
        let stopwords = StopwordSet::resolve(None, "");
        let jd = extract_jd(&doc, &stopwords);
        assert!(jd.base.canonical_set.contains("machine learning"));
        assert!(jd
            .base
            .canonical_set
            .contains("search engine optimization"));
    }

    #[test]
    fn test_cv_years_from_headingless_document() {
        let doc =
            normalize_document("Senior Engineer at Beta Inc, 2018-2024. Used Python on AWS.\n");
        let extraction = extract(&doc);
        assert_eq!(extraction.years.years, 6);
    }

    #[test]
    fn test_mentions_covers_entities_tokens_and_phrases() {
        let doc = normalize_document("Built ml pipelines with python for fraud detection.\n");
        let extraction = extract(&doc);
        assert!(extraction.mentions("machine learning", &doc.canonical_text));
        assert!(extraction.mentions("python", &doc.canonical_text));
        assert!(extraction.mentions("fraud", &doc.canonical_text));
        assert!(!extraction.mentions("kubernetes", &doc.canonical_text));
    }

    #[test]
    fn test_section_hard_anchor_flags() {
        let doc = normalize_document(
            "Summary\nA careful collaborator.\n\nExperience\nShipped with Docker in 2021-2023.\n",
        );
        let extraction = extract(&doc);
        // Summary has neither numbers nor hard entities; Experience has both.
        assert_eq!(extraction.section_hard_anchors, vec![false, true]);
    }
}
