//! Normalizer — raw text in, immutable `Document` out.
//!
//! Produces a *parallel* canonical stream (NFKC, lowercased, US spelling,
//! collapsed whitespace) next to the untouched original, so matching runs on
//! canonical text while evidence lookups quote the author's own words.
//! Degrades instead of failing: a document with no recognizable structure
//! still comes back as a single `Other` section.

mod sections;
mod spelling;

use unicode_normalization::UnicodeNormalization;

use crate::models::{Document, Section, SectionLabel, SpellingVariant};

/// Normalizes one document end to end: furniture stripping, section
/// detection, and canonical-stream construction.
pub fn normalize_document(raw: &str) -> Document {
    let lines = sections::content_lines(raw);
    let raw_sections = sections::split_sections(&lines);

    let mut uk_hits = 0usize;
    let mut doc_sections = Vec::with_capacity(raw_sections.len());
    for raw_section in &raw_sections {
        let raw_text = raw_section.lines.join("\n").trim().to_string();
        let (text, hits) = canonicalize(&raw_text);
        uk_hits += hits;
        doc_sections.push(Section {
            label: raw_section.label,
            heading: raw_section.heading.clone(),
            text,
            raw_text,
            start_offset: raw_section.start_offset,
        });
    }

    let (canonical_text, canon_hits) = canonicalize(raw);
    uk_hits += canon_hits;

    let variant = if uk_hits > 0 {
        SpellingVariant::Uk
    } else {
        SpellingVariant::Us
    };

    tracing::debug!(
        sections = doc_sections.len(),
        ?variant,
        "normalized document"
    );

    Document {
        raw_text: raw.to_string(),
        canonical_text,
        variant,
        sections: doc_sections,
    }
}

/// Canonicalizes a fragment: NFKC, lowercase, US spelling, single-spaced.
/// Returns the canonical text and the UK-spelling hit count.
pub(crate) fn canonicalize(fragment: &str) -> (String, usize) {
    let folded: String = fragment
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let (spelled, hits) = spelling::to_us_spelling(&folded);
    let collapsed = spelled.split_whitespace().collect::<Vec<_>>().join(" ");
    (collapsed, hits)
}
