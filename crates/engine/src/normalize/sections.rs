//! Section detection and page-furniture stripping.

use std::collections::HashMap;
use std::sync::LazyLock;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::SectionLabel;

/// Closed per-label heading vocabulary. A heading-like line must match one of
/// these (lowercased, trailing colon stripped) to open a section; anything
/// else stays ordinary content.
static HEADING_VOCAB: LazyLock<HashMap<&'static str, SectionLabel>> = LazyLock::new(|| {
    let entries: &[(SectionLabel, &[&str])] = &[
        (
            SectionLabel::Summary,
            &[
                "summary",
                "profile",
                "objective",
                "about me",
                "about",
                "professional summary",
                "career summary",
            ],
        ),
        (
            SectionLabel::Skills,
            &[
                "skills",
                "technical skills",
                "core skills",
                "key skills",
                "core competencies",
                "competencies",
                "technologies",
                "skills & expertise",
            ],
        ),
        (
            SectionLabel::Experience,
            &[
                "experience",
                "work experience",
                "professional experience",
                "employment",
                "employment history",
                "work history",
                "career history",
                "relevant experience",
            ],
        ),
        (
            SectionLabel::Education,
            &[
                "education",
                "academic background",
                "qualifications",
                "education & training",
            ],
        ),
        (
            SectionLabel::Certifications,
            &[
                "certifications",
                "certificates",
                "licenses",
                "licences",
                "accreditations",
                "certifications & licenses",
            ],
        ),
        (
            SectionLabel::Projects,
            &[
                "projects",
                "personal projects",
                "key projects",
                "selected projects",
                "portfolio",
                "open source",
            ],
        ),
        (
            SectionLabel::Tools,
            &["tools", "tooling", "software", "tech stack", "toolset"],
        ),
    ];

    let mut map = HashMap::new();
    for (label, names) in entries {
        for name in *names {
            map.insert(*name, *label);
        }
    }
    map
});

lazy_static! {
    // Bare page numbers: "3", "Page 3", "3 of 12", "3 / 12"
    static ref PAGE_NUMBER_RE: Regex =
        Regex::new(r"(?i)^\s*(?:page\s+)?\d{1,4}(?:\s*(?:of|/)\s*\d{1,4})?\s*$").unwrap();
}

const MAX_HEADING_LEN: usize = 48;
const MAX_HEADING_WORDS: usize = 5;
const MAX_FURNITURE_LEN: usize = 60;
const FURNITURE_MIN_REPEATS: usize = 3;

/// One raw line with its byte offset into the original document.
#[derive(Debug, Clone)]
pub(crate) struct OffsetLine<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// A contiguous run of lines under one section label, prior to
/// canonicalization.
#[derive(Debug)]
pub(crate) struct RawSection<'a> {
    pub label: SectionLabel,
    pub heading: Option<String>,
    pub lines: Vec<&'a str>,
    pub start_offset: usize,
}

/// Splits the document into offset-tracked lines, dropping repeated
/// header/footer furniture and bare page numbers.
pub(crate) fn content_lines(raw: &str) -> Vec<OffsetLine<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for line in raw.split_inclusive('\n') {
        let text = line.strip_suffix('\n').unwrap_or(line);
        let text = text.strip_suffix('\r').unwrap_or(text);
        lines.push(OffsetLine { text, offset });
        offset += line.len();
    }

    // Lines repeated across page boundaries (headers/footers) show up as
    // high-frequency short lines.
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        let trimmed = line.text.trim();
        if !trimmed.is_empty() && trimmed.len() <= MAX_FURNITURE_LEN {
            *frequency.entry(trimmed).or_insert(0) += 1;
        }
    }

    lines
        .into_iter()
        .filter(|line| {
            let trimmed = line.text.trim();
            if trimmed.is_empty() {
                return true; // keep blank lines for paragraph structure
            }
            if PAGE_NUMBER_RE.is_match(trimmed) {
                return false;
            }
            frequency.get(trimmed).copied().unwrap_or(0) < FURNITURE_MIN_REPEATS
        })
        .collect()
}

/// Returns the section label if the line reads like a heading: short,
/// title-cased or all-caps, and present in the closed vocabulary.
pub(crate) fn heading_label(line: &str) -> Option<SectionLabel> {
    let trimmed = line.trim();
    let stripped = trimmed.strip_suffix(':').unwrap_or(trimmed).trim_end();
    if stripped.is_empty() || stripped.len() > MAX_HEADING_LEN {
        return None;
    }
    if stripped.split_whitespace().count() > MAX_HEADING_WORDS {
        return None;
    }
    if !is_title_cased(stripped) && !is_all_caps(stripped) {
        return None;
    }
    let key = stripped.to_lowercase();
    HEADING_VOCAB.get(key.as_str()).copied()
}

fn is_all_caps(text: &str) -> bool {
    let mut has_upper = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

fn is_title_cased(text: &str) -> bool {
    let mut words = 0;
    for word in text.split_whitespace() {
        words += 1;
        // Connector words ("and", "&", "of") may stay lowercase.
        if matches!(word, "and" | "&" | "of" | "the") {
            continue;
        }
        if !word.chars().next().is_some_and(|c| c.is_uppercase()) {
            return false;
        }
    }
    words > 0
}

/// Assigns every content line to a section. Text before the first heading is
/// `Summary`; a document with no headings at all becomes a single `Other`
/// section. Never fails — granularity degrades, errors do not surface.
pub(crate) fn split_sections<'a>(lines: &[OffsetLine<'a>]) -> Vec<RawSection<'a>> {
    let mut sections: Vec<RawSection<'a>> = Vec::new();
    let mut current: Option<RawSection<'a>> = None;
    let mut saw_heading = false;

    for line in lines {
        if let Some(label) = heading_label(line.text) {
            saw_heading = true;
            if let Some(section) = current.take() {
                if !section_is_blank(&section) {
                    sections.push(section);
                }
            }
            current = Some(RawSection {
                label,
                heading: Some(line.text.trim().trim_end_matches(':').to_string()),
                lines: Vec::new(),
                start_offset: line.offset,
            });
            continue;
        }

        match current.as_mut() {
            Some(section) => section.lines.push(line.text),
            None => {
                current = Some(RawSection {
                    label: SectionLabel::Summary,
                    heading: None,
                    lines: vec![line.text],
                    start_offset: line.offset,
                });
            }
        }
    }
    if let Some(section) = current.take() {
        if !section_is_blank(&section) {
            sections.push(section);
        }
    }

    if !saw_heading {
        // Degrade to one Other section spanning everything.
        for section in &mut sections {
            section.label = SectionLabel::Other;
        }
    }

    sections
}

fn section_is_blank(section: &RawSection<'_>) -> bool {
    section.heading.is_none() && section.lines.iter().all(|l| l.trim().is_empty())
}
