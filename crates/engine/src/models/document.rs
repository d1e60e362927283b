use serde::{Deserialize, Serialize};

/// Closed set of section labels a document can carry.
///
/// Unrecognized headings and preamble text fall into `Other`; the engine
/// never invents new labels at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Tools,
    Other,
}

impl SectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Summary => "summary",
            SectionLabel::Skills => "skills",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Certifications => "certifications",
            SectionLabel::Projects => "projects",
            SectionLabel::Tools => "tools",
            SectionLabel::Other => "other",
        }
    }

    /// Experience and Projects carry the strongest signal for semantic
    /// matching and evidence lookups.
    pub fn is_high_value(&self) -> bool {
        matches!(self, SectionLabel::Experience | SectionLabel::Projects)
    }
}

/// Detected spelling variant of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingVariant {
    Us,
    Uk,
}

/// One detected section of a document.
///
/// `text` is the canonical stream (lowercased, NFKC, US spelling); `raw_text`
/// is the original slice so evidence lookups can quote the author's own
/// words. `start_offset` is the byte offset of the section start in the
/// original document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub label: SectionLabel,
    pub heading: Option<String>,
    pub text: String,
    pub raw_text: String,
    pub start_offset: usize,
}

/// A normalized document: the original text, its canonical parallel stream,
/// and an ordered list of sections. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub raw_text: String,
    pub canonical_text: String,
    pub variant: SpellingVariant,
    pub sections: Vec<Section>,
}

impl Document {
    /// All sections carrying the given label, in document order.
    pub fn sections_labeled(&self, label: SectionLabel) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.label == label)
    }
}
