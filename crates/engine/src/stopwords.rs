//! StopwordResolver — per-run stopword set construction.
//!
//! The effective set is base grammar words + job-board UI boilerplate + a
//! dynamic layer derived from the hiring company's name, so "Acme" never
//! shows up as a matched or missing keyword. Built once per scoring run by a
//! pure constructor and never persisted; detection failure degrades to
//! base + ui, it does not error.

use std::collections::HashSet;
use std::sync::LazyLock;

use lazy_static::lazy_static;
use regex::Regex;

/// Fixed grammar/function words.
static BASE_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "a", "an", "the", "and", "or", "but", "if", "then", "else", "of", "in", "on", "at", "to",
        "for", "from", "by", "with", "about", "as", "into", "through", "during", "before", "after",
        "above", "below", "up", "down", "out", "off", "over", "under", "again", "further", "once",
        "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
        "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "can", "will", "just", "should", "now", "is", "are", "was", "were",
        "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
        "would", "could", "our", "your", "their", "we", "you", "they", "it", "its", "this", "that",
        "these", "those", "what", "which", "who", "whom", "am", "us", "them", "he", "she", "his",
        "her", "my", "me", "i", "must", "nice", "well", "good", "great", "strong", "excellent",
        "able", "ability", "use", "used", "using", "new", "least", "per", "plus", "etc", "within",
        "across", "via", "also", "including", "include", "includes",
    ])
});

/// Fixed job-board navigation and boilerplate words.
static UI_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "apply", "click", "save", "share", "sign", "login", "logout", "register", "cookie",
        "cookies", "privacy", "policy", "terms", "conditions", "posted", "ago", "days", "careers",
        "career", "job", "jobs", "home", "search", "menu", "navigation", "back", "next", "page",
        "website", "email", "subscribe", "alert", "alerts", "browse", "listing", "listings",
        "recruiter", "vacancy", "vacancies", "experience", "years", "requirements",
        "responsibilities", "qualifications", "candidate", "candidates", "role", "position",
        "team", "opportunity", "company", "organization", "benefits", "salary", "description",
        "skills", "knowledge", "understanding", "work", "working", "required", "preferred",
        "bonus", "advantageous", "essential", "minimum", "proven", "seeking", "hiring",
    ])
});

/// Legal-entity suffixes appended to every dynamic expansion.
const LEGAL_SUFFIXES: [&str; 6] = ["ltd", "inc", "corp", "plc", "llc", "co"];

/// Result of company-name detection over the JD text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyDetection {
    Found(String),
    NotFound,
}

/// One named detection rule. Rules are evaluated in priority order; the
/// first capture wins.
struct CompanyRule {
    name: &'static str,
    pattern: &'static Regex,
}

lazy_static! {
    // "Company: Acme Corp" / "Organization: Acme"
    static ref LABELED_COMPANY_RE: Regex = Regex::new(
        r"(?:Company|Organi[sz]ation)\s*:\s*([A-Z][A-Za-z0-9&.'-]*(?:\s+[A-Z][A-Za-z0-9&.'-]*)*)"
    )
    .unwrap();
    // "Join Acme as ..." / "At Acme in ..."
    static ref JOIN_AT_RE: Regex = Regex::new(
        r"\b(?:Join|At)\s+([A-Z][A-Za-z0-9&.'-]*(?:\s+[A-Z][A-Za-z0-9&.'-]*)*)\s+(?:as|in)\b"
    )
    .unwrap();
    // "Acme is seeking ..." / "Acme is hiring ..."
    static ref SEEKING_RE: Regex = Regex::new(
        r"\b([A-Z][A-Za-z0-9&.'-]*(?:\s+[A-Z][A-Za-z0-9&.'-]*)*)\s+is\s+(?:seeking|hiring)\b"
    )
    .unwrap();
}

fn company_rules() -> [CompanyRule; 3] {
    [
        CompanyRule {
            name: "labeled_company",
            pattern: &LABELED_COMPANY_RE,
        },
        CompanyRule {
            name: "join_at",
            pattern: &JOIN_AT_RE,
        },
        CompanyRule {
            name: "is_seeking",
            pattern: &SEEKING_RE,
        },
    ]
}

/// Scans the JD for a company name using the ordered rule list.
pub fn detect_company(jd_text: &str) -> CompanyDetection {
    for rule in company_rules() {
        if let Some(captures) = rule.pattern.captures(jd_text) {
            if let Some(name) = captures.get(1) {
                let name = name.as_str().trim().to_string();
                tracing::debug!(rule = rule.name, company = %name, "detected company name");
                return CompanyDetection::Found(name);
            }
        }
    }
    CompanyDetection::NotFound
}

/// The effective stopword set for one scoring run. Advisory to the lexical
/// matcher only: it filters candidate JD keywords, and company tokens are
/// excluded from keyword overlap on both sides — but CV entity extraction
/// itself is never filtered ("worked at Acme" remains a valid employment
/// mention).
#[derive(Debug, Clone)]
pub struct StopwordSet {
    dynamic: HashSet<String>,
    pub company: CompanyDetection,
}

impl StopwordSet {
    /// Pure constructor. An explicit company name takes precedence over
    /// detection; neither present degrades to base + ui only.
    pub fn resolve(company_name: Option<&str>, jd_text: &str) -> Self {
        let company = match company_name {
            Some(name) if !name.trim().is_empty() => CompanyDetection::Found(name.trim().into()),
            _ => detect_company(jd_text),
        };

        let dynamic = match &company {
            CompanyDetection::Found(name) => expand_company(name),
            CompanyDetection::NotFound => HashSet::new(),
        };

        StopwordSet { dynamic, company }
    }

    /// True when the lowercase token must be excluded from keyword ranking
    /// and overlap.
    pub fn contains(&self, token: &str) -> bool {
        BASE_STOPWORDS.contains(token)
            || UI_STOPWORDS.contains(token)
            || self.dynamic.contains(token)
    }

    /// True when the token comes from the dynamic (company) layer.
    pub fn is_company_token(&self, token: &str) -> bool {
        self.dynamic.contains(token)
    }
}

/// Expands a company name into its constituent lowercase words plus the
/// fixed legal suffixes.
fn expand_company(name: &str) -> HashSet<String> {
    let mut set: HashSet<String> = name
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= 2)
        .map(str::to_string)
        .collect();
    for suffix in LEGAL_SUFFIXES {
        set.insert(suffix.to_string());
    }
    set
}
