//! Fixed recognition taxonomy.
//!
//! Dictionary terms are stored in canonical form per `EntityKind`; the
//! recognition index joins them with the alias table so any known surface
//! form is found in one pass. Matching is longest-surface-first over the
//! canonical text stream with word-boundary checks, so "java" never fires
//! inside "javascript".

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::extract::aliases;
use crate::models::{Entity, EntityKind};

const HARD_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "ruby", "php",
    "swift", "kotlin", "scala", "sql", "html", "css", "react", "angular", "vue", "node.js",
    "django", "flask", "spring", "fastapi", "rails", "express", "kubernetes", "docker",
    "terraform", "ansible", "aws", "gcp", "azure", "postgresql", "mysql", "mongodb", "redis",
    "elasticsearch", "kafka", "rabbitmq", "spark", "hadoop", "airflow", "snowflake", "dbt",
    "graphql", "rest", "grpc", "linux", "machine learning", "deep learning",
    "natural language processing", "computer vision", "data engineering", "data analysis",
    "data modeling", "extract transform load", "microservices", "distributed systems", "ci/cd",
    "infrastructure as code", "search engine optimization", "business intelligence",
    "artificial intelligence", ".net", "object oriented programming", "user experience",
    "user interface",
];

const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "collaboration",
    "problem solving",
    "critical thinking",
    "time management",
    "adaptability",
    "mentoring",
    "stakeholder management",
    "presentation",
    "negotiation",
    "creativity",
    "attention to detail",
    "decision making",
    "conflict resolution",
];

const TITLES: &[&str] = &[
    "software engineer",
    "senior software engineer",
    "staff engineer",
    "principal engineer",
    "engineering manager",
    "data scientist",
    "data engineer",
    "data analyst",
    "product manager",
    "project manager",
    "devops engineer",
    "site reliability engineer",
    "machine learning engineer",
    "backend engineer",
    "frontend engineer",
    "full stack developer",
    "solutions architect",
    "software architect",
    "tech lead",
    "qa engineer",
    "senior engineer",
];

const CERTIFICATIONS: &[&str] = &[
    "pmp",
    "cissp",
    "csm",
    "cka",
    "ckad",
    "aws certified solutions architect",
    "aws certified developer",
    "comptia security+",
    "scrum master",
    "itil",
    "six sigma",
    "google professional cloud architect",
    "azure administrator",
    "ccna",
];

const DOMAINS: &[&str] = &[
    "fintech",
    "healthcare",
    "e-commerce",
    "ecommerce",
    "insurance",
    "banking",
    "telecommunications",
    "logistics",
    "retail",
    "edtech",
    "cybersecurity",
    "adtech",
    "gaming",
    "saas",
    "manufacturing",
];

const METHODOLOGIES: &[&str] = &[
    "agile",
    "scrum",
    "kanban",
    "waterfall",
    "test driven development",
    "behavior driven development",
    "devops",
    "lean",
    "pair programming",
    "code review",
    "continuous integration",
    "continuous delivery",
    "domain driven design",
    "project management",
    "quality assurance",
    "site reliability engineering",
];

const TOOLS: &[&str] = &[
    "jira",
    "confluence",
    "excel",
    "tableau",
    "power bi",
    "looker",
    "figma",
    "slack",
    "git",
    "github",
    "gitlab",
    "bitbucket",
    "jenkins",
    "postman",
    "grafana",
    "prometheus",
    "datadog",
    "splunk",
    "salesforce",
    "sap",
    "visual studio code",
];

/// Canonical term → kind.
static TERM_KINDS: LazyLock<HashMap<&'static str, EntityKind>> = LazyLock::new(|| {
    let groups: &[(EntityKind, &[&str])] = &[
        (EntityKind::HardSkill, HARD_SKILLS),
        (EntityKind::SoftSkill, SOFT_SKILLS),
        (EntityKind::Title, TITLES),
        (EntityKind::Certification, CERTIFICATIONS),
        (EntityKind::Domain, DOMAINS),
        (EntityKind::Methodology, METHODOLOGIES),
        (EntityKind::Tool, TOOLS),
    ];
    let mut map = HashMap::new();
    for (kind, terms) in groups {
        for term in *terms {
            map.insert(*term, *kind);
        }
    }
    map
});

/// Recognition index: every known surface (canonicals plus aliases whose
/// canonical is a dictionary term), longest first so multiword phrases claim
/// their span before any embedded single word can.
static SURFACE_INDEX: LazyLock<Vec<(&'static str, &'static str, EntityKind)>> =
    LazyLock::new(|| {
        let mut index: Vec<(&'static str, &'static str, EntityKind)> = Vec::new();
        for (term, kind) in TERM_KINDS.iter() {
            index.push((*term, *term, *kind));
        }
        for (surface, canonical) in aliases::alias_entries() {
            if let Some(kind) = TERM_KINDS.get(canonical) {
                index.push((surface, canonical, *kind));
            }
        }
        index.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));
        index
    });

/// Looks up the kind of a canonical dictionary term.
pub fn kind_of(canonical: &str) -> Option<EntityKind> {
    TERM_KINDS.get(canonical).copied()
}

/// All entity occurrences recognized in a canonical text fragment, plus the
/// byte spans they claimed (used to keep free-token counting from
/// double-counting phrase words).
#[derive(Debug, Default)]
pub struct Recognized {
    pub occurrences: Vec<Entity>,
    pub spans: Vec<(usize, usize)>,
}

/// Scans canonical (lowercased) text for every dictionary surface form.
pub fn recognize(text: &str) -> Recognized {
    let mut claimed = vec![false; text.len()];
    let mut result = Recognized::default();

    for (surface, canonical, kind) in SURFACE_INDEX.iter() {
        for (start, _) in text.match_indices(surface) {
            let end = start + surface.len();
            if !has_boundary(text, start, end) {
                continue;
            }
            if claimed[start..end].iter().any(|c| *c) {
                continue;
            }
            claimed[start..end].iter_mut().for_each(|c| *c = true);
            result.occurrences.push(Entity {
                surface_form: surface.to_string(),
                canonical_form: canonical.to_string(),
                kind: *kind,
            });
            result.spans.push((start, end));
        }
    }

    result.spans.sort_unstable();
    result
}

fn has_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = start == 0
        || text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_alphanumeric());
    let after_ok = end == text.len()
        || text[end..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric());
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicals(text: &str) -> Vec<String> {
        recognize(text)
            .occurrences
            .into_iter()
            .map(|e| e.canonical_form)
            .collect()
    }

    #[test]
    fn test_recognizes_plain_hard_skill() {
        let found = canonicals("built services in python and rust");
        assert!(found.contains(&"python".to_string()));
        assert!(found.contains(&"rust".to_string()));
    }

    #[test]
    fn test_alias_surface_resolves_to_canonical() {
        let found = canonicals("shipped k8s operators and ml pipelines");
        assert!(found.contains(&"kubernetes".to_string()));
        assert!(found.contains(&"machine learning".to_string()));
    }

    #[test]
    fn test_java_does_not_fire_inside_javascript() {
        let found = canonicals("ten years of javascript");
        assert_eq!(found, vec!["javascript".to_string()]);
    }

    #[test]
    fn test_phrase_claims_span_before_embedded_word() {
        // "machine learning engineer" is a title; the span must not also
        // yield a separate "machine learning" hard skill.
        let found = canonicals("worked as a machine learning engineer");
        assert_eq!(found, vec!["machine learning engineer".to_string()]);
    }

    #[test]
    fn test_punctuated_surfaces_match() {
        let found = canonicals("c++ and c# backends with ci/cd");
        assert!(found.contains(&"c++".to_string()));
        assert!(found.contains(&"c#".to_string()));
        assert!(found.contains(&"ci/cd".to_string()));
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(kind_of("python"), Some(EntityKind::HardSkill));
        assert_eq!(kind_of("jira"), Some(EntityKind::Tool));
        assert_eq!(kind_of("agile"), Some(EntityKind::Methodology));
        assert_eq!(kind_of("made-up"), None);
    }
}
