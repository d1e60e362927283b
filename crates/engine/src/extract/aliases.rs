//! Canonical alias and acronym resolution.
//!
//! One table maps every known surface form (acronyms, vendor prefixes,
//! punctuation variants) to a single canonical form, so "ML" in a JD and
//! "Machine Learning" in a CV land on the same key. The table is
//! bidirectional in effect: both directions resolve to the same canonical,
//! which is what makes an acronym count as a full match either way. Unknown
//! terms keep their surface form as canonical.

use std::collections::HashMap;
use std::sync::LazyLock;

static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        // Acronym pairs (bidirectional by construction)
        ("machine learning", &["ml"]),
        ("artificial intelligence", &["ai"]),
        ("natural language processing", &["nlp"]),
        ("deep learning", &["dl"]),
        ("search engine optimization", &["seo", "search engine optimisation"]),
        ("project management", &["pm"]),
        ("business intelligence", &["bi"]),
        ("site reliability engineering", &["sre"]),
        ("object oriented programming", &["oop", "object-oriented programming"]),
        ("test driven development", &["tdd", "test-driven development"]),
        ("continuous integration", &["ci"]),
        ("continuous delivery", &["cd", "continuous deployment"]),
        ("infrastructure as code", &["iac"]),
        ("extract transform load", &["etl"]),
        ("user experience", &["ux"]),
        ("user interface", &["ui design"]),
        ("quality assurance", &["qa"]),
        // Platform/tool surface variants
        ("kubernetes", &["k8s", "k8"]),
        ("javascript", &["js", "ecmascript", "es6"]),
        ("typescript", &["ts"]),
        ("python", &["py", "python3", "python 3"]),
        ("postgresql", &["postgres", "postgre sql"]),
        ("mongodb", &["mongo", "mongo db"]),
        ("elasticsearch", &["elastic search"]),
        ("node.js", &["nodejs", "node js", "node"]),
        ("react", &["reactjs", "react.js", "react js"]),
        ("vue", &["vuejs", "vue.js", "vue js"]),
        ("angular", &["angularjs", "angular.js"]),
        (".net", &["dotnet", "dot net"]),
        ("c#", &["csharp", "c sharp"]),
        ("c++", &["cpp", "c plus plus"]),
        ("go", &["golang", "go lang"]),
        ("aws", &["amazon web services", "amazon aws"]),
        ("gcp", &["google cloud platform", "google cloud"]),
        ("azure", &["microsoft azure", "ms azure"]),
        ("excel", &["ms excel", "microsoft excel"]),
        ("power bi", &["powerbi", "microsoft power bi"]),
        ("ci/cd", &["cicd", "ci cd"]),
        ("rest", &["restful", "rest api", "restful api"]),
        ("grpc", &["g-rpc"]),
        ("github", &["git hub"]),
        ("visual studio code", &["vs code", "vscode"]),
        // Certifications
        ("pmp", &["project management professional"]),
        ("cissp", &["certified information systems security professional"]),
        ("csm", &["certified scrum master"]),
        ("cka", &["certified kubernetes administrator"]),
        (
            "aws certified solutions architect",
            &["aws solutions architect", "aws csa"],
        ),
        // Titles
        ("software engineer", &["swe", "software developer"]),
        ("full stack developer", &["fullstack developer", "full-stack developer"]),
        ("devops engineer", &["dev ops engineer"]),
        ("site reliability engineer", &["sre engineer"]),
    ];

    let mut map = HashMap::new();
    for (canonical, surfaces) in aliases {
        for surface in *surfaces {
            map.insert(*surface, *canonical);
        }
    }
    map
});

/// All known surface forms per canonical, canonical itself included. Used by
/// the evidence analyzer to locate a canonical skill in original text.
static SURFACES_BY_CANONICAL: LazyLock<HashMap<&'static str, Vec<&'static str>>> =
    LazyLock::new(|| {
        let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for (surface, canonical) in ALIAS_TO_CANONICAL.iter() {
            map.entry(*canonical).or_default().push(*surface);
        }
        for surfaces in map.values_mut() {
            surfaces.sort_unstable();
        }
        map
    });

/// Resolves a term to its canonical form. Unknown terms keep their
/// (lowercased, trimmed) surface form.
pub fn canonicalize(term: &str) -> String {
    let key = term.trim().to_lowercase();
    match ALIAS_TO_CANONICAL.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key,
    }
}

/// Every surface form that resolves to `canonical`, including the canonical
/// itself.
pub fn surfaces_of(canonical: &str) -> Vec<String> {
    let mut surfaces = vec![canonical.to_string()];
    if let Some(known) = SURFACES_BY_CANONICAL.get(canonical) {
        surfaces.extend(known.iter().map(|s| (*s).to_string()));
    }
    surfaces
}

/// Iterator over all alias surfaces and their canonicals, for building the
/// recognition index.
pub(crate) fn alias_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIAS_TO_CANONICAL.iter().map(|(s, c)| (*s, *c))
}
