use serde::{Deserialize, Serialize};

/// Fixed taxonomy of recognizable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    HardSkill,
    SoftSkill,
    Title,
    Certification,
    Domain,
    Methodology,
    Tool,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::HardSkill => "hard_skill",
            EntityKind::SoftSkill => "soft_skill",
            EntityKind::Title => "title",
            EntityKind::Certification => "certification",
            EntityKind::Domain => "domain",
            EntityKind::Methodology => "methodology",
            EntityKind::Tool => "tool",
        }
    }

    /// Hard anchors for the semantic safety rails: concrete, verifiable
    /// entities as opposed to prose-level claims.
    pub fn is_hard_anchor(&self) -> bool {
        matches!(
            self,
            EntityKind::Tool | EntityKind::Certification | EntityKind::HardSkill
        )
    }
}

/// A recognized entity. `canonical_form` is the alias-resolved name; unknown
/// terms keep their surface form as canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub surface_form: String,
    pub canonical_form: String,
    pub kind: EntityKind,
}

/// Strength of a JD requirement. Absence of any trigger phrase defaults a
/// requirement to `Preferred`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStrength {
    Critical,
    Preferred,
}

/// A JD-only entity annotated with requirement strength and its occurrence
/// count in the JD after stopword filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub entity: Entity,
    pub strength: RequirementStrength,
    pub frequency: u32,
}
