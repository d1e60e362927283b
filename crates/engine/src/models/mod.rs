//! Data model for the matching engine.
//!
//! Everything here is an immutable value: documents and reports are produced
//! once per scoring run and never mutated in place. A re-run builds a fresh
//! `MatchReport` the caller may diff against a prior one — match history is
//! the caller's concern, not engine state.

mod document;
mod entity;
mod report;

pub use document::{Document, Section, SectionLabel, SpellingVariant};
pub use entity::{Entity, EntityKind, Requirement, RequirementStrength};
pub use report::{
    Category, CategoryScore, Eligibility, EvidenceAnalysis, EvidenceRecord, EvidenceStrength,
    ExperienceGap, GapAnalysis, GapPriority, HybridScoring, MatchReport, ParsedEntities,
    PlacementSuggestion, SectionAnalysis, SectionSummary, SemanticAnalysis, SemanticMatch,
};
