//! Hybrid CV/JD matching and scoring engine.
//!
//! Combines exact-keyword matching, embedding-based section similarity, and
//! contextual evidence strength into one explainable, reproducible score
//! with eligibility gating and gap analysis. The surrounding product (job
//! queue, storage, HTTP API, rendering) calls in with a document pair and
//! consumes a [`MatchReport`]; nothing here does I/O of its own except the
//! embedding-provider call.
//!
//! ```no_run
//! use std::sync::Arc;
//! use engine::{HashEmbedder, MatchEngine};
//!
//! # async fn run() -> Result<(), engine::EngineError> {
//! let engine = MatchEngine::new(Arc::new(HashEmbedder::default()));
//! let report = engine
//!     .analyze("cv text...", "jd text...", Some("Acme Corp"), None)
//!     .await?;
//! println!("{} ({:?})", report.score, report.eligibility);
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod errors;
pub mod embedder;
pub mod extract;
mod models;
pub mod normalize;
pub mod scoring;
pub mod stopwords;

pub use config::{CategoryWeights, ConfigWarning, EngineConfig, HybridWeights};
pub use embedder::{CachedProvider, EmbedError, EmbeddingProvider, HashEmbedder, HttpEmbedder,
    HttpEmbedderConfig};
pub use engine::MatchEngine;
pub use errors::EngineError;
pub use models::{
    Category, CategoryScore, Document, Eligibility, Entity, EntityKind, EvidenceAnalysis,
    EvidenceRecord, EvidenceStrength, ExperienceGap, GapAnalysis, GapPriority, HybridScoring,
    MatchReport, ParsedEntities, PlacementSuggestion, Requirement, RequirementStrength, Section,
    SectionAnalysis, SectionLabel, SectionSummary, SemanticAnalysis, SemanticMatch,
    SpellingVariant,
};
pub use stopwords::{CompanyDetection, StopwordSet};
