//! Draftscore Core - Proposal quality scoring and draft version history
//!
//! Draftscore Core provides two independent engines for document authoring
//! tools:
//!
//! 1. **Scoring** (`scoring`): a deterministic rubric that scores a freeform
//!    proposal on four dimensions of 25 points each and deducts points for
//!    generic filler language
//! 2. **History** (`history`): a linear undo/redo store for successive drafts,
//!    where saving after rewinding discards the old future instead of forking
//!
//! # Quick Start
//!
//! ```
//! use draftscore_core::history::{create_version_store, MemoryStore};
//! use draftscore_core::validate_document;
//!
//! let draft = "# Problem Statement\n\
//!              Manual invoice matching costs us 120 hours per month.\n\n\
//!              # Proposed Solution\n\
//!              We propose to automate matching with a rules engine.";
//!
//! let report = validate_document(draft);
//! assert!(report.total_score <= 100);
//! assert!(report.problem_statement.score > 0);
//!
//! let mut store = create_version_store("invoice-automation", MemoryStore::new()).unwrap();
//! let outcome = store.save_version(draft).unwrap();
//! assert_eq!(outcome.version_number(), Some(1));
//! ```
//!
//! # Design Principles
//!
//! 1. **Total functions**: scoring never fails, any string yields a well-formed report
//! 2. **Injected rubric data**: keyword lists and weights live in a [`Lexicon`] and
//!    a [`RubricConfig`], never in mutable globals
//! 3. **Storage-agnostic history**: persistence goes through the
//!    [`history::KeyValueStore`] seam

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod config;
pub mod error;
pub mod history;
pub mod scoring;

// Re-export commonly used types for convenience
pub use config::{RubricConfig, MAX_TOTAL_SCORE};
pub use error::{DraftscoreError, Result, ResultExt};
pub use history::{
    create_version_store, KeyValueStore, MemoryStore, SaveOutcome, SkipReason, SqliteStore,
    VersionHistory, VersionStore, VersionView,
};
pub use scoring::{
    detect_sections, detect_slop, score_dimension, validate_document, validate_optional,
    Dimension, DimensionResult, Lexicon, ScoreBand, Section, SectionReport, SlopResult,
    ValidationReport, Validator, NO_CONTENT_ISSUE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
