//! # Research Digest
//!
//! Aggregates paper metadata collected from several literature sources
//! (arXiv, OpenAlex, Semantic Scholar, ...) into one deduplicated, ranked
//! corpus, and builds a thematic summary of it.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, AggregatedResults, ThematicSummary)
//! - [`sources`]: Loading and normalization of per-source JSON collections
//! - [`aggregate`]: Merge, deduplicate and rank collections
//! - [`summary`]: Keywords, timeline, citation leaderboard and report rendering
//! - [`utils`]: Deduplication, ranking and display helpers
//! - [`config`]: Configuration management

pub mod aggregate;
pub mod config;
pub mod models;
pub mod sources;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use aggregate::Aggregator;
pub use models::{AggregatedResults, Paper, SortKey, SourceType, ThematicSummary};
pub use sources::{load_collection_file, SourceCollection};
pub use summary::{render_text, Summarizer, SummaryError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
