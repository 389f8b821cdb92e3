//! Utility modules supporting aggregation.
//!
//! - [`deduplicate_papers`]: Remove near-duplicate papers by title similarity
//! - [`find_duplicates`]: Find duplicate groups without modifying the list
//! - [`Deduplicator`]: Online duplicate filter for streaming use
//! - [`rank_papers`] / [`rank_by_name`]: Stable multi-criteria sorting
//! - [`papers_table`], [`truncate_with_ellipsis`], [`glyph_bar`]: Display helpers
//!
//! # Deduplication
//!
//! ```rust
//! use research_digest::utils::{deduplicate_papers, DEFAULT_SIMILARITY_THRESHOLD};
//! use research_digest::models::{PaperBuilder, SourceType};
//!
//! let papers = vec![
//!     PaperBuilder::new("Deep Learning for NLP", SourceType::SemanticScholar).build(),
//!     PaperBuilder::new("deep learning for nlp!!", SourceType::OpenAlex).build(),
//! ];
//! let outcome = deduplicate_papers(papers, DEFAULT_SIMILARITY_THRESHOLD);
//! assert_eq!(outcome.papers.len(), 1);
//! assert_eq!(outcome.removed(), 1);
//! ```

mod dedup;
mod display;
mod rank;

pub use dedup::{
    deduplicate_papers, find_duplicates, normalize_title, titles_similar, Admission,
    DedupOutcome, Deduplicator, DuplicateMatch, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use display::{
    format_authors, glyph_bar, papers_table, truncate_chars, truncate_with_ellipsis, BAR_GLYPH,
    MAX_BAR_LEN,
};
pub use rank::{rank_by_name, rank_papers};
