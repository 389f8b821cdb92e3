//! Core data models for bibliographic records and aggregation results.

mod paper;
mod results;

pub use paper::{Abstract, Paper, PaperBuilder, SourceType};
pub use results::{
    AggregatedResults, KeywordCount, LeaderboardEntry, SortKey, ThematicSummary, Timeline,
    UnsupportedSortKey,
};
