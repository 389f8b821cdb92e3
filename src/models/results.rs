//! Aggregation and summary result models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::models::{Paper, SourceType};

/// Sort field for aggregated results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most cited first
    Citation,
    /// Most recent first
    Year,
    /// Alphabetical, case-insensitive
    Title,
}

impl SortKey {
    /// Name used on the command line and in serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Citation => "citation",
            SortKey::Year => "year",
            SortKey::Title => "title",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort key name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported sort key: {0}")]
pub struct UnsupportedSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnsupportedSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "citation" | "citations" => Ok(SortKey::Citation),
            "year" => Ok(SortKey::Year),
            "title" => Ok(SortKey::Title),
            other => Err(UnsupportedSortKey(other.to_string())),
        }
    }
}

/// Merged, optionally deduplicated and ranked corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResults {
    /// Number of papers in `papers`
    pub total_count: usize,

    /// Sort key that was requested
    pub sort_by: String,

    /// Labels of the collections that were merged, in input order
    pub sources: Vec<String>,

    /// The ranked papers
    pub papers: Vec<Paper>,

    /// Duplicates dropped, when deduplication ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicates_removed: Option<usize>,
}

impl AggregatedResults {
    /// Create results from a ranked paper list
    pub fn new(papers: Vec<Paper>, sort_by: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            total_count: papers.len(),
            sort_by: sort_by.into(),
            sources,
            papers,
            duplicates_removed: None,
        }
    }

    /// Record how many duplicates were dropped
    pub fn duplicates_removed(mut self, removed: usize) -> Self {
        self.duplicates_removed = Some(removed);
        self
    }
}

/// Keyword and how often it occurs across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

impl KeywordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Publication year -> number of papers, ascending by year
pub type Timeline = BTreeMap<i32, usize>;

/// One row of the citation leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub title: Option<String>,
    pub citation_count: u64,
    pub year: Option<i32>,
    pub source: SourceType,
}

impl From<&Paper> for LeaderboardEntry {
    fn from(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            citation_count: paper.citation_count,
            year: paper.year,
            source: paper.source.clone(),
        }
    }
}

/// Thematic overview of a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThematicSummary {
    /// Number of papers that were summarized
    pub paper_count: usize,

    /// Most frequent keywords, most frequent first
    pub keywords: Vec<KeywordCount>,

    /// Papers per publication year
    pub timeline: Timeline,

    /// Most cited papers, most cited first
    pub leaderboard: Vec<LeaderboardEntry>,

    /// Papers per source tag
    pub sources: BTreeMap<String, usize>,
}
