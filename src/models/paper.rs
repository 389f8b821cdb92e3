//! Paper model representing a normalized bibliographic record from any source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The source/repository a record was collected from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "arxiv")]
    Arxiv,
    #[serde(rename = "openalex")]
    OpenAlex,
    #[serde(rename = "semantic_scholar", alias = "semantic", alias = "semanticscholar")]
    SemanticScholar,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(untagged)]
    Other(String),
}

impl SourceType {
    /// Parse a source tag, matching the known sources case-insensitively
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "arxiv" => SourceType::Arxiv,
            "openalex" => SourceType::OpenAlex,
            "semantic_scholar" | "semantic" | "semanticscholar" => SourceType::SemanticScholar,
            "" | "unknown" => SourceType::Unknown,
            _ => SourceType::Other(tag.trim().to_string()),
        }
    }

    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            SourceType::Arxiv => "arXiv",
            SourceType::OpenAlex => "OpenAlex",
            SourceType::SemanticScholar => "Semantic Scholar",
            SourceType::Unknown => "Unknown",
            SourceType::Other(s) => s,
        }
    }

    /// Returns the source tag as it appears in serialized records
    pub fn id(&self) -> &str {
        match self {
            SourceType::Arxiv => "arxiv",
            SourceType::OpenAlex => "openalex",
            SourceType::SemanticScholar => "semantic_scholar",
            SourceType::Unknown => "unknown",
            SourceType::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Abstract of a paper.
///
/// OpenAlex delivers abstracts as an inverted index (word -> positions)
/// instead of plain text; both shapes are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Abstract {
    Text(String),
    InvertedIndex(BTreeMap<String, Vec<u32>>),
}

impl Abstract {
    /// Rebuild readable text, placing every word at each of its positions
    pub fn to_plain_text(&self) -> String {
        match self {
            Abstract::Text(text) => text.clone(),
            Abstract::InvertedIndex(index) => {
                let mut placed: Vec<(u32, &str)> = index
                    .iter()
                    .flat_map(|(word, positions)| positions.iter().map(move |p| (*p, word.as_str())))
                    .collect();
                placed.sort_by_key(|(position, _)| *position);
                placed
                    .into_iter()
                    .map(|(_, word)| word)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }

    /// Returns true for the inverted-index form
    pub fn is_inverted_index(&self) -> bool {
        matches!(self, Abstract::InvertedIndex(_))
    }

    /// Returns true when there is no text to work with
    pub fn is_empty(&self) -> bool {
        match self {
            Abstract::Text(text) => text.trim().is_empty(),
            Abstract::InvertedIndex(index) => index.is_empty(),
        }
    }
}

/// A bibliographic record normalized to the common schema
///
/// Every source collection is reduced to this shape before it reaches the
/// deduplicator, ranker or summarizer. Fields the core never inspects are
/// kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    #[serde(default)]
    pub title: Option<String>,

    /// Abstract, plain text or inverted index
    #[serde(default)]
    pub r#abstract: Option<Abstract>,

    /// Author display names, in order
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year
    #[serde(default)]
    pub year: Option<i32>,

    /// Citation count (0 when the source does not report one)
    #[serde(default)]
    pub citation_count: u64,

    /// Journal, conference or repository name
    #[serde(default)]
    pub venue: Option<String>,

    /// Landing page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Source-specific identifier (arXiv ID, OpenAlex work ID, S2 paper ID)
    #[serde(default)]
    pub paper_id: Option<String>,

    /// Source the record was collected from
    #[serde(default)]
    pub source: SourceType,

    /// Source-specific fields (categories, concepts, open access flag, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Paper {
    /// Create a new record with a title and source
    pub fn new(title: impl Into<String>, source: SourceType) -> Self {
        Self {
            title: Some(title.into()),
            source,
            ..Default::default()
        }
    }

    /// Title or the empty string
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Abstract as plain text, reconstructing inverted indexes
    pub fn abstract_text(&self) -> Option<String> {
        self.r#abstract.as_ref().map(Abstract::to_plain_text)
    }
}

/// Builder for constructing Paper records
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with a title and source
    pub fn new(title: impl Into<String>, source: SourceType) -> Self {
        Self {
            paper: Paper::new(title, source),
        }
    }

    /// Create a builder for a record without a title
    pub fn untitled(source: SourceType) -> Self {
        Self {
            paper: Paper {
                source,
                ..Default::default()
            },
        }
    }

    /// Add an author
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.paper.authors.push(name.into());
        self
    }

    /// Set abstract text
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.r#abstract = Some(Abstract::Text(abstract_text.into()));
        self
    }

    /// Set an inverted-index abstract
    pub fn abstract_index(mut self, index: BTreeMap<String, Vec<u32>>) -> Self {
        self.paper.r#abstract = Some(Abstract::InvertedIndex(index));
        self
    }

    /// Set publication year
    pub fn year(mut self, year: i32) -> Self {
        self.paper.year = Some(year);
        self
    }

    /// Set citation count
    pub fn citations(mut self, count: u64) -> Self {
        self.paper.citation_count = count;
        self
    }

    /// Set venue
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.paper.venue = Some(venue.into());
        self
    }

    /// Set URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.paper.url = Some(url.into());
        self
    }

    /// Set paper ID
    pub fn paper_id(mut self, id: impl Into<String>) -> Self {
        self.paper.paper_id = Some(id.into());
        self
    }

    /// Add extra metadata
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.paper.extra.insert(key.into(), value);
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
