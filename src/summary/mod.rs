//! Thematic summary of a paper corpus.
//!
//! A [`Summarizer`] turns a list of papers into a [`ThematicSummary`]:
//! keyword frequencies, a publication timeline, a citation leaderboard and a
//! per-source distribution. The summary can be rendered as the fixed text
//! report ([`render_text`]) and, when a backend is compiled in, as chart data
//! ([`chart_renderer`]).
//!
//! ```rust
//! use research_digest::config::SummarySettings;
//! use research_digest::models::{PaperBuilder, SourceType};
//! use research_digest::summary::Summarizer;
//!
//! let papers = vec![
//!     PaperBuilder::new("Graph Attention Networks", SourceType::Arxiv)
//!         .year(2018)
//!         .citations(9000)
//!         .build(),
//! ];
//! let summary = Summarizer::new(SummarySettings::default())
//!     .summarize(&papers)
//!     .unwrap();
//! assert_eq!(summary.paper_count, 1);
//! assert_eq!(summary.timeline.get(&2018), Some(&1));
//! ```

mod chart;
mod keywords;
mod report;

#[cfg(feature = "charts")]
pub use chart::JsonChartRenderer;
pub use chart::{
    chart_renderer, charts_available, ChartDocument, ChartRenderer, RenderError, Series,
    CHART_KEYWORDS, CHART_TITLE_CHARS,
};
pub use keywords::{
    extract_keywords, paper_text, tokenize, AbstractPolicy, Stopwords, DEFAULT_STOPWORDS,
};
pub use report::{render_text, LEADERBOARD_TITLE_CHARS, TEXT_KEYWORD_LINES};

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::config::SummarySettings;
use crate::models::{LeaderboardEntry, Paper, ThematicSummary, Timeline};

/// Errors that can occur while summarizing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// Nothing left to summarize after applying `max_papers`
    #[error("No papers to summarize")]
    EmptyCorpus,
}

/// Count papers per publication year; papers without a year are left out
pub fn build_timeline(papers: &[Paper]) -> Timeline {
    let mut timeline = Timeline::new();
    for year in papers.iter().filter_map(|p| p.year) {
        *timeline.entry(year).or_insert(0) += 1;
    }
    timeline
}

/// The `k` most cited papers, most cited first
///
/// Papers with equal citation counts keep their input order.
pub fn citation_leaderboard(papers: &[Paper], k: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&Paper> = papers.iter().collect();
    ranked.sort_by_key(|p| Reverse(p.citation_count));
    ranked.into_iter().take(k).map(LeaderboardEntry::from).collect()
}

/// Count papers per source tag
pub fn source_distribution(papers: &[Paper]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for paper in papers {
        *counts.entry(paper.source.id().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Builds thematic summaries with fixed settings and stopwords
#[derive(Debug, Clone)]
pub struct Summarizer {
    settings: SummarySettings,
    stopwords: Stopwords,
}

impl Summarizer {
    /// Create a summarizer using the built-in stopwords plus any configured extras
    pub fn new(settings: SummarySettings) -> Self {
        let stopwords = Stopwords::default().extend(&settings.extra_stopwords);
        Self {
            settings,
            stopwords,
        }
    }

    /// Replace the stopword set
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn settings(&self) -> &SummarySettings {
        &self.settings
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Summarize the first `max_papers` papers
    pub fn summarize(&self, papers: &[Paper]) -> Result<ThematicSummary, SummaryError> {
        let corpus = &papers[..papers.len().min(self.settings.max_papers)];
        if corpus.is_empty() {
            return Err(SummaryError::EmptyCorpus);
        }

        if corpus.len() < papers.len() {
            tracing::info!(
                "Summarizing the first {} of {} papers",
                corpus.len(),
                papers.len()
            );
        }

        let keywords = extract_keywords(
            corpus,
            &self.stopwords,
            self.settings.top_keywords,
            self.settings.abstract_policy,
        );
        let timeline = build_timeline(corpus);
        let leaderboard = citation_leaderboard(corpus, self.settings.leaderboard_size);
        let sources = source_distribution(corpus);

        tracing::info!(
            papers = corpus.len(),
            keywords = keywords.len(),
            years = timeline.len(),
            "Built thematic summary"
        );

        Ok(ThematicSummary {
            paper_count: corpus.len(),
            keywords,
            timeline,
            leaderboard,
            sources,
        })
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummarySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordCount, PaperBuilder, SourceType};

    fn cited(title: &str, citations: u64) -> Paper {
        PaperBuilder::new(title, SourceType::Arxiv)
            .citations(citations)
            .build()
    }

    #[test]
    fn test_build_timeline() {
        let papers = vec![
            PaperBuilder::new("A", SourceType::Arxiv).year(2020).build(),
            PaperBuilder::new("B", SourceType::Arxiv).year(2020).build(),
            PaperBuilder::new("C", SourceType::Arxiv).year(2021).build(),
            PaperBuilder::new("D", SourceType::Arxiv).build(),
        ];
        let timeline = build_timeline(&papers);
        assert_eq!(timeline, Timeline::from([(2020, 2), (2021, 1)]));
    }

    #[test]
    fn test_citation_leaderboard_stable() {
        let papers = vec![
            cited("first three", 3),
            cited("hundred", 100),
            cited("second three", 3),
            cited("seven", 7),
        ];
        let board = citation_leaderboard(&papers, 3);
        let counts: Vec<u64> = board.iter().map(|e| e.citation_count).collect();
        assert_eq!(counts, vec![100, 7, 3]);
        assert_eq!(board[2].title.as_deref(), Some("first three"));

        let full = citation_leaderboard(&papers, 10);
        assert_eq!(full.len(), 4);
        assert_eq!(full[3].title.as_deref(), Some("second three"));
    }

    #[test]
    fn test_source_distribution() {
        let papers = vec![
            PaperBuilder::new("A", SourceType::Arxiv).build(),
            PaperBuilder::new("B", SourceType::OpenAlex).build(),
            PaperBuilder::new("C", SourceType::Arxiv).build(),
            PaperBuilder::new("D", SourceType::Other("crossref".to_string())).build(),
        ];
        let dist = source_distribution(&papers);
        assert_eq!(dist.get("arxiv"), Some(&2));
        assert_eq!(dist.get("openalex"), Some(&1));
        assert_eq!(dist.get("crossref"), Some(&1));
    }

    #[test]
    fn test_summarize_empty_corpus() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize(&[]), Err(SummaryError::EmptyCorpus));

        let none_allowed = Summarizer::new(SummarySettings {
            max_papers: 0,
            ..Default::default()
        });
        assert_eq!(
            none_allowed.summarize(&[cited("A", 1)]),
            Err(SummaryError::EmptyCorpus)
        );
    }

    #[test]
    fn test_summarize_truncates_to_max_papers() {
        let papers = vec![
            PaperBuilder::new("Graph networks", SourceType::Arxiv).year(2019).build(),
            PaperBuilder::new("Graph kernels", SourceType::Arxiv).year(2020).build(),
            PaperBuilder::new("Protein folding", SourceType::OpenAlex).year(2021).build(),
        ];
        let summarizer = Summarizer::new(SummarySettings {
            max_papers: 2,
            ..Default::default()
        });

        let summary = summarizer.summarize(&papers).unwrap();
        assert_eq!(summary.paper_count, 2);
        assert_eq!(summary.keywords[0], KeywordCount::new("graph", 2));
        assert!(!summary.timeline.contains_key(&2021));
        assert_eq!(summary.sources.len(), 1);
    }

    #[test]
    fn test_extra_stopwords_and_override() {
        let papers = vec![cited("Graph models for graph data", 1)];

        let summarizer = Summarizer::new(SummarySettings {
            extra_stopwords: vec!["Graph".to_string()],
            ..Default::default()
        });
        let summary = summarizer.summarize(&papers).unwrap();
        assert!(summary.keywords.iter().all(|k| k.word != "graph"));

        let summary = summarizer
            .with_stopwords(Stopwords::none())
            .summarize(&papers)
            .unwrap();
        assert_eq!(summary.keywords[0], KeywordCount::new("graph", 2));
    }
}
