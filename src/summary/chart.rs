//! Optional chart output for the thematic summary.
//!
//! The summarizer never depends on a chart backend. When the `charts`
//! feature is compiled in, [`chart_renderer`] hands out a renderer that
//! writes the panel data a plotting layer needs; otherwise it returns `None`
//! and callers fall back to the text report.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::models::ThematicSummary;
use crate::utils::truncate_chars;

/// Keywords plotted in the key themes panel
pub const CHART_KEYWORDS: usize = 15;

/// Characters of a title used as a bar label
pub const CHART_TITLE_CHARS: usize = 30;

/// Errors that can occur while rendering a chart
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A backend that turns a summary into a chart artifact
pub trait ChartRenderer {
    /// Short backend name for log messages
    fn name(&self) -> &str;

    /// Render next to `output`, returning the path that was written
    fn render(&self, summary: &ThematicSummary, output: &Path) -> Result<PathBuf, RenderError>;
}

/// Labels and values of one chart panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series<L> {
    pub labels: Vec<L>,
    pub values: Vec<u64>,
}

impl<L> Series<L> {
    fn from_pairs(pairs: impl IntoIterator<Item = (L, u64)>) -> Self {
        let (labels, values) = pairs.into_iter().unzip();
        Self { labels, values }
    }
}

/// Renderer-agnostic panel data for the four summary charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDocument {
    pub title: String,
    pub paper_count: usize,
    pub key_themes: Series<String>,
    pub timeline: Series<i32>,
    pub top_cited: Series<String>,
    pub sources: Series<String>,
}

impl ChartDocument {
    pub fn from_summary(summary: &ThematicSummary) -> Self {
        Self {
            title: "Literature Review Knowledge Graph".to_string(),
            paper_count: summary.paper_count,
            key_themes: Series::from_pairs(
                summary
                    .keywords
                    .iter()
                    .take(CHART_KEYWORDS)
                    .map(|k| (k.word.clone(), k.count as u64)),
            ),
            timeline: Series::from_pairs(
                summary.timeline.iter().map(|(year, count)| (*year, *count as u64)),
            ),
            top_cited: Series::from_pairs(summary.leaderboard.iter().map(|entry| {
                let title = entry.title.as_deref().unwrap_or("");
                (
                    truncate_chars(title, CHART_TITLE_CHARS).to_string(),
                    entry.citation_count,
                )
            })),
            sources: Series::from_pairs(
                summary
                    .sources
                    .iter()
                    .map(|(source, count)| (source.clone(), *count as u64)),
            ),
        }
    }
}

/// Writes a [`ChartDocument`] as pretty JSON
#[cfg(feature = "charts")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonChartRenderer;

#[cfg(feature = "charts")]
impl ChartRenderer for JsonChartRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, summary: &ThematicSummary, output: &Path) -> Result<PathBuf, RenderError> {
        let path = output.with_extension("chart.json");
        let document = ChartDocument::from_summary(summary);
        std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        Ok(path)
    }
}

/// Whether a chart backend was compiled in
pub fn charts_available() -> bool {
    cfg!(feature = "charts")
}

/// The chart backend, if one is available
pub fn chart_renderer() -> Option<Box<dyn ChartRenderer>> {
    #[cfg(feature = "charts")]
    {
        Some(Box::new(JsonChartRenderer))
    }
    #[cfg(not(feature = "charts"))]
    {
        None
    }
}
