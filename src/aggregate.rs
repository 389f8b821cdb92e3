//! Aggregation of source collections into one ranked corpus.
//!
//! Collections are concatenated in input order, optionally deduplicated by
//! title similarity, then ranked by the configured sort key.

use std::path::PathBuf;

use crate::config::AggregateSettings;
use crate::models::AggregatedResults;
use crate::sources::{load_collection_file, merge_collections, SourceCollection};
use crate::utils::{deduplicate_papers, rank_by_name};

/// Merges, deduplicates and ranks papers from several sources
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    settings: AggregateSettings,
}

impl Aggregator {
    pub fn new(settings: AggregateSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AggregateSettings {
        &self.settings
    }

    /// Load every input file, in order
    ///
    /// An input that cannot be read or parsed is logged and contributes an
    /// empty collection, so one bad file never aborts the run.
    pub fn load_inputs(&self, paths: &[PathBuf]) -> Vec<SourceCollection> {
        paths
            .iter()
            .map(|path| match load_collection_file(path) {
                Ok(collection) => {
                    tracing::info!(
                        "Loaded {} papers from {}",
                        collection.len(),
                        collection.label
                    );
                    collection
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    SourceCollection::empty(path.display().to_string())
                }
            })
            .collect()
    }

    /// Merge collections into ranked results
    pub fn aggregate(&self, collections: Vec<SourceCollection>) -> AggregatedResults {
        let sources: Vec<String> = collections.iter().map(|c| c.label.clone()).collect();
        let papers = merge_collections(collections);
        tracing::info!("Merged {} papers from {} sources", papers.len(), sources.len());

        let (papers, removed) = if self.settings.deduplicate {
            let outcome = deduplicate_papers(papers, self.settings.similarity_threshold);
            let removed = outcome.removed();
            tracing::info!("Removed {} duplicates", removed);
            (outcome.papers, Some(removed))
        } else {
            (papers, None)
        };

        let papers = rank_by_name(papers, &self.settings.sort_by);
        tracing::info!(
            "Final corpus: {} papers sorted by {}",
            papers.len(),
            self.settings.sort_by
        );

        let results = AggregatedResults::new(papers, self.settings.sort_by.clone(), sources);
        match removed {
            Some(removed) => results.duplicates_removed(removed),
            None => results,
        }
    }

    /// Load and aggregate in one step
    pub fn run(&self, paths: &[PathBuf]) -> AggregatedResults {
        self.aggregate(self.load_inputs(paths))
    }
}
