//! Deduplication of papers collected from several sources.
//!
//! Duplicates are detected by title only. Each incoming paper is compared
//! against the representatives accepted so far; the first paper of a cluster
//! wins and later ones are dropped without merging any of their fields.
//! Matching is never transitive: a paper that only resembles an already
//! dropped duplicate is kept.

use std::collections::HashSet;

use crate::models::Paper;

/// Default title similarity threshold
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Normalize a title for comparison
///
/// Lowercases, keeps only alphanumeric and whitespace characters, and trims
/// the ends. Inner whitespace is left as-is; tokenization splits on it later.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check whether two normalized titles are similar enough to be duplicates
///
/// Equal non-empty titles always match. Otherwise the word sets are compared
/// and the overlap is measured against the smaller set, so a short title
/// fully contained in a longer one still counts.
pub fn titles_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b {
        return true;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let shared = words_a.intersection(&words_b).count();
    let overlap = shared as f64 / words_a.len().min(words_b.len()) as f64;
    overlap >= threshold
}

/// Outcome of offering a paper to a [`Deduplicator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The paper is new and was accepted
    Accepted,
    /// The paper duplicates the accepted paper at output index `of`
    Duplicate { of: usize },
}

/// Online, order-sensitive duplicate filter
///
/// Holds the normalized titles of every accepted paper together with the
/// position the paper took in the output.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    threshold: f64,
    accepted: Vec<(String, usize)>,
    admitted: usize,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl Deduplicator {
    /// Create a deduplicator with the given similarity threshold
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            accepted: Vec::new(),
            admitted: 0,
        }
    }

    /// Similarity threshold in use
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of papers accepted so far
    pub fn accepted_count(&self) -> usize {
        self.admitted
    }

    /// Offer the next paper in input order
    pub fn admit(&mut self, paper: &Paper) -> Admission {
        let normalized = normalize_title(paper.title_or_empty());
        let position = self.admitted;

        // An empty key cannot establish similarity with anything.
        if normalized.is_empty() {
            self.admitted += 1;
            return Admission::Accepted;
        }

        if let Some((_, of)) = self
            .accepted
            .iter()
            .find(|(seen, _)| titles_similar(&normalized, seen, self.threshold))
        {
            return Admission::Duplicate { of: *of };
        }

        self.accepted.push((normalized, position));
        self.admitted += 1;
        Admission::Accepted
    }
}

/// A dropped duplicate and the representative it matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateMatch {
    /// Index of the dropped paper in the input
    pub index: usize,
    /// Index of the kept representative in the output
    pub kept_index: usize,
}

/// Result of [`deduplicate_papers`]
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    /// Papers that survived, in input order
    pub papers: Vec<Paper>,
    /// Every dropped paper, in input order
    pub duplicates: Vec<DuplicateMatch>,
}

impl DedupOutcome {
    /// Number of papers removed
    pub fn removed(&self) -> usize {
        self.duplicates.len()
    }
}

/// Remove near-duplicate papers, keeping the first occurrence of each cluster
///
/// # Arguments
/// * `papers` - The papers to deduplicate, in source order
/// * `threshold` - Word overlap ratio at or above which two titles match
pub fn deduplicate_papers(papers: Vec<Paper>, threshold: f64) -> DedupOutcome {
    let mut dedup = Deduplicator::new(threshold);
    let mut kept = Vec::with_capacity(papers.len());
    let mut duplicates = Vec::new();

    for (index, paper) in papers.into_iter().enumerate() {
        match dedup.admit(&paper) {
            Admission::Accepted => kept.push(paper),
            Admission::Duplicate { of } => {
                tracing::debug!(
                    index,
                    kept_index = of,
                    title = paper.title_or_empty(),
                    "Dropping duplicate paper"
                );
                duplicates.push(DuplicateMatch {
                    index,
                    kept_index: of,
                });
            }
        }
    }

    DedupOutcome {
        papers: kept,
        duplicates,
    }
}

/// Find duplicate groups without modifying the input
///
/// Returns groups of input indices; the first index of each group is the
/// paper that would be kept. Papers without duplicates are not listed.
pub fn find_duplicates(papers: &[Paper], threshold: f64) -> Vec<Vec<usize>> {
    let mut dedup = Deduplicator::new(threshold);
    // Output position -> group of input indices
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (index, paper) in papers.iter().enumerate() {
        match dedup.admit(paper) {
            Admission::Accepted => groups.push(vec![index]),
            Admission::Duplicate { of } => groups[of].push(index),
        }
    }

    groups.into_iter().filter(|g| g.len() > 1).collect()
}
