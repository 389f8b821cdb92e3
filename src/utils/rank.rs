//! Ranking of aggregated papers.
//!
//! All orderings are stable: papers with equal keys keep the relative order
//! they had before ranking. Nothing is ever dropped or duplicated.

use std::cmp::Reverse;

use crate::models::{Paper, SortKey};

/// Sort papers by the given key
pub fn rank_papers(mut papers: Vec<Paper>, key: SortKey) -> Vec<Paper> {
    match key {
        SortKey::Citation => papers.sort_by_key(|p| Reverse(p.citation_count)),
        // Missing years rank as 0, i.e. after every dated paper.
        SortKey::Year => papers.sort_by_key(|p| Reverse(p.year.unwrap_or(0))),
        // Missing titles rank as "", i.e. first.
        SortKey::Title => papers.sort_by_cached_key(|p| p.title_or_empty().to_lowercase()),
    }
    papers
}

/// Sort papers by a key name, passing them through unchanged if the name is unknown
pub fn rank_by_name(papers: Vec<Paper>, key: &str) -> Vec<Paper> {
    match key.parse::<SortKey>() {
        Ok(key) => rank_papers(papers, key),
        Err(e) => {
            tracing::warn!("{} - leaving {} papers in input order", e, papers.len());
            papers
        }
    }
}
