//! Basic usage example for Research Digest
//!
//! This example demonstrates how to use the library to merge paper
//! collections from several sources and summarize the result.

use research_digest::aggregate::Aggregator;
use research_digest::config::{AggregateSettings, SummarySettings};
use research_digest::sources::parse_collection;
use research_digest::summary::{chart_renderer, render_text, Summarizer};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // Collections as written by the per-source connectors
    let arxiv = parse_collection(
        "arxiv",
        json!({
            "query": "transformers",
            "papers": [
                {"title": "Attention Is All You Need", "year": 2017, "citation_count": 90000,
                 "abstract": "The dominant sequence transduction models are based on recurrent networks.",
                 "source": "arxiv"},
                {"title": "Graph Attention Networks", "year": 2018, "citation_count": 12000, "source": "arxiv"}
            ]
        }),
    )?;
    let openalex = parse_collection(
        "openalex",
        json!([
            {"title": "Attention is all you need.", "publication_date": "2017-06-12",
             "citationCount": 85000, "source": "openalex",
             "abstract": {"sequence": [0], "transduction": [1], "models": [2]}},
            {"title": "Protein structure prediction with deep networks", "year": 2021,
             "citation_count": 4000, "source": "openalex"}
        ]),
    )?;

    println!("=== Aggregate ===");
    let aggregator = Aggregator::new(AggregateSettings {
        deduplicate: true,
        ..Default::default()
    });
    let results = aggregator.aggregate(vec![arxiv, openalex]);
    println!(
        "{} papers, {} duplicates removed",
        results.total_count,
        results.duplicates_removed.unwrap_or(0)
    );
    for paper in &results.papers {
        println!(
            "  {} ({}) - {} citations [{}]",
            paper.title_or_empty(),
            paper.year.map(|y| y.to_string()).unwrap_or_default(),
            paper.citation_count,
            paper.source
        );
    }

    println!("\n=== Summarize ===");
    let summary = Summarizer::new(SummarySettings {
        leaderboard_size: 3,
        ..Default::default()
    })
    .summarize(&results.papers)?;
    println!("{}", render_text(&summary));

    match chart_renderer() {
        Some(renderer) => println!("\nChart backend available: {}", renderer.name()),
        None => println!("\nNo chart backend compiled in"),
    }

    Ok(())
}
