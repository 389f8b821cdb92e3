//! Integration tests for Research Digest
//!
//! These tests exercise the public API end to end: loading collections,
//! aggregation, deduplication, ranking and the thematic summary.

use research_digest::aggregate::Aggregator;
use research_digest::config::{AggregateSettings, ConfigFile, SummarySettings};
use research_digest::models::{KeywordCount, Paper, PaperBuilder, SortKey, SourceType};
use research_digest::sources::{load_collection_file, parse_collection, LoadError};
use research_digest::summary::{
    build_timeline, chart_renderer, citation_leaderboard, extract_keywords, render_text,
    AbstractPolicy, Stopwords, Summarizer, SummaryError,
};
use research_digest::utils::{
    deduplicate_papers, normalize_title, rank_papers, titles_similar,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use serde_json::json;
use std::path::PathBuf;
use tempfile::tempdir;

fn titled(titles: &[&str]) -> Vec<Paper> {
    titles
        .iter()
        .map(|t| PaperBuilder::new(*t, SourceType::Arxiv).build())
        .collect()
}

fn titles_of(papers: &[Paper]) -> Vec<&str> {
    papers.iter().map(|p| p.title_or_empty()).collect()
}

fn write_json(dir: &std::path::Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
    path
}

#[test]
fn test_round_trip_dedup_and_rank() {
    let collection = parse_collection(
        "mixed",
        json!([
            {"title": "Deep Learning for NLP", "citation_count": 50},
            {"title": "deep learning for nlp!!", "citation_count": 10},
            {"title": "Graph Neural Networks", "citation_count": 5}
        ]),
    )
    .unwrap();

    let aggregator = Aggregator::new(AggregateSettings {
        deduplicate: true,
        sort_by: "citation".to_string(),
        ..Default::default()
    });
    let results = aggregator.aggregate(vec![collection]);

    assert_eq!(results.total_count, 2);
    assert_eq!(results.duplicates_removed, Some(1));
    assert_eq!(results.papers[0].title.as_deref(), Some("Deep Learning for NLP"));
    assert_eq!(results.papers[0].citation_count, 50);
    assert_eq!(results.papers[1].title.as_deref(), Some("Graph Neural Networks"));
    assert_eq!(results.papers[1].citation_count, 5);
}

#[test]
fn test_keyword_extraction_scenario() {
    let papers = vec![
        PaperBuilder::new("Attention Is All You Need", SourceType::Arxiv).build(),
        PaperBuilder::untitled(SourceType::SemanticScholar)
            .abstract_text("attention mechanisms improve attention based models")
            .build(),
    ];

    let keywords = extract_keywords(&papers, &Stopwords::default(), 20, AbstractPolicy::default());

    assert_eq!(keywords[0], KeywordCount::new("attention", 3));
    assert!(keywords[1..].iter().all(|k| k.count == 1));
    for excluded in ["is", "all", "you", "need", "based"] {
        assert!(
            keywords.iter().all(|k| k.word != excluded),
            "{} should be excluded",
            excluded
        );
    }
    assert!(keywords.iter().all(|k| k.word.len() >= 3));
}

#[test]
fn test_timeline_scenario() {
    let papers = vec![
        PaperBuilder::new("A", SourceType::Arxiv).year(2020).build(),
        PaperBuilder::new("B", SourceType::Arxiv).year(2020).build(),
        PaperBuilder::new("C", SourceType::Arxiv).year(2021).build(),
        PaperBuilder::new("D", SourceType::Arxiv).build(),
    ];

    let timeline = build_timeline(&papers);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.get(&2020), Some(&2));
    assert_eq!(timeline.get(&2021), Some(&1));
}

#[test]
fn test_leaderboard_scenario() {
    let papers: Vec<Paper> = [("first", 3), ("top", 100), ("second", 3), ("mid", 7)]
        .iter()
        .map(|(t, c)| PaperBuilder::new(*t, SourceType::OpenAlex).citations(*c).build())
        .collect();

    let board = citation_leaderboard(&papers, 3);
    let counts: Vec<u64> = board.iter().map(|e| e.citation_count).collect();
    assert_eq!(counts, vec![100, 7, 3]);
    assert_eq!(board[2].title.as_deref(), Some("first"));
}

#[test]
fn test_dedup_idempotent_on_unique_input() {
    let papers = titled(&[
        "Protein Structure Prediction",
        "Graph Neural Networks",
        "Attention Is All You Need",
        "Reinforcement Learning From Human Feedback",
    ]);

    let once = deduplicate_papers(papers.clone(), DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(once.papers, papers);
    assert_eq!(once.removed(), 0);

    let twice = deduplicate_papers(once.papers.clone(), DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(twice.papers, once.papers);
}

#[test]
fn test_dedup_preserves_order_of_accepted() {
    let papers = titled(&[
        "Zebrafish Genetics",
        "Deep Learning for NLP",
        "Alpha Folding",
        "deep learning for nlp",
        "Mars Rovers",
    ]);

    let outcome = deduplicate_papers(papers, DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(
        titles_of(&outcome.papers),
        vec![
            "Zebrafish Genetics",
            "Deep Learning for NLP",
            "Alpha Folding",
            "Mars Rovers"
        ]
    );
    assert_eq!(outcome.duplicates[0].index, 3);
    assert_eq!(outcome.duplicates[0].kept_index, 1);
}

#[test]
fn test_threshold_monotonicity() {
    let papers = titled(&[
        "Deep Learning for Natural Language Processing",
        "Deep learning for natural language processing.",
        "Deep Learning in Natural Language Processing",
        "Graph Neural Networks: A Review",
        "A Review of Graph Neural Networks",
        "Graph Neural Networks for Molecules",
        "Protein Structure Prediction",
        "Protein structure prediction with transformers",
        "Attention Is All You Need",
    ]);

    let thresholds = [0.3, 0.5, 0.6, 0.7, 0.8, 0.85, 0.9, 0.95, 1.0];
    let removed: Vec<usize> = thresholds
        .iter()
        .map(|t| deduplicate_papers(papers.clone(), *t).removed())
        .collect();

    for pair in removed.windows(2) {
        assert!(pair[1] <= pair[0], "removals increased: {:?}", removed);
    }
}

#[test]
fn test_strict_threshold_removes_only_exact_matches() {
    let papers = titled(&[
        "Deep Learning for NLP",
        "Deep Learning in NLP",
        "DEEP LEARNING FOR NLP?",
        "Shallow Learning for NLP",
    ]);

    let outcome = deduplicate_papers(papers, 1.0);
    assert_eq!(
        titles_of(&outcome.papers),
        vec![
            "Deep Learning for NLP",
            "Deep Learning in NLP",
            "Shallow Learning for NLP"
        ]
    );
}

#[test]
fn test_similarity_is_symmetric() {
    let titles = [
        "Deep Learning for NLP",
        "deep learning",
        "A Survey of Deep Learning for Natural Language Processing",
        "graph neural networks",
        "",
    ];
    for a in titles {
        for b in titles {
            let (a, b) = (normalize_title(a), normalize_title(b));
            for threshold in [0.5, 0.85, 1.0] {
                assert_eq!(
                    titles_similar(&a, &b, threshold),
                    titles_similar(&b, &a, threshold),
                    "asymmetric for {:?} / {:?}",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_sort_stability() {
    let papers: Vec<Paper> = [("a", 5, 2020), ("b", 9, 2019), ("c", 5, 2020), ("d", 9, 2021)]
        .iter()
        .map(|(t, c, y)| {
            PaperBuilder::new(*t, SourceType::Arxiv)
                .citations(*c)
                .year(*y)
                .build()
        })
        .collect();

    let by_citation = rank_papers(papers.clone(), SortKey::Citation);
    assert_eq!(titles_of(&by_citation), vec!["b", "d", "a", "c"]);

    let by_year = rank_papers(papers, SortKey::Year);
    assert_eq!(titles_of(&by_year), vec!["d", "a", "c", "b"]);
}

#[test]
fn test_malformed_input_contributes_nothing() {
    let dir = tempdir().unwrap();
    let good = write_json(
        dir.path(),
        "arxiv.json",
        json!({"query": "nlp", "papers": [{"title": "Deep Learning for NLP", "year": 2020}]}),
    );
    let malformed = write_json(dir.path(), "broken.json", json!({"error": "rate limited"}));
    let not_json = dir.path().join("garbage.json");
    std::fs::write(&not_json, "not json at all").unwrap();

    assert!(matches!(
        load_collection_file(&malformed),
        Err(LoadError::MalformedInput(_))
    ));
    assert!(matches!(load_collection_file(&not_json), Err(LoadError::Json { .. })));

    let results = Aggregator::default().run(&[good, malformed, not_json]);
    assert_eq!(results.total_count, 1);
    assert_eq!(results.sources.len(), 3);
}

#[test]
fn test_inverted_index_abstract_is_reconstructed() {
    let collection = parse_collection(
        "openalex",
        json!([{
            "title": "Sparse Models",
            "abstract": {"sparse": [0, 2], "graphs": [1]},
            "source": "openalex"
        }]),
    )
    .unwrap();

    let keywords = extract_keywords(
        &collection.papers,
        &Stopwords::none(),
        10,
        AbstractPolicy::Reconstruct,
    );
    assert_eq!(keywords[0], KeywordCount::new("sparse", 3));
    assert!(keywords.iter().all(|k| !k.word.contains('[')));
}

#[test]
fn test_summary_of_empty_corpus_fails() {
    let summarizer = Summarizer::new(SummarySettings::default());
    assert_eq!(summarizer.summarize(&[]), Err(SummaryError::EmptyCorpus));

    let zero = Summarizer::new(SummarySettings {
        max_papers: 0,
        ..Default::default()
    });
    assert_eq!(
        zero.summarize(&titled(&["Anything"])),
        Err(SummaryError::EmptyCorpus)
    );
}

#[test]
fn test_summary_report_from_file() {
    let dir = tempdir().unwrap();
    let path = write_json(
        dir.path(),
        "aggregated.json",
        json!({
            "total_count": 3,
            "sort_by": "citation",
            "sources": ["arxiv.json"],
            "papers": [
                {"title": "Graph Attention Networks", "year": 2018, "citation_count": 900, "source": "arxiv"},
                {"title": "Graph Convolutional Networks", "year": 2017, "citationCount": 1200, "source": "semantic_scholar"},
                {"title": "Untitled draft", "source": "openalex"}
            ]
        }),
    );

    let collection = load_collection_file(&path).unwrap();
    let summary = Summarizer::default().summarize(&collection.papers).unwrap();

    assert_eq!(summary.paper_count, 3);
    assert_eq!(summary.leaderboard[0].citation_count, 1200);
    assert_eq!(summary.sources.get("semantic_scholar"), Some(&1));

    let report = render_text(&summary);
    assert!(report.contains("KEY THEMES:"));
    assert!(report.contains("2017: █ (1)"));
    assert!(report.contains("1. Graph Convolutional Networks... (1200 citations)"));
}

#[test]
fn test_chart_renderer_is_optional() {
    let renderer = chart_renderer();
    assert_eq!(renderer.is_some(), cfg!(feature = "charts"));

    if let Some(renderer) = renderer {
        let dir = tempdir().unwrap();
        let summary = Summarizer::default()
            .summarize(&titled(&["Graph Networks"]))
            .unwrap();
        let written = renderer
            .render(&summary, &dir.path().join("papers_knowledge_graph.txt"))
            .unwrap();
        assert!(written.exists());
    }
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("research-digest.toml");

    let mut file = ConfigFile::default();
    file.config.aggregate.deduplicate = true;
    file.config.summary.abstract_policy = AbstractPolicy::Skip;
    file.save(&path).unwrap();

    let config = research_digest::config::load_config(&path).unwrap();
    assert!(config.aggregate.deduplicate);
    assert_eq!(config.summary.abstract_policy, AbstractPolicy::Skip);
}
