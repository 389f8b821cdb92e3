use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use research_digest::aggregate::Aggregator;
use research_digest::config::{
    find_config_file, get_config, load_config, Config, ConfigFile, CONFIG_FILE_NAME,
};
use research_digest::models::SortKey;
use research_digest::sources::load_collection_file;
use research_digest::summary::{chart_renderer, render_text, Summarizer};
use research_digest::utils::{deduplicate_papers, find_duplicates, papers_table};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Digest - Merge literature search results and summarize their themes
#[derive(Parser, Debug)]
#[command(name = "research-digest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Merge, deduplicate and summarize paper collections from multiple sources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for aggregated results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Table format (human-readable)
    Table,
}

/// Sort field for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    /// Most cited first
    #[value(alias = "citations")]
    Citation,
    /// Most recent first
    Year,
    /// Alphabetical by title
    Title,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Citation => SortKey::Citation,
            SortField::Year => SortKey::Year,
            SortField::Title => SortKey::Title,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge paper collections from several sources into one ranked list
    #[command(alias = "agg")]
    Aggregate {
        /// Input JSON files, one per source
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Remove near-duplicate titles
        #[arg(long)]
        dedup: bool,

        /// Title similarity threshold for deduplication (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Sort by field
        #[arg(long, short, value_enum)]
        sort: Option<SortField>,

        /// Write results to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Build a thematic summary (keywords, timeline, top cited) of a collection
    #[command(alias = "sum")]
    Summarize {
        /// Input JSON file (a collection or aggregated results)
        input: PathBuf,

        /// Report path (default: <input stem>_knowledge_graph.txt)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Maximum number of papers to summarize
        #[arg(long)]
        max_papers: Option<usize>,

        /// Number of keywords to keep
        #[arg(long)]
        top_n: Option<usize>,

        /// Number of papers on the citation leaderboard
        #[arg(long)]
        leaderboard: Option<usize>,
    },

    /// Deduplicate a JSON file containing papers
    #[command(alias = "dedup")]
    Dedupe {
        /// Input JSON file containing papers
        input: PathBuf,

        /// Output file (default: overwrite input); keeps the input's list or envelope shape
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Title similarity threshold (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Show duplicate groups without removing
        #[arg(long, short)]
        show: bool,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = CONFIG_FILE_NAME)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };

    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    match cli.command {
        Commands::Aggregate {
            inputs,
            dedup,
            threshold,
            sort,
            output,
            format,
        } => {
            if dedup {
                config.aggregate.deduplicate = true;
            }
            if let Some(threshold) = threshold {
                config.aggregate.similarity_threshold = threshold;
            }
            if let Some(sort) = sort {
                config.aggregate.sort_by = SortKey::from(sort).to_string();
            }

            let aggregator = Aggregator::new(config.aggregate);
            let results = aggregator.run(&inputs);

            if let Some(path) = &output {
                std::fs::write(path, serde_json::to_string_pretty(&results)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !cli.quiet {
                    eprintln!(
                        "Aggregated {} papers from {} sources into {}",
                        results.total_count,
                        results.sources.len(),
                        path.display()
                    );
                }
            }

            match format {
                OutputFormat::Json if output.is_none() => {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                }
                OutputFormat::Json => {}
                OutputFormat::Table => {
                    println!("{}", papers_table(&results.papers));
                    if let Some(removed) = results.duplicates_removed {
                        println!("{} duplicates removed", removed);
                    }
                }
            }
        }

        Commands::Summarize {
            input,
            output,
            max_papers,
            top_n,
            leaderboard,
        } => {
            if let Some(max_papers) = max_papers {
                config.summary.max_papers = max_papers;
            }
            if let Some(top_n) = top_n {
                config.summary.top_keywords = top_n;
            }
            if let Some(leaderboard) = leaderboard {
                config.summary.leaderboard_size = leaderboard;
            }

            let collection = load_collection_file(&input)?;
            let summary = Summarizer::new(config.summary)
                .summarize(&collection.papers)
                .with_context(|| format!("Cannot summarize {}", input.display()))?;

            let report = render_text(&summary);
            let report_path = report_path(&input, output.as_deref());
            std::fs::write(&report_path, &report)
                .with_context(|| format!("Failed to write {}", report_path.display()))?;
            tracing::info!("Text summary saved to {}", report_path.display());

            match chart_renderer() {
                Some(renderer) => match renderer.render(&summary, &report_path) {
                    Ok(path) => {
                        tracing::info!("Chart data ({}) saved to {}", renderer.name(), path.display())
                    }
                    Err(e) => tracing::warn!("Chart rendering failed: {}", e),
                },
                None => tracing::info!("No chart renderer available, text report only"),
            }

            if !cli.quiet {
                println!("{}", report);
            }
        }

        Commands::Dedupe {
            input,
            output,
            threshold,
            show,
        } => {
            let threshold = threshold.unwrap_or(config.aggregate.similarity_threshold);
            let mut collection = load_collection_file(&input)?;

            if show {
                let papers = &collection.papers;
                let groups = find_duplicates(papers, threshold);
                if groups.is_empty() {
                    println!("No duplicates found");
                } else {
                    println!("Found {} duplicate groups:", groups.len());
                    for (i, group) in groups.iter().enumerate() {
                        println!("  Group {}: {} papers", i + 1, group.len());
                        for idx in group {
                            let paper = &papers[*idx];
                            println!(
                                "    - {} ({})",
                                paper.title.as_deref().unwrap_or("Unknown"),
                                paper.source
                            );
                        }
                    }
                }
            } else {
                let before = collection.len();
                let outcome =
                    deduplicate_papers(std::mem::take(&mut collection.papers), threshold);
                let removed = outcome.removed();
                collection.papers = outcome.papers;
                let output_json = serde_json::to_string_pretty(&collection.to_json()?)?;
                let output_path = output.as_ref().unwrap_or(&input);
                std::fs::write(output_path, output_json)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                if !cli.quiet {
                    eprintln!(
                        "Deduplicated: {} -> {} papers ({} removed)",
                        before,
                        collection.len(),
                        removed
                    );
                }
            }
        }

        Commands::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            ConfigFile::default().save(&path)?;
            if !cli.quiet {
                eprintln!("Wrote default configuration to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; logs go to stderr
fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("research_digest={}", env_filter)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_deref() == Some("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Where the text report goes
///
/// Defaults to `<stem>_knowledge_graph.txt` next to the input. An explicit
/// path ending in `.png` or `.json` gets a `.txt` extension instead.
fn report_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => {
            let is_image_or_data = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_lowercase().as_str(), "png" | "json"))
                .unwrap_or(false);
            if is_image_or_data {
                path.with_extension("txt")
            } else {
                path.to_path_buf()
            }
        }
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("papers");
            input.with_file_name(format!("{}_knowledge_graph.txt", stem))
        }
    }
}
