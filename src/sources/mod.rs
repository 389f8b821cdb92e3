//! Loading of source collections.
//!
//! Each literature source (arXiv, OpenAlex, Semantic Scholar, ...) is queried
//! by an external connector that writes its results as JSON. This module
//! reads those outputs and normalizes every record to [`Paper`].
//!
//! # Accepted shapes
//!
//! ```json
//! [ { "title": "...", "year": 2020, ... }, ... ]
//! ```
//!
//! ```json
//! { "query": "graph neural networks", "count": 2, "papers": [ ... ] }
//! ```
//!
//! Anything else is a [`LoadError::MalformedInput`]. Individual records that
//! cannot be read are skipped with a warning instead of failing the whole
//! collection.

mod normalize;

pub use normalize::normalize_record;

use serde_json::Value;
use std::path::Path;

use crate::models::Paper;

/// Papers loaded from one input, in source order
#[derive(Debug, Clone, Default)]
pub struct SourceCollection {
    /// Where the collection came from (usually the file path)
    pub label: String,

    /// Search query recorded by the connector, if any
    pub query: Option<String>,

    /// Normalized papers
    pub papers: Vec<Paper>,

    /// Whether the records were wrapped in a `{"papers": [...]}` object
    pub enveloped: bool,
}

impl SourceCollection {
    /// Create an empty collection with a label
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Number of papers
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Whether the collection holds no papers
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Serialize in the shape the collection was read from
    ///
    /// Enveloped collections keep their `query` and get a fresh `count`.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let papers = serde_json::to_value(&self.papers)?;
        if !self.enveloped {
            return Ok(papers);
        }

        let mut envelope = serde_json::Map::new();
        if let Some(query) = &self.query {
            envelope.insert("query".to_string(), Value::String(query.clone()));
        }
        envelope.insert("count".to_string(), Value::from(self.papers.len()));
        envelope.insert("papers".to_string(), papers);
        Ok(Value::Object(envelope))
    }
}

/// Errors that can occur when loading a collection
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error (file system)
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The input is valid JSON but not a list of records
    #[error("Malformed input in {0}: expected a list of papers or an object with a \"papers\" list")]
    MalformedInput(String),
}

/// Build a collection from parsed JSON
pub fn parse_collection(label: impl Into<String>, value: Value) -> Result<SourceCollection, LoadError> {
    let label = label.into();

    let (query, records, enveloped) = match value {
        Value::Array(records) => (None, records, false),
        Value::Object(mut envelope) => match envelope.remove("papers") {
            Some(Value::Array(records)) => {
                let query = envelope
                    .get("query")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (query, records, true)
            }
            _ => return Err(LoadError::MalformedInput(label)),
        },
        _ => return Err(LoadError::MalformedInput(label)),
    };

    let mut papers = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!("Skipping record {} in {}: not an object", i, label);
            continue;
        }
        match normalize_record(record) {
            Ok(paper) => papers.push(paper),
            Err(e) => tracing::warn!("Skipping record {} in {}: {}", i, label, e),
        }
    }

    Ok(SourceCollection {
        label,
        query,
        papers,
        enveloped,
    })
}

/// Load a collection from a JSON file
pub fn load_collection_file(path: &Path) -> Result<SourceCollection, LoadError> {
    let label = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: label.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: label.clone(),
        source,
    })?;

    parse_collection(label, value)
}

/// Concatenate collections, preserving collection and record order
pub fn merge_collections(collections: Vec<SourceCollection>) -> Vec<Paper> {
    collections.into_iter().flat_map(|c| c.papers).collect()
}
