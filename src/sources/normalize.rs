//! Normalization of raw source records into [`Paper`].
//!
//! Connectors already emit the common schema, but field types drift between
//! them (string years, null citation counts, author objects). Everything is
//! accepted leniently here so the rest of the crate can rely on the
//! invariants of [`Paper`].

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{Abstract, Paper, SourceType};

/// Date fields consulted when a record carries no explicit year
const DATE_FIELDS: [&str; 3] = ["published_date", "publication_date", "published"];

/// A record as it appears in a source collection
#[derive(Debug, Deserialize)]
pub(crate) struct RawPaper {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    r#abstract: Option<Value>,
    #[serde(default)]
    authors: Option<Value>,
    #[serde(default)]
    year: Option<Value>,
    #[serde(default)]
    citation_count: Option<Value>,
    #[serde(default, rename = "citationCount")]
    citation_count_camel: Option<Value>,
    #[serde(default)]
    venue: Option<Value>,
    #[serde(default)]
    url: Option<Value>,
    #[serde(default)]
    paper_id: Option<Value>,
    #[serde(default)]
    work_id: Option<Value>,
    #[serde(default)]
    source: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawPaper> for Paper {
    fn from(raw: RawPaper) -> Self {
        let year = raw
            .year
            .as_ref()
            .and_then(parse_year)
            .or_else(|| year_from_dates(&raw.extra));

        Paper {
            title: raw.title.as_ref().and_then(text_value),
            r#abstract: raw.r#abstract.and_then(parse_abstract),
            authors: raw.authors.as_ref().map(parse_authors).unwrap_or_default(),
            year,
            citation_count: present(raw.citation_count)
                .or(raw.citation_count_camel)
                .as_ref()
                .map(parse_count)
                .unwrap_or(0),
            venue: raw.venue.as_ref().and_then(text_value),
            url: raw.url.as_ref().and_then(text_value),
            paper_id: present(raw.paper_id)
                .or(raw.work_id)
                .as_ref()
                .and_then(text_value),
            source: raw
                .source
                .as_ref()
                .and_then(text_value)
                .map(|tag| SourceType::from_tag(&tag))
                .unwrap_or_default(),
            extra: raw.extra,
        }
    }
}

/// Normalize one JSON record
pub fn normalize_record(value: Value) -> Result<Paper, serde_json::Error> {
    let raw: RawPaper = serde_json::from_value(value)?;
    Ok(raw.into())
}

/// Drop explicit nulls so a spelling variant of the same field can fill in
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

/// Strings as-is, numbers rendered; null, blank and structured values dropped
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_abstract(value: Value) -> Option<Abstract> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => match serde_json::from_value::<Abstract>(other) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Ignoring abstract in unsupported shape: {}", e);
                None
            }
        },
    }
}

fn parse_authors(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name.trim().to_string()),
                Value::Object(obj) => obj
                    .get("name")
                    .or_else(|| obj.get("display_name"))
                    .and_then(Value::as_str)
                    .map(|name| name.trim().to_string()),
                _ => None,
            })
            .filter(|name| !name.is_empty())
            .collect(),
        Value::String(joined) => joined
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn valid_year(year: i64) -> Option<i32> {
    if (1000..=9999).contains(&year) {
        Some(year as i32)
    } else {
        None
    }
}

fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(year) = n.as_i64() {
                valid_year(year)
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .and_then(|f| valid_year(f as i64))
            }
        }
        Value::String(s) => {
            let prefix: String = s.trim().chars().take(4).collect();
            if prefix.len() == 4 && prefix.chars().all(|c| c.is_ascii_digit()) {
                prefix.parse().ok().and_then(valid_year)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_date_year(text: &str) -> Option<i32> {
    use chrono::Datelike;

    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return valid_year(ts.year() as i64);
    }
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| valid_year(d.year() as i64))
}

fn year_from_dates(extra: &BTreeMap<String, Value>) -> Option<i32> {
    DATE_FIELDS
        .iter()
        .filter_map(|field| extra.get(*field).and_then(Value::as_str))
        .find_map(parse_date_year)
}

fn parse_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
