//! Text formatting helpers for reports and terminal tables.

use comfy_table::{Attribute, Cell, Table};

use crate::models::Paper;

/// Glyph used for proportional bars in text reports
pub const BAR_GLYPH: char = '█';

/// Longest bar drawn in a text report
pub const MAX_BAR_LEN: usize = 20;

/// Draw a bar of `len` glyphs, capped at [`MAX_BAR_LEN`]
pub fn glyph_bar(len: usize) -> String {
    std::iter::repeat(BAR_GLYPH).take(len.min(MAX_BAR_LEN)).collect()
}

/// Keep the first `max_chars` characters of `text`
///
/// Counts characters, not bytes, so multi-byte titles are never split
/// inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Truncate text to fit within the specified width using unicode-aware truncation.
///
/// Returns a string that fits within `max_width` columns, appending an
/// ellipsis if truncation occurred.
///
/// # Examples
///
/// ```
/// use research_digest::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    // Reserve three columns for the ellipsis
    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}

/// Join author names for display, truncating if necessary.
pub fn format_authors(authors: &[String], max_width: usize) -> String {
    truncate_with_ellipsis(&authors.join("; "), max_width)
}

/// Build a terminal table of papers
pub fn papers_table(papers: &[Paper]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Title", "Authors", "Source", "Year", "Citations"]);

    for (i, paper) in papers.iter().enumerate() {
        let year = paper.year.map(|y| y.to_string()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate_with_ellipsis(paper.title_or_empty(), 50))
                .add_attribute(Attribute::Bold),
            Cell::new(format_authors(&paper.authors, 30)),
            Cell::new(paper.source.to_string()),
            Cell::new(year),
            Cell::new(paper.citation_count),
        ]);
    }

    table
}
