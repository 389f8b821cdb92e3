//! Plain-text rendering of a [`ThematicSummary`].

use crate::models::ThematicSummary;
use crate::utils::{glyph_bar, truncate_chars};

/// Keyword lines shown in the text report
pub const TEXT_KEYWORD_LINES: usize = 10;

/// Characters of a title shown on the leaderboard
pub const LEADERBOARD_TITLE_CHARS: usize = 40;

/// Keyword counts per bar glyph
const KEYWORD_BAR_SCALE: usize = 5;

/// Render the summary as the fixed-layout text report
pub fn render_text(summary: &ThematicSummary) -> String {
    let rule = "=".repeat(60);
    let divider = "-".repeat(40);
    let mut lines: Vec<String> = Vec::new();

    lines.push(rule.clone());
    lines.push("KNOWLEDGE GRAPH - Literature Overview".to_string());
    lines.push(rule.clone());
    lines.push(String::new());

    lines.push("KEY THEMES:".to_string());
    lines.push(divider.clone());
    for (i, keyword) in summary.keywords.iter().take(TEXT_KEYWORD_LINES).enumerate() {
        let bar = glyph_bar(keyword.count / KEYWORD_BAR_SCALE);
        lines.push(format!(
            "{:2}. {:<20} {} ({})",
            i + 1,
            keyword.word,
            bar,
            keyword.count
        ));
    }
    lines.push(String::new());

    lines.push("PUBLICATION TIMELINE:".to_string());
    lines.push(divider.clone());
    for (year, count) in &summary.timeline {
        lines.push(format!("{}: {} ({})", year, glyph_bar(*count), count));
    }
    lines.push(String::new());

    lines.push("TOP CITED PAPERS:".to_string());
    lines.push(divider);
    for (i, entry) in summary.leaderboard.iter().enumerate() {
        let title = entry.title.as_deref().unwrap_or("Unknown");
        lines.push(format!(
            "{}. {}... ({} citations)",
            i + 1,
            truncate_chars(title, LEADERBOARD_TITLE_CHARS),
            entry.citation_count
        ));
    }

    lines.push(String::new());
    lines.push(rule);

    lines.join("\n")
}
