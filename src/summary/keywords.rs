//! Keyword extraction from titles and abstracts.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::models::{Abstract, KeywordCount, Paper};

/// Built-in stopwords: English function words plus terms that appear in
/// almost every abstract without saying anything about its topic.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    // articles, conjunctions, prepositions
    "the", "and", "but", "for", "from", "with", "into", "onto", "over", "under", "about",
    "between", "through", "within", "without", "via", "than", "then", "nor", "yet",
    // auxiliaries and modals
    "was", "are", "were", "been", "being", "have", "has", "had", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "shall", "can", "need",
    // pronouns and determiners
    "this", "that", "these", "those", "its", "they", "them", "their", "our", "you", "your",
    "she", "him", "her", "his", "all", "any", "each", "both", "some", "such", "other",
    "more", "most", "only", "very", "also", "not",
    // interrogatives
    "which", "what", "when", "where", "who", "whom", "why", "how", "there", "here",
    // domain filler
    "study", "research", "paper", "using", "based", "approach", "method",
];

/// Immutable stopword set injected into the summarizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl Stopwords {
    /// Build a stopword set; words are lowercased
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// An empty set
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Add more words, returning a new set
    pub fn extend<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// How inverted-index abstracts are fed to the tokenizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbstractPolicy {
    /// Rebuild plain text from word positions
    #[default]
    Reconstruct,
    /// Leave such abstracts out; only the title is used
    Skip,
}

fn token_pattern() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new("[a-z]{3,}").expect("token pattern is valid"))
}

/// Split text into lowercase keyword candidates
///
/// Tokens are maximal runs of ASCII letters at least three long, taken after
/// case folding. Digits, punctuation and other scripts act as separators.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Title and abstract of a paper joined into one text blob
pub fn paper_text(paper: &Paper, policy: AbstractPolicy) -> String {
    let mut text = String::new();
    if let Some(title) = &paper.title {
        text.push_str(title);
        text.push(' ');
    }
    match (&paper.r#abstract, policy) {
        (Some(Abstract::Text(body)), _) => text.push_str(body),
        (Some(index @ Abstract::InvertedIndex(_)), AbstractPolicy::Reconstruct) => {
            text.push_str(&index.to_plain_text())
        }
        (Some(Abstract::InvertedIndex(_)), AbstractPolicy::Skip) | (None, _) => {}
    }
    text
}

/// Count keywords across all papers and return the `top_n` most frequent
///
/// Ties keep the order in which the words were first seen.
pub fn extract_keywords(
    papers: &[Paper],
    stopwords: &Stopwords,
    top_n: usize,
    policy: AbstractPolicy,
) -> Vec<KeywordCount> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for paper in papers {
        for token in tokenize(&paper_text(paper, policy)) {
            if stopwords.contains(&token) {
                continue;
            }
            match slots.get(&token) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    slots.insert(token.clone(), counts.len());
                    counts.push(KeywordCount::new(token, 1));
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperBuilder, SourceType};
    use std::collections::BTreeMap;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Deep-Learning for NLP in 2020: a GPT4 study!"),
            vec!["deep", "learning", "for", "nlp", "gpt", "study"]
        );
        assert!(tokenize("a an of 42").is_empty());
    }

    #[test]
    fn test_tokenize_splits_on_non_latin() {
        assert_eq!(tokenize("Graphen über Netze"), vec!["graphen", "ber", "netze"]);
    }

    #[test]
    fn test_stopwords() {
        let stopwords = Stopwords::default();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("study"));
        assert!(stopwords.contains("all"));
        assert!(!stopwords.contains("attention"));

        let custom = Stopwords::none().extend(["Graph", " "]);
        assert_eq!(custom.len(), 1);
        assert!(custom.contains("graph"));
    }

    #[test]
    fn test_extract_keywords_frequency_and_ties() {
        let papers = vec![
            PaperBuilder::new("Attention Is All You Need", SourceType::Arxiv)
                .abstract_text("attention mechanisms improve attention based models")
                .build(),
        ];

        let keywords = extract_keywords(&papers, &Stopwords::default(), 10, AbstractPolicy::default());
        assert_eq!(keywords[0], KeywordCount::new("attention", 3));
        // single occurrences keep first-seen order
        let rest: Vec<_> = keywords[1..].iter().map(|k| k.word.as_str()).collect();
        assert_eq!(rest, vec!["mechanisms", "improve", "models"]);
    }

    #[test]
    fn test_extract_keywords_top_n() {
        let papers = vec![PaperBuilder::new("alpha beta gamma delta", SourceType::Arxiv).build()];
        let keywords = extract_keywords(&papers, &Stopwords::none(), 2, AbstractPolicy::default());
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].word, "alpha");
        assert!(extract_keywords(&papers, &Stopwords::none(), 0, AbstractPolicy::default()).is_empty());
    }

    #[test]
    fn test_inverted_index_policies() {
        let mut index = BTreeMap::new();
        index.insert("sparse".to_string(), vec![0, 2]);
        index.insert("graphs".to_string(), vec![1]);
        let papers = vec![PaperBuilder::new("Sparse Models", SourceType::OpenAlex)
            .abstract_index(index)
            .build()];

        let rebuilt = extract_keywords(&papers, &Stopwords::none(), 10, AbstractPolicy::Reconstruct);
        assert_eq!(rebuilt[0], KeywordCount::new("sparse", 3));

        let skipped = extract_keywords(&papers, &Stopwords::none(), 10, AbstractPolicy::Skip);
        assert_eq!(
            skipped,
            vec![KeywordCount::new("sparse", 1), KeywordCount::new("models", 1)]
        );
    }

    #[test]
    fn test_paper_text_skips_absent_fields() {
        let untitled = PaperBuilder::untitled(SourceType::Arxiv)
            .abstract_text("only abstract")
            .build();
        assert_eq!(paper_text(&untitled, AbstractPolicy::Reconstruct), "only abstract");

        let bare = PaperBuilder::untitled(SourceType::Arxiv).build();
        assert_eq!(paper_text(&bare, AbstractPolicy::Reconstruct), "");
    }
}
