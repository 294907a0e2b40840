//! Masks forbidden words before a message is persisted.
//!
//! Matching is case-insensitive and whole-word (Unicode word boundaries), so
//! "Tonto," is masked but "tontería" is not. Every match is replaced by the
//! same placeholder. The placeholder may not contain word characters, which
//! keeps `filter(filter(x)) == filter(x)`.

use std::collections::BTreeSet;

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

pub const DEFAULT_FORBIDDEN_WORDS: [&str; 4] = ["tonto", "idiota", "estupido", "burro"];
pub const DEFAULT_MASK: &str = "***";

#[derive(Error, Debug)]
pub enum CensorshipError {
    #[error("mask must be non-empty and contain no letters, digits or '_': {0:?}")]
    InvalidMask(String),
    #[error("failed to build forbidden word pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Wordlist and placeholder for [`CensorshipFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensorshipConfig {
    pub forbidden_words: Vec<String>,
    pub mask: String,
}

impl Default for CensorshipConfig {
    fn default() -> Self {
        Self {
            forbidden_words: DEFAULT_FORBIDDEN_WORDS.iter().map(|w| w.to_string()).collect(),
            mask: DEFAULT_MASK.to_string(),
        }
    }
}

/// Result of filtering one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    /// Text with every forbidden word masked.
    pub content: String,
    /// Length of the input in characters.
    pub original_length: usize,
    /// Forbidden words that were found, lowercased, sorted, without repeats.
    pub flagged: Vec<String>,
}

/// Pure text transformer; construct once and share.
#[derive(Debug, Clone)]
pub struct CensorshipFilter {
    pattern: Option<Regex>,
    mask: String,
}

impl CensorshipFilter {
    pub fn new(config: &CensorshipConfig) -> Result<Self, CensorshipError> {
        let mask = config.mask.clone();
        if mask.is_empty() || mask.chars().any(|c| c.is_alphanumeric() || c == '_') {
            return Err(CensorshipError::InvalidMask(mask));
        }

        let mut terms: Vec<String> = config
            .forbidden_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if terms.is_empty() {
            return Ok(Self { pattern: None, mask });
        }

        // Longest first so that a term that prefixes another never wins the alternation.
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
            mask,
        })
    }

    pub fn filter(&self, text: &str) -> String {
        self.inspect(text).content
    }

    pub fn inspect(&self, text: &str) -> FilterReport {
        let original_length = text.chars().count();

        let Some(pattern) = &self.pattern else {
            return FilterReport {
                content: text.to_string(),
                original_length,
                flagged: Vec::new(),
            };
        };

        let mut flagged = BTreeSet::new();
        let content = pattern
            .replace_all(text, |caps: &Captures| {
                flagged.insert(caps[0].to_lowercase());
                self.mask.clone()
            })
            .into_owned();

        FilterReport {
            content,
            original_length,
            flagged: flagged.into_iter().collect(),
        }
    }
}
