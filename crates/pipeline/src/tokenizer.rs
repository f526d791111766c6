//! Word tokenizer used by default for TF-IDF.
//!
//! Lower-cases the text and keeps runs of word characters (alphanumerics and
//! `_`) that are at least two characters long. Everything else (spaces,
//! punctuation, hyphens) separates tokens.

use crate::traits::Tokenizer;

/// Minimum token length, in characters
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Splits on non-word characters, lower-cased.
///
/// ## Algorithm
/// 1. Lower-case the whole document
/// 2. Split on every char that is neither alphanumeric nor `_`
/// 3. Drop pieces shorter than `min_len` characters
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    min_len: usize,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self {
            min_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }

    /// Configure the minimum token length (default: 2)
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for WordTokenizer {
    fn name(&self) -> &str {
        "WordTokenizer"
    }

    fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= self.min_len)
            .map(str::to_string)
            .collect()
    }
}
