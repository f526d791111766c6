//! Core traits for the text pipeline.
//!
//! This module defines the Tokenizer trait that splits composed documents
//! into the terms the vectorizer counts.

/// Splits a document into terms.
///
/// Any type implementing this trait can be plugged into the TfidfVectorizer.
/// The same tokenizer instance is applied to every document of a corpus, so
/// implementations must be deterministic.
///
/// ## Design Note
/// - `Send + Sync` lets the vectorizer tokenize documents on rayon workers
/// - Returned terms are owned; the vectorizer keys its vocabulary by them
pub trait Tokenizer: Send + Sync {
    /// Returns the name of this tokenizer (for logging/debugging)
    fn name(&self) -> &str;

    /// Split one document into terms, in document order.
    ///
    /// Repeated terms are returned repeatedly; term frequency is computed
    /// from this list.
    fn tokenize(&self, document: &str) -> Vec<String>;
}
