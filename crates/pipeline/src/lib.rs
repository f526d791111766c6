//! Build-phase pipeline: from movie metadata to a similarity matrix.
//!
//! This crate provides:
//! - FeatureComposer for turning a MovieRecord into one document string
//! - Tokenizer trait and the default WordTokenizer
//! - TfidfVectorizer producing a TermVectorSpace
//! - SimilarityMatrix holding pairwise cosine similarities
//!
//! ## Architecture
//! The pipeline runs once per catalog:
//! 1. FeatureComposer concatenates genres, keywords, tagline, cast, director
//! 2. TfidfVectorizer tokenizes and weights every document
//! 3. SimilarityMatrix compares every document with every other one
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer};
//!
//! let corpus = FeatureComposer::new().compose_catalog(&catalog);
//! let space = TfidfVectorizer::new().fit_transform(&corpus);
//! let matrix = SimilarityMatrix::compute(&space);
//!
//! let avatar_row = matrix.row(0).unwrap();
//! ```

pub mod traits;
pub mod tokenizer;
pub mod features;
pub mod vectorizer;
pub mod similarity;

// Re-export main types
pub use traits::Tokenizer;
pub use tokenizer::WordTokenizer;
pub use features::{DocumentCorpus, FeatureComposer, DEFAULT_FIELDS};
pub use vectorizer::{SparseVector, TermVectorSpace, TfidfVectorizer};
pub use similarity::SimilarityMatrix;
