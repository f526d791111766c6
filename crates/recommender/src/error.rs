//! Errors surfaced to callers of the recommender.

use data_loader::MovieIndex;
use resolver::ResolveError;
use thiserror::Error;

/// Errors that can occur when answering a recommendation query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// The query did not approximately match any catalog title
    #[error("No movie title matches '{query}' (cutoff {cutoff})")]
    TitleNotFound { query: String, cutoff: f64 },

    /// Exact title lookup failed
    #[error("Movie '{title}' is not in the catalog")]
    UnknownTitle { title: String },

    #[error("Movie index {index} is out of range (catalog has {size} movies)")]
    IndexOutOfRange { index: MovieIndex, size: usize },

    /// Catalog and similarity matrix were built from different data
    #[error("Similarity matrix is {matrix}x{matrix} but the catalog has {catalog} movies")]
    DimensionMismatch { catalog: usize, matrix: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ResolveError> for RecommendError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::TitleNotFound { query, cutoff } => {
                RecommendError::TitleNotFound { query, cutoff }
            }
            ResolveError::InvalidConfig(reason) => RecommendError::InvalidConfig(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
