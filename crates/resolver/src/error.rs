//! Errors returned by title resolution.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// No catalog title reaches the similarity cutoff
    #[error("No movie title matches '{query}' (cutoff {cutoff})")]
    TitleNotFound { query: String, cutoff: f64 },

    /// Resolver built with an unusable setting
    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
