//! Recommender crate for the movie recommendation engine.
//!
//! This crate contains the `Recommender`, which builds the similarity matrix
//! for a catalog once and then answers "movies like X" queries against it.

pub mod error;
pub mod recommender;

pub use error::{RecommendError, Result};
pub use recommender::{
    BuildSummary, MovieRecommendation, Recommendations, Recommender, DEFAULT_LIMIT,
};
