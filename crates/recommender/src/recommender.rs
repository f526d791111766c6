//! # Content-based Recommender
//!
//! This module coordinates the two phases of the system.
//!
//! Build phase (once per catalog):
//! 1. Compose one document per movie
//! 2. Vectorize the corpus with TF-IDF
//! 3. Compute the pairwise cosine similarity matrix
//!
//! Query phase (per request, read-only):
//! 1. Resolve the free-text query to a catalog title
//! 2. Look the title up exactly (lowest index on duplicates)
//! 3. Rank every other movie by its similarity to it
//! 4. Return the top N
//!
//! Everything built in the first phase sits behind `Arc`s, so a `Recommender`
//! can be cloned into as many threads as needed without locking.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{RecommendError, Result};
use data_loader::{Catalog, MovieIndex};
use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer};
use resolver::{TitleMatch, TitleResolver};

/// Number of suggestions returned when the caller does not ask for a count
pub const DEFAULT_LIMIT: usize = 29;

/// One suggested movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub index: MovieIndex,
    pub title: String,
    /// Cosine similarity to the queried movie, in [0, 1]
    pub score: f32,
}

/// Full answer to a free-text query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub query: String,
    /// Title the query resolved to
    pub matched: TitleMatch,
    /// Other close matches, best first (excluding `matched`)
    pub alternatives: Vec<TitleMatch>,
    pub items: Vec<MovieRecommendation>,
}

/// Sizes of the structures built for a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub movies: usize,
    /// Unknown when the matrix was built elsewhere and handed in
    pub vocabulary_size: Option<usize>,
    pub matrix_size: usize,
}

/// Answers "movies like X" queries against a precomputed similarity matrix
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    matrix: Arc<SimilarityMatrix>,
    resolver: TitleResolver,
    summary: BuildSummary,
}

impl Recommender {
    /// Run the build phase with the default composer and vectorizer
    pub fn build(catalog: Arc<Catalog>) -> Result<Self> {
        Self::build_with(catalog, &FeatureComposer::new(), &TfidfVectorizer::new())
    }

    /// Run the build phase with a custom composer and vectorizer
    pub fn build_with(
        catalog: Arc<Catalog>,
        composer: &FeatureComposer,
        vectorizer: &TfidfVectorizer,
    ) -> Result<Self> {
        let start_time = Instant::now();

        let corpus = composer.compose_catalog(&catalog);
        info!("Composed {} documents", corpus.len());

        let space = vectorizer.fit_transform(&corpus);
        info!(
            "Vectorized corpus: {} vectors, {} terms",
            space.len(),
            space.vocabulary_size()
        );

        let matrix = SimilarityMatrix::compute(&space);

        let mut recommender = Self::from_parts(catalog, Arc::new(matrix))?;
        recommender.summary.vocabulary_size = Some(space.vocabulary_size());

        info!(
            "Built recommender for {} movies in {:.2?}",
            recommender.summary.movies,
            start_time.elapsed()
        );
        Ok(recommender)
    }

    /// Assemble a recommender from a catalog and a matrix computed for it
    pub fn from_parts(catalog: Arc<Catalog>, matrix: Arc<SimilarityMatrix>) -> Result<Self> {
        if catalog.len() != matrix.size() {
            return Err(RecommendError::DimensionMismatch {
                catalog: catalog.len(),
                matrix: matrix.size(),
            });
        }

        let summary = BuildSummary {
            movies: catalog.len(),
            vocabulary_size: None,
            matrix_size: matrix.size(),
        };
        let resolver = TitleResolver::new(catalog.clone());

        Ok(Self {
            catalog,
            matrix,
            resolver,
            summary,
        })
    }

    /// Configure the title matching cutoff (default: 0.6)
    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self> {
        self.resolver = self.resolver.with_cutoff(cutoff)?;
        Ok(self)
    }

    /// Configure how many close title matches are considered (default: 3)
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Result<Self> {
        self.resolver = self.resolver.with_max_candidates(max_candidates)?;
        Ok(self)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn matrix(&self) -> &Arc<SimilarityMatrix> {
        &self.matrix
    }

    pub fn resolver(&self) -> &TitleResolver {
        &self.resolver
    }

    pub fn summary(&self) -> BuildSummary {
        self.summary
    }

    /// Close title matches for a query, best first (possibly empty)
    pub fn search(&self, query: &str) -> Vec<TitleMatch> {
        self.resolver.candidates(query)
    }

    /// Best title match for a query, or `TitleNotFound`
    pub fn resolve(&self, query: &str) -> Result<TitleMatch> {
        Ok(self.resolver.resolve(query)?)
    }

    /// Main entry point: movies similar to whatever the user typed
    ///
    /// # Arguments
    /// * `query` - Free-text movie name, typos allowed
    /// * `limit` - Number of recommendations to return (e.g., 29)
    ///
    /// # Returns
    /// The matched title, the other close matches and the recommendations,
    /// or `RecommendError::TitleNotFound` if nothing matches the query
    pub fn recommend(&self, query: &str, limit: usize) -> Result<Recommendations> {
        let start_time = Instant::now();

        let mut candidates = self.resolver.candidates(query).into_iter();
        let matched = candidates.next().ok_or_else(|| RecommendError::TitleNotFound {
            query: query.to_string(),
            cutoff: self.resolver.cutoff(),
        })?;
        let alternatives: Vec<TitleMatch> = candidates.collect();
        info!(
            "Resolved {:?} to {:?} (ratio {:.3}, {} alternatives)",
            query,
            matched.title,
            matched.ratio,
            alternatives.len()
        );

        let items = self.recommend_for_title(&matched.title, limit)?;

        info!(
            "Total time to get {} recommendations for {:?}: {:.2?}",
            items.len(),
            matched.title,
            start_time.elapsed()
        );

        Ok(Recommendations {
            query: query.to_string(),
            matched,
            alternatives,
            items,
        })
    }

    /// Recommendations for an exact, case-sensitive catalog title
    ///
    /// If several movies share the title, the one with the lowest index is
    /// used.
    pub fn recommend_for_title(&self, title: &str, limit: usize) -> Result<Vec<MovieRecommendation>> {
        let indices = self.catalog.indices_with_title(title);
        let index = *indices.first().ok_or_else(|| RecommendError::UnknownTitle {
            title: title.to_string(),
        })?;

        if indices.len() > 1 {
            debug!(
                "Title {:?} is shared by movies {:?}; using index {}",
                title, indices, index
            );
        }

        self.rank_similar(index, limit)
    }

    /// Rank every other movie by similarity to movie `index` and keep the top `limit`
    ///
    /// ## Ordering
    /// - score descending
    /// - ties: lower catalog index first
    /// - the movie itself is never part of the result
    #[instrument(skip(self))]
    pub fn rank_similar(&self, index: MovieIndex, limit: usize) -> Result<Vec<MovieRecommendation>> {
        let row = self
            .matrix
            .row(index)
            .ok_or(RecommendError::IndexOutOfRange {
                index,
                size: self.matrix.size(),
            })?;

        // Pair every other movie with its score
        let mut scored: Vec<(MovieIndex, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .collect();

        // Sort by score DESC, then index ASC
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        // Take top N
        scored.truncate(limit);

        let recommendations: Vec<MovieRecommendation> = scored
            .into_iter()
            .filter_map(|(other, score)| {
                let movie = self.catalog.get(other)?;
                Some((other, movie.title.clone(), score))
            })
            .enumerate()
            .map(|(position, (other, title, score))| MovieRecommendation {
                rank: position + 1,
                index: other,
                title,
                score,
            })
            .collect();

        debug!("Ranked {} movies similar to #{}", recommendations.len(), index);
        Ok(recommendations)
    }
}
