//! Title Resolver - fuzzy lookup of a user's query in the catalog
//!
//! Users type titles from memory ("avatr", "the dark night"). The resolver
//! scores the query against every distinct catalog title and keeps the close
//! ones.
//!
//! ## Algorithm
//! 1. Build a SequenceMatcher around the query once
//! 2. For every distinct title (lowest index wins for duplicates), compute
//!    the Ratcliff/Obershelp ratio, skipping titles whose cheap upper bounds
//!    already fall below the cutoff
//! 3. Keep ratios >= cutoff
//! 4. Sort by ratio (desc), then catalog index (asc)
//! 5. Return at most `max_candidates`

use crate::error::{ResolveError, Result};
use crate::sequence::SequenceMatcher;
use data_loader::{Catalog, MovieIndex};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Minimum similarity ratio for a title to count as a match
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// How many close matches are kept
pub const DEFAULT_MAX_CANDIDATES: usize = 3;

/// A catalog title that approximately matches the query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatch {
    /// Lowest catalog index carrying this title
    pub index: MovieIndex,
    pub title: String,
    /// Similarity ratio in [cutoff, 1]
    pub ratio: f64,
}

/// Resolves free-text queries to catalog titles
#[derive(Debug, Clone)]
pub struct TitleResolver {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Minimum ratio to keep a title
    cutoff: f64,

    /// Maximum number of close matches returned
    max_candidates: usize,
}

impl TitleResolver {
    /// Create a resolver over the catalog's titles
    ///
    /// Uses a cutoff of 0.6 and keeps up to 3 matches.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cutoff: DEFAULT_CUTOFF,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Configure the similarity cutoff (default: 0.6)
    ///
    /// Fails unless `0.0 <= cutoff <= 1.0`.
    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(ResolveError::InvalidConfig(format!(
                "cutoff must be in [0.0, 1.0], got {}",
                cutoff
            )));
        }
        self.cutoff = cutoff;
        Ok(self)
    }

    /// Configure how many matches are kept (default: 3)
    ///
    /// Fails when `max_candidates` is zero.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Result<Self> {
        if max_candidates == 0 {
            return Err(ResolveError::InvalidConfig(
                "max_candidates must be greater than 0".to_string(),
            ));
        }
        self.max_candidates = max_candidates;
        Ok(self)
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// All close matches for the query, best first. May be empty.
    #[instrument(skip(self), fields(cutoff = self.cutoff))]
    pub fn candidates(&self, query: &str) -> Vec<TitleMatch> {
        let matcher = SequenceMatcher::new(query);

        let mut matches: Vec<TitleMatch> = self
            .catalog
            .records()
            .par_iter()
            // one entry per title: the record the exact lookup would return
            .filter(|record| {
                self.catalog.indices_with_title(&record.title).first() == Some(&record.index)
            })
            .filter_map(|record| {
                matcher
                    .ratio_at_least(&record.title, self.cutoff)
                    .map(|ratio| TitleMatch {
                        index: record.index,
                        title: record.title.clone(),
                        ratio,
                    })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.ratio
                .partial_cmp(&a.ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });
        matches.truncate(self.max_candidates);

        debug!("Found {} close matches for {:?}", matches.len(), query);
        matches
    }

    /// The single best match for the query.
    ///
    /// # Returns
    /// * `Ok(TitleMatch)` - the top candidate
    /// * `Err(ResolveError::TitleNotFound)` - nothing reaches the cutoff
    pub fn resolve(&self, query: &str) -> Result<TitleMatch> {
        self.candidates(query)
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::TitleNotFound {
                query: query.to_string(),
                cutoff: self.cutoff,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MovieRecord;

    fn create_test_catalog(titles: &[&str]) -> Arc<Catalog> {
        let records = titles
            .iter()
            .enumerate()
            .map(|(i, title)| MovieRecord::new(i, *title))
            .collect();
        Arc::new(Catalog::from_records(records).unwrap())
    }

    #[test]
    fn test_exact_title_is_top_candidate() {
        let resolver = TitleResolver::new(create_test_catalog(&["Avatar", "Avatar 2", "Titanic"]));

        let found = resolver.resolve("Titanic").unwrap();
        assert_eq!(found.title, "Titanic");
        assert_eq!(found.index, 2);
        assert_eq!(found.ratio, 1.0);
    }

    #[test]
    fn test_typo_resolves_to_closest_title() {
        let resolver = TitleResolver::new(create_test_catalog(&["Titanic", "Avatar 2", "Avatar"]));

        let candidates = resolver.candidates("avatr");
        let titles: Vec<&str> = candidates.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Avatar", "Avatar 2"]);
        assert!(candidates[0].ratio > candidates[1].ratio);
    }

    #[test]
    fn test_unrelated_query_is_not_found() {
        let resolver = TitleResolver::new(create_test_catalog(&["Avatar", "Titanic"]));

        let err = resolver.resolve("qqqqzzzz xkcd").unwrap_err();
        assert_eq!(
            err,
            ResolveError::TitleNotFound {
                query: "qqqqzzzz xkcd".to_string(),
                cutoff: DEFAULT_CUTOFF,
            }
        );
        assert!(resolver.candidates("qqqqzzzz xkcd").is_empty());
    }

    #[test]
    fn test_empty_query_is_not_found() {
        let resolver = TitleResolver::new(create_test_catalog(&["Avatar"]));
        assert!(matches!(
            resolver.resolve(""),
            Err(ResolveError::TitleNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let resolver = TitleResolver::new(create_test_catalog(&[]));
        assert!(resolver.resolve("Avatar").is_err());
    }

    #[test]
    fn test_duplicate_titles_listed_once_with_lowest_index() {
        let resolver = TitleResolver::new(create_test_catalog(&["Hamlet", "Macbeth", "Hamlet"]));

        let candidates = resolver.candidates("Hamlet");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].index, 0);
    }

    #[test]
    fn test_ties_are_broken_by_index() {
        // "Bat" and "Cat" both score 2 * 2 / 6 against "Hat"
        let resolver = TitleResolver::new(create_test_catalog(&["Cat", "Dog", "Bat"]));

        let candidates = resolver.candidates("Hat");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].ratio, candidates[1].ratio);
        assert_eq!(candidates[0].title, "Cat");
        assert_eq!(candidates[1].title, "Bat");
    }

    #[test]
    fn test_max_candidates_truncates() {
        let resolver = TitleResolver::new(create_test_catalog(&[
            "Alien", "Aliens", "Alien 3", "Alien Nation", "Alienated",
        ]))
        .with_max_candidates(2)
        .unwrap();

        assert_eq!(resolver.candidates("Alien").len(), 2);
        assert_eq!(resolver.candidates("Alien")[0].title, "Alien");
    }

    #[test]
    fn test_cutoff_controls_matches() {
        let catalog = create_test_catalog(&["Avatar 2"]);

        let strict = TitleResolver::new(catalog.clone()).with_cutoff(0.7).unwrap();
        assert!(strict.resolve("avatr").is_err());

        let loose = TitleResolver::new(catalog).with_cutoff(0.5).unwrap();
        assert_eq!(loose.resolve("avatr").unwrap().title, "Avatar 2");
    }

    #[test]
    fn test_invalid_configuration() {
        let catalog = create_test_catalog(&["Avatar"]);

        assert!(TitleResolver::new(catalog.clone()).with_cutoff(1.5).is_err());
        assert!(TitleResolver::new(catalog.clone()).with_cutoff(-0.1).is_err());
        assert!(matches!(
            TitleResolver::new(catalog).with_max_candidates(0),
            Err(ResolveError::InvalidConfig(_))
        ));
    }
}
