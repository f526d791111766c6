//! Core domain types for the movie catalog.
//!
//! A catalog is an ordered list of [`MovieRecord`]s. The position of a record
//! in that list is its [`MovieIndex`], and that index (not the title, which is
//! not unique) is the key every later stage uses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog (0..N-1, assigned by load order)
pub type MovieIndex = usize;

// =============================================================================
// Movie-related Types
// =============================================================================

/// One row of the movie dataset.
///
/// Only the columns the recommender reads are kept. The free-text metadata
/// columns are frequently blank in the source data, so each of them is an
/// `Option<String>`: `None` means the cell was empty or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub index: MovieIndex,
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl MovieRecord {
    /// Create a record with only an index and a title; all metadata is absent
    pub fn new(index: MovieIndex, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            genres: None,
            keywords: None,
            tagline: None,
            cast: None,
            director: None,
        }
    }

    /// Builder-style setter used mostly by tests and fixtures
    pub fn with_field(mut self, field: MetadataField, value: impl Into<String>) -> Self {
        let slot = match field {
            MetadataField::Genres => &mut self.genres,
            MetadataField::Keywords => &mut self.keywords,
            MetadataField::Tagline => &mut self.tagline,
            MetadataField::Cast => &mut self.cast,
            MetadataField::Director => &mut self.director,
        };
        *slot = Some(value.into());
        self
    }

    /// Read one metadata field by name
    ///
    /// Returns `None` when the field was blank in the source row.
    pub fn field(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Genres => self.genres.as_deref(),
            MetadataField::Keywords => self.keywords.as_deref(),
            MetadataField::Tagline => self.tagline.as_deref(),
            MetadataField::Cast => self.cast.as_deref(),
            MetadataField::Director => self.director.as_deref(),
        }
    }
}

/// The free-text metadata columns that can feed the similarity model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataField {
    Genres,
    Keywords,
    Tagline,
    Cast,
    Director,
}

impl MetadataField {
    /// Column name in the source CSV
    pub fn column_name(self) -> &'static str {
        match self {
            MetadataField::Genres => "genres",
            MetadataField::Keywords => "keywords",
            MetadataField::Tagline => "tagline",
            MetadataField::Cast => "cast",
            MetadataField::Director => "director",
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Movie Table
// =============================================================================

/// Ordered, immutable collection of movies.
///
/// Built once at startup (see `Catalog::from_records` and the loaders in
/// `index.rs`) and shared read-only afterwards, usually behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Records in load order; `records[i].index == i`
    pub(crate) records: Vec<MovieRecord>,
    /// Every index carrying a given title, ascending
    pub(crate) title_index: HashMap<String, Vec<MovieIndex>>,
}

impl Catalog {
    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a movie by its index
    pub fn get(&self, index: MovieIndex) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    /// All records, in index order
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Iterate over the records in index order
    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.records.iter()
    }

    /// Iterate over the titles in index order (duplicates included)
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.title.as_str())
    }

    /// Exact, case-sensitive title lookup.
    ///
    /// When several movies share the title the one with the lowest index wins.
    pub fn find_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.title_index
            .get(title)
            .and_then(|indices| indices.first())
            .and_then(|&index| self.records.get(index))
    }

    /// Every index whose record has exactly this title
    pub fn indices_with_title(&self, title: &str) -> &[MovieIndex] {
        self.title_index
            .get(title)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct titles
    pub fn distinct_titles(&self) -> usize {
        self.title_index.len()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
