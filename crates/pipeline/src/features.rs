//! Feature composition for the content model.
//!
//! Each movie's metadata columns are glued into one document string; the
//! vectorizer then treats that string as the movie's text.

use data_loader::{Catalog, MetadataField, MovieRecord};
use rayon::prelude::*;
use tracing::debug;

/// Columns composed into a movie's document, in order
pub const DEFAULT_FIELDS: [MetadataField; 5] = [
    MetadataField::Genres,
    MetadataField::Keywords,
    MetadataField::Tagline,
    MetadataField::Cast,
    MetadataField::Director,
];

/// Separator placed between two field values
const FIELD_SEPARATOR: &str = " ";

/// Composed documents, one per catalog record and in catalog order.
///
/// `documents[i]` always belongs to the movie with index `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentCorpus {
    documents: Vec<String>,
}

impl DocumentCorpus {
    /// Wrap already-composed documents
    pub fn from_documents(documents: Vec<String>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document for a movie index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(String::as_str)
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }
}

/// Builds document strings from movie records.
///
/// ## Rules
/// - fields are joined in the configured order with a single space
/// - a missing field contributes an empty string (its separators stay)
/// - no trimming, case folding or deduplication
#[derive(Debug, Clone)]
pub struct FeatureComposer {
    fields: Vec<MetadataField>,
}

impl FeatureComposer {
    /// Create a composer using genres, keywords, tagline, cast, director.
    pub fn new() -> Self {
        Self {
            fields: DEFAULT_FIELDS.to_vec(),
        }
    }

    /// Replace the composed fields (builder pattern).
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = MetadataField>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    pub fn fields(&self) -> &[MetadataField] {
        &self.fields
    }

    /// Compose the document for a single record.
    pub fn compose(&self, record: &MovieRecord) -> String {
        self.fields
            .iter()
            .map(|&field| record.field(field).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR)
    }

    /// Compose every record of the catalog in parallel.
    ///
    /// # Returns
    /// A DocumentCorpus with one document per record, in the same order
    pub fn compose_catalog(&self, catalog: &Catalog) -> DocumentCorpus {
        let documents: Vec<String> = catalog
            .records()
            .par_iter()
            .map(|record| self.compose(record))
            .collect();

        debug!(
            "Composed {} documents from fields {:?}",
            documents.len(),
            self.fields
        );

        DocumentCorpus { documents }
    }
}

impl Default for FeatureComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avatar() -> MovieRecord {
        MovieRecord::new(0, "Avatar")
            .with_field(MetadataField::Genres, "Action Adventure")
            .with_field(MetadataField::Keywords, "culture clash")
            .with_field(MetadataField::Tagline, "Enter the World of Pandora.")
            .with_field(MetadataField::Cast, "Sam Worthington")
            .with_field(MetadataField::Director, "James Cameron")
    }

    #[test]
    fn test_compose_uses_fixed_field_order() {
        let composer = FeatureComposer::new();

        assert_eq!(
            composer.compose(&avatar()),
            "Action Adventure culture clash Enter the World of Pandora. Sam Worthington James Cameron"
        );
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        let record = MovieRecord::new(3, "Unknown")
            .with_field(MetadataField::Keywords, "heist")
            .with_field(MetadataField::Director, "Nobody");

        // genres, tagline and cast are absent: their slots stay, separators included
        assert_eq!(FeatureComposer::new().compose(&record), " heist   Nobody");
    }

    #[test]
    fn test_all_fields_missing() {
        let record = MovieRecord::new(0, "Blank");
        assert_eq!(FeatureComposer::new().compose(&record), "    ");
    }

    #[test]
    fn test_no_trimming_or_case_folding() {
        let record = MovieRecord::new(0, "Padded")
            .with_field(MetadataField::Genres, " Drama  DRAMA ");

        let composed = FeatureComposer::new()
            .with_fields([MetadataField::Genres])
            .compose(&record);

        assert_eq!(composed, " Drama  DRAMA ");
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = FeatureComposer::new();
        let record = avatar();
        assert_eq!(composer.compose(&record), composer.compose(&record));
    }

    #[test]
    fn test_compose_catalog_preserves_order() {
        let catalog = Catalog::from_records(vec![
            avatar(),
            MovieRecord::new(1, "Titanic").with_field(MetadataField::Genres, "Drama Romance"),
        ])
        .unwrap();

        let corpus = FeatureComposer::new().compose_catalog(&catalog);

        assert_eq!(corpus.len(), catalog.len());
        assert!(corpus.get(0).unwrap().starts_with("Action Adventure"));
        assert_eq!(corpus.get(1), Some("Drama Romance    "));
    }
}
