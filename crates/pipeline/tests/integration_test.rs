//! Integration tests for the pipeline.
//!
//! These tests verify that composition, vectorization and similarity work
//! together on a small catalog.

use data_loader::{Catalog, MetadataField, MovieRecord};
use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer, Tokenizer};

fn create_test_catalog() -> Catalog {
    let records = vec![
        MovieRecord::new(0, "Avatar")
            .with_field(MetadataField::Genres, "Action Adventure Fantasy")
            .with_field(MetadataField::Keywords, "alien marine")
            .with_field(MetadataField::Director, "James Cameron"),
        MovieRecord::new(1, "Aliens")
            .with_field(MetadataField::Genres, "Action Horror")
            .with_field(MetadataField::Keywords, "alien marine")
            .with_field(MetadataField::Director, "James Cameron"),
        MovieRecord::new(2, "Amélie")
            .with_field(MetadataField::Genres, "Comedy Romance")
            .with_field(MetadataField::Tagline, "She'll change your life.")
            .with_field(MetadataField::Director, "Jean-Pierre Jeunet"),
        MovieRecord::new(3, "Lost Reel"),
    ];
    Catalog::from_records(records).unwrap()
}

/// Splits on whitespace only and keeps case
struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "WhitespaceTokenizer"
    }

    fn tokenize(&self, document: &str) -> Vec<String> {
        document.split_whitespace().map(str::to_string).collect()
    }
}

#[test]
fn test_full_pipeline() {
    let catalog = create_test_catalog();

    let corpus = FeatureComposer::new().compose_catalog(&catalog);
    assert_eq!(corpus.len(), 4);
    assert_eq!(corpus.get(3), Some("    "));

    let space = TfidfVectorizer::new().fit_transform(&corpus);
    assert_eq!(space.len(), 4);
    assert!(space.vector(3).unwrap().is_zero());

    // Vocabulary is sorted and lower-cased
    let terms: Vec<&str> = (0..space.vocabulary_size())
        .filter_map(|id| space.term(id))
        .collect();
    let mut sorted = terms.clone();
    sorted.sort();
    assert_eq!(terms, sorted);
    assert!(space.term_id("cameron").is_some());
    assert!(space.term_id("Cameron").is_none());

    // "alien" appears in 2 of 4 documents, "horror" in 1
    let alien = space.idf(space.term_id("alien").unwrap()).unwrap();
    let horror = space.idf(space.term_id("horror").unwrap()).unwrap();
    assert!((alien - ((5.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
    assert!((horror - ((5.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);

    let matrix = SimilarityMatrix::compute(&space);
    assert_eq!(matrix.size(), 4);

    let avatar_aliens = matrix.get(0, 1).unwrap();
    let avatar_amelie = matrix.get(0, 2).unwrap();
    assert!(avatar_aliens > avatar_amelie);
    assert_eq!(avatar_amelie, 0.0);
    assert_eq!(matrix.get(3, 0), Some(0.0));
}

#[test]
fn test_batch_matrix_agrees_with_pairwise() {
    let catalog = create_test_catalog();
    let corpus = FeatureComposer::new().compose_catalog(&catalog);
    let space = TfidfVectorizer::new().fit_transform(&corpus);

    let batch = SimilarityMatrix::compute(&space);
    let pairwise = SimilarityMatrix::compute_pairwise(&space);

    for i in 0..batch.size() {
        for j in 0..batch.size() {
            let diff = (batch.get(i, j).unwrap() - pairwise.get(i, j).unwrap()).abs();
            assert!(diff < 1e-6, "({i}, {j}) differs by {diff}");
        }
    }
}

#[test]
fn test_custom_fields_change_similarity() {
    let catalog = create_test_catalog();

    let corpus = FeatureComposer::new()
        .with_fields([MetadataField::Director])
        .compose_catalog(&catalog);
    let space = TfidfVectorizer::new().fit_transform(&corpus);
    let matrix = SimilarityMatrix::compute(&space);

    // Same director, nothing else considered
    assert_eq!(matrix.get(0, 1), Some(1.0));
}

#[test]
fn test_custom_tokenizer() {
    let catalog = create_test_catalog();
    let corpus = FeatureComposer::new().compose_catalog(&catalog);

    let space = TfidfVectorizer::new()
        .with_tokenizer(WhitespaceTokenizer)
        .fit_transform(&corpus);

    assert!(space.term_id("Cameron").is_some());
    assert!(space.term_id("Jean-Pierre").is_some());
    assert!(space.term_id("cameron").is_none());
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::default();

    let corpus = FeatureComposer::new().compose_catalog(&catalog);
    let space = TfidfVectorizer::new().fit_transform(&corpus);
    let matrix = SimilarityMatrix::compute(&space);

    assert!(corpus.is_empty());
    assert_eq!(space.vocabulary_size(), 0);
    assert!(matrix.is_empty());
}
