//! Benchmarks for the build phase
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses data/movies.csv when present, otherwise a synthetic catalog of the
//! same order of magnitude.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, MetadataField, MovieRecord};
use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer};
use std::path::Path;

const GENRES: [&str; 8] = [
    "Action", "Adventure", "Drama", "Romance", "Comedy", "Thriller", "Horror", "Animation",
];

fn synthetic_catalog(size: usize) -> Catalog {
    let records = (0..size)
        .map(|i| {
            MovieRecord::new(i, format!("Movie {}", i))
                .with_field(
                    MetadataField::Genres,
                    format!("{} {}", GENRES[i % GENRES.len()], GENRES[(i / 3) % GENRES.len()]),
                )
                .with_field(MetadataField::Keywords, format!("keyword{} keyword{}", i % 97, i % 41))
                .with_field(MetadataField::Cast, format!("Actor{} Actor{}", i % 211, i % 53))
                .with_field(MetadataField::Director, format!("Director{}", i % 131))
        })
        .collect();
    Catalog::from_records(records).expect("Failed to build synthetic catalog")
}

fn load_test_data() -> Catalog {
    let path = Path::new("../../data/movies.csv");
    if path.exists() {
        Catalog::load_from_file(path).expect("Failed to load test data")
    } else {
        synthetic_catalog(2000)
    }
}

fn bench_compose(c: &mut Criterion) {
    let catalog = load_test_data();
    let composer = FeatureComposer::new();

    c.bench_function("compose_catalog", |b| {
        b.iter(|| black_box(composer.compose_catalog(black_box(&catalog))))
    });
}

fn bench_vectorize(c: &mut Criterion) {
    let catalog = load_test_data();
    let corpus = FeatureComposer::new().compose_catalog(&catalog);
    let vectorizer = TfidfVectorizer::new();

    c.bench_function("tfidf_fit_transform", |b| {
        b.iter(|| black_box(vectorizer.fit_transform(black_box(&corpus))))
    });
}

fn bench_similarity(c: &mut Criterion) {
    let catalog = load_test_data();
    let corpus = FeatureComposer::new().compose_catalog(&catalog);
    let space = TfidfVectorizer::new().fit_transform(&corpus);

    let mut group = c.benchmark_group("similarity");
    group.sample_size(10);
    group.bench_function("similarity_matrix", |b| {
        b.iter(|| black_box(SimilarityMatrix::compute(black_box(&space))))
    });
    group.finish();
}

criterion_group!(benches, bench_compose, bench_vectorize, bench_similarity);
criterion_main!(benches);
