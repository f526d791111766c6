//! Pairwise cosine similarity over the TF-IDF vectors.
//!
//! ## Algorithm
//! 1. Build an inverted index: term -> [(document, weight)]
//! 2. For each row i (in parallel), walk the postings of i's terms and
//!    accumulate dot products against every other document
//! 3. Divide by the norms (0.0 when either vector is all zero)
//! 4. Mirror the upper triangle into the lower one
//!
//! Step 4 makes `m[i][j] == m[j][i]` hold bit-for-bit, whatever rounding the
//! accumulation order produced.

use crate::vectorizer::{cosine_from_dot, TermVectorSpace};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Dense N x N cosine similarity matrix, row-major.
///
/// ## Invariants
/// - symmetric
/// - every value is in [0, 1]
/// - the diagonal is 1.0 for documents with at least one term, 0.0 otherwise
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairs in one batch using the inverted index.
    pub fn compute(space: &TermVectorSpace) -> Self {
        let start = Instant::now();
        let n = space.len();
        if n == 0 {
            return Self::default();
        }

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); space.vocabulary_size()];
        for (doc, vector) in space.vectors().iter().enumerate() {
            for (term, weight) in vector.iter() {
                postings[term].push((doc, weight));
            }
        }
        let norms: Vec<f64> = space.vectors().iter().map(|v| v.norm()).collect();

        let mut values = vec![0.0f32; n * n];
        values
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| {
                let vector = &space.vectors()[i];
                if vector.is_zero() {
                    return;
                }

                let mut dots = vec![0.0f64; n];
                for (term, weight) in vector.iter() {
                    for &(j, other) in &postings[term] {
                        dots[j] += weight * other;
                    }
                }

                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = cosine_from_dot(dots[j], norms[i], norms[j]) as f32;
                }
                row[i] = 1.0;
            });

        mirror_upper_triangle(&mut values, n);

        info!(
            "Computed {}x{} similarity matrix in {:.2?}",
            n,
            n,
            start.elapsed()
        );

        Self { size: n, values }
    }

    /// Compute every pair independently with [`SparseVector::cosine`].
    ///
    /// O(N^2 * d) merges; only meant for small catalogs and cross-checks.
    ///
    /// [`SparseVector::cosine`]: crate::vectorizer::SparseVector::cosine
    pub fn compute_pairwise(space: &TermVectorSpace) -> Self {
        let n = space.len();
        let vectors = space.vectors();
        let mut values = vec![0.0f32; n * n];

        for i in 0..n {
            if vectors[i].is_zero() {
                continue;
            }
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let score = vectors[i].cosine(&vectors[j]) as f32;
                values[i * n + j] = score;
                values[j * n + i] = score;
            }
        }

        Self { size: n, values }
    }

    /// Number of rows (== number of columns == catalog size)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between two movies
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Similarities of one movie against every movie, in catalog order
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.size {
            Some(&self.values[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }
}

/// Copy `m[i][j]` (i < j) into `m[j][i]`
fn mirror_upper_triangle(values: &mut [f32], n: usize) {
    for i in 0..n {
        for j in (i + 1)..n {
            values[j * n + i] = values[i * n + j];
        }
    }
}
