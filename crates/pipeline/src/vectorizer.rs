//! TF-IDF vectorization of the document corpus.
//!
//! ## Weighting
//! - tf: raw count of the term in the document
//! - idf: smoothed, `ln((1 + n) / (1 + df)) + 1`
//! - each document vector is L2-normalised afterwards
//!
//! The vocabulary is sorted, so term ids (and therefore every vector) are
//! identical from one run to the next.

use crate::features::DocumentCorpus;
use crate::tokenizer::WordTokenizer;
use crate::traits::Tokenizer;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Sparse vector over the vocabulary, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(term_id, weight)` pairs.
    ///
    /// Pairs are sorted by term id, weights of repeated ids are summed and
    /// zero weights are dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(id, _)| id);

        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (id, weight) in pairs {
            if indices.last() == Some(&id) {
                if let Some(last) = values.last_mut() {
                    *last += weight;
                }
            } else {
                indices.push(id);
                values.push(weight);
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|&(_, weight)| weight != 0.0)
            .unzip();

        Self { indices, values }
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True when every weight is zero
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Weight of a term, 0.0 when absent
    pub fn get(&self, term_id: usize) -> f64 {
        self.indices
            .binary_search(&term_id)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Iterate over `(term_id, weight)` in ascending term order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product, merging the two sorted index lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity, defined as 0.0 when either vector is all zero.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        cosine_from_dot(self.dot(other), self.norm(), other.norm())
    }

    /// Scale to unit length; a zero vector is returned unchanged
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
        self
    }
}

/// `dot / (norm_a * norm_b)` clamped to [0, 1], or 0.0 if a norm is zero
pub fn cosine_from_dot(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Vocabulary, IDF weights and one TF-IDF vector per document.
///
/// Built once by [`TfidfVectorizer::fit_transform`]; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TermVectorSpace {
    /// Terms sorted lexicographically; position == term id
    terms: Vec<String>,
    term_ids: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TermVectorSpace {
    /// Number of document vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of distinct terms
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn term_id(&self, term: &str) -> Option<usize> {
        self.term_ids.get(term).copied()
    }

    pub fn term(&self, id: usize) -> Option<&str> {
        self.terms.get(id).map(String::as_str)
    }

    pub fn idf(&self, id: usize) -> Option<f64> {
        self.idf.get(id).copied()
    }

    /// Vector of one document
    pub fn vector(&self, doc: usize) -> Option<&SparseVector> {
        self.vectors.get(doc)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}

/// Fits vocabulary + IDF on a corpus and produces its TF-IDF vectors.
///
/// ## Usage
/// ```ignore
/// let space = TfidfVectorizer::new().fit_transform(&corpus);
/// let v = space.vector(0).unwrap();
/// ```
pub struct TfidfVectorizer {
    tokenizer: Box<dyn Tokenizer>,
}

impl TfidfVectorizer {
    /// Create a vectorizer with the default [`WordTokenizer`].
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(WordTokenizer::new()),
        }
    }

    /// Swap the tokenizer (builder pattern).
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Build the vocabulary and the TF-IDF vectors of every document.
    ///
    /// ## Algorithm
    /// 1. Tokenize every document (in parallel)
    /// 2. Collect the sorted set of distinct terms
    /// 3. Count document frequencies and derive smoothed IDF
    /// 4. Weight raw term counts by IDF and L2-normalise each vector
    pub fn fit_transform(&self, corpus: &DocumentCorpus) -> TermVectorSpace {
        let n_docs = corpus.len();

        let tokenized: Vec<Vec<String>> = corpus
            .documents()
            .par_iter()
            .map(|doc| self.tokenizer.tokenize(doc))
            .collect();

        // 2. Sorted vocabulary
        let terms: Vec<String> = tokenized
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let term_ids: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();

        // 3. Term counts per document, then document frequencies
        let counts: Vec<HashMap<usize, u32>> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut tf: HashMap<usize, u32> = HashMap::new();
                for token in tokens {
                    if let Some(&id) = term_ids.get(token) {
                        *tf.entry(id).or_insert(0) += 1;
                    }
                }
                tf
            })
            .collect();

        let mut doc_freq = vec![0usize; terms.len()];
        for tf in &counts {
            for &id in tf.keys() {
                doc_freq[id] += 1;
            }
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| smoothed_idf(n_docs, df))
            .collect();

        // 4. Weighted, normalised vectors
        let vectors: Vec<SparseVector> = counts
            .par_iter()
            .map(|tf| {
                let pairs = tf
                    .iter()
                    .map(|(&id, &count)| (id, count as f64 * idf[id]))
                    .collect();
                SparseVector::from_pairs(pairs).normalized()
            })
            .collect();

        let empty_docs = vectors.iter().filter(|v| v.is_zero()).count();
        if empty_docs > 0 {
            debug!("{} documents have no terms and get a zero vector", empty_docs);
        }
        info!(
            "Vectorized {} documents with {} over a vocabulary of {} terms",
            n_docs,
            self.tokenizer.name(),
            terms.len()
        );

        TermVectorSpace {
            terms,
            term_ids,
            idf,
            vectors,
        }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothed inverse document frequency
///
/// Acts as if one extra document contained every term, so a term can never
/// get a zero or infinite weight.
fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}
