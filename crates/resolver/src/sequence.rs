//! Ratcliff/Obershelp sequence matching.
//!
//! The similarity of two strings `a` and `b` is `2 * M / (|a| + |b|)`, where
//! `M` is the number of characters covered by the matching blocks: find the
//! longest common block, then recurse on what lies left and right of it.
//!
//! Strings are compared as sequences of Unicode scalar values, case-sensitive.
//! No characters are treated as junk.
//!
//! [`SequenceMatcher`] is built once around the fixed sequence `b` (the
//! user's query) and then compared against many `a`s (catalog titles), so the
//! per-character position index of `b` is only computed once.

use std::collections::HashMap;

/// A run of `size` equal characters at `a[a_start..]` and `b[b_start..]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Matcher holding the second sequence and its lookup tables.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    /// Positions of every character in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
    /// Occurrence count of every character in `b`
    b_counts: HashMap<char, usize>,
}

impl SequenceMatcher {
    /// Prepare a matcher for the fixed sequence `b`.
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        let mut b_counts: HashMap<char, usize> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
            *b_counts.entry(ch).or_insert(0) += 1;
        }

        Self { b, b2j, b_counts }
    }

    /// Length of `b` in characters
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Full Ratcliff/Obershelp ratio of `a` against `b`, in [0, 1].
    ///
    /// Two empty strings are identical (1.0).
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        self.ratio_chars(&a)
    }

    /// Upper bound on `ratio`: compares character multisets, ignoring order.
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        self.quick_ratio_chars(&a)
    }

    /// Cheapest upper bound on `ratio`, from the lengths alone.
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        self.real_quick_ratio_len(a.chars().count())
    }

    /// Ratio of `a` against `b` if it reaches `cutoff`.
    ///
    /// Runs the two cheap upper bounds first and only computes the full ratio
    /// when neither of them rules the pair out.
    pub fn ratio_at_least(&self, a: &str, cutoff: f64) -> Option<f64> {
        let a: Vec<char> = a.chars().collect();

        if self.real_quick_ratio_len(a.len()) < cutoff {
            return None;
        }
        if self.quick_ratio_chars(&a) < cutoff {
            return None;
        }
        let ratio = self.ratio_chars(&a);
        (ratio >= cutoff).then_some(ratio)
    }

    /// Matching blocks of `a` against `b`, sorted by position in `a`.
    ///
    /// Adjacent blocks are merged, so no two returned blocks touch.
    pub fn matching_blocks(&self, a: &str) -> Vec<MatchingBlock> {
        let a: Vec<char> = a.chars().collect();
        self.matching_blocks_chars(&a)
    }

    fn ratio_chars(&self, a: &[char]) -> f64 {
        let matches: usize = self
            .matching_blocks_chars(a)
            .iter()
            .map(|block| block.size)
            .sum();
        ratio_from(matches, a.len() + self.b.len())
    }

    fn quick_ratio_chars(&self, a: &[char]) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        let mut matches = 0;
        for &ch in a {
            let left = available
                .entry(ch)
                .or_insert_with(|| self.b_counts.get(&ch).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        ratio_from(matches, a.len() + self.b.len())
    }

    fn real_quick_ratio_len(&self, a_len: usize) -> f64 {
        ratio_from(a_len.min(self.b.len()), a_len + self.b.len())
    }

    /// Longest block of `a[alo..ahi]` equal to a block of `b[blo..bhi]`.
    ///
    /// Among equally long blocks, the one starting earliest in `a` wins, and
    /// then the one starting earliest in `b`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: alo,
            b_start: blo,
            size: 0,
        };

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(ch) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best.size {
                        best = MatchingBlock {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }

        best
    }

    fn matching_blocks_chars(&self, a: &[char]) -> Vec<MatchingBlock> {
        let mut pending = vec![(0, a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.find_longest_match(a, alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            let (i, j, k) = (block.a_start, block.b_start, block.size);
            blocks.push(block);

            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        blocks.sort();
        merge_adjacent(blocks)
    }
}

/// Merge blocks that continue each other in both sequences
fn merge_adjacent(blocks: Vec<MatchingBlock>) -> Vec<MatchingBlock> {
    let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last)
                if last.a_start + last.size == block.a_start
                    && last.b_start + last.size == block.b_start =>
            {
                last.size += block.size;
            }
            _ => merged.push(block),
        }
    }
    merged
}

fn ratio_from(matches: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total_len as f64
    }
}

/// Ratcliff/Obershelp similarity of two strings
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}
