//! Longest common subsequence engine.
//!
//! The alignment is computed Hunt–Szymanski style: common leading and
//! trailing runs are matched directly, the middle of `b` is indexed by
//! element, and a threshold buffer tracks the smallest `b` position that ends
//! a common subsequence of each length. Runs in O((|A| + |B|) log |B|) for
//! typical line diffs instead of the O(|A|·|B|) dynamic-programming table.
//!
//! # Tie-breaking
//!
//! When several alignments are equally long the result is fixed by two rules:
//! the candidate `b` positions of each `a` element are visited from highest to
//! lowest, and each candidate overwrites the first threshold slot that admits
//! it. Common prefixes and suffixes are always matched position for position.
//! The same inputs therefore always produce the same vector.

mod algorithm;
mod search;
mod trim;

pub use search::replace_next_larger;

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sequence::Sequence;

/// Per-position alignment of sequence A against sequence B.
///
/// Entry `i` is `Some(j)` when `a[i]` is aligned with `b[j]`, or `None` when
/// `a[i]` is not part of the common subsequence. Matched entries are strictly
/// increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchVector(Vec<Option<usize>>);

impl MatchVector {
    /// Length of sequence A.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if sequence A was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `b` index aligned with `a[i]`, if any.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.0.get(i).copied().flatten()
    }

    /// Number of aligned positions, i.e. the LCS length.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Iterates over aligned `(i, j)` pairs in increasing order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, j)| j.map(|j| (i, j)))
    }

    /// The raw entries.
    #[must_use]
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }

    /// Consumes the vector, returning the raw entries.
    #[must_use]
    pub fn into_inner(self) -> Vec<Option<usize>> {
        self.0
    }
}

impl From<Vec<Option<usize>>> for MatchVector {
    fn from(entries: Vec<Option<usize>>) -> Self {
        Self(entries)
    }
}

/// Aligns `a` against `b`, returning a [`MatchVector`] as long as `a`.
///
/// Strings are compared `char` by `char`. See the module documentation for
/// how ties between equally long alignments are resolved.
///
/// # Examples
///
/// ```
/// let vector = seqdiff::lcs("abcd", "acbd");
/// assert_eq!(vector.matched(), 3);
/// assert_eq!(vector.get(0), Some(0));
/// assert_eq!(vector.get(3), Some(3));
/// ```
#[must_use]
pub fn lcs<A, B>(a: &A, b: &B) -> MatchVector
where
    A: Sequence + ?Sized,
    B: Sequence<Element = A::Element> + ?Sized,
    A::Element: Hash + Eq,
{
    let (a, b) = (a.elements(), b.elements());
    let vector = MatchVector(algorithm::compute(&a, &b));
    debug!(
        "lcs aligned {} of {} against {} elements",
        vector.matched(),
        a.len(),
        b.len()
    );
    vector
}
