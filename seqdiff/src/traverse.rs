//! Change records built from an alignment.
//!
//! These walk the [`MatchVector`] of two sequences and emit the records the
//! normalizer and direction detector consume. Nothing here applies a patch or
//! renders text.

use std::hash::Hash;

use tracing::debug;

use crate::change::{Action, Change};
use crate::lcs::{MatchVector, lcs};
use crate::sequence::Sequence;

/// Returns the longest common subsequence itself.
///
/// ```
/// assert_eq!(seqdiff::lcs_elements("abcde", "xbdz"), vec!['b', 'd']);
/// ```
#[must_use]
pub fn lcs_elements<A, B>(a: &A, b: &B) -> Vec<A::Element>
where
    A: Sequence + ?Sized,
    B: Sequence<Element = A::Element> + ?Sized,
    A::Element: Hash + Eq,
{
    let elements = a.elements();
    lcs(a, b).pairs().map(|(i, _)| elements[i].clone()).collect()
}

/// Computes the hunks of simple changes that turn `a` into `b`.
///
/// Each hunk is a maximal run of changes between two aligned elements;
/// within a hunk deletions (positions in `a`) come before insertions
/// (positions in `b`).
///
/// ```
/// use seqdiff::{Action, Change};
///
/// let hunks = seqdiff::diff("abc", "abd");
/// assert_eq!(
///     hunks,
///     vec![vec![
///         Change::simple(Action::Delete, 2, 'c'),
///         Change::simple(Action::Insert, 2, 'd'),
///     ]]
/// );
/// ```
#[must_use]
pub fn diff<A, B>(a: &A, b: &B) -> Vec<Vec<Change<A::Element>>>
where
    A: Sequence + ?Sized,
    B: Sequence<Element = A::Element> + ?Sized,
    A::Element: Hash + Eq,
{
    let (old, new) = (a.elements(), b.elements());
    let vector = lcs(a, b);

    let mut hunks = Vec::new();
    let (mut i, mut j) = (0, 0);
    for (mi, mj) in anchors(&vector, old.len(), new.len()) {
        let hunk: Vec<_> = (i..mi)
            .map(|p| Change::simple(Action::Delete, p, old[p].clone()))
            .chain((j..mj).map(|p| Change::simple(Action::Insert, p, new[p].clone())))
            .collect();
        if !hunk.is_empty() {
            hunks.push(hunk);
        }
        (i, j) = (mi + 1, mj + 1);
    }

    debug!("diff produced {} hunks", hunks.len());
    hunks
}

/// Computes a balanced, position-by-position list of context changes.
///
/// Every position of `a` and of `b` is covered exactly once. Between two
/// aligned elements, pending positions on both sides are paired as `!`
/// changes, then the remainder becomes `-` or `+`.
///
/// ```
/// use seqdiff::{Action, Change};
///
/// let changes = seqdiff::sdiff("ab", "xb");
/// assert_eq!(
///     changes,
///     vec![
///         Change::context(Action::Replace, 0, Some('a'), 0, Some('x')),
///         Change::context(Action::Unchanged, 1, Some('b'), 1, Some('b')),
///     ]
/// );
/// ```
#[must_use]
pub fn sdiff<A, B>(a: &A, b: &B) -> Vec<Change<A::Element>>
where
    A: Sequence + ?Sized,
    B: Sequence<Element = A::Element> + ?Sized,
    A::Element: Hash + Eq,
{
    let (old, new) = (a.elements(), b.elements());
    let vector = lcs(a, b);
    let at = |i: usize, j: usize, action| {
        Change::context(action, i, old.get(i).cloned(), j, new.get(j).cloned())
    };

    let mut changes = Vec::with_capacity(old.len().max(new.len()));
    let (mut i, mut j) = (0, 0);
    for (mi, mj) in anchors(&vector, old.len(), new.len()) {
        while i < mi || j < mj {
            let action = match (i < mi, j < mj) {
                (true, true) => Action::Replace,
                (true, false) => Action::Delete,
                _ => Action::Insert,
            };
            changes.push(at(i, j, action));
            if i < mi {
                i += 1;
            }
            if j < mj && action != Action::Delete {
                j += 1;
            }
        }
        if mi < old.len() {
            changes.push(at(mi, mj, Action::Unchanged));
        }
        (i, j) = (mi + 1, mj + 1);
    }

    debug!("sdiff produced {} changes", changes.len());
    changes
}

/// Aligned pairs followed by a sentinel one past the end of both sides.
fn anchors(
    vector: &MatchVector,
    a_len: usize,
    b_len: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    vector.pairs().chain(std::iter::once((a_len, b_len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_have_no_hunks() {
        assert!(diff("same", "same").is_empty());
        assert!(diff("", "").is_empty());
    }

    #[test]
    fn test_hunks_split_on_matches() {
        let hunks = diff("xaby", "acbd");
        assert_eq!(
            hunks,
            vec![
                vec![Change::simple(Action::Delete, 0, 'x')],
                vec![Change::simple(Action::Insert, 1, 'c')],
                vec![
                    Change::simple(Action::Delete, 3, 'y'),
                    Change::simple(Action::Insert, 3, 'd'),
                ],
            ]
        );
    }

    #[test]
    fn test_diff_against_empty() {
        assert_eq!(
            diff("ab", ""),
            vec![vec![
                Change::simple(Action::Delete, 0, 'a'),
                Change::simple(Action::Delete, 1, 'b'),
            ]]
        );
        assert_eq!(
            diff("", "ab"),
            vec![vec![
                Change::simple(Action::Insert, 0, 'a'),
                Change::simple(Action::Insert, 1, 'b'),
            ]]
        );
    }

    #[test]
    fn test_sdiff_tail_pairs_then_remainder() {
        let changes = sdiff("abcd", "axy");
        assert_eq!(
            changes,
            vec![
                Change::context(Action::Unchanged, 0, Some('a'), 0, Some('a')),
                Change::context(Action::Replace, 1, Some('b'), 1, Some('x')),
                Change::context(Action::Replace, 2, Some('c'), 2, Some('y')),
                Change::context(Action::Delete, 3, Some('d'), 3, None),
            ]
        );
    }

    #[test]
    fn test_sdiff_insertions_past_end() {
        let changes = sdiff("a", "abc");
        assert_eq!(
            changes,
            vec![
                Change::context(Action::Unchanged, 0, Some('a'), 0, Some('a')),
                Change::context(Action::Insert, 1, None, 1, Some('b')),
                Change::context(Action::Insert, 1, None, 2, Some('c')),
            ]
        );
    }

    #[test]
    fn test_lcs_elements_of_lines() {
        let old = vec!["a", "b", "c"];
        let new = vec!["b", "c", "d"];
        assert_eq!(lcs_elements(&old, &new), vec!["b", "c"]);
    }
}
