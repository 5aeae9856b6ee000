//! Test utilities for seqdiff integration tests
//!
//! Reference implementations the engine is checked against, plus small
//! helpers for building inputs.

#![allow(dead_code)]

use seqdiff::MatchVector;

/// Length of a longest common subsequence by dynamic programming.
pub fn lcs_length<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            table[i + 1][j + 1] = if x == y {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }
    table[a.len()][b.len()]
}

/// Asserts that `vector` is a valid alignment of `a` with `b`: one slot per
/// element of `a`, strictly increasing targets, and equal elements at every
/// aligned pair.
pub fn assert_alignment<T: PartialEq + std::fmt::Debug>(a: &[T], b: &[T], vector: &MatchVector) {
    assert_eq!(vector.len(), a.len(), "one slot per element of a");
    let mut last = None;
    for (i, j) in vector.pairs() {
        assert!(j < b.len(), "target {j} out of range");
        assert_eq!(a[i], b[j], "pair ({i}, {j}) aligns different elements");
        assert!(last.is_none_or(|prev| prev < j), "targets must increase");
        last = Some(j);
    }
}

/// Every string over `alphabet` of length `0..=max_len`.
pub fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |c| {
                    let mut s = prefix.clone();
                    s.push(*c);
                    s
                })
            })
            .collect();
        out.extend(frontier.iter().cloned());
    }
    out
}

/// Splits text into lines.
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
