//! Threshold/links construction and backtracking.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use tracing::trace;

use super::search::replace_next_larger;
use super::trim::trim_common;

/// Positions of each distinct element within a range of `b`, ascending.
struct PositionIndex<'a, T> {
    positions: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Hash + Eq> PositionIndex<'a, T> {
    fn build(b: &'a [T], range: Range<usize>) -> Self {
        let mut positions: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for j in range {
            positions.entry(&b[j]).or_default().push(j);
        }
        Self { positions }
    }

    fn get(&self, element: &T) -> Option<&[usize]> {
        self.positions.get(element).map(Vec::as_slice)
    }
}

/// One step of a backward chain: `a[i]` aligned with `b[j]`.
#[derive(Debug, Clone, Copy)]
struct Link {
    previous: Option<usize>,
    i: usize,
    j: usize,
}

/// Arena of chain nodes addressed by index.
#[derive(Debug, Default)]
struct LinkArena {
    nodes: Vec<Link>,
}

impl LinkArena {
    fn push(&mut self, previous: Option<usize>, i: usize, j: usize) -> usize {
        self.nodes.push(Link { previous, i, j });
        self.nodes.len() - 1
    }

    fn chain(&self, tail: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut cursor = Some(tail);
        std::iter::from_fn(move || {
            let link = self.nodes[cursor?];
            cursor = link.previous;
            Some((link.i, link.j))
        })
    }
}

/// Computes the raw match vector for `a` against `b`.
pub(crate) fn compute<T: Hash + Eq>(a: &[T], b: &[T]) -> Vec<Option<usize>> {
    let mut vector = vec![None; a.len()];
    let window = trim_common(a, b, &mut vector);
    trace!(
        "trimmed to a[{:?}] b[{:?}] of {}x{}",
        window.a,
        window.b,
        a.len(),
        b.len()
    );
    if window.is_empty() {
        return vector;
    }

    let index = PositionIndex::build(b, window.b.clone());
    let mut thresh: Vec<usize> = Vec::new();
    // heads[k] is the arena node that produced thresh[k]
    let mut heads: Vec<usize> = Vec::new();
    let mut links = LinkArena::default();

    for i in window.a {
        let Some(candidates) = index.get(&a[i]) else {
            continue;
        };

        let mut k: Option<usize> = None;
        for &j in candidates.iter().rev() {
            k = match k {
                Some(slot) if slot > 0 && thresh[slot] > j && thresh[slot - 1] < j => {
                    thresh[slot] = j;
                    Some(slot)
                }
                hint => replace_next_larger(&mut thresh, j, hint),
            };

            if let Some(slot) = k {
                let previous = slot.checked_sub(1).map(|p| heads[p]);
                let node = links.push(previous, i, j);
                if slot == heads.len() {
                    heads.push(node);
                } else {
                    heads[slot] = node;
                }
            }
        }
    }

    if let Some(&tail) = heads.last() {
        for (i, j) in links.chain(tail) {
            vector[i] = Some(j);
        }
    }
    trace!("{} links allocated for {} chain slots", links.nodes.len(), thresh.len());

    vector
}
