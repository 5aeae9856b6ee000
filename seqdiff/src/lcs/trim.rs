//! Common prefix/suffix trimming.

use std::ops::Range;

/// The still-unaligned middle of both sequences after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) a: Range<usize>,
    pub(crate) b: Range<usize>,
}

impl Window {
    pub(crate) fn is_empty(&self) -> bool {
        self.a.is_empty() || self.b.is_empty()
    }
}

/// Matches equal leading and trailing runs directly into `vector`.
///
/// `vector` must be as long as `a`.
pub(crate) fn trim_common<T: PartialEq>(a: &[T], b: &[T], vector: &mut [Option<usize>]) -> Window {
    let (mut a_start, mut b_start) = (0, 0);
    let (mut a_end, mut b_end) = (a.len(), b.len());

    while a_start < a_end && b_start < b_end && a[a_start] == b[b_start] {
        vector[a_start] = Some(b_start);
        a_start += 1;
        b_start += 1;
    }

    while a_start < a_end && b_start < b_end && a[a_end - 1] == b[b_end - 1] {
        a_end -= 1;
        b_end -= 1;
        vector[a_end] = Some(b_end);
    }

    Window {
        a: a_start..a_end,
        b: b_start..b_end,
    }
}
