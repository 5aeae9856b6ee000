//! Threshold buffer maintenance.

use std::cmp::Ordering;

/// Inserts `value` into a strictly increasing `buffer`, keeping it sorted.
///
/// - Empty buffer, or `value` greater than the last element: `value` is
///   appended and the new last index is returned.
/// - `value` already present: the buffer is left alone and `None` is returned.
/// - Otherwise the first element strictly greater than `value` is overwritten
///   and its index returned.
///
/// `hint` bounds the upper end of the binary search. It is only honoured when
/// it points at an element greater than `value`; any other hint is ignored.
pub fn replace_next_larger(
    buffer: &mut Vec<usize>,
    value: usize,
    hint: Option<usize>,
) -> Option<usize> {
    match buffer.last() {
        Some(&last) if value <= last => {}
        _ => {
            buffer.push(value);
            return Some(buffer.len() - 1);
        }
    }

    let mut low = 0;
    let mut high = match hint {
        Some(h) if buffer.get(h).is_some_and(|&found| found > value) => h + 1,
        _ => buffer.len(),
    };

    while low < high {
        let mid = low + (high - low) / 2;
        match value.cmp(&buffer[mid]) {
            Ordering::Equal => return None,
            Ordering::Greater => low = mid + 1,
            Ordering::Less => high = mid,
        }
    }

    buffer[low] = value;
    Some(low)
}
