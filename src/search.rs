//! Nearest/enclosing-value queries over sorted time arrays.
//!
//! `slice::binary_search` returns an *arbitrary* match among duplicates,
//! which is not enough for cursor snapping: the engine needs the leftmost or
//! rightmost occurrence and a closest-value query with a deterministic
//! tie-break. These wrappers add duplicate-aware expansion on top of the
//! standard search.
//!
//! All functions expect `values` sorted non-decreasing. That is a
//! precondition of every query here and is never checked; restrict a query
//! to a window by subslicing the input.

/// Index of the first element `>= value`.
///
/// When `value` lies beyond the last element the result is clamped to the
/// last index, so a renderer iterating
/// `first_greater_or_equal(..)..=last_less_or_equal(..)` stays in bounds.
/// `None` only when `values` is empty.
///
/// ```
/// # use timeline_select::search::first_greater_or_equal;
/// assert_eq!(first_greater_or_equal(&[2, 3, 4, 5, 6], 4), Some(2));
/// assert_eq!(first_greater_or_equal(&[2, 3, 4, 5, 6], 7), Some(4));
/// ```
pub fn first_greater_or_equal(values: &[i64], value: i64) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    match values.binary_search(&value) {
        Ok(found) => Some(leftmost(values, value, found, 0)),
        Err(insertion) => {
            if insertion == values.len() {
                Some(values.len() - 1)
            } else {
                Some(insertion)
            }
        }
    }
}

/// Index of the last element `<= value`, or `None` if every element is
/// greater (or `values` is empty).
pub fn last_less_or_equal(values: &[i64], value: i64) -> Option<usize> {
    match values.binary_search(&value) {
        Ok(found) => Some(rightmost(values, value, found, values.len() - 1)),
        Err(0) => None,
        Err(insertion) => Some(insertion - 1),
    }
}

/// Index of the element numerically closest to `value`.
///
/// When two elements are equally close the leftmost of them wins; among
/// duplicates of the chosen value the leftmost occurrence is returned.
/// Distances are compared in `f64`. `None` when `values` is empty.
pub fn index_of_closest(values: &[i64], value: i64) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let last = values.len() - 1;
    match values.binary_search(&value) {
        Ok(found) => Some(leftmost(values, value, found, 0)),
        Err(insertion) => {
            if insertion == 0 {
                return Some(0);
            }
            if insertion > last {
                return Some(last);
            }
            let d1 = (values[insertion - 1] as f64 - value as f64).abs();
            let d2 = (values[insertion] as f64 - value as f64).abs();
            let nearest = if d1 <= d2 { insertion - 1 } else { insertion };
            Some(leftmost(values, values[nearest], nearest, 0))
        }
    }
}

/// Walk left from a known occurrence of `value` at `index` to the leftmost
/// occurrence, never stepping below `from`.
pub fn leftmost(values: &[i64], value: i64, mut index: usize, from: usize) -> usize {
    while index > from && values[index - 1] == value {
        index -= 1;
    }
    index
}

/// Walk right from a known occurrence of `value` at `index` to the rightmost
/// occurrence, never stepping above `to` (inclusive).
pub fn rightmost(values: &[i64], value: i64, mut index: usize, to: usize) -> usize {
    while index < to && index + 1 < values.len() && values[index + 1] == value {
        index += 1;
    }
    index
}
