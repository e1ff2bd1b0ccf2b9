//! Binary search and in-place merge sort over the backing array.
//!
//! ## Merge Sort
//!
//! The merge step needs no scratch buffer. When the head of the right run is
//! smaller than the head of the left run, it is rotated into place:
//!
//! ```text
//! [a c e | b d]  ->  rotate [c e b] right  ->  [a b c e | d]
//! ```
//!
//! Each rotation counts as one swap. Already-ordered runs are detected with a
//! single comparison and merged for free, so sorting a sorted array performs
//! zero swaps.

use std::cmp::Ordering;

/// Binary search with an ordering function.
///
/// `order(item)` orders the item against the target. Returns `Ok(index)` of a
/// matching item, or `Err(index)` where the target would be inserted to keep
/// the slice ordered.
pub fn binary_search_by<T, F>(items: &[T], mut order: F) -> Result<usize, usize>
where
    F: FnMut(&T) -> Ordering,
{
    let mut lo = 0;
    let mut hi = items.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match order(&items[mid]) {
            Ordering::Equal => return Ok(mid),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }

    Err(lo)
}

/// Sort `items` in place, returning the number of swaps performed.
///
/// Equal items keep their relative order.
pub fn merge_sort_by<T, F>(items: &mut [T], compare: &mut F) -> u64
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return 0;
    }

    // Left run is items[..=mid], right run is items[mid + 1..]
    let mid = (items.len() - 1) / 2;
    let mut swaps = merge_sort_by(&mut items[..=mid], compare);
    swaps += merge_sort_by(&mut items[mid + 1..], compare);
    swaps + merge(items, mid, compare)
}

/// Merge the sorted runs `items[..=mid]` and `items[mid + 1..]`
fn merge<T, F>(items: &mut [T], mut mid: usize, compare: &mut F) -> u64
where
    F: FnMut(&T, &T) -> Ordering,
{
    let end = items.len() - 1;
    let mut start = 0;
    let mut start2 = mid + 1;
    let mut swaps = 0;

    // Runs already in order
    if compare(&items[mid], &items[start2]) != Ordering::Greater {
        return swaps;
    }

    while start <= mid && start2 <= end {
        if compare(&items[start], &items[start2]) != Ordering::Greater {
            start += 1;
        } else {
            swaps += 1;
            items[start..=start2].rotate_right(1);

            start += 1;
            mid += 1;
            start2 += 1;
        }
    }

    swaps
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(items: &mut [i32]) -> u64 {
        merge_sort_by(items, &mut |a: &i32, b: &i32| a.cmp(b))
    }

    #[test]
    fn test_binary_search_found() {
        let items = [1, 3, 5, 7, 9, 11];
        for (i, v) in items.iter().enumerate() {
            assert_eq!(binary_search_by(&items, |x| x.cmp(v)), Ok(i));
        }
    }

    #[test]
    fn test_binary_search_insertion_point() {
        let items = [10, 20, 30];
        assert_eq!(binary_search_by(&items, |x| x.cmp(&5)), Err(0));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&15)), Err(1));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&25)), Err(2));
        assert_eq!(binary_search_by(&items, |x| x.cmp(&35)), Err(3));
    }

    #[test]
    fn test_binary_search_empty() {
        let items: [i32; 0] = [];
        assert_eq!(binary_search_by(&items, |x| x.cmp(&1)), Err(0));
    }

    #[test]
    fn test_merge_sort_reverse() {
        let mut items = [7, 6, 5, 4, 3, 2, 1];
        let swaps = sort(&mut items);

        assert_eq!(items, [1, 2, 3, 4, 5, 6, 7]);
        assert!(swaps > 0);
    }

    #[test]
    fn test_merge_sort_sorted_is_free() {
        let mut items = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        let swaps = sort(&mut items);

        assert_eq!(items, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(swaps, 0);
    }

    #[test]
    fn test_merge_sort_counts_rotations() {
        // One element out of place: a single rotation moves it home
        let mut items = [2, 3, 1];
        let swaps = sort(&mut items);

        assert_eq!(items, [1, 2, 3]);
        assert_eq!(swaps, 1);
    }

    #[test]
    fn test_merge_sort_duplicates_stable() {
        let mut items = [(3, 'a'), (1, 'a'), (3, 'b'), (1, 'b'), (2, 'a')];
        merge_sort_by(&mut items, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));

        assert_eq!(items, [(1, 'a'), (1, 'b'), (2, 'a'), (3, 'a'), (3, 'b')]);
    }

    #[test]
    fn test_merge_sort_small() {
        let mut empty: [i32; 0] = [];
        assert_eq!(sort(&mut empty), 0);

        let mut one = [42];
        assert_eq!(sort(&mut one), 0);

        let mut two = [2, 1];
        assert_eq!(sort(&mut two), 1);
        assert_eq!(two, [1, 2]);
    }
}
