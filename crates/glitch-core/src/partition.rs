//! Segment partitioner: near-equal contiguous grouping with deterministic
//! remainder placement.
//!
//! The partitioner uses ceiling accumulation: an accumulator advances by the
//! real-valued group size `len / num_groups` and each cut lands at
//! `ceil(accumulator)`. Group sizes therefore differ by at most one, sizes
//! always sum to the input length, and any remainder lands in the *last*
//! group. Downstream effects (ghost-split section shifts, mirror grouping,
//! line blending) rely on this exact placement, so the rule is not
//! interchangeable with per-group rounding.
//!
//! [`partition_by`] accepts a fractional group count because line blending
//! derives its count as `total_lines / lines_per_group`, which is rarely a
//! whole number.

use crate::error::{Error, Result};

/// Splits `items` into at most `num_groups` contiguous groups via ceiling
/// accumulation.
///
/// Invariants: the concatenation of the groups reproduces `items` exactly,
/// and the number of groups never exceeds `num_groups`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `num_groups` is zero.
///
/// # Example
///
/// ```rust
/// use glitch_core::partition;
///
/// let groups = partition(vec![1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(groups, vec![vec![1, 2, 3], vec![4, 5]]);
/// ```
pub fn partition<T: Clone>(items: Vec<T>, num_groups: usize) -> Result<Vec<Vec<T>>> {
    if num_groups == 0 {
        return Err(Error::InvalidParameter(
            "partition group count must be at least 1".into(),
        ));
    }
    partition_by(items, num_groups as f64)
}

/// Splits `items` into contiguous groups via ceiling accumulation with a
/// real-valued group count.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `num_groups` is not positive.
pub fn partition_by<T: Clone>(items: Vec<T>, num_groups: f64) -> Result<Vec<Vec<T>>> {
    if !(num_groups > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "partition group count must be positive, got {num_groups}"
        )));
    }
    let len = items.len();
    let group_size = len as f64 / num_groups;
    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut covered = 0.0;
    let mut prev = 0;
    while covered < len as f64 - 1.0 {
        covered += group_size;
        let cut = (covered.ceil() as usize).min(len);
        groups.push(items[prev..cut].to_vec());
        prev = cut;
    }
    // The accumulator only guarantees coverage up to len - 1; when it lands
    // exactly there the final element extends the last group.
    if prev < len {
        match groups.last_mut() {
            Some(last) => last.extend_from_slice(&items[prev..]),
            None => groups.push(items),
        }
    }
    Ok(groups)
}

/// Breaks `items` into fixed-size contiguous chunks; the last chunk may be
/// shorter.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `size` is zero.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(Error::InvalidParameter(
            "chunk size must be at least 1".into(),
        ));
    }
    Ok(items.chunks(size).map(|c| c.to_vec()).collect())
}

/// Concatenates groups back into a single sequence, in order.
pub fn merge<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    let mut merged = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for group in groups {
        merged.extend(group);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_into_two() {
        // covered = 2.5 -> ceil 3, then covered = 5.0 -> ceil 5.
        let groups = partition(vec![10, 20, 30, 40, 50], 2).unwrap();
        assert_eq!(groups, vec![vec![10, 20, 30], vec![40, 50]]);
    }

    #[test]
    fn test_round_trip_all_counts() {
        let items: Vec<u32> = (0..17).collect();
        for n in 1..=20 {
            let groups = partition(items.clone(), n).unwrap();
            assert!(groups.len() <= n, "{} groups for n={}", groups.len(), n);
            assert_eq!(merge(groups), items, "round trip failed for n={}", n);
        }
    }

    #[test]
    fn test_exact_division_extends_last_group() {
        // Accumulator stops at len - 1; the trailing element joins the
        // final group rather than forming its own.
        let groups = partition(vec![1, 2, 3, 4], 4).unwrap();
        assert_eq!(groups, vec![vec![1], vec![2], vec![3, 4]]);
    }

    #[test]
    fn test_single_element() {
        let groups = partition(vec![7], 3).unwrap();
        assert_eq!(groups, vec![vec![7]]);
    }

    #[test]
    fn test_empty_input() {
        let groups = partition(Vec::<u8>::new(), 4).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_zero_groups_rejected() {
        assert!(partition(vec![1, 2, 3], 0).is_err());
        assert!(partition_by(vec![1, 2, 3], 0.0).is_err());
        assert!(partition_by(vec![1, 2, 3], -2.0).is_err());
    }

    #[test]
    fn test_fractional_group_count() {
        // 5 lines grouped in pairs: 5 / 2 = 2.5 groups.
        let groups = partition_by(vec![0, 1, 2, 3, 4], 2.5).unwrap();
        assert_eq!(merge(groups.clone()), vec![0, 1, 2, 3, 4]);
        assert_eq!(groups[0], vec![0, 1]);
    }

    #[test]
    fn test_chunk() {
        let chunks = chunk(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert!(chunk(&[1], 0).is_err());
    }
}
