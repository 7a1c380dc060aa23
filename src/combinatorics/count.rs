//! Closed-form counts for progress estimation on spaces too large to walk.

/// C(n, k), saturating at `u128::MAX`.
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) / (i + 1) stays integral at every step.
        let Some(product) = result.checked_mul((n - i) as u128) else {
            return u128::MAX;
        };
        result = product / (i as u128 + 1);
    }
    result
}

/// Number of size-`k` selections taking at most one item per group, given the
/// group sizes: the k-th elementary symmetric polynomial of `group_sizes`.
///
/// Computed in O(groups × k) without generating any combination.
///
/// # Example
/// ```
/// # use skillforge::combinatorics::grouped_combination_count;
/// // Groups {a1, a2}, {b}, {c1, c2, c3}: pairs = 2*1 + 2*3 + 1*3.
/// assert_eq!(grouped_combination_count(&[2, 1, 3], 2), 11);
/// ```
pub fn grouped_combination_count(group_sizes: &[usize], k: usize) -> u128 {
    if k > group_sizes.len() {
        return 0;
    }
    // e[j] = elementary symmetric polynomial of degree j over the groups seen so far.
    let mut e = vec![0u128; k + 1];
    e[0] = 1;
    for &size in group_sizes {
        let size = size as u128;
        for j in (1..=k).rev() {
            e[j] = e[j].saturating_add(e[j - 1].saturating_mul(size));
        }
    }
    e[k]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(combination_count(5, 0), 1);
        assert_eq!(combination_count(5, 2), 10);
        assert_eq!(combination_count(5, 5), 1);
        assert_eq!(combination_count(5, 6), 0);
        assert_eq!(combination_count(52, 5), 2_598_960);
    }

    #[test]
    fn binomial_saturates_instead_of_overflowing() {
        assert_eq!(combination_count(10_000, 5_000), u128::MAX);
    }

    #[test]
    fn unit_groups_reduce_to_binomial() {
        assert_eq!(grouped_combination_count(&[1; 8], 3), combination_count(8, 3));
    }

    #[test]
    fn zero_selection_counts_once() {
        assert_eq!(grouped_combination_count(&[], 0), 1);
        assert_eq!(grouped_combination_count(&[4, 2], 0), 1);
    }

    #[test]
    fn more_slots_than_groups_counts_zero() {
        assert_eq!(grouped_combination_count(&[3, 3], 3), 0);
    }
}
