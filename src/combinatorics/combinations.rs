//! Lexicographic k-combinations over a slice.

/// Pull-based iterator over every size-`k` subsequence of a slice.
///
/// Combinations come out in lexicographic index order. Each item is a freshly
/// allocated `Vec`, so callers may mutate it freely. Once exhausted the iterator
/// stays exhausted; call [combinations] again to rescan.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

/// Every size-`k` subsequence of `items`, indices strictly increasing.
///
/// `k == 0` yields one empty combination; `k > items.len()` yields nothing.
///
/// # Example
/// ```
/// # use skillforge::combinatorics::combinations;
/// let all: Vec<Vec<char>> = combinations(&['a', 'b', 'c'], 2).collect();
/// assert_eq!(all, vec![vec!['a', 'b'], vec!['a', 'c'], vec!['b', 'c']]);
/// ```
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        indices: (0..k).collect(),
        first: true,
        done: k > items.len(),
    }
}

impl<T: Clone> Combinations<'_, T> {
    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.items[i].clone()).collect()
    }

    /// Moves `indices` to the next combination. Returns false when none remain.
    fn advance(&mut self) -> bool {
        let n = self.items.len();
        let k = self.indices.len();
        // Rightmost slot that can still move right.
        let Some(slot) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };
        self.indices[slot] += 1;
        for i in slot + 1..k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
        } else if !self.advance() {
            self.done = true;
            return None;
        }
        Some(self.current())
    }
}
