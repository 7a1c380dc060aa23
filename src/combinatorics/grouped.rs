//! Combinations that take at most one item from each group.
//!
//! Used to slot abilities: two morphs of the same base ability share a group,
//! so a selection can never contain both.

use std::collections::HashMap;
use std::hash::Hash;

/// Lazy depth-first enumeration of size-`k` subsequences with distinct group keys.
///
/// Output order is lexicographic by item index, same as
/// [super::combinations]; selections that would repeat a group are never built.
#[derive(Debug, Clone)]
pub struct GroupedCombinations<'a, T> {
    items: &'a [T],
    k: usize,
    /// Dense group id per item.
    group_of: Vec<usize>,
    group_taken: Vec<bool>,
    selection: Vec<usize>,
    cursor: usize,
    started: bool,
    done: bool,
}

/// Every size-`k` subsequence of `items` where no two members share `group_key`.
///
/// # Example
/// ```
/// # use skillforge::combinatorics::grouped_combinations;
/// let items = [("a", 1), ("b", 1), ("c", 2)];
/// let picks: Vec<_> = grouped_combinations(&items, 2, |item| item.1).collect();
/// assert_eq!(picks, vec![vec![("a", 1), ("c", 2)], vec![("b", 1), ("c", 2)]]);
/// ```
pub fn grouped_combinations<T, K, F>(items: &[T], k: usize, group_key: F) -> GroupedCombinations<'_, T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut ids: HashMap<K, usize> = HashMap::new();
    let group_of: Vec<usize> = items
        .iter()
        .map(|item| {
            let next_id = ids.len();
            *ids.entry(group_key(item)).or_insert(next_id)
        })
        .collect();
    let group_count = ids.len();

    GroupedCombinations {
        items,
        k,
        group_of,
        group_taken: vec![false; group_count],
        selection: Vec::with_capacity(k),
        cursor: 0,
        started: false,
        done: k > group_count,
    }
}

impl<T> GroupedCombinations<'_, T> {
    fn pop(&mut self) -> Option<usize> {
        let last = self.selection.pop()?;
        self.group_taken[self.group_of[last]] = false;
        Some(last)
    }
}

impl<T: Clone> Iterator for GroupedCombinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.k == 0 {
            self.done = true;
            return Some(Vec::new());
        }
        if self.started {
            // Resume after the last emitted selection.
            match self.pop() {
                Some(last) => self.cursor = last + 1,
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        self.started = true;

        let n = self.items.len();
        loop {
            if self.selection.len() == self.k {
                return Some(
                    self.selection
                        .iter()
                        .map(|&i| self.items[i].clone())
                        .collect(),
                );
            }
            let needed = self.k - self.selection.len();
            if n - self.cursor < needed {
                match self.pop() {
                    Some(last) => {
                        self.cursor = last + 1;
                        continue;
                    }
                    None => {
                        self.done = true;
                        return None;
                    }
                }
            }
            let group = self.group_of[self.cursor];
            if !self.group_taken[group] {
                self.group_taken[group] = true;
                self.selection.push(self.cursor);
            }
            self.cursor += 1;
        }
    }
}
