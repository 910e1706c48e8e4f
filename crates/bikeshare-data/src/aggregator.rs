//! Frequency counting over trip columns.
//!
//! [`ValueCounts`] is the value-count / group-by primitive behind every
//! "most common" statistic. Keys remember the order in which they were first
//! seen, and that order breaks ties between equal counts.

use std::collections::HashMap;
use std::hash::Hash;

// ── ValueCounts ───────────────────────────────────────────────────────────────

/// Occurrence counts per distinct value, in first-encountered order.
#[derive(Debug, Clone)]
pub struct ValueCounts<K> {
    counts: Vec<(K, usize)>,
    index: HashMap<K, usize>,
    total: usize,
}

impl<K: Eq + Hash + Clone> ValueCounts<K> {
    pub fn new() -> Self {
        Self {
            counts: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }

    /// Count one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.total += 1;
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Number of occurrences of `key` (zero when never seen).
    pub fn get(&self, key: &K) -> usize {
        self.index.get(key).map_or(0, |&slot| self.counts[slot].1)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of values counted, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The value with the highest count and that count.
    ///
    /// On equal counts the value seen first wins. `None` when nothing was
    /// counted.
    pub fn most_common(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in &self.counts {
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((key, *count));
            }
        }
        best
    }

    /// All `(value, count)` pairs, highest count first; equal counts keep
    /// first-encountered order.
    pub fn sorted(&self) -> Vec<(K, usize)> {
        let mut out = self.counts.clone();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}

impl<K: Eq + Hash + Clone> Default for ValueCounts<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for ValueCounts<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counts = Self::new();
        for key in iter {
            counts.add(key);
        }
        counts
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let vc: ValueCounts<&str> = ["a", "b", "a", "c", "a"].into_iter().collect();

        assert_eq!(vc.len(), 3);
        assert_eq!(vc.total(), 5);
        assert_eq!(vc.get(&"a"), 3);
        assert_eq!(vc.get(&"b"), 1);
        assert_eq!(vc.get(&"z"), 0);
    }

    #[test]
    fn test_most_common_simple() {
        let vc: ValueCounts<u32> = [6, 6, 5, 6, 1].into_iter().collect();
        assert_eq!(vc.most_common(), Some((&6, 3)));
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let vc: ValueCounts<&str> = ["b", "a", "a", "b"].into_iter().collect();
        assert_eq!(vc.most_common(), Some((&"b", 2)));
    }

    #[test]
    fn test_most_common_empty() {
        let vc: ValueCounts<String> = ValueCounts::new();
        assert!(vc.is_empty());
        assert_eq!(vc.most_common(), None);
        assert!(vc.sorted().is_empty());
    }

    #[test]
    fn test_sorted_descending_stable() {
        let vc: ValueCounts<&str> = ["x", "y", "z", "y", "z", "w"].into_iter().collect();
        let sorted = vc.sorted();
        assert_eq!(sorted, vec![("y", 2), ("z", 2), ("x", 1), ("w", 1)]);
    }

    #[test]
    fn test_tuple_keys() {
        let vc: ValueCounts<(&str, &str)> = [("A", "B"), ("B", "A"), ("A", "B")]
            .into_iter()
            .collect();
        assert_eq!(vc.most_common(), Some((&("A", "B"), 2)));
    }
}
