//! Order-preserving value counting.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A value together with how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

/// Counts occurrences of each distinct value, remembering the order in which
/// values were first seen.
///
/// When several values share the highest count, the one seen first wins, so
/// repeated runs over the same rows always pick the same value.
#[derive(Debug, Clone)]
pub struct ValueCounts<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for ValueCounts<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> ValueCounts<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most frequent value; ties go to the first one counted.
    pub fn most_common(&self) -> Option<Mode<&K>> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, count)| Mode {
            value,
            count: *count,
        })
    }

    /// All values by descending count; equal counts keep first-seen order.
    pub fn descending(&self) -> Vec<Mode<&K>> {
        let mut sorted: Vec<Mode<&K>> = self
            .entries
            .iter()
            .map(|(value, count)| Mode {
                value,
                count: *count,
            })
            .collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
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

/// Counts `values` and returns the most frequent one as an owned [`Mode`].
pub fn most_common<K, I>(values: I) -> Option<Mode<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let counts: ValueCounts<K> = values.into_iter().collect();
    counts.most_common().map(|m| Mode {
        value: m.value.clone(),
        count: m.count,
    })
}
