//! Frequency table of remembered domain suffixes.
//!
//! Each suffix (`.com`, `.co.uk`, ...) carries a usage score. The best
//! suffix is cached and recomputed on every mutation; tables hold tens of
//! entries so a full scan is cheap.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Remembered domain suffixes and their scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "HashMap<String, u32>", into = "HashMap<String, u32>")]
pub struct TldTable {
    scores: HashMap<String, u32>,
    best: Option<String>,
}

impl TldTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the score of `suffix`, inserting it if unknown.
    ///
    /// Empty suffixes are ignored.
    pub fn record_suggestion(&mut self, suffix: &str, weight: u32) {
        if suffix.is_empty() {
            return;
        }
        let score = self.scores.entry(suffix.to_string()).or_insert(0);
        *score = score.saturating_add(weight);
        self.recompute_best();
    }

    /// Forget a suffix. Returns its score if it was known.
    pub fn remove(&mut self, suffix: &str) -> Option<u32> {
        let removed = self.scores.remove(suffix);
        if removed.is_some() {
            self.recompute_best();
        }
        removed
    }

    /// The highest scoring suffix.
    pub fn best(&self) -> Option<&str> {
        self.best.as_deref()
    }

    /// Score of a suffix, if known.
    pub fn score(&self, suffix: &str) -> Option<u32> {
        self.scores.get(suffix).copied()
    }

    /// All known suffixes, sorted for stable output.
    pub fn suffixes(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.scores.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Iterate over `(suffix, score)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn recompute_best(&mut self) {
        self.best = self
            .scores
            .iter()
            .max_by(|a, b| rank_best(a, b))
            .map(|(suffix, _)| suffix.clone());
    }
}

/// Higher score wins, then the longer suffix, then the alphabetically first.
fn rank_best(a: &(&String, &u32), b: &(&String, &u32)) -> Ordering {
    a.1.cmp(b.1)
        .then_with(|| a.0.chars().count().cmp(&b.0.chars().count()))
        .then_with(|| b.0.cmp(a.0))
}

impl From<HashMap<String, u32>> for TldTable {
    fn from(scores: HashMap<String, u32>) -> Self {
        let mut table = Self {
            scores,
            best: None,
        };
        table.scores.retain(|suffix, _| !suffix.is_empty());
        table.recompute_best();
        table
    }
}

impl From<TldTable> for HashMap<String, u32> {
    fn from(table: TldTable) -> Self {
        table.scores
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for TldTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = TldTable::new();
        for (suffix, weight) in iter {
            table.record_suggestion(suffix.as_ref(), weight);
        }
        table
    }
}
