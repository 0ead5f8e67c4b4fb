//! Insertion-ordered mood counts.

use crate::model::spot::Mood;
use serde::Serialize;

/// Mood -> member count, iterated in first-encounter order.
///
/// Dominant-mood tie breaking depends on this order, so it is a `Vec` and not
/// a hash map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MoodDistribution {
    entries: Vec<(Mood, usize)>,
}

impl MoodDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution from explicit counts, keeping the given order.
    ///
    /// Repeated moods are merged into their first position.
    pub fn from_counts(counts: impl IntoIterator<Item = (Mood, usize)>) -> Self {
        let mut distribution = Self::new();
        for (mood, count) in counts {
            distribution.add(mood, count);
        }
        distribution
    }

    /// Counts one more member with `mood`.
    pub fn increment(&mut self, mood: Mood) {
        self.add(mood, 1);
    }

    fn add(&mut self, mood: Mood, count: usize) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == mood) {
            Some((_, value)) => *value += count,
            None => self.entries.push((mood, count)),
        }
    }

    /// Count for `mood`, zero when absent.
    pub fn get(&self, mood: Mood) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == mood)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mood, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mood with the highest count.
    ///
    /// Scans in iteration order keeping the first strictly greater count, so
    /// ties go to the mood seen first. Returns `Mood::None` when every count
    /// is zero.
    pub fn dominant(&self) -> Mood {
        let mut best = (Mood::None, 0usize);
        for (mood, count) in self.iter() {
            if count > best.1 {
                best = (mood, count);
            }
        }
        best.0
    }

    /// Number of non-`none` moods with a nonzero count.
    pub fn distinct_tagged_moods(&self) -> usize {
        self.iter()
            .filter(|(mood, count)| !mood.is_none() && *count > 0)
            .count()
    }
}
