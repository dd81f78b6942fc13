//! Insertion-ordered multiset of match specs.

use rustc_hash::FxHashMap;

use crate::runner::{MatchResult, MatchSpec};

/// A multiset of [`MatchSpec`]s that remembers first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecMultiset {
    entries: Vec<(MatchSpec, usize)>,
    index: FxHashMap<MatchSpec, usize>,
}

impl SpecMultiset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the successful matches among `results`.
    pub fn from_successes<'a>(results: impl IntoIterator<Item = &'a MatchResult>) -> Self {
        let mut counts = Self::new();
        for result in results.into_iter().filter(|r| !r.had_error) {
            counts.add(result.spec.clone(), 1);
        }
        counts
    }

    /// Add `copies` more of `spec`.
    pub fn add(&mut self, spec: MatchSpec, copies: usize) {
        let slot = self.slot(spec);
        self.entries[slot].1 += copies;
    }

    /// Set the count of `spec`, replacing whatever was there.
    pub fn set_count(&mut self, spec: MatchSpec, count: usize) {
        let slot = self.slot(spec);
        self.entries[slot].1 = count;
    }

    fn slot(&mut self, spec: MatchSpec) -> usize {
        if let Some(&slot) = self.index.get(&spec) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(spec.clone(), slot);
        self.entries.push((spec, 0));
        slot
    }

    /// Copies of `spec` (zero if absent).
    #[must_use]
    pub fn count(&self, spec: &MatchSpec) -> usize {
        self.index
            .get(spec)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Distinct specs with their counts, in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MatchSpec, usize)> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(spec, count)| (spec, *count))
    }

    /// Number of distinct specs with a non-zero count.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.iter().count()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
