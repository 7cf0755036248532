//! Per-session frequency map over candidates.
//!
//! Entries keep first-seen order; the decider relies on that order to break
//! count ties deterministically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Candidate;

/// One (candidate, count) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub candidate: Candidate,
    pub count: u32,
}

/// Accumulating counts for the current session.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<TallyEntry>,
    /// candidate -> index into `entries`
    index: HashMap<Candidate, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment `candidate`, inserting it with count 1 if absent.
    /// Returns the new count.
    pub fn record(&mut self, candidate: Candidate) -> u32 {
        match self.index.get(&candidate) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.count = entry.count.saturating_add(1);
                entry.count
            }
            None => {
                self.index.insert(candidate.clone(), self.entries.len());
                self.entries.push(TallyEntry {
                    candidate,
                    count: 1,
                });
                1
            }
        }
    }

    pub fn count(&self, candidate: &Candidate) -> u32 {
        self.index
            .get(candidate)
            .map_or(0, |&i| self.entries[i].count)
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total samples recorded since the last clear.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            entries: self.entries.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Immutable copy of a tally, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    entries: Vec<TallyEntry>,
}

impl TallySnapshot {
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<&TallyEntry> {
        let mut ranked: Vec<&TallyEntry> = self.entries.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

impl FromIterator<Candidate> for Tally {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut tally = Self::new();
        for c in iter {
            tally.record(c);
        }
        tally
    }
}
