use serde::{Deserialize, Serialize};

use super::Candidate;

/// The durable collection of accepted candidates across sessions
///
/// Insertion order is most-recently-liked-first. Uniqueness is enforced by
/// the (title, year) pair: liking a duplicate is a no-op, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct SavedList {
    entries: Vec<Candidate>,
}

impl SavedList {
    /// Creates an empty saved list
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<Candidate>) -> Self {
        let mut list = Self::new();
        for candidate in entries.into_iter().rev() {
            list.insert(candidate);
        }
        list
    }

    /// Prepends a liked candidate; returns false when a (title, year)
    /// duplicate already exists and the list was left unchanged
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self
            .entries
            .iter()
            .any(|c| c.dedupe_key() == candidate.dedupe_key())
        {
            return false;
        }
        self.entries.insert(0, candidate);
        true
    }

    /// Removes the entry with the given id; unknown ids are a no-op.
    /// Returns whether the list changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
