//! State → auditor coverage index.

use std::collections::HashMap;

use super::types::AuditorCoverage;
use crate::types::DbId;

/// Normalized state key: trimmed and lower-cased.
pub fn normalize_state(state: &str) -> String {
    state.trim().to_lowercase()
}

/// Auditors covering each normalized state, in roster order.
///
/// Read-only once built; an allocation pass works against one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageIndex {
    by_state: HashMap<String, Vec<DbId>>,
}

impl CoverageIndex {
    /// Build the index from a roster snapshot.
    ///
    /// Auditor order within a state follows roster order. An auditor listed
    /// twice for the same state (after normalization) appears once. Blank
    /// state names are ignored.
    pub fn build(roster: &[AuditorCoverage]) -> Self {
        let mut by_state: HashMap<String, Vec<DbId>> = HashMap::new();

        for auditor in roster {
            for state in &auditor.states {
                let key = normalize_state(state);
                if key.is_empty() {
                    continue;
                }
                let auditors = by_state.entry(key).or_default();
                if !auditors.contains(&auditor.auditor_id) {
                    auditors.push(auditor.auditor_id);
                }
            }
        }

        Self { by_state }
    }

    /// Build an index directly from `(state, auditors)` pairs.
    ///
    /// State names are normalized; auditor order is taken as given.
    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, Vec<DbId>)>,
    {
        let by_state = entries
            .into_iter()
            .map(|(state, auditors)| (normalize_state(state.as_ref()), auditors))
            .collect();
        Self { by_state }
    }

    /// Auditors covering `state` (normalized before lookup). Empty if none.
    pub fn auditors_for(&self, state: &str) -> &[DbId] {
        self.by_state
            .get(&normalize_state(state))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of states with at least one entry.
    pub fn state_count(&self) -> usize {
        self.by_state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_state.is_empty()
    }
}
