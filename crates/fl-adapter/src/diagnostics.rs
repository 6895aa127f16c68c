//! Per-adapter counters for absorbed failures.

use crate::sanitizer::StateField;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of everything the adapter absorbed instead of surfacing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Successful solver steps
    pub frames_stepped: u64,
    /// `update` calls skipped for an invalid `dt`
    pub frames_skipped: u64,
    /// Property reads replaced by a default
    pub property_read_failures: u64,
    /// Property writes that failed and were ignored
    pub property_write_failures: u64,
    /// Non-finite replacements, keyed by property path
    pub non_finite: BTreeMap<&'static str, u64>,
}

impl Diagnostics {
    pub fn record_non_finite(&mut self, fields: &[StateField]) {
        for field in fields {
            *self.non_finite.entry(field.name()).or_insert(0) += 1;
        }
    }

    pub fn non_finite_count(&self, field: StateField) -> u64 {
        self.non_finite.get(field.name()).copied().unwrap_or(0)
    }

    pub fn total_non_finite(&self) -> u64 {
        self.non_finite.values().sum()
    }
}
