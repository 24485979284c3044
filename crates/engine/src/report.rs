//! Per-run result accumulation.

use serde::Serialize;

/// Pass/fail tallies for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(rename = "Pass")]
    pub pass: usize,
    #[serde(rename = "Fail")]
    pub fail: usize,
}

/// Accumulated assertion outcomes for one run.
///
/// Constructed fresh per run and owned by the run's [`crate::Checker`];
/// two runs never share a store, so totals always equal exactly the
/// entries appended by that run's probes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    #[serde(rename = "Passed")]
    pub passed: Vec<String>,
    #[serde(rename = "Failed")]
    pub failed: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one passing assertion.
    pub fn pass(&mut self, entry: impl Into<String>) {
        self.passed.push(entry.into());
    }

    /// Record one failing assertion.
    pub fn fail(&mut self, entry: impl Into<String>) {
        self.failed.push(entry.into());
    }

    /// Tallies: a pure fold over the two sequences. Entries are never
    /// deduplicated; asserting the same thing twice counts twice.
    pub fn totals(&self) -> Totals {
        Totals {
            pass: self.passed.len(),
            fail: self.failed.len(),
        }
    }

    /// Total number of probe invocations recorded.
    pub fn len(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passed.is_empty() && self.failed.is_empty()
    }
}
