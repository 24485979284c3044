//! The assertion evaluation and aggregation engine.
//!
//! Walks a decoded specification tree, fans each (target, attribute) pair
//! out to a typed probe against a [`infracheck_facts::FactSource`], and
//! accumulates one human-readable entry per probe into a per-run
//! [`Report`]. A run always completes and yields tallies; only the total
//! absence of a specification aborts, and that happens before the engine
//! is ever entered.

pub mod compare;
pub mod probes;
pub mod report;
pub mod run;

#[cfg(test)]
mod testutil;

pub use probes::Checker;
pub use report::{Report, Totals};
pub use run::{run_all, RunOutput, RunReport};
