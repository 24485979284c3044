//! Inspection error taxonomy.

use thiserror::Error;

/// Errors raised while inspecting host state.
///
/// Probes convert every one of these into a failed assertion entry; none
/// of them aborts a run.
#[derive(Error, Debug)]
pub enum FactError {
    /// The key does not exist on this system. Kept distinct from a value
    /// mismatch so the failure entry can say so.
    #[error("{0} is not a valid sysctl setting")]
    InvalidSysctlKey(String),

    /// The inspection itself failed (command trouble, unreadable file).
    #[error("cannot inspect {what}: {reason}")]
    Inspection { what: String, reason: String },

    /// The target identifier is not something this provider understands.
    #[error("unsupported target: {0}")]
    Unsupported(String),
}

impl FactError {
    pub fn inspection(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        FactError::Inspection {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for fact accessors.
pub type FactResult<T> = std::result::Result<T, FactError>;
