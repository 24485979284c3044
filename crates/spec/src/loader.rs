//! Specification loading.
//!
//! A run either gets a usable [`CheckSet`] or a
//! [`Error::SpecUnavailable`] telling the caller it never ran. Nothing
//! in between: decode problems do not surface as failed assertions.

use crate::model::CheckSet;
use infracheck_common::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Load a specification from a YAML file.
pub fn load_path(path: &Path) -> Result<CheckSet> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::SpecUnavailable(format!("cannot read {}: {}", path.display(), e)))?;
    debug!("loaded specification from {}", path.display());
    from_yaml_str(&raw)
}

/// Decode a specification from YAML text.
pub fn from_yaml_str(raw: &str) -> Result<CheckSet> {
    let set: CheckSet = serde_yaml::from_str(raw)
        .map_err(|e| Error::SpecUnavailable(format!("cannot decode specification: {}", e)))?;
    finish(set)
}

/// Decode a specification from an already-parsed value, for callers that
/// obtain their configuration elsewhere (an orchestration pillar, an API).
pub fn from_value(value: serde_json::Value) -> Result<CheckSet> {
    let set: CheckSet = serde_json::from_value(value)
        .map_err(|e| Error::SpecUnavailable(format!("cannot decode specification: {}", e)))?;
    finish(set)
}

fn finish(set: CheckSet) -> Result<CheckSet> {
    if set.is_empty() {
        return Err(Error::SpecUnavailable(
            "specification contains no checks".to_string(),
        ));
    }
    set.log_unrecognized();
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_specification_is_unavailable() {
        let err = from_yaml_str("{}").unwrap_err();
        assert!(matches!(err, Error::SpecUnavailable(_)));
    }

    #[test]
    fn test_unparseable_specification_is_unavailable() {
        let err = from_yaml_str(": not yaml : [").unwrap_err();
        assert!(matches!(err, Error::SpecUnavailable(_)));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load_path(Path::new("/nonexistent/checks.yaml")).unwrap_err();
        assert!(matches!(err, Error::SpecUnavailable(_)));
    }

    #[test]
    fn test_from_value() {
        let value = serde_json::json!({
            "file": {"/etc/hosts": {"exists": true}}
        });
        let set = from_value(value).unwrap();
        assert_eq!(set.file["/etc/hosts"].exists, Some(true));
    }
}
