//! Expected-value types used by specification attributes.

use serde::Deserialize;
use std::fmt;

/// An attribute value that may be written as a scalar or as a list.
///
/// A scalar behaves exactly like a one-element list: the walker expands
/// list-valued attributes into one probe per element either way.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View the value as a slice, whichever way it was written.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v.as_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

/// A file mode expectation, written either as an integer (`644`) or as a
/// string (`"644"`, `"0644"`).
///
/// YAML quirk to be aware of: an unquoted leading-zero literal like `0644`
/// parses as an octal integer. Quote modes in specification files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModeSpec {
    Int(u64),
    Text(String),
}

/// A scalar expectation whose comparison happens on the rendered string
/// form (used by sysctl values, which read back as text).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", *b as u8),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Text(s) => write!(f, "{}", s),
        }
    }
}
