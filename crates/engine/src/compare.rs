//! Comparison policies shared by the probes.
//!
//! These are the only places where expected and actual values are coerced
//! before comparison; every conversion is listed here rather than spread
//! through the probes.

use infracheck_spec::ModeSpec;

/// Normalize a mode expectation to its comparison form.
///
/// An integer renders as its decimal digits; a string of exactly three
/// characters gains a leading zero (`644` and `"644"` both become
/// `"0644"`). Strings of any other length pass through untouched, so
/// `"44"` stays `"44"` and `"4755"` stays `"4755"`.
pub fn normalize_mode(expected: &ModeSpec) -> String {
    let text = match expected {
        ModeSpec::Int(n) => n.to_string(),
        ModeSpec::Text(s) => s.clone(),
    };
    if text.len() == 3 {
        format!("0{}", text)
    } else {
        text
    }
}

/// Render actual permission bits the way mode assertions are written:
/// a leading zero followed by the octal digits.
pub fn format_mode(mode: u32) -> String {
    format!("0{:o}", mode)
}

/// Package versions match on prefix, so `2.0` accepts `2.0-pre4-1`
/// without naming the packaging suffix.
pub fn version_matches(actual: &str, expected: &str) -> bool {
    actual.starts_with(expected)
}

/// Join a multi-valued fact for order-sensitive comparison against a
/// comma-separated expectation.
pub fn join_csv<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
