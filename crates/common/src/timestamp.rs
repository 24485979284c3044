//! Timestamp utilities.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A wrapper around DateTime<Local> with consistent formatting.
///
/// Modification times are kept in local time and rendered without any
/// timezone normalization, matching how mtime assertions are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Local>);

impl Timestamp {
    /// Create a new timestamp from the current time.
    pub fn now() -> Self {
        Timestamp(Local::now())
    }

    /// Create a timestamp from a DateTime<Local>.
    pub fn from_datetime(dt: DateTime<Local>) -> Self {
        Timestamp(dt)
    }

    /// Create a timestamp from a SystemTime (e.g. a file mtime).
    pub fn from_system_time(t: SystemTime) -> Self {
        let secs = t
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Timestamp(
            Local
                .timestamp_opt(secs, 0)
                .earliest()
                .unwrap_or_else(Local::now),
        )
    }

    /// Get the inner DateTime<Local>.
    pub fn inner(&self) -> DateTime<Local> {
        self.0
    }

    /// Format as `YYYY-MM-DD HH:MM:SS`, the form mtime assertions use.
    pub fn to_datetime_string(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_datetime_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_string_format() {
        let dt = Local.with_ymd_and_hms(2015, 9, 1, 23, 11, 3).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_datetime_string(), "2015-09-01 23:11:03");
    }

    #[test]
    fn test_timestamp_serialization() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts.inner().timestamp(), parsed.inner().timestamp());
    }
}
