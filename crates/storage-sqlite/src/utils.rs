//! Helpers shared by the repository implementations.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::StorageError;

/// Stamps the current instant in the RFC 3339 form stored in timestamp
/// columns, e.g. `2023-01-03T21:00:00.123456789Z`.
pub fn now_storage_timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
}

/// Parses a stored timestamp.
///
/// Accepts RFC 3339 (what the repositories write) and the space-separated
/// form SQLite's own datetime() default produces for rows created outside
/// the repositories.
pub fn parse_storage_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| StorageError::Corrupted(format!("'{}' is not a stored timestamp", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips() {
        let stamp = now_storage_timestamp();
        assert!(parse_storage_timestamp(&stamp).is_ok());
    }

    #[test]
    fn accepts_sqlite_default_format() {
        assert!(parse_storage_timestamp("2023-01-03 21:00:00").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_storage_timestamp("not-a-timestamp").is_err());
    }
}
