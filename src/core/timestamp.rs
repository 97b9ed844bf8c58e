//! Timestamp encoding for log output
//!
//! Downstream consumers of the legacy logs key on a single `time` field in
//! ISO 8601 form, so neither the key nor the layout is configurable.

use chrono::{DateTime, Utc};

/// Output key holding the record timestamp
pub const TIME_KEY: &str = "time";

/// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format a `DateTime<Utc>` with [`TIME_FORMAT`]
///
/// # Examples
///
/// ```
/// use klog_compat::core::timestamp::format_time;
/// use chrono::Utc;
///
/// let timestamp = format_time(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[must_use]
pub fn format_time(datetime: &DateTime<Utc>) -> String {
    datetime.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(&fixed_datetime()), "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_time_key_is_fixed() {
        assert_eq!(TIME_KEY, "time");
    }
}
