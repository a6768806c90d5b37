//! Lenient calendar-date parsing for scraped records.
//!
//! Scraped dates arrive in a few shapes:
//!
//! - Plain ISO date: `2026-02-28`
//! - RFC 3339 timestamp: `2026-02-28T09:30:00Z`, `2026-02-28T09:30:00+04:00`
//! - Naive timestamp: `2026-02-28T09:30:00`, `2026-02-28 09:30`
//!
//! All of them reduce to a calendar date. Anything else is `None` and the
//! caller picks a default.

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a scraped date string into a calendar date.
///
/// 1. Trim; empty → `None`
/// 2. Try `%Y-%m-%d`
/// 3. Try RFC 3339, taking the date in the timestamp's own offset
/// 4. Try the leading 10 characters as `%Y-%m-%d`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }

    // Naive timestamps: only the date prefix matters.
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse an optional raw field, treating absent and malformed alike.
pub fn parse_opt(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Days between the Unix epoch and `date` (Arrow `Date32` encoding).
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn plain_date() {
        assert_eq!(parse_date("2026-02-28"), Some(d(2026, 2, 28)));
    }

    #[test]
    fn whitespace_trimmed() {
        assert_eq!(parse_date("  2026-02-28 \n"), Some(d(2026, 2, 28)));
    }

    #[test]
    fn rfc3339_keeps_local_date() {
        assert_eq!(parse_date("2026-02-28T23:30:00+04:00"), Some(d(2026, 2, 28)));
        assert_eq!(parse_date("2026-03-01T00:15:00Z"), Some(d(2026, 3, 1)));
    }

    #[test]
    fn naive_timestamp_prefix() {
        assert_eq!(parse_date("2026-02-28T09:30:00"), Some(d(2026, 2, 28)));
        assert_eq!(parse_date("2026-02-28 09:30"), Some(d(2026, 2, 28)));
    }

    #[test]
    fn malformed_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next Tuesday"), None);
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date("28/02/2026"), None);
    }

    #[test]
    fn optional_field() {
        assert_eq!(parse_opt(None), None);
        assert_eq!(parse_opt(Some("bogus")), None);
        assert_eq!(parse_opt(Some("2026-01-05")), Some(d(2026, 1, 5)));
    }

    #[test]
    fn epoch_days() {
        assert_eq!(days_since_epoch(d(1970, 1, 1)), 0);
        assert_eq!(days_since_epoch(d(1970, 1, 11)), 10);
        assert_eq!(days_since_epoch(d(1969, 12, 31)), -1);
    }
}
