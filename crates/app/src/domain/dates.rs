//! Backend dates.
//!
//! Sale and purchase timestamps arrive either as ISO 8601 or, when the
//! backend serializes a native datetime, as RFC 2822 with a `GMT` zone that
//! really holds local wall-clock time.

use jiff::{
    Timestamp, Zoned,
    civil::{Date, DateTime, Time},
    fmt::rfc2822,
    tz::TimeZone,
};

/// Wall-clock time of a backend timestamp, or `None` if it is unreadable.
pub fn parse_datetime(raw: &str) -> Option<DateTime> {
    let raw = raw.trim();

    if let Ok(zoned) = rfc2822::parse(raw) {
        return Some(zoned.datetime());
    }

    if let Ok(timestamp) = raw.parse::<Timestamp>() {
        return Some(timestamp.to_zoned(TimeZone::system()).datetime());
    }

    if let Ok(datetime) = raw.parse::<DateTime>() {
        return Some(datetime);
    }

    raw.parse::<Date>()
        .ok()
        .map(|date| date.to_datetime(Time::midnight()))
}

/// Today's date in the local time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Local wall-clock time, to the second.
pub fn now() -> DateTime {
    let now = Zoned::now().datetime();

    now.date()
        .to_datetime(Time::new(now.hour(), now.minute(), now.second(), 0).unwrap_or(Time::midnight()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn reads_rfc2822_as_wall_clock() {
        assert_eq!(
            parse_datetime("Tue, 14 Jan 2025 10:30:00 GMT"),
            Some(date(2025, 1, 14).at(10, 30, 0, 0))
        );
    }

    #[test]
    fn reads_iso_datetime_and_plain_date() {
        assert_eq!(
            parse_datetime("2025-01-14T10:30:00"),
            Some(date(2025, 1, 14).at(10, 30, 0, 0))
        );
        assert_eq!(
            parse_datetime("2025-01-14"),
            Some(date(2025, 1, 14).at(0, 0, 0, 0))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_datetime("ayer"), None);
    }
}
