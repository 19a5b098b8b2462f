//! ISO 8601 parsing for [`Instant`] and [`UtcOffset`].
//!
//! Accepted shapes, after trimming surrounding whitespace:
//!
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD` (UTC midnight)
//! - any of the above followed by `THH:mm[:ss[.fff]]` and `Z` or `±HH:MM`
//!
//! Fractional seconds may carry any number of digits and are truncated to
//! milliseconds.

use crate::consts::{
    DATE_SEPARATOR, FRACTION_DIGITS, FRACTION_SEPARATOR, MAX_HOUR, MAX_MINUTE, MAX_MONTH,
    MAX_SECOND, MILLIS_PER_MINUTE, MINUTES_PER_HOUR, TIME_DESIGNATOR, TIME_SEPARATOR,
    UTC_DESIGNATOR,
};
use crate::prelude::*;
use crate::types::{Instant, UtcOffset};
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u32),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u32),
    #[display(fmt = "Invalid second: {} (must be 0-{})", "_0", MAX_SECOND)]
    InvalidSecond(u32),
    #[display(fmt = "Invalid UTC offset: {_0}")]
    InvalidOffset(String),
    #[display(fmt = "Missing UTC offset designator in time: {_0}")]
    MissingOffset(String),
}

impl std::error::Error for ParseError {}

impl FromStr for Instant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        match trimmed.split_once(TIME_DESIGNATOR) {
            // Date-only forms are UTC
            None => Ok(to_instant(parse_date(trimmed)?, NaiveTime::default(), UtcOffset::UTC)),
            Some((date_part, time_part)) => {
                let date = parse_date(date_part)?;
                let (clock, offset) = split_offset(time_part)?;
                let time = parse_clock(clock)?;
                Ok(to_instant(date, time, offset))
            }
        }
    }
}

impl FromStr for UtcOffset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidOffset(s.to_owned());
        let trimmed = s.trim();
        if trimmed.len() == 1 && trimmed.starts_with(UTC_DESIGNATOR) {
            return Ok(Self::UTC);
        }

        let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else {
            return Err(invalid());
        };

        let (hours, minutes) = rest.split_once(TIME_SEPARATOR).ok_or_else(invalid)?;
        let hours = parse_fixed(hours, 2).map_err(|_| invalid())?;
        let minutes = parse_fixed(minutes, 2).map_err(|_| invalid())?;
        if hours > MAX_HOUR || minutes > MAX_MINUTE {
            return Err(invalid());
        }

        // both fields are two digits, so the cast cannot truncate
        #[allow(clippy::cast_possible_wrap)]
        let total = (hours * MINUTES_PER_HOUR.unsigned_abs() + minutes) as i32;
        Self::from_minutes(if negative { -total } else { total })
    }
}

/// Parses a field that must be exactly `width` ASCII digits
fn parse_fixed(s: &str, width: usize) -> Result<u32, ParseError> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<u32>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
    let (year, month, day) = match parts.as_slice() {
        [y] => (parse_fixed(y, 4)?, 1, 1),
        [y, m] => (parse_fixed(y, 4)?, parse_fixed(m, 2)?, 1),
        [y, m, d] => (parse_fixed(y, 4)?, parse_fixed(m, 2)?, parse_fixed(d, 2)?),
        _ => {
            return Err(ParseError::InvalidFormat(format!(
                "Too many {} separators: expected 0-2, found {}",
                DATE_SEPARATOR,
                parts.len() - 1
            )));
        }
    };

    if !(1..=MAX_MONTH).contains(&month) {
        return Err(ParseError::InvalidMonth(month));
    }

    // four digits always fit
    #[allow(clippy::cast_possible_wrap)]
    let year = year as i32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDay { year, month, day })
}

/// Splits `HH:mm[:ss[.fff]]` from its trailing `Z` or `±HH:MM`
fn split_offset(s: &str) -> Result<(&str, UtcOffset), ParseError> {
    if let Some(clock) = s.strip_suffix(UTC_DESIGNATOR) {
        return Ok((clock, UtcOffset::UTC));
    }
    match s.rfind(['+', '-']) {
        Some(pos) => Ok((&s[..pos], s[pos..].parse()?)),
        None => Err(ParseError::MissingOffset(s.to_owned())),
    }
}

fn parse_clock(s: &str) -> Result<NaiveTime, ParseError> {
    let parts: Vec<&str> = s.split(TIME_SEPARATOR).collect();
    let (hour, minute, seconds) = match parts.as_slice() {
        [h, m] => (parse_fixed(h, 2)?, parse_fixed(m, 2)?, None),
        [h, m, s] => (parse_fixed(h, 2)?, parse_fixed(m, 2)?, Some(*s)),
        _ => return Err(ParseError::InvalidFormat(s.to_owned())),
    };

    let (second, milli) = match seconds {
        None => (0, 0),
        Some(field) => match field.split_once(FRACTION_SEPARATOR) {
            None => (parse_fixed(field, 2)?, 0),
            Some((whole, fraction)) => (parse_fixed(whole, 2)?, parse_millis(fraction)?),
        },
    };

    if hour > MAX_HOUR {
        return Err(ParseError::InvalidHour(hour));
    }
    if minute > MAX_MINUTE {
        return Err(ParseError::InvalidMinute(minute));
    }
    if second > MAX_SECOND {
        return Err(ParseError::InvalidSecond(second));
    }

    NaiveTime::from_hms_milli_opt(hour, minute, second, milli)
        .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))
}

/// Keeps the first three fraction digits, right-padding shorter fractions
fn parse_millis(fraction: &str) -> Result<u32, ParseError> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(fraction.to_owned()));
    }
    let kept: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(FRACTION_DIGITS)
        .collect();
    parse_fixed(&kept, FRACTION_DIGITS)
}

fn to_instant(date: NaiveDate, time: NaiveTime, offset: UtcOffset) -> Instant {
    let local_millis = date.and_time(time).and_utc().timestamp_millis();
    Instant::from_unix_millis(local_millis - i64::from(offset.minutes()) * MILLIS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(s: &str) -> i64 {
        s.parse::<Instant>().unwrap().unix_millis()
    }

    #[test]
    fn test_parse_utc_designator() {
        assert_eq!(millis("1970-01-01T00:00:00Z"), 0);
        assert_eq!(millis("2023-10-12T04:56:13Z"), 1_697_086_573_000);
    }

    #[test]
    fn test_parse_numeric_offset() {
        assert_eq!(millis("2023-10-12T13:56:13+09:00"), 1_697_086_573_000);
        assert_eq!(millis("2023-10-11T23:26:13-05:30"), 1_697_086_573_000);
        assert_eq!(millis("1970-01-01T00:00:00+00:00"), 0);
        assert_eq!(millis("1970-01-01T00:00:00-00:00"), 0);
    }

    #[test]
    fn test_parse_date_only_forms_are_utc_midnight() {
        assert_eq!(millis("2023-09-20"), millis("2023-09-20T00:00:00Z"));
        assert_eq!(millis("2023-09"), millis("2023-09-01T00:00:00Z"));
        assert_eq!(millis("2023"), millis("2023-01-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_optional_seconds() {
        assert_eq!(millis("2023-01-01T10:20Z"), millis("2023-01-01T10:20:00Z"));
    }

    #[test]
    fn test_parse_fraction_truncates_to_millis() {
        assert_eq!(millis("1970-01-01T00:00:00.5Z"), 500);
        assert_eq!(millis("1970-01-01T00:00:00.12Z"), 120);
        assert_eq!(millis("1970-01-01T00:00:00.123Z"), 123);
        assert_eq!(millis("1970-01-01T00:00:00.123999999Z"), 123);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(millis("  1970-01-01T00:00:01Z\n"), 1_000);
    }

    #[test]
    fn test_parse_leap_day() {
        assert!("2024-02-29T00:00:00Z".parse::<Instant>().is_ok());
        assert!("2000-02-29".parse::<Instant>().is_ok());
        assert!(matches!(
            "2023-02-29T00:00:00Z".parse::<Instant>(),
            Err(ParseError::InvalidDay { year: 2023, month: 2, day: 29 })
        ));
        assert!(matches!(
            "1900-02-29".parse::<Instant>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_impossible_fields() {
        assert!(matches!(
            "2023-13-01T00:00:00Z".parse::<Instant>(),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            "2023-00-01".parse::<Instant>(),
            Err(ParseError::InvalidMonth(0))
        ));
        assert!(matches!(
            "2023-04-31T00:00:00Z".parse::<Instant>(),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            "2023-01-00".parse::<Instant>(),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            "2023-01-01T24:00:00Z".parse::<Instant>(),
            Err(ParseError::InvalidHour(24))
        ));
        assert!(matches!(
            "2023-01-01T00:60:00Z".parse::<Instant>(),
            Err(ParseError::InvalidMinute(60))
        ));
        assert!(matches!(
            "2023-01-01T00:00:60Z".parse::<Instant>(),
            Err(ParseError::InvalidSecond(60))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!("".parse::<Instant>(), Err(ParseError::EmptyInput));
        assert_eq!("   ".parse::<Instant>(), Err(ParseError::EmptyInput));
        assert!(matches!(
            "invalid-date".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "23-01-01".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-1-1".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-01-01".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-01T00:00:00.Z".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-01T0:00:00Z".parse::<Instant>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_requires_offset_with_time() {
        assert!(matches!(
            "2023-01-01T00:00:00".parse::<Instant>(),
            Err(ParseError::MissingOffset(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_offsets() {
        for input in [
            "2023-01-01T00:00:00+24:00",
            "2023-01-01T00:00:00+09:60",
            "2023-01-01T00:00:00+0900",
            "2023-01-01T00:00:00+9:00",
        ] {
            assert!(
                matches!(input.parse::<Instant>(), Err(ParseError::InvalidOffset(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_offset_from_str() {
        assert_eq!("Z".parse::<UtcOffset>().unwrap(), UtcOffset::UTC);
        assert_eq!("+09:00".parse::<UtcOffset>().unwrap().minutes(), 540);
        assert_eq!("-03:30".parse::<UtcOffset>().unwrap().minutes(), -210);
        assert!("09:00".parse::<UtcOffset>().is_err());
        assert!("+23:59".parse::<UtcOffset>().is_ok());
    }

    #[test]
    fn test_parse_display_round_trip() {
        let instant = "2023-10-12T13:56:13.250+09:00".parse::<Instant>().unwrap();
        assert_eq!(instant.to_string(), "2023-10-12T04:56:13.250Z");
        assert_eq!(instant.to_string().parse::<Instant>().unwrap(), instant);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            ParseError::InvalidDay { year: 2023, month: 2, day: 30 }.to_string(),
            "Invalid day 30 for month 2023-02"
        );
    }
}
