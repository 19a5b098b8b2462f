//! Comparison of ISO 8601 date-time strings and conversion of Unix timestamps.
//!
//! Every input string is parsed into an [`Instant`] before comparing, so the
//! same moment written with different offsets (`Z`, `+00:00`, `+09:00`)
//! compares equal. Parse failures surface as [`DatetimeError`] naming the
//! operation and the offending argument, with the [`ParseError`] as source.

use crate::consts::{MAX_UNIX_TIME, MAX_YEAR, MILLIS_PER_SECOND, SECONDS_PER_MINUTE};
use crate::offset::{LocalOffset, OffsetProvider};
use crate::prelude::*;
use crate::range::OpenRange;
use crate::types::Instant;
use crate::ParseError;
use chrono::{Datelike, FixedOffset};

/// The public operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Operation {
    #[display(fmt = "is_before_iso")]
    IsBefore,
    #[display(fmt = "is_after_iso")]
    IsAfter,
    #[display(fmt = "is_equal_iso")]
    IsEqual,
    #[display(fmt = "is_between_iso")]
    IsBetween,
    #[display(fmt = "unix_time_to_iso8601")]
    UnixTimeToIso8601,
}

#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum UnixTimeError {
    #[display(fmt = "Unix time is NaN")]
    NotANumber,
    #[display(fmt = "Unix time is infinite")]
    Infinite,
    #[display(fmt = "Unix time must be non-negative, got {_0}")]
    Negative(f64),
    #[display(fmt = "Unix time {_0} cannot be rendered with a four-digit year")]
    OutOfRange(f64),
}

impl std::error::Error for UnixTimeError {}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatetimeError {
    /// One of the compared strings is not a valid ISO 8601 date-time.
    #[error("{operation} failed: invalid date string for `{argument}`")]
    InvalidDate {
        operation: Operation,
        argument:  &'static str,
        #[source]
        source:    ParseError,
    },

    /// The timestamp handed to the converter is unusable.
    #[error("unix_time_to_iso8601 failed: invalid unix time")]
    InvalidUnixTime(#[from] UnixTimeError),
}

impl DatetimeError {
    /// The operation that produced this error
    pub const fn operation(&self) -> Operation {
        match self {
            Self::InvalidDate { operation, .. } => *operation,
            Self::InvalidUnixTime(_) => Operation::UnixTimeToIso8601,
        }
    }
}

fn parse_arg(operation: Operation, argument: &'static str, value: &str) -> Result<Instant, DatetimeError> {
    value.parse::<Instant>().map_err(|source| {
        log::debug!("{operation}: rejected `{argument}` = {value:?}: {source}");
        DatetimeError::InvalidDate {
            operation,
            argument,
            source,
        }
    })
}

fn parse_pair(operation: Operation, a: &str, b: &str) -> Result<(Instant, Instant), DatetimeError> {
    Ok((parse_arg(operation, "a", a)?, parse_arg(operation, "b", b)?))
}

/// Returns true if `a` is strictly before `b`.
///
/// # Errors
/// Returns `DatetimeError::InvalidDate` if either string fails to parse.
pub fn is_before_iso(a: &str, b: &str) -> Result<bool, DatetimeError> {
    let (a, b) = parse_pair(Operation::IsBefore, a, b)?;
    Ok(a < b)
}

/// Returns true if `a` is strictly after `b`.
///
/// # Errors
/// Returns `DatetimeError::InvalidDate` if either string fails to parse.
pub fn is_after_iso(a: &str, b: &str) -> Result<bool, DatetimeError> {
    let (a, b) = parse_pair(Operation::IsAfter, a, b)?;
    Ok(a > b)
}

/// Returns true if `a` and `b` denote the same millisecond, whatever their offsets.
///
/// # Errors
/// Returns `DatetimeError::InvalidDate` if either string fails to parse.
pub fn is_equal_iso(a: &str, b: &str) -> Result<bool, DatetimeError> {
    let (a, b) = parse_pair(Operation::IsEqual, a, b)?;
    Ok(a == b)
}

/// Returns true if `start < target < end`. Both endpoints are excluded:
/// a `target` equal to `start` or `end` yields `false`.
///
/// # Errors
/// Returns `DatetimeError::InvalidDate` if any of the three strings fails to parse.
pub fn is_between_iso(target: &str, start: &str, end: &str) -> Result<bool, DatetimeError> {
    let operation = Operation::IsBetween;
    let target = parse_arg(operation, "target", target)?;
    let start = parse_arg(operation, "start", start)?;
    let end = parse_arg(operation, "end", end)?;
    let range = OpenRange::new(start, end);
    log::trace!("{operation}: {target} in {range}");
    Ok(range.contains(target))
}

/// Formats a Unix timestamp as `YYYY-MM-DDTHH:mm:ss±HH:MM` in the host's
/// local offset. See [`unix_time_to_iso8601_with`].
///
/// # Errors
/// Returns `DatetimeError::InvalidUnixTime` for NaN, infinite, negative or
/// out-of-range input.
pub fn unix_time_to_iso8601(unix_time: f64) -> Result<String, DatetimeError> {
    unix_time_to_iso8601_with(unix_time, &LocalOffset)
}

/// Formats a Unix timestamp (seconds) as `YYYY-MM-DDTHH:mm:ss±HH:MM`, using
/// the offset `offsets` reports for that instant.
///
/// The offset is always numeric, `+00:00` rather than `Z`. Fractional seconds
/// are truncated to milliseconds and do not appear in the output.
///
/// # Errors
/// Returns `DatetimeError::InvalidUnixTime` for NaN, infinite, negative or
/// out-of-range input.
pub fn unix_time_to_iso8601_with<P>(unix_time: f64, offsets: &P) -> Result<String, DatetimeError>
where
    P: OffsetProvider + ?Sized,
{
    let instant = validate_unix_time(unix_time).inspect_err(|err| {
        log::debug!("{}: rejected {unix_time}: {err}", Operation::UnixTimeToIso8601);
    })?;
    let offset = offsets.offset_at(instant);
    log::trace!("rendering {instant} at offset {offset}");

    let wall_clock = FixedOffset::east_opt(offset.minutes() * SECONDS_PER_MINUTE)
        .zip(instant.to_utc())
        .map(|(fixed, utc)| utc.with_timezone(&fixed))
        .filter(|local| local.year() <= MAX_YEAR)
        .ok_or(UnixTimeError::OutOfRange(unix_time))?;

    Ok(format!("{}{offset}", wall_clock.format("%Y-%m-%dT%H:%M:%S")))
}

fn validate_unix_time(unix_time: f64) -> Result<Instant, UnixTimeError> {
    if unix_time.is_nan() {
        return Err(UnixTimeError::NotANumber);
    }
    if unix_time.is_infinite() {
        return Err(UnixTimeError::Infinite);
    }
    if unix_time < 0.0 {
        return Err(UnixTimeError::Negative(unix_time));
    }
    if unix_time > MAX_UNIX_TIME {
        return Err(UnixTimeError::OutOfRange(unix_time));
    }

    // bounded above by MAX_UNIX_TIME, so the product fits in an i64
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let millis = (unix_time * MILLIS_PER_SECOND as f64).trunc() as i64;
    Ok(Instant::from_unix_millis(millis))
}
