use crate::consts::{MAX_OFFSET_MINUTES, MILLIS_PER_SECOND, MINUTES_PER_HOUR};
use crate::prelude::*;
use crate::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time, stored as milliseconds since `1970-01-01T00:00:00Z`.
///
/// Ordering and equality only look at the epoch value, so the same moment
/// written with different offsets compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
pub struct Instant(i64);

impl Instant {
    /// The Unix epoch
    pub const EPOCH: Self = Self(0);

    /// Creates an instant from milliseconds since the Unix epoch
    #[inline]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch
    #[inline]
    pub const fn unix_millis(self) -> i64 {
        self.0
    }

    /// Whole seconds since the Unix epoch, rounded towards negative infinity
    #[inline]
    pub const fn unix_seconds(self) -> i64 {
        self.0.div_euclid(MILLIS_PER_SECOND)
    }

    pub(crate) fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            // outside chrono's range, fall back to the raw epoch value
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A UTC offset in whole minutes, guaranteed to lie within `-23:59..=+23:59`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The zero offset
    pub const UTC: Self = Self(0);

    /// Creates an offset from signed minutes east of UTC
    ///
    /// # Errors
    /// Returns `ParseError::InvalidOffset` if the magnitude exceeds 23:59.
    pub fn from_minutes(minutes: i32) -> Result<Self, ParseError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ParseError::InvalidOffset(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    /// Creates an offset from whole hours east of UTC
    ///
    /// # Errors
    /// Returns `ParseError::InvalidOffset` if the magnitude exceeds 23:59.
    pub fn from_hours(hours: i32) -> Result<Self, ParseError> {
        Self::from_minutes(hours.saturating_mul(MINUTES_PER_HOUR))
    }

    /// Creates an offset from hours and minutes; the sign of `hours` applies to both.
    /// Use a negative `minutes` with zero `hours` for offsets like `-00:30`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidOffset` if `minutes` is not below 60 or the
    /// magnitude exceeds 23:59.
    pub fn from_hours_minutes(hours: i32, minutes: i32) -> Result<Self, ParseError> {
        if minutes.abs() >= MINUTES_PER_HOUR {
            return Err(ParseError::InvalidOffset(format!("{hours}:{minutes}")));
        }
        let total = if hours < 0 {
            hours.saturating_mul(MINUTES_PER_HOUR) - minutes.abs()
        } else {
            hours.saturating_mul(MINUTES_PER_HOUR) + minutes
        };
        Self::from_minutes(total)
    }

    /// Signed minutes east of UTC
    #[inline]
    pub const fn minutes(self) -> i32 {
        self.0
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 >= 0 { '+' } else { '-' };
        let abs = self.0.abs();
        write!(
            f,
            "{sign}{:02}:{:02}",
            abs / MINUTES_PER_HOUR,
            abs % MINUTES_PER_HOUR
        )
    }
}

impl Serialize for UtcOffset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_display_padding_and_sign() {
        assert_eq!(UtcOffset::UTC.to_string(), "+00:00");
        assert_eq!(UtcOffset::from_hours(9).unwrap().to_string(), "+09:00");
        assert_eq!(UtcOffset::from_minutes(-330).unwrap().to_string(), "-05:30");
        assert_eq!(UtcOffset::from_minutes(345).unwrap().to_string(), "+05:45");
        assert_eq!(UtcOffset::from_minutes(-30).unwrap().to_string(), "-00:30");
    }

    #[test]
    fn test_offset_bounds() {
        assert!(UtcOffset::from_minutes(1439).is_ok());
        assert!(UtcOffset::from_minutes(-1439).is_ok());
        assert!(matches!(
            UtcOffset::from_minutes(1440),
            Err(ParseError::InvalidOffset(_))
        ));
        assert!(UtcOffset::from_hours(24).is_err());
        assert!(UtcOffset::from_hours_minutes(5, 60).is_err());
    }

    #[test]
    fn test_offset_from_hours_minutes_sign() {
        assert_eq!(UtcOffset::from_hours_minutes(5, 30).unwrap().minutes(), 330);
        assert_eq!(UtcOffset::from_hours_minutes(-3, 30).unwrap().minutes(), -210);
        assert_eq!(UtcOffset::from_hours_minutes(0, -30).unwrap().minutes(), -30);
    }

    #[test]
    fn test_instant_accessors() {
        let instant = Instant::from_unix_millis(1_697_086_573_999);
        assert_eq!(instant.unix_millis(), 1_697_086_573_999);
        assert_eq!(instant.unix_seconds(), 1_697_086_573);
        assert_eq!(Instant::from_unix_millis(-1).unix_seconds(), -1);
        assert_eq!(i64::from(Instant::EPOCH), 0);
    }

    #[test]
    fn test_instant_display_is_utc_with_millis() {
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            Instant::from_unix_millis(1_697_086_573_120).to_string(),
            "2023-10-12T04:56:13.120Z"
        );
    }

    #[test]
    fn test_serde_as_strings() {
        let instant = Instant::from_unix_millis(1_000);
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:01.000Z\"");
        let back: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instant);

        let offset: UtcOffset = serde_json::from_str("\"-08:00\"").unwrap();
        assert_eq!(offset.minutes(), -480);
        assert!(serde_json::from_str::<UtcOffset>("\"+25:00\"").is_err());
    }
}
