//! Sources of UTC offsets for rendering wall-clock time.

use crate::consts::SECONDS_PER_MINUTE;
use crate::types::{Instant, UtcOffset};
use chrono::{Local, Offset, TimeZone};

/// Supplies the UTC offset in force at a given instant.
///
/// Queried once per conversion and never cached, since the answer may change
/// with the instant (daylight-saving transitions).
pub trait OffsetProvider {
    fn offset_at(&self, instant: Instant) -> UtcOffset;
}

/// A fixed offset, independent of the instant
impl OffsetProvider for UtcOffset {
    fn offset_at(&self, _instant: Instant) -> UtcOffset {
        *self
    }
}

/// The host's configured time zone.
///
/// Output depends on the machine: the same instant formatted on hosts with
/// different zones yields different offsets. Seconds components of historical
/// offsets are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalOffset;

impl OffsetProvider for LocalOffset {
    fn offset_at(&self, instant: Instant) -> UtcOffset {
        let Some(utc) = instant.to_utc() else {
            log::debug!("instant {instant} outside the host calendar range, using UTC");
            return UtcOffset::UTC;
        };
        let seconds = Local
            .offset_from_utc_datetime(&utc.naive_utc())
            .fix()
            .local_minus_utc();
        UtcOffset::from_minutes(seconds / SECONDS_PER_MINUTE).unwrap_or_else(|err| {
            log::debug!("host offset of {seconds}s rejected ({err}), using UTC");
            UtcOffset::UTC
        })
    }
}
