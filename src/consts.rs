/// Maximum year representable in the four-digit ISO 8601 year field (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Maximum valid hour of day
pub const MAX_HOUR: u32 = 23;
/// Maximum valid minute of hour
pub const MAX_MINUTE: u32 = 59;
/// Maximum valid second of minute (leap seconds are rejected)
pub const MAX_SECOND: u32 = 59;

pub const MINUTES_PER_HOUR: i32 = 60;
pub const SECONDS_PER_MINUTE: i32 = 60;
pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;

/// Largest offset magnitude in minutes (`23:59`)
pub const MAX_OFFSET_MINUTES: i32 = 24 * MINUTES_PER_HOUR - 1;

/// Last second rendered with a four-digit year: `9999-12-31T23:59:59Z`
pub const MAX_UNIX_TIME: f64 = 253_402_300_799.0;

/// Date component separator (ISO 8601 extended format)
pub const DATE_SEPARATOR: char = '-';
/// Separates the date from the time of day
pub const TIME_DESIGNATOR: char = 'T';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Separates whole seconds from the fraction
pub const FRACTION_SEPARATOR: char = '.';
/// Zero-offset designator
pub const UTC_DESIGNATOR: char = 'Z';

/// Digits kept from a fractional second
pub(crate) const FRACTION_DIGITS: usize = 3;

/// Field separator used in CSV output
pub const CSV_FIELD_SEPARATOR: &str = ",";
