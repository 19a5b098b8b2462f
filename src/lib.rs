//! Small data-shaping helpers.
//!
//! The center of the crate is ISO 8601 handling: [`is_before_iso`],
//! [`is_after_iso`], [`is_equal_iso`] and [`is_between_iso`] compare date-time
//! strings as instants, and [`unix_time_to_iso8601`] renders a Unix timestamp
//! in the host's local offset. Alongside sit array chunking, numeric
//! aggregation, CSV buffer construction and padding helpers.
//!
//! ```
//! use datashape::{is_between_iso, unix_time_to_iso8601_with, UtcOffset};
//!
//! assert!(is_between_iso("2023-01-02T00:00:00Z", "2023-01-01T00:00:00Z", "2023-01-03T00:00:00Z").unwrap());
//!
//! let jst = UtcOffset::from_hours(9).unwrap();
//! assert_eq!(unix_time_to_iso8601_with(0.0, &jst).unwrap(), "1970-01-01T09:00:00+09:00");
//! ```

mod consts;
mod prelude;
mod range;
mod types;

pub mod array;
pub mod calc;
pub mod csv;
pub mod datetime;
pub mod encoding;
pub mod offset;
pub mod parse;
pub mod string;

pub use consts::*;
pub use parse::ParseError;
pub use range::OpenRange;
pub use types::{Instant, UtcOffset};

pub use array::{chunk_array, get_sequence, try_get_sequence, ArrayError};
pub use calc::{average, sum};
pub use csv::{convert_to_csv_buffer, convert_to_csv_string, CsvDocument, CsvError, CsvOptions, CsvRows, LineEnding};
pub use datetime::{
    is_after_iso, is_before_iso, is_between_iso, is_equal_iso, unix_time_to_iso8601, unix_time_to_iso8601_with,
    DatetimeError, Operation, UnixTimeError,
};
pub use encoding::{decode, decode_strict, encode, encode_strict, Encoding, EncodingError};
pub use offset::{LocalOffset, OffsetProvider};
pub use string::{is_empty_string, pad_string, Alignment};
