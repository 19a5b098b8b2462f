//! CSV text and byte-buffer construction.
//!
//! Fields are written verbatim: no quoting or escaping is applied, so callers
//! must not pass values containing the separator or line endings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::CSV_FIELD_SEPARATOR;
use crate::encoding::{self, Encoding, EncodingError};

/// Error related to CSV operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    #[error("failed to convert to csv buffer")]
    Encode(#[from] EncodingError),
}

/// Line terminator written after every line, including the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    #[serde(rename = "\n")]
    Lf,
    #[serde(rename = "\r\n")]
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Output settings; every field falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub eol:      LineEnding,
    pub encoding: Encoding,
    /// Fail on characters the encoding cannot represent instead of writing `?`
    pub strict:   bool,
}

/// Data rows, either positional or keyed by header name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CsvRows {
    Records(Vec<Vec<String>>),
    Objects(Vec<Map<String, Value>>),
}

impl Default for CsvRows {
    fn default() -> Self {
        Self::Records(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CsvDocument {
    pub header: Vec<String>,
    #[serde(default)]
    pub rows:   CsvRows,
}

impl CsvDocument {
    pub fn new(header: Vec<String>, rows: CsvRows) -> Self {
        Self { header, rows }
    }

    /// Number of data rows, excluding the header
    pub fn len(&self) -> usize {
        match &self.rows {
            CsvRows::Records(rows) => rows.len(),
            CsvRows::Objects(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders an object row field. Missing keys and `null` become empty fields,
/// strings are written raw, anything else as its JSON text.
fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn push_line<I, S>(out: &mut String, fields: I, eol: LineEnding)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push_str(CSV_FIELD_SEPARATOR);
        }
        out.push_str(field.as_ref());
    }
    out.push_str(eol.as_str());
}

/// Builds the CSV text: the header line, then one line per row.
pub fn convert_to_csv_string(csv: &CsvDocument, options: &CsvOptions) -> String {
    let mut out = String::new();
    push_line(&mut out, &csv.header, options.eol);
    match &csv.rows {
        CsvRows::Records(rows) => {
            for row in rows {
                push_line(&mut out, row, options.eol);
            }
        }
        CsvRows::Objects(rows) => {
            for row in rows {
                let fields = csv.header.iter().map(|h| render_value(row.get(h)));
                push_line(&mut out, fields, options.eol);
            }
        }
    }
    out
}

/// Builds the CSV text and encodes it with `options.encoding`.
///
/// Unrepresentable characters are written as `?` unless `options.strict` is set.
///
/// # Errors
/// Returns `CsvError::Encode` in strict mode if the text cannot be represented
/// in the requested encoding.
pub fn convert_to_csv_buffer(csv: &CsvDocument, options: &CsvOptions) -> Result<Vec<u8>, CsvError> {
    let text = convert_to_csv_string(csv, options);
    if !options.strict {
        return Ok(encoding::encode(&text, options.encoding));
    }
    encoding::encode_strict(&text, options.encoding).map_err(|err| {
        log::debug!("convert_to_csv_buffer: {} rows failed to encode: {err}", csv.len());
        CsvError::from(err)
    })
}
