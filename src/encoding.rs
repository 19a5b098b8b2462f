//! Text encoding to and from the byte encodings the CSV output supports.

use std::str::FromStr;

use encoding_rs::{EncoderResult, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Supported output encodings, named the way the encoders label them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Encoding {
    #[default]
    #[display(fmt = "utf8")]
    #[serde(rename = "utf8")]
    Utf8,
    #[display(fmt = "Shift_JIS")]
    #[serde(rename = "Shift_JIS")]
    ShiftJis,
    /// Windows code page 932; shares the Shift_JIS codec.
    #[display(fmt = "cp932")]
    #[serde(rename = "cp932")]
    Cp932,
}

/// Error related to encoding operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Character {character:?} cannot be encoded as {encoding}")]
    Unmappable { encoding: Encoding, character: char },

    #[error("Input is not valid {0}")]
    Malformed(Encoding),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}

impl Encoding {
    fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::ShiftJis | Self::Cp932 => SHIFT_JIS,
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "shift_jis" | "shift-jis" | "sjis" => Ok(Self::ShiftJis),
            "cp932" | "windows-31j" => Ok(Self::Cp932),
            _ => Err(EncodingError::UnknownEncoding(s.to_owned())),
        }
    }
}

/// Byte written in place of a character the target encoding cannot represent
pub const UNMAPPABLE_REPLACEMENT: u8 = b'?';

/// Smallest growth step when the encoder runs out of output space
const MIN_RESERVE: usize = 16;

/// Encodes `content` into bytes of the given encoding.
///
/// Characters the target encoding cannot represent are written as `?`, so
/// this never fails on content.
pub fn encode(content: &str, encoding: Encoding) -> Vec<u8> {
    let mut replaced = 0usize;
    let bytes = encode_with(content, encoding, |_| {
        replaced += 1;
        Ok(())
    });
    if replaced > 0 {
        log::debug!("encode: replaced {replaced} characters not representable in {encoding}");
    }
    // the callback above never fails
    bytes.unwrap_or_default()
}

/// Encodes `content`, refusing characters the target encoding cannot represent.
///
/// # Errors
/// Returns `EncodingError::Unmappable` naming the first such character.
pub fn encode_strict(content: &str, encoding: Encoding) -> Result<Vec<u8>, EncodingError> {
    encode_with(content, encoding, |character| {
        log::debug!("encode_strict: {character:?} is not representable in {encoding}");
        Err(EncodingError::Unmappable { encoding, character })
    })
}

/// Runs the encoder to completion, handing each unmappable character to
/// `on_unmappable` before writing [`UNMAPPABLE_REPLACEMENT`] for it.
fn encode_with<F>(content: &str, encoding: Encoding, mut on_unmappable: F) -> Result<Vec<u8>, EncodingError>
where
    F: FnMut(char) -> Result<(), EncodingError>,
{
    let mut encoder = encoding.codec().new_encoder();
    let mut out = Vec::with_capacity(content.len());
    let mut rest = content;
    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => out.reserve(rest.len().max(MIN_RESERVE)),
            EncoderResult::Unmappable(character) => {
                on_unmappable(character)?;
                out.push(UNMAPPABLE_REPLACEMENT);
            }
        }
    }
}

/// Decodes `bytes` of the given encoding, dropping a leading byte order mark.
///
/// Malformed sequences become U+FFFD, so this never fails on content.
pub fn decode(bytes: &[u8], encoding: Encoding) -> String {
    let (text, had_errors) = encoding.codec().decode_with_bom_removal(bytes);
    if had_errors {
        log::debug!("decode: malformed {encoding} sequences replaced with U+FFFD");
    }
    text.into_owned()
}

/// Decodes `bytes`, refusing malformed sequences.
///
/// # Errors
/// Returns `EncodingError::Malformed` if the bytes are not valid in that encoding.
pub fn decode_strict(bytes: &[u8], encoding: Encoding) -> Result<String, EncodingError> {
    let (text, had_errors) = encoding.codec().decode_with_bom_removal(bytes);
    if had_errors {
        log::debug!("decode_strict: {} bytes are not valid {encoding}", bytes.len());
        return Err(EncodingError::Malformed(encoding));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_round_trip() {
        let bytes = encode("名前,Age", Encoding::Utf8);
        assert_eq!(bytes, "名前,Age".as_bytes());
        assert_eq!(decode(&bytes, Encoding::Utf8), "名前,Age");
    }

    #[test]
    fn test_shift_jis_bytes() {
        assert_eq!(encode("ア", Encoding::ShiftJis), vec![0x83, 0x41]);
        assert_eq!(encode("abc", Encoding::Cp932), b"abc".to_vec());
        let bytes = encode_strict("アリス,30,アメリカ", Encoding::ShiftJis).unwrap();
        assert_eq!(decode_strict(&bytes, Encoding::Cp932).unwrap(), "アリス,30,アメリカ");
    }

    #[test]
    fn test_unmappable_character_becomes_question_mark() {
        assert_eq!(encode("abc한", Encoding::ShiftJis), b"abc?".to_vec());
        assert_eq!(encode("한ア한", Encoding::Cp932), vec![b'?', 0x83, 0x41, b'?']);
    }

    #[test]
    fn test_long_input_with_unmappable_characters() {
        let content = "アa한".repeat(500);
        let bytes = encode(&content, Encoding::ShiftJis);
        assert_eq!(bytes.len(), 500 * 4);
        assert_eq!(decode(&bytes, Encoding::ShiftJis), "アa?".repeat(500));
    }

    #[test]
    fn test_strict_encode_rejects_unmappable_character() {
        assert_eq!(
            encode_strict("abc한", Encoding::ShiftJis),
            Err(EncodingError::Unmappable {
                encoding: Encoding::ShiftJis,
                character: '한',
            })
        );
        assert_eq!(encode_strict("한", Encoding::Utf8).unwrap(), "한".as_bytes());
    }

    #[test]
    fn test_malformed_input_becomes_replacement_character() {
        assert_eq!(decode(&[0x41, 0x83], Encoding::ShiftJis), "A\u{FFFD}");
        assert_eq!(decode(&[0x41, 0xff], Encoding::Utf8), "A\u{FFFD}");
    }

    #[test]
    fn test_strict_decode_rejects_malformed_input() {
        assert_eq!(
            decode_strict(&[0xff, 0xfe, 0xfd], Encoding::Utf8),
            Err(EncodingError::Malformed(Encoding::Utf8))
        );
        assert_eq!(
            decode_strict(&[0x41, 0x83], Encoding::ShiftJis),
            Err(EncodingError::Malformed(Encoding::ShiftJis))
        );
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode(b"\xEF\xBB\xBFName", Encoding::Utf8), "Name");
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!(Encoding::default(), Encoding::Utf8);
        assert_eq!("Shift_JIS".parse::<Encoding>().unwrap(), Encoding::ShiftJis);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("cp932".parse::<Encoding>().unwrap(), Encoding::Cp932);
        assert!(matches!(
            "latin1".parse::<Encoding>(),
            Err(EncodingError::UnknownEncoding(_))
        ));
        assert_eq!(Encoding::ShiftJis.to_string(), "Shift_JIS");
        assert_eq!(serde_json::to_string(&Encoding::Cp932).unwrap(), "\"cp932\"");
        assert_eq!(
            serde_json::from_str::<Encoding>("\"Shift_JIS\"").unwrap(),
            Encoding::ShiftJis
        );
    }
}
