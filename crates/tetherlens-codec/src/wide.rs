//! Wide hex: four hex digits per UTF-16 code unit.
//!
//! The ciphers operate on this representation instead of UTF-8 byte hex so
//! every character, including those outside the BMP, maps to a whole number
//! of fixed-width groups.

use crate::error::Error;
use crate::text_hex::{strip_prefix, HEX_PREFIX};

/// Digits per code unit.
pub const GROUP_WIDTH: usize = 4;

/// Encode `text` as `0x`-prefixed wide hex.
pub fn encode(text: &str) -> String {
    format!("{}{}", HEX_PREFIX, render_units(&to_units(text)))
}

/// Decode wide hex (with or without prefix) back to text.
pub fn decode(hex: &str) -> Result<String, Error> {
    units_to_text(&parse_units(hex)?)
}

/// UTF-16 code units of `text`.
pub fn to_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Render code units as lowercase wide hex without prefix.
pub fn render_units(units: &[u16]) -> String {
    let bytes: Vec<u8> = units.iter().flat_map(|unit| unit.to_be_bytes()).collect();
    hex::encode(bytes)
}

/// Parse wide hex into code units.
pub fn parse_units(hex: &str) -> Result<Vec<u16>, Error> {
    let digits = strip_prefix(hex);
    if digits.len() % GROUP_WIDTH != 0 {
        return Err(Error::MalformedHex(format!(
            "wide hex length {} is not a multiple of {}",
            digits.len(),
            GROUP_WIDTH
        )));
    }

    let bytes = hex::decode(digits).map_err(|e| Error::MalformedHex(e.to_string()))?;
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Reassemble text from code units.
pub fn units_to_text(units: &[u16]) -> Result<String, Error> {
    String::from_utf16(units).map_err(|_| Error::InvalidUtf16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("A"), "0x0041");
        assert_eq!(encode("中"), "0x4e2d");
        assert_eq!(encode(""), "0x");
    }

    #[test]
    fn test_surrogate_pair() {
        // U+1F600 is D83D DE00 in UTF-16.
        assert_eq!(encode("😀"), "0xd83dde00");
        assert_eq!(decode("0xd83dde00").unwrap(), "😀");
    }

    #[test]
    fn test_decode_accepts_either_case() {
        assert_eq!(decode("004100420043").unwrap(), "ABC");
        assert_eq!(decode("0x4E2D").unwrap(), "中");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode("0x004"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode("0x00zz"), Err(Error::MalformedHex(_))));
        assert_eq!(decode("0xd83d"), Err(Error::InvalidUtf16));
    }
}
