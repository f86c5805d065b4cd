//! Byte-oriented text/hex conversion.
//!
//! Text is encoded as UTF-8 and every byte becomes two hex digits. Decoding
//! accepts an optional `0x` prefix and falls back to a byte-per-character
//! reading when the bytes are not valid UTF-8.

use crate::error::Error;

/// Prefix written by [`encode`] and stripped by [`decode`].
pub const HEX_PREFIX: &str = "0x";

/// Letter case of hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Output layout for byte hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexFormat {
    /// Write the `0x` prefix.
    pub prefix: bool,
    /// Digit case.
    pub case: HexCase,
    /// Separator placed between byte pairs.
    pub separator: Option<char>,
}

impl Default for HexFormat {
    fn default() -> Self {
        Self {
            prefix: true,
            case: HexCase::Lower,
            separator: None,
        }
    }
}

impl HexFormat {
    /// Uppercase, space-separated pairs without prefix (`48 49`).
    pub fn spaced_upper() -> Self {
        Self {
            prefix: false,
            case: HexCase::Upper,
            separator: Some(' '),
        }
    }

    /// Set whether the prefix is written.
    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the digit case.
    pub fn with_case(mut self, case: HexCase) -> Self {
        self.case = case;
        self
    }

    /// Set the pair separator.
    pub fn with_separator(mut self, separator: Option<char>) -> Self {
        self.separator = separator;
        self
    }

    /// Check that the separator cannot be confused with the digits.
    pub fn validate(&self) -> Result<(), Error> {
        match self.separator {
            Some(sep) => check_separator(sep),
            None => Ok(()),
        }
    }
}

/// Reject separators that a decoder could not tell apart from the payload.
pub fn check_separator(sep: char) -> Result<(), Error> {
    if sep.is_ascii_hexdigit() || sep.eq_ignore_ascii_case(&'x') {
        return Err(Error::InvalidSeparator(sep));
    }
    Ok(())
}

/// Encode `text` as `0x`-prefixed lowercase hex of its UTF-8 bytes.
pub fn encode(text: &str) -> String {
    write_hex(text.as_bytes(), &HexFormat::default())
}

/// Encode `text` using `format`.
pub fn encode_with(text: &str, format: &HexFormat) -> Result<String, Error> {
    encode_bytes_with(text.as_bytes(), format)
}

/// Encode raw bytes using `format`.
pub fn encode_bytes_with(bytes: &[u8], format: &HexFormat) -> Result<String, Error> {
    format.validate()?;
    Ok(write_hex(bytes, format))
}

fn write_hex(bytes: &[u8], format: &HexFormat) -> String {
    let pairs: Vec<String> = bytes
        .iter()
        .map(|byte| match format.case {
            HexCase::Lower => format!("{:02x}", byte),
            HexCase::Upper => format!("{:02X}", byte),
        })
        .collect();

    let body = match format.separator {
        Some(sep) => pairs.join(sep.encode_utf8(&mut [0u8; 4])),
        None => pairs.concat(),
    };

    if format.prefix {
        format!("{}{}", HEX_PREFIX, body)
    } else {
        body
    }
}

/// Remove a leading `0x`, if present.
pub fn strip_prefix(hex: &str) -> &str {
    hex.strip_prefix(HEX_PREFIX).unwrap_or(hex)
}

/// Decode byte hex back to text.
pub fn decode(hex: &str) -> Result<String, Error> {
    decode_bytes(hex).map(bytes_to_text)
}

/// Decode hex written with `format`, ignoring its separator.
pub fn decode_with(hex: &str, format: &HexFormat) -> Result<String, Error> {
    format.validate()?;
    match format.separator {
        Some(sep) => {
            let joined: String = strip_prefix(hex.trim())
                .chars()
                .filter(|c| *c != sep)
                .collect();
            decode(&joined)
        }
        None => decode(hex),
    }
}

/// Decode byte hex to raw bytes.
pub fn decode_bytes(hex: &str) -> Result<Vec<u8>, Error> {
    let digits = strip_prefix(hex);
    if digits.len() % 2 != 0 {
        return Err(Error::MalformedHex(format!(
            "odd number of digits ({})",
            digits.len()
        )));
    }
    hex::decode(digits).map_err(|e| Error::MalformedHex(e.to_string()))
}

fn bytes_to_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "hex payload is not UTF-8, decoding bytes individually");
        err.into_bytes().into_iter().map(char::from).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode("A"), "0x41");
        assert_eq!(encode(""), "0x");
        assert_eq!(encode("Hi!"), "0x486921");
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode("é"), "0xc3a9");
        assert_eq!(encode("你"), "0xe4bda0");
    }

    #[test]
    fn test_encode_formats() {
        assert_eq!(encode_with("Hi", &HexFormat::spaced_upper()).unwrap(), "48 69");
        let upper = HexFormat::default().with_case(HexCase::Upper);
        assert_eq!(encode_with("é", &upper).unwrap(), "0xC3A9");
        let bare = HexFormat::default().with_prefix(false).with_separator(Some(':'));
        assert_eq!(encode_with("abc", &bare).unwrap(), "61:62:63");
    }

    #[test]
    fn test_digit_separator_rejected() {
        let zero = HexFormat::default().with_separator(Some('0'));
        assert_eq!(encode_with("PP", &zero), Err(Error::InvalidSeparator('0')));
        assert_eq!(decode_with("0x50050", &zero), Err(Error::InvalidSeparator('0')));

        for sep in ['a', 'F', '9', 'x', 'X'] {
            assert_eq!(check_separator(sep), Err(Error::InvalidSeparator(sep)));
        }
        for sep in [' ', ':', '-', ',', 'g'] {
            assert_eq!(check_separator(sep), Ok(()));
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("0x41").unwrap(), "A");
        assert_eq!(decode("41").unwrap(), "A");
        assert_eq!(decode("0xE4BDA0").unwrap(), "你");
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("0xA"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode("0xzz"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode("41zz"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode("0X41"), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xff is never valid UTF-8.
        assert_eq!(decode("0x41ff").unwrap(), "A\u{ff}");
        assert_eq!(decode("e9").unwrap(), "é");
    }

    #[test]
    fn test_decode_with_separator() {
        let format = HexFormat::spaced_upper();
        assert_eq!(decode_with("48 69", &format).unwrap(), "Hi");
        let encoded = encode_with("日本", &format).unwrap();
        assert_eq!(decode_with(&encoded, &format).unwrap(), "日本");
    }
}
