use super::{decrypted_text, CipherKind, TextCipher};
use crate::error::Error;
use crate::text_hex::HEX_PREFIX;
use crate::wide;

/// Pattern used when none is supplied.
pub const DEFAULT_SHIFT_PATTERN: [u16; 4] = [3, 7, 11, 13];

/// Adds `pattern[i % len]` to the i-th UTF-16 code unit, wrapping at
/// 65536. Decryption subtracts the same pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteShiftCipher {
    pattern: Vec<u16>,
}

impl ByteShiftCipher {
    /// Create a cipher; the pattern must not be empty.
    pub fn new(pattern: Vec<u16>) -> Result<Self, Error> {
        if pattern.is_empty() {
            return Err(Error::InvalidKey("shift pattern must not be empty".to_string()));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &[u16] {
        &self.pattern
    }

    fn shift_at(&self, index: usize) -> u16 {
        self.pattern[index % self.pattern.len()]
    }
}

impl Default for ByteShiftCipher {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_SHIFT_PATTERN.to_vec(),
        }
    }
}

impl TextCipher for ByteShiftCipher {
    fn kind(&self) -> CipherKind {
        CipherKind::ByteShift
    }

    fn encrypt(&self, text: &str) -> Result<String, Error> {
        let units: Vec<u16> = wide::to_units(text)
            .into_iter()
            .enumerate()
            .map(|(i, unit)| unit.wrapping_add(self.shift_at(i)))
            .collect();
        Ok(format!("{}{}", HEX_PREFIX, wide::render_units(&units)))
    }

    fn decrypt(&self, input: &str) -> Result<String, Error> {
        let units: Vec<u16> = wide::parse_units(input)?
            .into_iter()
            .enumerate()
            .map(|(i, unit)| unit.wrapping_sub(self.shift_at(i)))
            .collect();
        decrypted_text(&units)
    }
}

/// Parse a comma-separated shift pattern such as `3,7,11,13`.
///
/// Negative and oversized entries are reduced modulo 65536.
pub fn parse_pattern(key: &str) -> Result<Vec<u16>, Error> {
    let pattern = key
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map(|n| n.rem_euclid(1 << 16) as u16)
                .map_err(|e| Error::InvalidKey(format!("shift '{}': {}", part, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pattern.is_empty() {
        return Err(Error::InvalidKey("shift pattern must not be empty".to_string()));
    }
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_output() {
        // 'A' + 3 = 0x44, 'B' + 7 = 0x49
        let cipher = ByteShiftCipher::default();
        assert_eq!(cipher.encrypt("AB").unwrap(), "0x00440049");
        assert_eq!(cipher.decrypt("0x00440049").unwrap(), "AB");
    }

    #[test]
    fn test_wraps_at_unit_boundary() {
        let cipher = ByteShiftCipher::new(vec![2]).unwrap();
        // U+FFFF + 2 wraps to 0x0001.
        assert_eq!(cipher.encrypt("\u{ffff}").unwrap(), "0x0001");
        assert_eq!(cipher.decrypt("0x0001").unwrap(), "\u{ffff}");
    }

    #[test]
    fn test_pattern_cycles() {
        let cipher = ByteShiftCipher::new(vec![1, 2]).unwrap();
        assert_eq!(cipher.encrypt("aaa").unwrap(), "0x006200630062");
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(parse_pattern("3, 7,11,13"), Ok(vec![3, 7, 11, 13]));
        assert_eq!(parse_pattern("-1,65537"), Ok(vec![65535, 1]));
        assert!(matches!(parse_pattern(" , "), Err(Error::InvalidKey(_))));
        assert!(matches!(parse_pattern("1,x"), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(ByteShiftCipher::new(vec![]), Err(Error::InvalidKey(_))));
    }
}
