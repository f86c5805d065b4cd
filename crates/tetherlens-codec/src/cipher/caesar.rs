use super::{decrypted_text, CipherKind, TextCipher};
use crate::error::Error;
use crate::text_hex::{strip_prefix, HEX_PREFIX};
use crate::wide;

/// Shift used when none is supplied.
pub const DEFAULT_CAESAR_SHIFT: i32 = 7;

/// Rotates every digit of the wide-hex form within its own alphabet:
/// `0-9` modulo 10, `a-f` and `A-F` modulo 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaesarCipher {
    shift: i32,
}

impl CaesarCipher {
    pub fn new(shift: i32) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> i32 {
        self.shift
    }
}

impl Default for CaesarCipher {
    fn default() -> Self {
        Self::new(DEFAULT_CAESAR_SHIFT)
    }
}

impl TextCipher for CaesarCipher {
    fn kind(&self) -> CipherKind {
        CipherKind::Caesar
    }

    fn encrypt(&self, text: &str) -> Result<String, Error> {
        let digits = wide::render_units(&wide::to_units(text));
        Ok(format!(
            "{}{}",
            HEX_PREFIX,
            shift_hex_digits(&digits, i64::from(self.shift))
        ))
    }

    fn decrypt(&self, input: &str) -> Result<String, Error> {
        let digits = shift_hex_digits(strip_prefix(input), -i64::from(self.shift));
        decrypted_text(&wide::parse_units(&digits)?)
    }
}

/// Rotate each hex digit by `shift`; other characters pass through.
pub fn shift_hex_digits(hex: &str, shift: i64) -> String {
    hex.chars().map(|c| shift_digit(c, shift)).collect()
}

fn shift_digit(c: char, shift: i64) -> char {
    let rotate = |base: u8, modulus: i64| {
        let offset = i64::from(c as u8 - base);
        let rotated = (offset + shift.rem_euclid(modulus)) % modulus;
        char::from(base + rotated as u8)
    };

    match c {
        '0'..='9' => rotate(b'0', 10),
        'a'..='f' => rotate(b'a', 6),
        'A'..='F' => rotate(b'A', 6),
        _ => c,
    }
}

/// Parse a Caesar key as a signed shift.
pub fn parse_shift(key: &str) -> Result<i32, Error> {
    key.trim()
        .parse::<i32>()
        .map_err(|e| Error::InvalidKey(format!("caesar shift '{}': {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_output() {
        // "A" = 0041 -> 7718 with shift 7
        let cipher = CaesarCipher::default();
        assert_eq!(cipher.encrypt("A").unwrap(), "0x7718");
        assert_eq!(cipher.decrypt("0x7718").unwrap(), "A");
    }

    #[test]
    fn test_letters_rotate_mod_six() {
        assert_eq!(shift_hex_digits("abcdef", 1), "bcdefa");
        assert_eq!(shift_hex_digits("ABCDEF", 7), "BCDEFA");
        assert_eq!(shift_hex_digits("09", -1), "98");
    }

    #[test]
    fn test_non_hex_passthrough() {
        assert_eq!(shift_hex_digits("0x-z", 3), "3x-z");
    }

    #[test]
    fn test_shift_then_unshift_is_identity() {
        let digits = "0123456789abcdefABCDEF";
        for k in [-31, -7, 0, 1, 7, 13, 60, 1_000_003] {
            assert_eq!(shift_hex_digits(&shift_hex_digits(digits, k), -k), digits);
        }
    }

    #[test]
    fn test_extreme_shift_roundtrip() {
        for shift in [i32::MIN, i32::MAX] {
            let cipher = CaesarCipher::new(shift);
            let encrypted = cipher.encrypt("边界").unwrap();
            assert_eq!(cipher.decrypt(&encrypted).unwrap(), "边界");
        }
    }

    #[test]
    fn test_parse_shift() {
        assert_eq!(parse_shift(" -4 "), Ok(-4));
        assert!(matches!(parse_shift("4.5"), Err(Error::InvalidKey(_))));
    }
}
