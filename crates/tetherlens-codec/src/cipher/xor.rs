use super::{decrypted_text, CipherKind, TextCipher};
use crate::error::Error;
use crate::text_hex::HEX_PREFIX;
use crate::wide;

/// Key used when none is supplied.
pub const DEFAULT_XOR_KEY: &str = "defaultKey123";

/// XOR of each UTF-16 code unit with the key's code units, cycled by
/// position. Encryption and decryption are the same operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorCipher {
    key: Vec<u16>,
}

impl XorCipher {
    /// Create a cipher; the key must not be empty.
    pub fn new(key: &str) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::InvalidKey("XOR key must not be empty".to_string()));
        }
        Ok(Self {
            key: wide::to_units(key),
        })
    }

    fn apply(&self, units: &mut [u16]) {
        for (i, unit) in units.iter_mut().enumerate() {
            *unit ^= self.key[i % self.key.len()];
        }
    }
}

impl Default for XorCipher {
    fn default() -> Self {
        Self {
            key: wide::to_units(DEFAULT_XOR_KEY),
        }
    }
}

impl TextCipher for XorCipher {
    fn kind(&self) -> CipherKind {
        CipherKind::Xor
    }

    fn encrypt(&self, text: &str) -> Result<String, Error> {
        let mut units = wide::to_units(text);
        self.apply(&mut units);
        Ok(format!("{}{}", HEX_PREFIX, wide::render_units(&units)))
    }

    fn decrypt(&self, input: &str) -> Result<String, Error> {
        let mut units = wide::parse_units(input)?;
        self.apply(&mut units);
        decrypted_text(&units)
    }
}

/// XOR a wide-hex string with `key`, returning wide hex. Applying it twice
/// with the same key returns the original digits.
pub fn xor_wide_hex(hex: &str, key: &str) -> Result<String, Error> {
    let cipher = XorCipher::new(key)?;
    let mut units = wide::parse_units(hex)?;
    cipher.apply(&mut units);
    Ok(format!("{}{}", HEX_PREFIX, wide::render_units(&units)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_output() {
        // 'H' ^ 'd' = 0x2c, 'i' ^ 'e' = 0x0c
        let cipher = XorCipher::default();
        assert_eq!(cipher.encrypt("Hi").unwrap(), "0x002c000c");
        assert_eq!(cipher.decrypt("0x002c000c").unwrap(), "Hi");
    }

    #[test]
    fn test_key_cycles() {
        let cipher = XorCipher::new("a").unwrap();
        assert_eq!(cipher.encrypt("aaa").unwrap(), "0x000000000000");
    }

    #[test]
    fn test_self_inverse() {
        let original = wide::encode("混合 text ✓");
        let once = xor_wide_hex(&original, "k3y").unwrap();
        assert_ne!(once, original);
        assert_eq!(xor_wide_hex(&once, "k3y").unwrap(), original);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(XorCipher::new(""), Err(Error::InvalidKey(_))));
        assert!(matches!(xor_wide_hex("0x0041", ""), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_empty_text() {
        let cipher = XorCipher::default();
        assert_eq!(cipher.encrypt("").unwrap(), "0x");
        assert_eq!(cipher.decrypt("0x").unwrap(), "");
    }
}
