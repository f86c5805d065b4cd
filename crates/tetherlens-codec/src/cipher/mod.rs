//! Keyed reversible text transforms.
//!
//! None of these ciphers provide confidentiality. XOR, Caesar and byte-shift
//! are obfuscation toys over wide hex, and the AES variant derives its key
//! with a single MD5 round from a passphrase that has a public default. Do
//! not use any of them as a security boundary.
//!
//! Each cipher turns text into a transport string (`0x`-prefixed hex, or
//! base64 for AES) and back. `decrypt(encrypt(s)) == s` holds for all
//! Unicode text, including the empty string.

mod aes;
mod byte_shift;
mod caesar;
mod xor;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::text_hex;

pub use self::aes::{derive_key_iv, AesCipher, DEFAULT_AES_PASSPHRASE, SALT_LEN};
pub use self::byte_shift::{parse_pattern, ByteShiftCipher, DEFAULT_SHIFT_PATTERN};
pub use self::caesar::{parse_shift, shift_hex_digits, CaesarCipher, DEFAULT_CAESAR_SHIFT};
pub use self::xor::{xor_wide_hex, XorCipher, DEFAULT_XOR_KEY};

/// A reversible text transform.
pub trait TextCipher: Send + Sync {
    /// Which transform this is.
    fn kind(&self) -> CipherKind;

    /// Transform text into its encrypted transport form.
    fn encrypt(&self, text: &str) -> Result<String, Error>;

    /// Invert [`TextCipher::encrypt`].
    fn decrypt(&self, input: &str) -> Result<String, Error>;
}

/// Supported transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CipherKind {
    /// Plain UTF-8 byte hex.
    #[default]
    None,
    Xor,
    Caesar,
    ByteShift,
    Aes,
}

impl CipherKind {
    /// All kinds.
    pub const ALL: [CipherKind; 5] = [
        CipherKind::None,
        CipherKind::Xor,
        CipherKind::Caesar,
        CipherKind::ByteShift,
        CipherKind::Aes,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherKind::None => "none",
            CipherKind::Xor => "xor",
            CipherKind::Caesar => "caesar",
            CipherKind::ByteShift => "byteShift",
            CipherKind::Aes => "aes",
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CipherKind::None),
            "xor" => Ok(CipherKind::Xor),
            "caesar" => Ok(CipherKind::Caesar),
            "byteShift" | "byte-shift" | "byte_shift" => Ok(CipherKind::ByteShift),
            "aes" => Ok(CipherKind::Aes),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }
}

/// The identity transform: plain byte hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHex;

impl TextCipher for PlainHex {
    fn kind(&self) -> CipherKind {
        CipherKind::None
    }

    fn encrypt(&self, text: &str) -> Result<String, Error> {
        Ok(text_hex::encode(text))
    }

    fn decrypt(&self, input: &str) -> Result<String, Error> {
        text_hex::decode(input)
    }
}

/// Build a cipher of `kind`, reading `key` the way that cipher expects it.
///
/// XOR and AES take the key verbatim, Caesar parses an integer shift and
/// byte-shift a comma-separated shift pattern. Without a key each cipher
/// uses its default.
pub fn create_cipher(kind: CipherKind, key: Option<&str>) -> Result<Box<dyn TextCipher>, Error> {
    let cipher: Box<dyn TextCipher> = match (kind, key) {
        (CipherKind::None, _) => Box::new(PlainHex),
        (CipherKind::Xor, Some(key)) => Box::new(XorCipher::new(key)?),
        (CipherKind::Xor, None) => Box::new(XorCipher::default()),
        (CipherKind::Caesar, Some(key)) => Box::new(CaesarCipher::new(parse_shift(key)?)),
        (CipherKind::Caesar, None) => Box::new(CaesarCipher::default()),
        (CipherKind::ByteShift, Some(key)) => Box::new(ByteShiftCipher::new(parse_pattern(key)?)?),
        (CipherKind::ByteShift, None) => Box::new(ByteShiftCipher::default()),
        (CipherKind::Aes, Some(key)) => Box::new(AesCipher::new(key)?),
        (CipherKind::Aes, None) => Box::new(AesCipher::default()),
    };
    Ok(cipher)
}

/// Map a failed wide-hex decode after decryption to a decryption failure.
pub(crate) fn decrypted_text(units: &[u16]) -> Result<String, Error> {
    crate::wide::units_to_text(units).map_err(|_| {
        Error::DecryptionFailure("decrypted code units are not valid UTF-16".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for kind in CipherKind::ALL {
            assert_eq!(kind.as_str().parse::<CipherKind>(), Ok(kind));
        }
        assert_eq!("byte-shift".parse::<CipherKind>(), Ok(CipherKind::ByteShift));
        assert_eq!(
            "rot13".parse::<CipherKind>(),
            Err(Error::UnknownCipher("rot13".into()))
        );
    }

    #[test]
    fn test_create_cipher_kinds() {
        for kind in CipherKind::ALL {
            assert_eq!(create_cipher(kind, None).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_create_cipher_key_parsing() {
        assert!(create_cipher(CipherKind::Caesar, Some("-3")).is_ok());
        assert!(matches!(
            create_cipher(CipherKind::Caesar, Some("three")),
            Err(Error::InvalidKey(_))
        ));
        assert!(create_cipher(CipherKind::ByteShift, Some("1, 2,3")).is_ok());
        assert!(matches!(
            create_cipher(CipherKind::ByteShift, Some("")),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            create_cipher(CipherKind::Xor, Some("")),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            create_cipher(CipherKind::Aes, Some("")),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_plain_hex_ignores_key() {
        let cipher = create_cipher(CipherKind::None, Some("whatever")).unwrap();
        assert_eq!(cipher.encrypt("A").unwrap(), "0x41");
        assert_eq!(cipher.decrypt("0x41").unwrap(), "A");
    }
}
