//! String-in, string-out entry points over the codec and cipher suite.

use crate::cipher::{create_cipher, CipherKind};
use crate::error::Error;
use crate::text_hex;

/// Hex of the UTF-8 bytes of `text`, `0x`-prefixed.
pub fn encode_to_hex(text: &str) -> String {
    text_hex::encode(text)
}

/// Inverse of [`encode_to_hex`].
pub fn decode_from_hex(hex: &str) -> Result<String, Error> {
    text_hex::decode(hex)
}

/// Encrypt `text` with the cipher called `name`.
pub fn cipher_encrypt(name: &str, text: &str, key: Option<&str>) -> Result<String, Error> {
    let kind: CipherKind = name.parse()?;
    tracing::debug!(cipher = %kind, len = text.len(), "encrypting");
    create_cipher(kind, key)?.encrypt(text)
}

/// Decrypt `input` with the cipher called `name`.
pub fn cipher_decrypt(name: &str, input: &str, key: Option<&str>) -> Result<String, Error> {
    let kind: CipherKind = name.parse()?;
    tracing::debug!(cipher = %kind, len = input.len(), "decrypting");
    create_cipher(kind, key)?.decrypt(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_examples() {
        assert_eq!(encode_to_hex("A"), "0x41");
        assert_eq!(decode_from_hex("0x41").unwrap(), "A");
    }

    #[test]
    fn test_malformed_hex() {
        assert!(matches!(decode_from_hex("0xA"), Err(Error::MalformedHex(_))));
        assert!(matches!(decode_from_hex("0x41zz"), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_named_dispatch() {
        assert_eq!(cipher_encrypt("xor", "Hi", None).unwrap(), "0x002c000c");
        assert_eq!(cipher_encrypt("caesar", "A", None).unwrap(), "0x7718");
        assert_eq!(cipher_encrypt("byteShift", "AB", None).unwrap(), "0x00440049");
        assert_eq!(cipher_encrypt("none", "A", None).unwrap(), "0x41");
        assert_eq!(cipher_decrypt("byte_shift", "0x00440049", None).unwrap(), "AB");
    }

    #[test]
    fn test_keys_are_parsed_per_cipher() {
        let encrypted = cipher_encrypt("caesar", "key", Some("-2")).unwrap();
        assert_eq!(cipher_decrypt("caesar", &encrypted, Some("-2")).unwrap(), "key");

        let encrypted = cipher_encrypt("byteShift", "key", Some("9,8")).unwrap();
        assert_eq!(cipher_decrypt("byteShift", &encrypted, Some("9,8")).unwrap(), "key");
    }

    #[test]
    fn test_unknown_cipher() {
        assert_eq!(
            cipher_encrypt("rot13", "x", None),
            Err(Error::UnknownCipher("rot13".into()))
        );
        assert!(matches!(
            cipher_decrypt("AES", "x", None),
            Err(Error::UnknownCipher(_))
        ));
    }
}
