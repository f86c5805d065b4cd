//! Passphrase AES in the OpenSSL `Salted__` envelope.
//!
//! Output is `base64("Salted__" || salt || ciphertext)` where key and IV come
//! from `EVP_BytesToKey` with MD5 and one iteration, and the cipher is
//! AES-256-CBC with PKCS#7 padding. This is the format `openssl enc
//! -aes-256-cbc -md md5 -base64` produces and accepts.

use ::aes::cipher::block_padding::Pkcs7;
use ::aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use md5::{Digest, Md5};
use rand::RngCore;

use super::{CipherKind, TextCipher};
use crate::error::Error;

type Aes256CbcEnc = cbc::Encryptor<::aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<::aes::Aes256>;

/// Passphrase used when none is supplied.
pub const DEFAULT_AES_PASSPHRASE: &str = "小明最屌";

/// Salt bytes following the magic header.
pub const SALT_LEN: usize = 8;

const MAGIC: &[u8; 8] = b"Salted__";
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// AES-256-CBC keyed by a passphrase.
#[derive(Clone, PartialEq, Eq)]
pub struct AesCipher {
    passphrase: String,
}

impl std::fmt::Debug for AesCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCipher").finish_non_exhaustive()
    }
}

impl AesCipher {
    /// Create a cipher; the passphrase must not be empty.
    pub fn new(passphrase: &str) -> Result<Self, Error> {
        if passphrase.is_empty() {
            return Err(Error::InvalidKey("AES passphrase must not be empty".to_string()));
        }
        Ok(Self {
            passphrase: passphrase.to_string(),
        })
    }

    /// Encrypt with a caller-chosen salt.
    pub fn encrypt_with_salt(&self, text: &str, salt: [u8; SALT_LEN]) -> String {
        let (key, iv) = derive_key_iv(self.passphrase.as_bytes(), &salt);
        let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(text.as_bytes());

        let mut envelope = Vec::with_capacity(MAGIC.len() + SALT_LEN + ciphertext.len());
        envelope.extend_from_slice(MAGIC);
        envelope.extend_from_slice(&salt);
        envelope.extend_from_slice(&ciphertext);
        STANDARD.encode(envelope)
    }
}

impl Default for AesCipher {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_AES_PASSPHRASE.to_string(),
        }
    }
}

impl TextCipher for AesCipher {
    fn kind(&self) -> CipherKind {
        CipherKind::Aes
    }

    fn encrypt(&self, text: &str) -> Result<String, Error> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Ok(self.encrypt_with_salt(text, salt))
    }

    fn decrypt(&self, input: &str) -> Result<String, Error> {
        let envelope = STANDARD
            .decode(input.trim())
            .map_err(|e| Error::DecryptionFailure(format!("invalid base64: {}", e)))?;

        let body = envelope
            .strip_prefix(MAGIC.as_slice())
            .filter(|rest| rest.len() >= SALT_LEN)
            .ok_or_else(|| Error::DecryptionFailure("missing Salted__ header".to_string()))?;
        let (salt, ciphertext) = body.split_at(SALT_LEN);

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(Error::DecryptionFailure(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_LEN
            )));
        }

        let (key, iv) = derive_key_iv(self.passphrase.as_bytes(), salt);
        let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::DecryptionFailure("bad padding, wrong passphrase?".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| Error::DecryptionFailure("plaintext is not UTF-8".to_string()))
    }
}

/// `EVP_BytesToKey(MD5, count = 1)`: `D_i = MD5(D_{i-1} || pass || salt)`
/// concatenated until key and IV are filled.
pub fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut material = Vec::with_capacity(KEY_LEN + IV_LEN);
    let mut previous: Vec<u8> = Vec::new();

    while material.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(passphrase);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        material.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&material[..KEY_LEN]);
    iv.copy_from_slice(&material[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_derive_key_iv_matches_openssl() {
        let (key, iv) = derive_key_iv(b"secret", &SALT);
        assert_eq!(
            hex::encode_upper(key),
            "C9E5A1BD216DBE1317E230CEF48F38EE7F0E17AD64022144BCCEC4A1AA2879AB"
        );
        assert_eq!(hex::encode_upper(iv), "E24B32BBBC4EF02ECBCB6576523AD893");
    }

    #[test]
    fn test_fixed_salt_output() {
        let cipher = AesCipher::new("secret").unwrap();
        assert_eq!(
            cipher.encrypt_with_salt("hello", SALT),
            "U2FsdGVkX18BAgMEBQYHCN4vTQH4jGLp+Wak1VrMt48="
        );
    }

    #[test]
    fn test_random_salt_roundtrip() {
        let cipher = AesCipher::default();
        let a = cipher.encrypt("同一段文字").unwrap();
        let b = cipher.encrypt("同一段文字").unwrap();
        assert!(a.starts_with("U2FsdGVkX1"));
        assert_eq!(cipher.decrypt(&a).unwrap(), "同一段文字");
        assert_eq!(cipher.decrypt(&b).unwrap(), "同一段文字");
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        let cipher = AesCipher::default();
        for input in [
            "not base64!",
            "aGVsbG8=",
            "U2FsdGVkX18BAgMEBQYHCA==",
            "U2FsdGVkX18BAgMEBQYHCN4v",
        ] {
            assert!(
                matches!(cipher.decrypt(input), Err(Error::DecryptionFailure(_))),
                "input {}",
                input
            );
        }
    }

    #[test]
    fn test_debug_hides_passphrase() {
        let cipher = AesCipher::new("hunter2").unwrap();
        assert!(!format!("{:?}", cipher).contains("hunter2"));
    }
}
