//! Codec error types.

use thiserror::Error;

/// Errors raised by hex conversion and the cipher suite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Odd length or non-hex digits.
    #[error("malformed hex: {0}")]
    MalformedHex(String),

    /// Empty or unparseable cipher key.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Ciphertext could not be decrypted to valid text.
    #[error("decryption failed: {0}")]
    DecryptionFailure(String),

    /// Separator that collides with hex digits or the prefix.
    #[error("invalid separator '{0}': hex digits and 'x' cannot separate pairs")]
    InvalidSeparator(char),

    /// No text supplied where text is required.
    #[error("input is empty")]
    EmptyInput,

    /// Decoded UTF-16 code units contain an unpaired surrogate.
    #[error("decoded text contains an unpaired surrogate")]
    InvalidUtf16,

    /// Cipher name outside the supported set.
    #[error("unknown cipher '{0}': expected none, xor, caesar, byteShift or aes")]
    UnknownCipher(String),
}
