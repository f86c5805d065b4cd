//! TetherLens text codec.
//!
//! Converts text to and from hexadecimal and layers a small set of keyed,
//! reversible transforms on top.
//!
//! The ciphers are obfuscation helpers and offer no real secrecy. See
//! [`cipher`] before using any of them.
//!
//! # Modules
//!
//! - [`text_hex`] - UTF-8 byte hex with prefix, case and separator options
//! - [`wide`] - Four digits per UTF-16 code unit
//! - [`cipher`] - XOR, Caesar, byte-shift and passphrase AES
//! - [`facade`] - Name-dispatched entry points
//! - [`workbench`] - Converter state with notifications
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use tetherlens_codec::{cipher_decrypt, cipher_encrypt, encode_to_hex};
//!
//! assert_eq!(encode_to_hex("A"), "0x41");
//!
//! let hidden = cipher_encrypt("xor", "hello", Some("k")).unwrap();
//! assert_eq!(cipher_decrypt("xor", &hidden, Some("k")).unwrap(), "hello");
//! ```

pub mod cipher;
pub mod error;
pub mod facade;
pub mod text_hex;
pub mod wide;
pub mod workbench;

pub use error::Error;

pub use cipher::{create_cipher, CipherKind, TextCipher};
pub use facade::{cipher_decrypt, cipher_encrypt, decode_from_hex, encode_to_hex};
pub use text_hex::{HexCase, HexFormat};
pub use workbench::HexWorkbench;
