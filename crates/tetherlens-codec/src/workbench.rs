//! State behind the hex converter screen.

use tetherlens_proto::Notifier;

use crate::cipher::{create_cipher, CipherKind};
use crate::error::Error;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

/// Input text, selected cipher and last output of the converter.
///
/// Every failure is reported through the notifier and leaves `output`
/// unset, so a stale result is never shown next to new input.
pub struct HexWorkbench<N: Notifier> {
    notifier: N,
    input: String,
    cipher: CipherKind,
    key: Option<String>,
    output: Option<String>,
}

impl<N: Notifier> HexWorkbench<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            input: String::new(),
            cipher: CipherKind::None,
            key: None,
            output: None,
        }
    }

    /// Select the cipher used by [`encode`](Self::encode) and
    /// [`decode`](Self::decode).
    pub fn with_cipher(mut self, cipher: CipherKind) -> Self {
        self.cipher = cipher;
        self
    }

    /// Set the cipher key; `None` selects the cipher default.
    pub fn with_key(mut self, key: Option<String>) -> Self {
        self.key = key;
        self
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn set_cipher(&mut self, cipher: CipherKind) {
        self.cipher = cipher;
    }

    pub fn set_key(&mut self, key: Option<String>) {
        self.key = key;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cipher(&self) -> CipherKind {
        self.cipher
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Encrypt the input with the selected cipher.
    pub fn encode(&mut self) -> Result<&str, Error> {
        self.run(Direction::Encode)
    }

    /// Decrypt the input with the selected cipher.
    pub fn decode(&mut self) -> Result<&str, Error> {
        self.run(Direction::Decode)
    }

    /// Clear input and output.
    pub fn reset(&mut self) {
        self.input.clear();
        self.output = None;
    }

    fn run(&mut self, direction: Direction) -> Result<&str, Error> {
        self.output = None;

        if self.input.is_empty() {
            self.notifier.warning("please enter text to convert");
            return Err(Error::EmptyInput);
        }

        let result =
            create_cipher(self.cipher, self.key.as_deref()).and_then(|cipher| match direction {
                Direction::Encode => cipher.encrypt(&self.input),
                Direction::Decode => cipher.decrypt(&self.input),
            });

        match result {
            Ok(output) => {
                self.notifier.success("conversion complete");
                Ok(self.output.insert(output).as_str())
            }
            Err(err) => {
                tracing::debug!(
                    cipher = %self.cipher,
                    ?direction,
                    error = %err,
                    "conversion failed"
                );
                self.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetherlens_proto::{MemoryNotifier, NoticeLevel};

    #[test]
    fn test_encode_then_decode() {
        let notifier = MemoryNotifier::new();
        let mut bench = HexWorkbench::new(&notifier);

        bench.set_input("Hi");
        assert_eq!(bench.encode().unwrap(), "0x4869");

        bench.set_input("0x4869");
        assert_eq!(bench.decode().unwrap(), "Hi");
        assert_eq!(bench.output(), Some("Hi"));
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Success));
    }

    #[test]
    fn test_empty_input_warns() {
        let notifier = MemoryNotifier::new();
        let mut bench = HexWorkbench::new(&notifier);

        assert_eq!(bench.encode(), Err(Error::EmptyInput));
        assert_eq!(bench.output(), None);
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn test_error_clears_previous_output() {
        let notifier = MemoryNotifier::new();
        let mut bench = HexWorkbench::new(&notifier).with_cipher(CipherKind::Xor);

        bench.set_input("text");
        assert!(bench.encode().is_ok());
        assert!(bench.output().is_some());

        bench.set_input("0xzz");
        assert!(matches!(bench.decode(), Err(Error::MalformedHex(_))));
        assert_eq!(bench.output(), None);
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn test_invalid_key_is_reported() {
        let notifier = MemoryNotifier::new();
        let mut bench = HexWorkbench::new(&notifier)
            .with_cipher(CipherKind::Caesar)
            .with_key(Some("seven".into()));

        bench.set_input("abc");
        assert!(matches!(bench.encode(), Err(Error::InvalidKey(_))));
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn test_aes_roundtrip_through_bench() {
        let notifier = MemoryNotifier::new();
        let mut bench = HexWorkbench::new(&notifier).with_cipher(CipherKind::Aes);

        bench.set_input("秘密");
        let encrypted = bench.encode().unwrap().to_string();
        bench.set_input(encrypted);
        assert_eq!(bench.decode().unwrap(), "秘密");

        bench.reset();
        assert_eq!(bench.input(), "");
        assert_eq!(bench.output(), None);
    }
}
