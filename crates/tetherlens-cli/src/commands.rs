//! Command implementations.

use anyhow::{bail, Context};
use tetherlens_client::detail::{FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
use tetherlens_client::{
    fetch_transaction, ClientConfig, DetailOutcome, EventBrowser, HttpExecutor, Outcome, QueryForm,
};
use tetherlens_codec::{text_hex, CipherKind, HexCase, HexFormat, HexWorkbench};
use tetherlens_proto::{EntityType, Notifier, TransactionLookup, TETHER_USDT};

use crate::formatter::Formatter;

/// Query one entity collection and render the table.
pub async fn events<N: Notifier>(
    config: &ClientConfig,
    notifier: N,
    form: QueryForm,
    formatter: &dyn Formatter,
) -> anyhow::Result<String> {
    let executor = HttpExecutor::new(config)?;
    let browser = EventBrowser::new(executor, notifier);

    match browser.submit(&form).await {
        Outcome::Applied(_) => {
            let state = browser.state();
            Ok(formatter.format_events(state.columns(), state.rows()))
        }
        Outcome::Failed(err) => Err(err).context(format!("querying {}", form.entity)),
        Outcome::Stale => bail!("query was superseded"),
    }
}

/// Show the event recorded for a transaction hash.
pub async fn transaction<N: Notifier>(
    config: &ClientConfig,
    notifier: N,
    hash: &str,
    formatter: &dyn Formatter,
) -> anyhow::Result<String> {
    let executor = HttpExecutor::new(config)?;
    let lookup = TransactionLookup::new(hash.trim());

    match fetch_transaction(&executor, &lookup).await {
        Ok(DetailOutcome::Found(detail)) => {
            Ok(formatter.format_detail(detail.entity, &detail.rows()))
        }
        Ok(DetailOutcome::NotFound) => {
            notifier.warning(NOT_FOUND_MESSAGE);
            bail!("no event recorded for transaction {}", lookup.hash())
        }
        Err(err) => {
            notifier.error(FETCH_FAILED_MESSAGE);
            Err(err.into())
        }
    }
}

/// List the entity catalogue.
pub fn entities(formatter: &dyn Formatter) -> String {
    formatter.format_entities(&EntityType::ALL)
}

/// Show the tracked contract and endpoint.
pub fn info(config: &ClientConfig, formatter: &dyn Formatter) -> String {
    formatter.format_info(&TETHER_USDT, &config.endpoint)
}

/// Layout options for `hex encode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexLayout {
    pub upper: bool,
    pub no_prefix: bool,
    pub separator: Option<char>,
}

impl HexLayout {
    fn format(&self) -> HexFormat {
        let case = if self.upper { HexCase::Upper } else { HexCase::Lower };
        HexFormat::default()
            .with_prefix(!self.no_prefix)
            .with_case(case)
            .with_separator(self.separator)
    }
}

/// Plain byte hex of `text`.
pub fn hex_encode(
    text: &str,
    layout: HexLayout,
    formatter: &dyn Formatter,
) -> anyhow::Result<String> {
    let output = text_hex::encode_with(text, &layout.format())?;
    Ok(formatter.format_conversion("hex-encode", &output))
}

/// Text from plain byte hex.
pub fn hex_decode(
    hex: &str,
    separator: Option<char>,
    formatter: &dyn Formatter,
) -> anyhow::Result<String> {
    let format = HexFormat::default().with_separator(separator);
    let output = text_hex::decode_with(hex.trim(), &format)?;
    Ok(formatter.format_conversion("hex-decode", &output))
}

/// Run `input` through the converter in either direction.
pub fn convert<N: Notifier>(
    notifier: N,
    cipher: CipherKind,
    key: Option<String>,
    input: &str,
    encrypt: bool,
    formatter: &dyn Formatter,
) -> anyhow::Result<String> {
    let mut bench = HexWorkbench::new(notifier).with_cipher(cipher).with_key(key);
    bench.set_input(input);

    let (operation, output) = if encrypt {
        ("encrypt", bench.encode()?)
    } else {
        ("decrypt", bench.decode()?)
    };
    Ok(formatter.format_conversion(&format!("{}:{}", operation, cipher), output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{create_formatter, OutputFormat};
    use pretty_assertions::assert_eq;
    use tetherlens_proto::MemoryNotifier;

    #[test]
    fn test_hex_encode_layouts() {
        let table = create_formatter(OutputFormat::Table);
        assert_eq!(hex_encode("Hi", HexLayout::default(), &*table).unwrap(), "0x4869");

        let spaced = HexLayout {
            upper: true,
            no_prefix: true,
            separator: Some(' '),
        };
        assert_eq!(hex_encode("Hi", spaced, &*table).unwrap(), "48 69");
    }

    #[test]
    fn test_hex_digit_separator_is_an_error() {
        let table = create_formatter(OutputFormat::Table);
        let zero = HexLayout {
            separator: Some('0'),
            ..HexLayout::default()
        };
        assert!(hex_encode("PP", zero, &*table).is_err());
        assert!(hex_decode("0x50050", Some('0'), &*table).is_err());
    }

    #[test]
    fn test_hex_decode_with_separator() {
        let table = create_formatter(OutputFormat::Table);
        assert_eq!(hex_decode("48 69", Some(' '), &*table).unwrap(), "Hi");
        assert!(hex_decode("0xA", None, &*table).is_err());
    }

    #[test]
    fn test_convert_roundtrip() {
        let notifier = MemoryNotifier::new();
        let table = create_formatter(OutputFormat::Table);

        let hidden = convert(&notifier, CipherKind::ByteShift, None, "AB", true, &*table).unwrap();
        assert_eq!(hidden, "0x00440049");
        let plain =
            convert(&notifier, CipherKind::ByteShift, None, &hidden, false, &*table).unwrap();
        assert_eq!(plain, "AB");
    }

    #[test]
    fn test_convert_json_output() {
        let notifier = MemoryNotifier::new();
        let json = create_formatter(OutputFormat::Json);
        let output = convert(&notifier, CipherKind::Xor, None, "Hi", true, &*json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["operation"], "encrypt:xor");
        assert_eq!(parsed["output"], "0x002c000c");
    }

    #[test]
    fn test_convert_empty_input_fails() {
        let notifier = MemoryNotifier::new();
        let table = create_formatter(OutputFormat::Table);
        assert!(convert(&notifier, CipherKind::None, None, "", true, &*table).is_err());
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn test_info_shows_endpoint() {
        let config = ClientConfig::new("https://example.org/graphql");
        let csv = create_formatter(OutputFormat::Csv);
        let output = info(&config, &*csv);
        assert!(output.contains("0xdAC17F958D2ee523a2206206994597C13D831ec7"));
        assert!(output.contains("https://example.org/graphql"));
    }
}
