//! TetherLens Command-Line Client
//!
//! Browses Tether (USDT) contract events indexed by a subgraph and converts
//! text to and from hex.

mod commands;
mod formatter;
mod notifier;
mod parse;

use std::time::Duration;

use clap::{Parser, Subcommand};
use formatter::OutputFormat;
use notifier::ConsoleNotifier;
use tetherlens_client::config::DEFAULT_ENDPOINT;
use tetherlens_client::{ClientConfig, QueryForm};
use tetherlens_codec::CipherKind;
use tetherlens_proto::{EntityType, OrderDirection, ResultLimit};

/// TetherLens Command-Line Client
#[derive(Parser, Debug)]
#[command(name = "tetherlens")]
#[command(version, about = "Browse Tether (USDT) subgraph events and convert text to hex")]
pub struct Args {
    /// Subgraph GraphQL endpoint
    #[arg(
        short = 'e',
        long,
        env = "TETHERLENS_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        global = true
    )]
    pub endpoint: String,

    /// API key sent as a bearer token
    #[arg(long, env = "TETHERLENS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Extra request header (name:value), repeatable
    #[arg(short = 'H', long = "header", value_parser = parse::parse_header, global = true)]
    pub headers: Vec<(String, String)>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Output format
    #[arg(long, default_value = "table", value_enum, global = true)]
    pub format: OutputFormat,

    /// Only print warnings and errors to stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query recent events of one type
    Events {
        /// Entity collection (see `entities`)
        #[arg(long, default_value = "issues")]
        entity: EntityType,

        /// Number of rows: 10, 20 or 50
        #[arg(long, default_value = "10", value_parser = parse::parse_limit)]
        limit: ResultLimit,

        /// Sort by block timestamp: asc or desc
        #[arg(long, default_value = "desc")]
        order: OrderDirection,

        /// Window start: Unix seconds or "YYYY-MM-DD HH:MM:SS" local time
        #[arg(long, value_parser = parse::parse_time)]
        start: Option<i64>,

        /// Window end: Unix seconds or "YYYY-MM-DD HH:MM:SS" local time
        #[arg(long, value_parser = parse::parse_time)]
        end: Option<i64>,
    },

    /// Show the event recorded for a transaction hash
    Tx {
        /// Transaction hash
        hash: String,
    },

    /// List entity types and their fields
    Entities,

    /// Show the tracked contract and endpoint
    Info,

    /// Plain UTF-8 hex conversion
    Hex {
        #[command(subcommand)]
        action: HexAction,
    },

    /// Encrypt text with one of the toy ciphers
    Encrypt(CipherArgs),

    /// Decrypt text produced by `encrypt`
    Decrypt(CipherArgs),
}

#[derive(Subcommand, Debug)]
pub enum HexAction {
    /// Text to hex
    Encode {
        text: String,

        /// Uppercase digits
        #[arg(long)]
        upper: bool,

        /// Omit the 0x prefix
        #[arg(long)]
        no_prefix: bool,

        /// Separator between byte pairs
        #[arg(long, value_parser = parse::parse_separator)]
        separator: Option<char>,
    },

    /// Hex to text
    Decode {
        hex: String,

        /// Separator between byte pairs
        #[arg(long, value_parser = parse::parse_separator)]
        separator: Option<char>,
    },
}

#[derive(clap::Args, Debug)]
pub struct CipherArgs {
    /// Cipher: none, xor, caesar, byteShift or aes
    #[arg(short, long, default_value = "none")]
    pub cipher: CipherKind,

    /// Cipher key (text, shift, or comma-separated pattern); defaults per cipher
    #[arg(short, long)]
    pub key: Option<String>,

    /// Text or ciphertext
    pub input: String,
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let args = Args::parse();

    let result = run(args).await;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tetherlens_cli=info".parse()?),
        )
        .init();
    Ok(())
}

fn client_config(args: &Args) -> ClientConfig {
    let mut config = ClientConfig::new(&args.endpoint)
        .with_timeout(Duration::from_secs(args.timeout));
    if let Some(key) = &args.api_key {
        config = config.with_bearer_token(key);
    }
    for (name, value) in &args.headers {
        config = config.with_header(name, value);
    }
    config
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = client_config(&args);
    let formatter = formatter::create_formatter(args.format);
    let notifier = ConsoleNotifier::new().with_quiet(args.quiet);

    tracing::debug!(endpoint = %config.endpoint, command = ?args.command, "starting");

    let output = match args.command {
        Command::Events {
            entity,
            limit,
            order,
            start,
            end,
        } => {
            let form = QueryForm::new(entity)
                .with_limit(limit)
                .with_direction(order)
                .with_range(start, end);
            commands::events(&config, notifier, form, &*formatter).await?
        }
        Command::Tx { hash } => commands::transaction(&config, notifier, &hash, &*formatter).await?,
        Command::Entities => commands::entities(&*formatter),
        Command::Info => commands::info(&config, &*formatter),
        Command::Hex { action } => match action {
            HexAction::Encode {
                text,
                upper,
                no_prefix,
                separator,
            } => {
                let layout = commands::HexLayout {
                    upper,
                    no_prefix,
                    separator,
                };
                commands::hex_encode(&text, layout, &*formatter)?
            }
            HexAction::Decode { hex, separator } => {
                commands::hex_decode(&hex, separator, &*formatter)?
            }
        },
        Command::Encrypt(cipher) => commands::convert(
            notifier,
            cipher.cipher,
            cipher.key,
            &cipher.input,
            true,
            &*formatter,
        )?,
        Command::Decrypt(cipher) => commands::convert(
            notifier,
            cipher.cipher,
            cipher.key,
            &cipher.input,
            false,
            &*formatter,
        )?,
    };

    println!("{}", output);
    Ok(())
}
