//! TetherLens Client - async access to the token-event subgraph.
//!
//! # Quick Start
//!
//! ```ignore
//! use tetherlens_client::{ClientConfig, EventBrowser, HttpExecutor, QueryForm};
//! use tetherlens_proto::{EntityType, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://example.org/subgraphs/name/usdt")
//!         .with_bearer_token("api-key");
//!     let browser = EventBrowser::new(HttpExecutor::new(&config)?, TracingNotifier);
//!
//!     browser.submit(&QueryForm::new(EntityType::Transfers)).await;
//!     println!("{} rows", browser.state().rows().len());
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod detail;
pub mod error;
pub mod executor;
pub mod http;

pub use browser::{BrowserState, EventBrowser, Outcome, QueryForm};
pub use config::ClientConfig;
pub use detail::{fetch_transaction, DetailOutcome, TransactionDetail};
pub use error::Error;
pub use executor::QueryExecutor;
pub use http::HttpExecutor;

/// Re-export protocol types.
pub use tetherlens_proto as proto;
