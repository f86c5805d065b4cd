//! TetherLens protocol types.
//!
//! This crate describes the token-contract event schema exposed by the
//! subgraph and turns query forms into GraphQL documents.
//!
//! # Modules
//!
//! - [`entity`] - The eleven event collections
//! - [`schema`] - Static descriptor table: requested fields and rendered columns
//! - [`query`] - Query IR, builder and GraphQL rendering
//! - [`result`] - Result records, projection and cell rendering
//! - [`lookup`] - Transaction-hash lookup and detail rows
//! - [`notify`] - Notification capability injected into orchestration code
//! - [`contract`] - The tracked contract
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use tetherlens_proto::{EntityType, EventQuery, OrderDirection, ResultLimit};
//!
//! let query = EventQuery::builder(EntityType::Transfers)
//!     .first(ResultLimit::Ten)
//!     .direction(OrderDirection::Desc)
//!     .build()
//!     .unwrap();
//! let request = query.to_request();
//! assert!(request.query.contains("transfers("));
//! ```

pub mod contract;
pub mod entity;
pub mod error;
pub mod lookup;
pub mod notify;
pub mod query;
pub mod result;
pub mod schema;

pub use error::Error;

// Re-export commonly used types at crate root
pub use contract::{ContractInfo, TETHER_USDT};
pub use entity::EntityType;
pub use lookup::{detail_rows, TransactionLookup};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use query::{EventQuery, GraphQlRequest, OrderDirection, QueryBuilder, ResultLimit, TimeWindow};
pub use result::{columns, project, render_cell, EventRecord, QueryResult};
pub use schema::{ColumnSpec, EntityDescriptor, RenderHint};
