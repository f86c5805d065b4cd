//! Transaction detail fetch.

use tetherlens_proto::{detail_rows, EntityType, EventRecord, TransactionLookup};

use crate::error::Error;
use crate::executor::QueryExecutor;

/// Reported when no collection holds the hash.
pub const NOT_FOUND_MESSAGE: &str = "transaction data not found";

/// Reported when the lookup itself fails.
pub const FETCH_FAILED_MESSAGE: &str = "failed to load transaction detail";

/// The event found for a transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetail {
    pub entity: EntityType,
    pub record: EventRecord,
}

impl TransactionDetail {
    /// Label/value pairs in display order, timestamps in local time.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        detail_rows(self.entity, &self.record)
    }
}

/// Result of a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Found(TransactionDetail),
    NotFound,
}

/// Look up the first event recorded for `lookup`'s hash.
pub async fn fetch_transaction<E>(
    executor: &E,
    lookup: &TransactionLookup,
) -> Result<DetailOutcome, Error>
where
    E: QueryExecutor + ?Sized,
{
    tracing::debug!(hash = lookup.hash(), "fetching transaction detail");

    let result = executor.execute(&lookup.to_request()).await.map_err(|err| {
        tracing::error!(hash = lookup.hash(), error = %err, "transaction lookup failed");
        err
    })?;

    Ok(match lookup.resolve(result) {
        Some((entity, record)) => DetailOutcome::Found(TransactionDetail { entity, record }),
        None => {
            tracing::debug!(hash = lookup.hash(), "no event for transaction");
            DetailOutcome::NotFound
        }
    })
}
