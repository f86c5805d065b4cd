//! Transaction-hash lookup across several collections.

use serde_json::json;

use crate::entity::EntityType;
use crate::query::GraphQlRequest;
use crate::result::{format_timestamp_in, EventRecord, QueryResult};
use crate::schema::{FIELD_BLOCK_NUMBER, FIELD_BLOCK_TIMESTAMP, FIELD_ID, FIELD_TRANSACTION_HASH};

/// Collections searched for a transaction, in priority order.
pub const DEFAULT_LOOKUP_ENTITIES: [EntityType; 4] = [
    EntityType::Transfers,
    EntityType::Issues,
    EntityType::Redeems,
    EntityType::Approvals,
];

/// Finds the event emitted by a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionLookup {
    hash: String,
    entities: Vec<EntityType>,
}

impl TransactionLookup {
    /// Look up `hash` in the default collections.
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            entities: DEFAULT_LOOKUP_ENTITIES.to_vec(),
        }
    }

    /// Search these collections instead, in the given order.
    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = entities;
        self
    }

    /// The transaction hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Collections searched.
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Render the GraphQL document.
    pub fn document(&self) -> String {
        let selections: Vec<String> = self
            .entities
            .iter()
            .map(|entity| {
                format!(
                    "  {}(where: {{ {}: $hash }}) {{\n    {}\n  }}",
                    entity.as_str(),
                    FIELD_TRANSACTION_HASH,
                    entity.descriptor().fields().join(" ")
                )
            })
            .collect();

        format!(
            "query GetTransactionData($hash: String!) {{\n{}\n}}",
            selections.join("\n")
        )
    }

    /// Render the full request body.
    pub fn to_request(&self) -> GraphQlRequest {
        GraphQlRequest {
            query: self.document(),
            variables: json!({ "hash": self.hash }),
        }
    }

    /// Pick the first record, honouring collection priority.
    pub fn resolve(&self, mut result: QueryResult) -> Option<(EntityType, EventRecord)> {
        self.entities.iter().find_map(|entity| {
            result
                .take(entity.as_str())
                .and_then(|rows| rows.into_iter().next())
                .map(|record| (*entity, record))
        })
    }
}

/// Label/value pairs for the detail view of one event, in display order.
pub fn detail_rows(entity: EntityType, record: &EventRecord) -> Vec<(&'static str, String)> {
    detail_rows_in(entity, record, &chrono::Local)
}

/// [`detail_rows`] with timestamps shown in `tz`.
pub fn detail_rows_in<Tz>(
    entity: EntityType,
    record: &EventRecord,
    tz: &Tz,
) -> Vec<(&'static str, String)>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut rows = Vec::new();
    let field = |name: &str| record.get(name).unwrap_or_default().to_string();

    rows.push(("Transaction Hash", field(FIELD_TRANSACTION_HASH)));
    rows.push(("Block Number", field(FIELD_BLOCK_NUMBER)));
    rows.push((
        "Timestamp",
        record
            .get(FIELD_BLOCK_TIMESTAMP)
            .map(|raw| format_timestamp_in(raw, tz))
            .unwrap_or_default(),
    ));

    for column in entity.descriptor().extra_columns() {
        if let Some(value) = record.get(column.key) {
            rows.push((column.label, value.to_string()));
        }
    }

    if let Some(id) = record.get(FIELD_ID) {
        rows.push(("Event ID", id.to_string()));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_document_covers_collections() {
        let lookup = TransactionLookup::new("0xfeed");
        let doc = lookup.document();
        assert!(doc.starts_with("query GetTransactionData($hash: String!)"));
        assert!(doc.contains("transfers(where: { transactionHash: $hash })"));
        assert!(doc.contains("id owner spender value blockNumber blockTimestamp transactionHash"));
        assert!(!doc.contains("pauses"));
        assert_eq!(lookup.to_request().variables, json!({ "hash": "0xfeed" }));
    }

    #[test]
    fn test_resolve_prefers_transfers() {
        let result = QueryResult::new()
            .with_collection("issues", vec![EventRecord::new().with("id", "issue")])
            .with_collection("transfers", vec![EventRecord::new().with("id", "transfer")]);
        let (entity, record) = TransactionLookup::new("0x1").resolve(result).unwrap();
        assert_eq!(entity, EntityType::Transfers);
        assert_eq!(record.id(), Some("transfer"));
    }

    #[test]
    fn test_resolve_skips_empty() {
        let result = QueryResult::new()
            .with_collection("transfers", vec![])
            .with_collection("redeems", vec![EventRecord::new().with("id", "r")]);
        let (entity, _) = TransactionLookup::new("0x1").resolve(result).unwrap();
        assert_eq!(entity, EntityType::Redeems);

        assert!(TransactionLookup::new("0x1").resolve(QueryResult::new()).is_none());
    }

    #[test]
    fn test_detail_rows_order() {
        let record = EventRecord::new()
            .with("id", "0xaa-0")
            .with("amount", "500")
            .with("blockNumber", "7")
            .with("blockTimestamp", "0")
            .with("transactionHash", "0xaa");
        let rows = detail_rows_in(EntityType::Issues, &record, &Utc);
        assert_eq!(
            rows,
            vec![
                ("Transaction Hash", "0xaa".to_string()),
                ("Block Number", "7".to_string()),
                ("Timestamp", "1970-01-01 00:00:00".to_string()),
                ("Issued Amount", "500".to_string()),
                ("Event ID", "0xaa-0".to_string()),
            ]
        );
    }
}
