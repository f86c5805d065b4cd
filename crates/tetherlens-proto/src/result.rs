//! Result types for subgraph query responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::error::Error;
use crate::schema::{
    self, ColumnSpec, RenderHint, FIELD_BLOCK_NUMBER, FIELD_BLOCK_TIMESTAMP, FIELD_ID,
    FIELD_TRANSACTION_HASH,
};

/// Display format for block timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Labels shown in the action column.
pub const ROW_ACTIONS: [&str; 2] = ["copy-hash", "detail"];

/// One event log row: field name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord {
    fields: BTreeMap<String, String>,
}

impl EventRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Convert a JSON object returned by the subgraph.
    ///
    /// Strings are kept as-is, other scalars keep their JSON text and
    /// `null` fields are dropped.
    pub fn from_json(value: serde_json::Value) -> Result<Self, Error> {
        let serde_json::Value::Object(map) = value else {
            return Err(Error::InvalidRecord(format!("expected object, got {}", value)));
        };

        let mut fields = BTreeMap::new();
        for (name, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    fields.insert(name, s);
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(Error::InvalidRecord(format!(
                        "field '{}' is not a scalar",
                        name
                    )));
                }
                other => {
                    fields.insert(name, other.to_string());
                }
            }
        }
        Ok(Self { fields })
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Event id.
    pub fn id(&self) -> Option<&str> {
        self.get(FIELD_ID)
    }

    /// Block number.
    pub fn block_number(&self) -> Option<&str> {
        self.get(FIELD_BLOCK_NUMBER)
    }

    /// Block timestamp (Unix seconds).
    pub fn block_timestamp(&self) -> Option<&str> {
        self.get(FIELD_BLOCK_TIMESTAMP)
    }

    /// Transaction hash.
    pub fn transaction_hash(&self) -> Option<&str> {
        self.get(FIELD_TRANSACTION_HASH)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A query response: collection name to its rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryResult {
    collections: BTreeMap<String, Vec<EventRecord>>,
}

impl QueryResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection.
    pub fn with_collection(mut self, name: impl Into<String>, rows: Vec<EventRecord>) -> Self {
        self.collections.insert(name.into(), rows);
        self
    }

    /// Convert the `data` object of a GraphQL response.
    pub fn from_json(data: serde_json::Value) -> Result<Self, Error> {
        let serde_json::Value::Object(map) = data else {
            return Err(Error::InvalidRecord("response data is not an object".into()));
        };

        let mut collections = BTreeMap::new();
        for (name, rows) in map {
            let rows = match rows {
                serde_json::Value::Null => Vec::new(),
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(EventRecord::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => {
                    return Err(Error::InvalidRecord(format!(
                        "collection '{}' is not a list",
                        name
                    )))
                }
            };
            collections.insert(name, rows);
        }
        Ok(Self { collections })
    }

    /// Rows for a collection, if present.
    pub fn collection(&self, name: &str) -> Option<&[EventRecord]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Remove and return the rows for a collection.
    pub fn take(&mut self, name: &str) -> Option<Vec<EventRecord>> {
        self.collections.remove(name)
    }

    /// Total rows across all collections.
    pub fn total_rows(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

/// Extract the rows queried for `entity`, or an empty list if the
/// response carries no such collection.
pub fn project(mut result: QueryResult, entity: EntityType) -> Vec<EventRecord> {
    result.take(entity.as_str()).unwrap_or_default()
}

/// Columns to render for `entity`.
pub fn columns(entity: EntityType) -> Vec<ColumnSpec> {
    schema::descriptor(entity).columns()
}

/// Render one cell using the local time zone for timestamps.
pub fn render_cell(record: &EventRecord, column: &ColumnSpec) -> String {
    render_cell_in(record, column, &Local)
}

/// Render one cell with timestamps shown in `tz`.
pub fn render_cell_in<Tz>(record: &EventRecord, column: &ColumnSpec, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match column.hint {
        RenderHint::Actions => ROW_ACTIONS.join(" | "),
        RenderHint::Timestamp => record
            .get(column.key)
            .map(|raw| format_timestamp_in(raw, tz))
            .unwrap_or_default(),
        RenderHint::Plain | RenderHint::Wrap | RenderHint::Ellipsis => {
            record.get(column.key).unwrap_or_default().to_string()
        }
    }
}

/// Format an epoch-seconds string as local date-time.
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

/// Format an epoch-seconds string in `tz`; unparseable input is returned
/// verbatim.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Ok(seconds) = raw.trim().parse::<i64>() else {
        return raw.to_string();
    };
    match seconds
        .checked_mul(1000)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    {
        Some(utc) => utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
