//! Query IR for subgraph event queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::EntityType;
use crate::error::Error;
use crate::schema::FIELD_BLOCK_TIMESTAMP;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl OrderDirection {
    /// GraphQL enum literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}

/// Accepted result counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ResultLimit {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl ResultLimit {
    /// Every accepted limit, ascending.
    pub const ALL: [ResultLimit; 3] = [ResultLimit::Ten, ResultLimit::Twenty, ResultLimit::Fifty];

    /// The numeric count.
    pub fn get(&self) -> u32 {
        match self {
            ResultLimit::Ten => 10,
            ResultLimit::Twenty => 20,
            ResultLimit::Fifty => 50,
        }
    }
}

impl TryFrom<u32> for ResultLimit {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(ResultLimit::Ten),
            20 => Ok(ResultLimit::Twenty),
            50 => Ok(ResultLimit::Fifty),
            other => Err(Error::InvalidLimit(other)),
        }
    }
}

impl From<ResultLimit> for u32 {
    fn from(limit: ResultLimit) -> Self {
        limit.get()
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Inclusive block-timestamp window in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Create a window; `start` must not exceed `end`.
    pub fn new(start: i64, end: i64) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidTimeWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window only when both bounds are present.
    pub fn from_bounds(start: Option<i64>, end: Option<i64>) -> Result<Option<Self>, Error> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            (None, None) => Ok(None),
            (start, end) => {
                tracing::debug!(?start, ?end, "incomplete time window ignored");
                Ok(None)
            }
        }
    }

    /// Lower bound.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Upper bound.
    pub fn end(&self) -> i64 {
        self.end
    }

    fn where_clause(&self) -> String {
        format!(
            "where: {{ {field}_gte: \"{start}\", {field}_lte: \"{end}\" }}",
            field = FIELD_BLOCK_TIMESTAMP,
            start = self.start,
            end = self.end
        )
    }
}

/// A GraphQL request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    /// Query document.
    pub query: String,
    /// Variable bindings.
    pub variables: serde_json::Value,
}

/// An immutable query for one entity collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    entity: EntityType,
    fields: Vec<&'static str>,
    first: ResultLimit,
    direction: OrderDirection,
    window: Option<TimeWindow>,
}

impl EventQuery {
    /// Start building a query for `entity`.
    pub fn builder(entity: EntityType) -> QueryBuilder {
        QueryBuilder::new(entity)
    }

    /// Target entity type.
    pub fn entity(&self) -> EntityType {
        self.entity
    }

    /// Collection being queried.
    pub fn collection(&self) -> &'static str {
        self.entity.as_str()
    }

    /// Requested fields, in order.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Result count.
    pub fn first(&self) -> ResultLimit {
        self.first
    }

    /// Ordering field; always the block timestamp.
    pub fn order_by(&self) -> &'static str {
        FIELD_BLOCK_TIMESTAMP
    }

    /// Ordering direction.
    pub fn direction(&self) -> OrderDirection {
        self.direction
    }

    /// Time filter, if any.
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Render the GraphQL document.
    pub fn document(&self) -> String {
        let mut args = vec![
            "first: $first".to_string(),
            format!("orderBy: {}", self.order_by()),
            "orderDirection: $orderDirection".to_string(),
        ];
        if let Some(window) = &self.window {
            args.push(window.where_clause());
        }

        format!(
            "query GetEvents($first: Int!, $orderDirection: OrderDirection!) {{\n  {}({}) {{\n    {}\n  }}\n}}",
            self.collection(),
            args.join(", "),
            self.fields.join(" ")
        )
    }

    /// Render the full request body.
    pub fn to_request(&self) -> GraphQlRequest {
        GraphQlRequest {
            query: self.document(),
            variables: json!({
                "first": self.first.get(),
                "orderDirection": self.direction.as_str(),
            }),
        }
    }
}

/// Builder for [`EventQuery`].
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    entity: EntityType,
    first: ResultLimit,
    direction: OrderDirection,
    start: Option<i64>,
    end: Option<i64>,
}

impl QueryBuilder {
    /// Create a builder with the form defaults (10 results, newest first).
    pub fn new(entity: EntityType) -> Self {
        Self {
            entity,
            first: ResultLimit::default(),
            direction: OrderDirection::default(),
            start: None,
            end: None,
        }
    }

    /// Set the result count.
    pub fn first(mut self, first: ResultLimit) -> Self {
        self.first = first;
        self
    }

    /// Set the ordering direction.
    pub fn direction(mut self, direction: OrderDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the time bounds. The filter applies only if both are present.
    pub fn time_range(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Finish the query.
    pub fn build(self) -> Result<EventQuery, Error> {
        let window = TimeWindow::from_bounds(self.start, self.end)?;
        let fields = self.entity.descriptor().fields();

        tracing::debug!(
            entity = %self.entity,
            first = self.first.get(),
            direction = %self.direction,
            windowed = window.is_some(),
            "built event query"
        );

        Ok(EventQuery {
            entity: self.entity,
            fields,
            first: self.first,
            direction: self.direction,
            window,
        })
    }
}
