//! Event table orchestration.
//!
//! [`EventBrowser`] runs query cycles against a [`QueryExecutor`] and keeps
//! the displayed table. Submissions may overlap; each one takes a
//! generation number and only the newest generation may touch the table.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tetherlens_proto::{
    columns, project, ColumnSpec, EntityType, EventQuery, EventRecord, Notifier, OrderDirection,
    ResultLimit,
};

use crate::error::Error;
use crate::executor::QueryExecutor;

/// Shown when a query cycle fails.
pub const QUERY_FAILED_MESSAGE: &str = "query failed, please try again later";

/// Shown when a query succeeds with zero rows.
pub const NO_RECORDS_MESSAGE: &str = "no matching records";

/// The query form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryForm {
    pub entity: EntityType,
    pub limit: ResultLimit,
    pub direction: OrderDirection,
    /// Lower bound, Unix seconds.
    pub start: Option<i64>,
    /// Upper bound, Unix seconds.
    pub end: Option<i64>,
}

impl QueryForm {
    pub fn new(entity: EntityType) -> Self {
        Self {
            entity,
            limit: ResultLimit::default(),
            direction: OrderDirection::default(),
            start: None,
            end: None,
        }
    }

    pub fn with_limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_direction(mut self, direction: OrderDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_range(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Build the query this form describes.
    pub fn to_query(&self) -> Result<EventQuery, tetherlens_proto::Error> {
        EventQuery::builder(self.entity)
            .first(self.limit)
            .direction(self.direction)
            .time_range(self.start, self.end)
            .build()
    }
}

impl Default for QueryForm {
    fn default() -> Self {
        Self::new(EntityType::Issues)
    }
}

/// Result of one [`EventBrowser::submit`] call.
#[derive(Debug)]
pub enum Outcome {
    /// The response was displayed; carries the row count.
    Applied(usize),
    /// A newer submission was issued first; the response was discarded.
    Stale,
    /// The cycle failed. The table was cleared if this was the newest
    /// submission.
    Failed(Error),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

/// What the table currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    entity: Option<EntityType>,
    columns: Vec<ColumnSpec>,
    rows: Vec<EventRecord>,
    loading: bool,
}

impl BrowserState {
    /// Entity whose columns are displayed.
    pub fn entity(&self) -> Option<EntityType> {
        self.entity
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[EventRecord] {
        &self.rows
    }

    /// Whether the newest submission is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn replace(&mut self, entity: EntityType, rows: Vec<EventRecord>) {
        self.entity = Some(entity);
        self.columns = columns(entity);
        self.rows = rows;
        self.loading = false;
    }
}

/// Runs query cycles and owns the displayed table.
pub struct EventBrowser<E, N> {
    executor: E,
    notifier: N,
    generation: AtomicU64,
    state: Mutex<BrowserState>,
}

impl<E: QueryExecutor, N: Notifier> EventBrowser<E, N> {
    pub fn new(executor: E, notifier: N) -> Self {
        Self {
            executor,
            notifier,
            generation: AtomicU64::new(0),
            state: Mutex::new(BrowserState::default()),
        }
    }

    /// The transport in use.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Snapshot of the displayed table.
    pub fn state(&self) -> BrowserState {
        self.state.lock().clone()
    }

    /// Generation of the newest submission.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run one query cycle.
    ///
    /// An invalid form is reported as a warning and leaves the table as
    /// it is. Otherwise the response, or the failure, is applied only if no
    /// newer submission was issued while this one was in flight.
    pub async fn submit(&self, form: &QueryForm) -> Outcome {
        let query = match form.to_query() {
            Ok(query) => query,
            Err(err) => {
                self.notifier.warning(&err.to_string());
                return Outcome::Failed(err.into());
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().loading = true;
        tracing::debug!(generation, entity = %form.entity, "submitting query");

        let response = self.executor.execute(&query.to_request()).await;

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, entity = %form.entity, "discarding stale response");
            return Outcome::Stale;
        }

        match response {
            Ok(result) => {
                let rows = project(result, form.entity);
                let count = rows.len();
                state.replace(form.entity, rows);
                drop(state);

                tracing::info!(generation, entity = %form.entity, rows = count, "query applied");
                if count > 0 {
                    self.notifier.success(&format!("found {} records", count));
                } else {
                    self.notifier.info(NO_RECORDS_MESSAGE);
                }
                Outcome::Applied(count)
            }
            Err(err) => {
                state.replace(form.entity, Vec::new());
                drop(state);

                tracing::error!(generation, entity = %form.entity, error = %err, "query failed");
                self.notifier.error(QUERY_FAILED_MESSAGE);
                Outcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tetherlens_proto::{GraphQlRequest, MemoryNotifier, NoticeLevel, QueryResult};

    struct Fixed(QueryResult);

    #[async_trait]
    impl QueryExecutor for Fixed {
        async fn execute(&self, _request: &GraphQlRequest) -> Result<QueryResult, Error> {
            Ok(self.0.clone())
        }
    }

    fn transfer(id: &str) -> EventRecord {
        EventRecord::new()
            .with("id", id)
            .with("from", "0xa")
            .with("to", "0xb")
            .with("value", "100")
            .with("blockNumber", "1")
            .with("blockTimestamp", "1700000000")
            .with("transactionHash", "0xfeed")
    }

    #[test]
    fn test_default_form() {
        let form = QueryForm::default();
        assert_eq!(form.entity, EntityType::Issues);
        assert_eq!(form.limit, ResultLimit::Ten);
        assert_eq!(form.direction, OrderDirection::Desc);
        assert_eq!(form.to_query().unwrap().window(), None);
    }

    #[tokio::test]
    async fn test_applies_rows_and_columns_together() {
        let result =
            QueryResult::new().with_collection("transfers", vec![transfer("1"), transfer("2")]);
        let notifier = MemoryNotifier::new();
        let browser = EventBrowser::new(Fixed(result), &notifier);

        let outcome = browser.submit(&QueryForm::new(EntityType::Transfers)).await;
        assert!(matches!(outcome, Outcome::Applied(2)));

        let state = browser.state();
        assert_eq!(state.entity(), Some(EntityType::Transfers));
        assert_eq!(state.columns(), columns(EntityType::Transfers).as_slice());
        assert_eq!(state.rows().len(), 2);
        assert!(!state.is_loading());
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Success));
    }

    #[tokio::test]
    async fn test_empty_result_notifies_info() {
        let notifier = MemoryNotifier::new();
        let browser = EventBrowser::new(Fixed(QueryResult::new()), &notifier);

        let outcome = browser.submit(&QueryForm::new(EntityType::Pauses)).await;
        assert!(matches!(outcome, Outcome::Applied(0)));
        assert_eq!(
            notifier.last().map(|n| n.message),
            Some(NO_RECORDS_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_window_leaves_table_untouched() {
        let notifier = MemoryNotifier::new();
        let browser = EventBrowser::new(Fixed(QueryResult::new()), &notifier);

        let form = QueryForm::new(EntityType::Transfers).with_range(Some(20), Some(10));
        let outcome = browser.submit(&form).await;
        assert!(matches!(
            outcome,
            Outcome::Failed(Error::Protocol(tetherlens_proto::Error::InvalidTimeWindow { .. }))
        ));
        assert_eq!(browser.generation(), 0);
        assert_eq!(browser.state(), BrowserState::default());
        assert_eq!(notifier.last().map(|n| n.level), Some(NoticeLevel::Warning));
    }
}
