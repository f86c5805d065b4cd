//! The GraphQL transport seam.

use async_trait::async_trait;
use tetherlens_proto::{GraphQlRequest, QueryResult};

use crate::error::Error;

/// Executes a GraphQL request and returns its `data`, grouped by collection.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> Result<QueryResult, Error>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<E> {
    async fn execute(&self, request: &GraphQlRequest) -> Result<QueryResult, Error> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    async fn execute(&self, request: &GraphQlRequest) -> Result<QueryResult, Error> {
        (**self).execute(request).await
    }
}
