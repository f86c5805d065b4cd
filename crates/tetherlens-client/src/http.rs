//! GraphQL over HTTP.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tetherlens_proto::{GraphQlRequest, QueryResult};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::executor::QueryExecutor;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Posts `{query, variables}` as JSON to the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExecutor {
    /// Build an executor, validating the configured headers.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        if config.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint must not be empty".into()));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("header name '{}': {}", name, e)))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("header '{}': {}", name, e)))?;
            if name == reqwest::header::AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Endpoint this executor posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn execute(&self, request: &GraphQlRequest) -> Result<QueryResult, Error> {
        tracing::debug!(endpoint = %self.endpoint, "posting graphql request");

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

/// Interpret a GraphQL response body.
pub fn parse_response(body: &[u8]) -> Result<QueryResult, Error> {
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))?;

    if !envelope.errors.is_empty() {
        return Err(Error::GraphQl(
            envelope.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match envelope.data {
        Some(data) => Ok(QueryResult::from_json(data)?),
        None => Err(Error::Decode("response carries neither data nor errors".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_data() {
        let body = br#"{"data": {"transfers": [
            {"id": "1", "from": "0xa", "to": "0xb", "value": "5",
             "blockNumber": "19000000", "blockTimestamp": "1700000000",
             "transactionHash": "0xfeed"}
        ]}}"#;

        let result = parse_response(body).unwrap();
        let rows = result.collection("transfers").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("value"), Some("5"));
    }

    #[test]
    fn test_parse_errors() {
        let body = br#"{"errors": [{"message": "Type `Query` has no field `foo`"}, {"message": "second"}]}"#;
        match parse_response(body) {
            Err(Error::GraphQl(messages)) => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[1], "second");
            }
            other => panic!("expected graphql error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors_win_over_partial_data() {
        let body = br#"{"data": {"transfers": []}, "errors": [{"message": "indexing error"}]}"#;
        assert!(matches!(parse_response(body), Err(Error::GraphQl(_))));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_response(b"<html>"), Err(Error::Decode(_))));
        assert!(matches!(parse_response(b"{}"), Err(Error::Decode(_))));
        assert!(matches!(
            parse_response(br#"{"data": {"transfers": {"id": "1"}}}"#),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = ClientConfig::localhost().with_header("bad header", "x");
        assert!(matches!(HttpExecutor::new(&config), Err(Error::Config(_))));

        let config = ClientConfig::localhost().with_header("X-Ok", "line\nbreak");
        assert!(matches!(HttpExecutor::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = ClientConfig::new(" ").with_timeout(Duration::from_secs(1));
        assert!(matches!(HttpExecutor::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ClientConfig::new("http://127.0.0.1:9/graphql")
            .with_timeout(Duration::from_millis(500));
        let executor = HttpExecutor::new(&config).unwrap();
        let request = GraphQlRequest {
            query: "{ transfers { id } }".into(),
            variables: serde_json::json!({}),
        };
        assert!(matches!(
            executor.execute(&request).await,
            Err(Error::Transport(_))
        ));
    }
}
