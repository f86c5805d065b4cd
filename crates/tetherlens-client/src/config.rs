//! Client configuration.

use std::time::Duration;

/// Default subgraph endpoint (a local graph-node).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/subgraphs/name/tether-usdt";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("tetherlens/", env!("CARGO_PKG_VERSION"));

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Static headers sent with every request.
    pub headers: Vec<(String, String)>,

    /// Request timeout.
    pub timeout: Duration,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Configuration for a graph-node on localhost.
    pub fn localhost() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Add a static header. A header with the same name (ignoring case) is
    /// replaced.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Authenticate with `Authorization: Bearer <token>`.
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.with_header("Authorization", value)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Value of a configured header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::localhost()
    }
}
