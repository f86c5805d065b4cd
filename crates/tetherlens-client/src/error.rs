//! Client error types.

use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    /// The GraphQL response carried errors.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Query construction or record conversion failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] tetherlens_proto::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Error::Status(status.as_u16())
        } else {
            Error::Transport(err.to_string())
        }
    }
}
