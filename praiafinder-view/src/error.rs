//! Error types raised while building queries and reading responses.

use thiserror::Error;

/// Errors raised while building a `/top` query.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The near tab needs the user's position.
    #[error("the near tab needs a position")]
    MissingPosition,
}

/// Errors raised while parsing a `/top` body.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body is not JSON of a recognised shape.
    #[error("malformed /top response body")]
    Malformed {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a [`TopSource`](crate::TopSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The upstream answered with a non-success status.
    #[error("recommendations request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The upstream body could not be parsed.
    #[error(transparent)]
    Response(#[from] ResponseError),
}
