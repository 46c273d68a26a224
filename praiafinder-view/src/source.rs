//! Providers of `/top` responses.
//!
//! Network access lives outside this workspace. A [`TopSource`] stands in
//! for it so the view state can be driven end to end from captured
//! responses.

use crate::error::{ResponseError, SourceError};
use crate::query::TopQuery;
use crate::response::{TopResponse, parse_top_response};

/// Fetch recommendations for a query.
pub trait TopSource {
    /// Resolve `query` into a response.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the source cannot produce a response.
    fn fetch(&self, query: &TopQuery) -> Result<TopResponse, SourceError>;
}

/// Replays one captured `/top` response for every query.
///
/// # Examples
/// ```
/// use praiafinder_view::{StaticSource, TopQuery, TopSource, ViewConfig};
///
/// let source = StaticSource::from_body(r#"[{"beach_id": "a", "nome": "A"}]"#, None)
///     .expect("valid body");
/// let query = TopQuery::for_view(&ViewConfig::default(), None, "2025-07-01T10:00:00Z")
///     .expect("zone query");
/// assert_eq!(source.fetch(&query).map(|response| response.items.len()).ok(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticSource {
    response: TopResponse,
}

impl StaticSource {
    /// Wrap an already parsed response.
    #[must_use]
    pub const fn new(response: TopResponse) -> Self {
        Self { response }
    }

    /// Parse a captured body and optional `x-available-until` header.
    ///
    /// # Errors
    /// Returns [`ResponseError`] when the body is malformed.
    pub fn from_body(body: &str, available_until: Option<&str>) -> Result<Self, ResponseError> {
        parse_top_response(body, available_until).map(Self::new)
    }

    /// The response replayed by this source.
    #[must_use]
    pub const fn response(&self) -> &TopResponse {
        &self.response
    }
}

impl TopSource for StaticSource {
    fn fetch(&self, _query: &TopQuery) -> Result<TopResponse, SourceError> {
        Ok(self.response.clone())
    }
}

/// A source that always fails with the given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailingSource {
    /// Status reported by every fetch.
    pub status: u16,
}

impl TopSource for FailingSource {
    fn fetch(&self, _query: &TopQuery) -> Result<TopResponse, SourceError> {
        Err(SourceError::Status {
            status: self.status,
        })
    }
}
