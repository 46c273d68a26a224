//! Parse `/top` response bodies.

use praiafinder_core::RecommendationItem;
use serde::{Deserialize, Serialize};

use crate::error::ResponseError;

/// Name of the header carrying the forecast horizon.
pub const AVAILABLE_UNTIL_HEADER: &str = "x-available-until";

/// Items and forecast horizon returned by `/top`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopResponse {
    /// Recommendations in the order the API ranked them.
    pub items: Vec<RecommendationItem>,
    /// Last instant with forecast data, as sent by the API.
    #[serde(rename = "availableUntil", skip_serializing_if = "Option::is_none")]
    pub available_until: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    List(Vec<RecommendationItem>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<RecommendationItem>>,
        #[serde(default, rename = "availableUntil")]
        available_until: Option<String>,
    },
}

/// Parse a `/top` body.
///
/// The body is either a bare item array or `{"data": [...],
/// "availableUntil": "..."}`. A non-empty `header` value wins over the body
/// field.
///
/// # Errors
/// Returns [`ResponseError::Malformed`] when the body is not valid JSON of
/// either shape.
///
/// # Examples
/// ```
/// use praiafinder_view::parse_top_response;
///
/// let body = r#"{"data": [{"beach_id": "a", "nome": "A", "nota": 7}], "availableUntil": "2025-07-03T00:00:00Z"}"#;
/// let response = parse_top_response(body, None).expect("valid body");
/// assert_eq!(response.items.len(), 1);
/// assert_eq!(response.available_until.as_deref(), Some("2025-07-03T00:00:00Z"));
/// ```
pub fn parse_top_response(body: &str, header: Option<&str>) -> Result<TopResponse, ResponseError> {
    let parsed: Body =
        serde_json::from_str(body).map_err(|source| ResponseError::Malformed { source })?;
    let (items, from_body) = match parsed {
        Body::List(items) => (items, None),
        Body::Wrapped {
            data,
            available_until,
        } => (data.unwrap_or_default(), available_until),
    };
    let from_header = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);
    Ok(TopResponse {
        items,
        available_until: from_header.or(from_body),
    })
}
