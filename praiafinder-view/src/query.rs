//! Build `/top` recommendation queries.

use praiafinder_core::Beach;
use url::form_urlencoded;

use crate::config::{ActivityMode, Position, Tab, ViewConfig, Zone};
use crate::error::QueryError;

/// Results requested for a listing.
pub const LISTING_LIMIT: u16 = 16;

/// Radius sent with zone queries so the API reports distances without
/// narrowing the zone.
pub const ZONE_DISTANCE_RADIUS_KM: u16 = 10_000;

/// Radius used when checking a single beach.
pub const BEACH_CHECK_RADIUS_KM: u16 = 2;

/// Parameters of one `/top` request, in the order they are sent.
///
/// # Examples
/// ```
/// use praiafinder_view::{TopQuery, ViewConfig};
///
/// let query = TopQuery::for_view(&ViewConfig::default(), None, "2025-07-01T10:00:00Z")
///     .expect("zone queries need no position");
/// assert_eq!(
///     query.to_url("/api"),
///     "/api/top?zone=lisboa&mode=familia&when=2025-07-01T10%3A00%3A00Z&limit=16"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopQuery {
    params: Vec<(&'static str, String)>,
}

impl TopQuery {
    /// Build the listing query for the active tab.
    ///
    /// # Errors
    /// Returns [`QueryError::MissingPosition`] when the near tab is active and
    /// `position` is `None`.
    pub fn for_view(
        config: &ViewConfig,
        position: Option<Position>,
        when: &str,
    ) -> Result<Self, QueryError> {
        match config.tab {
            Tab::Zone => Ok(Self::zone(config.zone, config.mode, when, position)),
            Tab::Near => position
                .map(|here| Self::near(here, config.radius_km, config.mode, when))
                .ok_or(QueryError::MissingPosition),
        }
    }

    /// Listing query for a named zone. A known position adds distances.
    #[must_use]
    pub fn zone(zone: Zone, mode: ActivityMode, when: &str, position: Option<Position>) -> Self {
        let mut query = Self {
            params: vec![
                ("zone", zone.as_str().to_owned()),
                ("mode", mode.as_str().to_owned()),
                ("when", when.to_owned()),
                ("limit", LISTING_LIMIT.to_string()),
            ],
        };
        if let Some(here) = position {
            query.push_position(here);
            query.push("radius_km", ZONE_DISTANCE_RADIUS_KM.to_string());
        }
        query
    }

    /// Listing query around a position.
    #[must_use]
    pub fn near(position: Position, radius_km: u16, mode: ActivityMode, when: &str) -> Self {
        let mut query = Self { params: Vec::new() };
        query.push_position(position);
        query.push("radius_km", radius_km.to_string());
        query.push("mode", mode.as_str().to_owned());
        query.push("when", when.to_owned());
        query.push("limit", LISTING_LIMIT.to_string());
        query
    }

    /// Query checking a single beach at its coordinates.
    #[must_use]
    pub fn beach_check(beach: &Beach, mode: ActivityMode, when: &str) -> Self {
        let mut query = Self { params: Vec::new() };
        query.push_position(Position::new(beach.lat, beach.lon));
        query.push("radius_km", BEACH_CHECK_RADIUS_KM.to_string());
        query.push("limit", "1".to_owned());
        query.push("mode", mode.as_str().to_owned());
        query.push("when", when.to_owned());
        query
    }

    fn push(&mut self, key: &'static str, value: String) {
        self.params.push((key, value));
    }

    fn push_position(&mut self, position: Position) {
        self.push("lat", position.lat.to_string());
        self.push("lon", position.lon.to_string());
    }

    /// Return the first value recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over parameters in send order.
    pub fn params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Form-urlencoded query string.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish()
    }

    /// Full request target under `api_base`.
    #[must_use]
    pub fn to_url(&self, api_base: &str) -> String {
        format!("{}/top?{}", api_base.trim_end_matches('/'), self.encode())
    }
}
