//! Recommendation items and beaches as served by the recommendations API.
//!
//! The API names fields in Portuguese (`beach_id`, `nome`, `nota`,
//! `distancia_km`, `used_timestamp`). Deserialisation accepts those names as
//! aliases of the English field names and degrades malformed values to
//! "absent" instead of rejecting the item.

use chrono::{DateTime, Utc};

use crate::{
    Breakdown, BreakdownEntry, RatingBand, WaterType, compact_optional, normalize_rating,
};

/// A beach recommendation for one forecast time.
///
/// # Examples
/// ```
/// use praiafinder_core::{RatingBand, RecommendationItem};
///
/// let item = RecommendationItem::new("carcavelos", "Carcavelos").with_score(34.0);
/// assert_eq!(item.rating(), 8.5);
/// assert_eq!(item.band(), RatingBand::Excellent);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationItem {
    /// Beach identifier.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "beach_id", default, deserialize_with = "wire::lenient_text")
    )]
    pub id: String,
    /// Display name.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "nome", default, deserialize_with = "wire::lenient_text")
    )]
    pub name: String,
    /// Rating on the 0–10 scale, when the provider supplied a number.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "nota",
            default,
            deserialize_with = "wire::lenient_number",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub rating: Option<f64>,
    /// Legacy score on the 0–40 scale.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "wire::lenient_number",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub score: Option<f64>,
    /// Distance from the caller in kilometres.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "distancia_km",
            default,
            deserialize_with = "wire::lenient_number",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub distance_km: Option<f64>,
    /// Forecast time the rating refers to.
    #[cfg_attr(
        feature = "serde",
        serde(
            alias = "used_timestamp",
            default,
            deserialize_with = "wire::lenient_timestamp",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub forecast_at: Option<DateTime<Utc>>,
    /// Raw factor contributions.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "wire::lenient_breakdown",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub breakdown: Option<Breakdown>,
    /// Sea or river; missing and unknown tags mean sea.
    #[cfg_attr(feature = "serde", serde(default))]
    pub water_type: WaterType,
}

impl RecommendationItem {
    /// Construct an item with only an identifier and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the 0–10 rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the legacy 0–40 score.
    #[must_use]
    pub const fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set the distance in kilometres.
    #[must_use]
    pub const fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Set the water type.
    #[must_use]
    pub const fn with_water_type(mut self, water_type: WaterType) -> Self {
        self.water_type = water_type;
        self
    }

    /// Set the raw breakdown.
    #[must_use]
    pub fn with_breakdown(mut self, breakdown: Breakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// Canonical 0–10 rating. See [`normalize_rating`].
    #[must_use]
    pub fn rating(&self) -> f64 {
        normalize_rating(self.rating, self.score)
    }

    /// Severity band of [`RecommendationItem::rating`].
    #[must_use]
    pub fn band(&self) -> RatingBand {
        RatingBand::from_rating(self.rating())
    }

    /// Compacted breakdown rows for this item's water type.
    #[must_use]
    pub fn compact_breakdown(&self) -> Vec<BreakdownEntry> {
        compact_optional(self.breakdown.as_ref(), self.water_type)
    }
}

/// A beach as listed by the beaches endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beach {
    /// Beach identifier.
    pub id: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(alias = "nome"))]
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Region tags such as `lisboa` or `algarve`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone_tags: Vec<String>,
}

#[cfg(feature = "serde")]
mod wire {
    //! Lenient field decoders; malformed values become `None` or empty text.

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::Breakdown;

    /// Strings pass through and numbers are written out; anything else is
    /// empty.
    pub(super) fn lenient_text<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<String, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(text)) => text,
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        })
    }

    pub(super) fn lenient_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(Value::as_f64))
    }

    pub(super) fn lenient_timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .map(|stamp| stamp.with_timezone(&Utc)))
    }

    pub(super) fn lenient_breakdown<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Breakdown>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| Breakdown::deserialize(value).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rating_prefers_nota_over_score() {
        let item = RecommendationItem::new("a", "A")
            .with_rating(6.0)
            .with_score(40.0);
        assert_eq!(item.rating(), 6.0);
        assert_eq!(item.band(), RatingBand::Moderate);
    }

    #[rstest]
    fn missing_rating_and_score_is_zero() {
        let item = RecommendationItem::new("a", "A");
        assert_eq!(item.rating(), 0.0);
        assert_eq!(item.band(), RatingBand::Low);
    }

    #[rstest]
    fn compact_breakdown_uses_item_water_type() {
        let item = RecommendationItem::new("a", "A")
            .with_water_type(WaterType::River)
            .with_breakdown(Breakdown::from_iter([("ondas", 5.0), ("corrente", 2.0)]));
        let rows = item.compact_breakdown();
        let ids: Vec<_> = rows.iter().map(BreakdownEntry::id).collect();
        assert_eq!(ids, ["current"]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_api_payload() {
        let item: RecommendationItem = serde_json::from_str(
            r#"{
                "beach_id": "praia-fluvial-loriga",
                "nome": "Loriga",
                "nota": 7.2,
                "score": 28.8,
                "distancia_km": 12.5,
                "used_timestamp": "2025-07-01T10:00:00Z",
                "breakdown": {"vento": 3.1, "corrente": -1.0},
                "water_type": "fluvial"
            }"#,
        )
        .expect("deserialise item");
        assert_eq!(item.id, "praia-fluvial-loriga");
        assert_eq!(item.name, "Loriga");
        assert_eq!(item.rating, Some(7.2));
        assert_eq!(item.distance_km, Some(12.5));
        assert_eq!(item.water_type, WaterType::River);
        assert_eq!(
            item.forecast_at.map(|stamp| stamp.to_rfc3339()),
            Some("2025-07-01T10:00:00+00:00".to_owned())
        );
        assert_eq!(item.breakdown.as_ref().map(Breakdown::len), Some(2));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn malformed_fields_degrade_to_absent() {
        let item: RecommendationItem = serde_json::from_str(
            r#"{
                "beach_id": "x",
                "nome": "X",
                "nota": "nine",
                "score": 20,
                "distancia_km": null,
                "used_timestamp": "yesterday",
                "breakdown": [1, 2],
                "water_type": "lagoon"
            }"#,
        )
        .expect("deserialise item");
        assert_eq!(item.rating, None);
        assert_eq!(item.rating(), 5.0);
        assert_eq!(item.distance_km, None);
        assert_eq!(item.forecast_at, None);
        assert_eq!(item.breakdown, None);
        assert_eq!(item.water_type, WaterType::Sea);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"{"beach_id": 42, "nome": null, "nota": 8}"#, "42", "")]
    #[case(r#"{"beach_id": ["x"], "nome": {"pt": "X"}}"#, "", "")]
    #[case(r#"{"nota": 8}"#, "", "")]
    fn odd_identity_fields_do_not_reject_the_item(
        #[case] body: &str,
        #[case] id: &str,
        #[case] name: &str,
    ) {
        let item: RecommendationItem = serde_json::from_str(body).expect("deserialise item");
        assert_eq!(item.id, id);
        assert_eq!(item.name, name);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_beach_with_portuguese_names() {
        let beach: Beach = serde_json::from_str(
            r#"{"id": "nazare", "nome": "Nazaré", "lat": 39.6, "lon": -9.07, "zone_tags": ["centro"]}"#,
        )
        .expect("deserialise beach");
        assert_eq!(beach.name, "Nazaré");
        assert_eq!(beach.zone_tags, ["centro"]);
    }
}
