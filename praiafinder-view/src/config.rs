//! Listing configuration: which tab, region, time window and ordering the
//! user selected.
//!
//! Every option has an English name and the wire name the recommendations
//! API and older saved settings use; [`std::str::FromStr`] accepts both.

use std::ops::RangeInclusive;

use praiafinder_core::{ParseError, WaterFilter};
use serde::{Deserialize, Serialize};

use crate::schedule::{FORECAST_DAYS, TimeSlot};

/// Radius used by the near tab until the user moves the slider.
pub const DEFAULT_RADIUS_KM: u16 = 50;

/// Radii the near tab accepts.
pub const RADIUS_KM_RANGE: RangeInclusive<u16> = 10..=120;

/// Default API base path.
pub const DEFAULT_API_BASE: &str = "/api";

/// How the listing selects beaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Beaches around the user's position.
    Near,
    /// Beaches in a named region.
    #[default]
    Zone,
}

impl Tab {
    /// Return the tab as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Zone => "zone",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tab {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "near" | "perto" => Ok(Self::Near),
            "zone" | "zona" | "zonas" => Ok(Self::Zone),
            _ => Err(ParseError::unknown("tab", s)),
        }
    }
}

/// A named region of Portugal.
///
/// # Examples
/// ```
/// use praiafinder_view::Zone;
///
/// assert_eq!("acores".parse::<Zone>().map(Zone::label), Ok("Açores"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Northern coast and inland rivers.
    Norte,
    /// Central region.
    Centro,
    /// Lisbon and its coast.
    #[default]
    Lisboa,
    /// Alentejo coast.
    Alentejo,
    /// Algarve.
    Algarve,
    /// Azores archipelago.
    Acores,
    /// Madeira archipelago.
    Madeira,
}

impl Zone {
    /// Every zone in display order.
    pub const ALL: [Self; 7] = [
        Self::Norte,
        Self::Centro,
        Self::Lisboa,
        Self::Alentejo,
        Self::Algarve,
        Self::Acores,
        Self::Madeira,
    ];

    /// Return the zone id sent to the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Norte => "norte",
            Self::Centro => "centro",
            Self::Lisboa => "lisboa",
            Self::Alentejo => "alentejo",
            Self::Algarve => "algarve",
            Self::Acores => "acores",
            Self::Madeira => "madeira",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Norte => "Norte",
            Self::Centro => "Centro",
            Self::Lisboa => "Lisboa",
            Self::Alentejo => "Alentejo",
            Self::Algarve => "Algarve",
            Self::Acores => "Açores",
            Self::Madeira => "Madeira",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "norte" => Ok(Self::Norte),
            "centro" => Ok(Self::Centro),
            "lisboa" => Ok(Self::Lisboa),
            "alentejo" => Ok(Self::Alentejo),
            "algarve" => Ok(Self::Algarve),
            "acores" | "açores" => Ok(Self::Acores),
            "madeira" => Ok(Self::Madeira),
            _ => Err(ParseError::unknown("zone", s)),
        }
    }
}

/// Activity the recommendations are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityMode {
    /// Family bathing.
    #[default]
    Familia,
    /// Surfing.
    Surf,
    /// Snorkelling.
    Snorkel,
}

impl ActivityMode {
    /// Return the mode id sent to the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Familia => "familia",
            Self::Surf => "surf",
            Self::Snorkel => "snorkel",
        }
    }
}

impl std::fmt::Display for ActivityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "familia" | "família" | "family" => Ok(Self::Familia),
            "surf" => Ok(Self::Surf),
            "snorkel" => Ok(Self::Snorkel),
            _ => Err(ParseError::unknown("activity mode", s)),
        }
    }
}

/// Ordering applied to the visible listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Highest rating first.
    #[default]
    #[serde(rename = "rating", alias = "nota")]
    Rating,
    /// Nearest first; items without a distance go last.
    #[serde(rename = "distance", alias = "dist")]
    Distance,
}

impl SortOrder {
    /// Return the order as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Distance => "distance",
        }
    }

    /// Return the short name stored by older settings.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Rating => "nota",
            Self::Distance => "dist",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" | "nota" => Ok(Self::Rating),
            "distance" | "dist" => Ok(Self::Distance),
            _ => Err(ParseError::unknown("sort order", s)),
        }
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Position {
    /// Construct a position.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Every user-selectable option of the listing.
///
/// # Examples
/// ```
/// use praiafinder_view::{SortOrder, Tab, ViewConfig};
///
/// let config = ViewConfig::default().with_radius_km(500);
/// assert_eq!(config.tab, Tab::Zone);
/// assert_eq!(config.radius_km, 120);
/// assert_eq!(config.order, SortOrder::Rating);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Active tab.
    pub tab: Tab,
    /// Region used by the zone tab.
    pub zone: Zone,
    /// Search radius used by the near tab, within [`RADIUS_KM_RANGE`].
    #[serde(deserialize_with = "clamped_radius")]
    pub radius_km: u16,
    /// Selected day as an offset from today, `0..7`.
    pub day: u8,
    /// Selected time slot.
    pub slot: TimeSlot,
    /// Activity the ratings are tuned for.
    pub mode: ActivityMode,
    /// Water types shown in the listing.
    #[serde(with = "water_filter")]
    pub water: WaterFilter,
    /// Listing order.
    pub order: SortOrder,
    /// Base path or URL of the recommendations API.
    pub api_base: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            zone: Zone::default(),
            radius_km: DEFAULT_RADIUS_KM,
            day: 0,
            slot: TimeSlot::default(),
            mode: ActivityMode::default(),
            water: WaterFilter::default(),
            order: SortOrder::default(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }
}

impl ViewConfig {
    /// Set the near-tab radius, clamped into [`RADIUS_KM_RANGE`].
    #[must_use]
    pub fn with_radius_km(mut self, radius_km: u16) -> Self {
        self.radius_km = clamp_radius(radius_km);
        self
    }

    /// Bring fields set directly back into range: the radius is clamped and
    /// a day outside the forecast window falls back to today.
    ///
    /// # Examples
    /// ```
    /// use praiafinder_view::ViewConfig;
    ///
    /// let config = ViewConfig { radius_km: 500, day: 9, ..ViewConfig::default() }.normalized();
    /// assert_eq!((config.radius_km, config.day), (120, 0));
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.radius_km = clamp_radius(self.radius_km);
        if self.day >= FORECAST_DAYS {
            self.day = 0;
        }
        self
    }
}

/// Clamp a radius into [`RADIUS_KM_RANGE`].
#[must_use]
pub fn clamp_radius(radius_km: u16) -> u16 {
    radius_km.clamp(*RADIUS_KM_RANGE.start(), *RADIUS_KM_RANGE.end())
}

fn clamped_radius<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    u16::deserialize(deserializer).map(clamp_radius)
}

mod water_filter {
    //! Water filters travel as `all`, `sea`/`mar` or `river`/`fluvial`.

    use praiafinder_core::WaterFilter;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S: Serializer>(
        filter: &WaterFilter,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(filter.as_str())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<WaterFilter, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praiafinder_core::WaterType;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("nota", SortOrder::Rating)]
    #[case("dist", SortOrder::Distance)]
    #[case("Distance", SortOrder::Distance)]
    fn sort_order_accepts_both_vocabularies(#[case] raw: &str, #[case] expected: SortOrder) {
        assert_eq!(SortOrder::from_str(raw), Ok(expected));
    }

    #[test]
    fn zone_parsing_rejects_unknown() {
        let err = Zone::from_str("galiza").unwrap_err();
        assert!(err.to_string().contains("unknown zone"));
    }

    #[test]
    fn zones_round_trip_through_display() {
        for zone in Zone::ALL {
            assert_eq!(Zone::from_str(&zone.to_string()), Ok(zone));
        }
    }

    #[rstest]
    #[case(0, 10)]
    #[case(75, 75)]
    #[case(u16::MAX, 120)]
    fn radius_is_clamped(#[case] raw: u16, #[case] expected: u16) {
        assert_eq!(ViewConfig::default().with_radius_km(raw).radius_km, expected);
    }

    #[test]
    fn deserialises_partial_config_with_wire_names() {
        let config: ViewConfig = serde_json::from_str(
            r#"{"tab": "near", "water": "fluvial", "order": "dist", "slot": "15-18"}"#,
        )
        .expect("deserialise config");
        assert_eq!(config.tab, Tab::Near);
        assert_eq!(config.water, WaterFilter::Only(WaterType::River));
        assert_eq!(config.order, SortOrder::Distance);
        assert_eq!(config.slot, TimeSlot::Afternoon);
        assert_eq!(config.zone, Zone::Lisboa);
        assert_eq!(config.radius_km, DEFAULT_RADIUS_KM);
    }

    #[rstest]
    #[case(r#"{"tab": "near", "radius_km": 500}"#, 120)]
    #[case(r#"{"radius_km": 2}"#, 10)]
    fn deserialised_radius_is_clamped(#[case] raw: &str, #[case] expected: u16) {
        let config: ViewConfig = serde_json::from_str(raw).expect("deserialise config");
        assert_eq!(config.radius_km, expected);
    }

    #[test]
    fn normalizing_repairs_literal_fields() {
        let config = ViewConfig {
            radius_km: 3,
            day: FORECAST_DAYS,
            ..ViewConfig::default()
        }
        .normalized();
        assert_eq!(config.radius_km, 10);
        assert_eq!(config.day, 0);
    }
}
