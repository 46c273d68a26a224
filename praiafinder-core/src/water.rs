//! Water types describing whether a beach faces the sea or a river.
//!
//! The API speaks Portuguese (`mar`, `fluvial`) while the library uses the
//! English names; both spellings parse.
//!
//! # Examples
//! ```
//! use praiafinder_core::WaterType;
//!
//! assert_eq!(WaterType::River.as_str(), "river");
//! assert_eq!(WaterType::River.wire_name(), "fluvial");
//! assert_eq!("mar".parse::<WaterType>(), Ok(WaterType::Sea));
//! ```

use crate::ParseError;

/// Classification of a bathing location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaterType {
    /// Sea-facing beach. Items without a tag default to this.
    #[default]
    Sea,
    /// River or fluvial beach.
    River,
}

impl WaterType {
    /// Return the English lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::River => "river",
        }
    }

    /// Return the name used by the recommendations API.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Sea => "mar",
            Self::River => "fluvial",
        }
    }

    /// Short human-readable description shown on cards.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sea => "Praia de mar",
            Self::River => "Praia fluvial",
        }
    }
}

impl std::fmt::Display for WaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WaterType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sea" | "mar" => Ok(Self::Sea),
            "river" | "fluvial" => Ok(Self::River),
            _ => Err(ParseError::unknown("water type", s)),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WaterType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Unknown tags degrade to [`WaterType::Sea`] rather than rejecting the item.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WaterType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|tag| tag.parse().ok())
            .unwrap_or_default())
    }
}

/// Which water types a listing should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaterFilter {
    /// Show every item.
    #[default]
    All,
    /// Show only items of this water type.
    Only(WaterType),
}

impl WaterFilter {
    /// Report whether an item with `water` passes the filter.
    ///
    /// # Examples
    /// ```
    /// use praiafinder_core::{WaterFilter, WaterType};
    ///
    /// assert!(WaterFilter::All.accepts(WaterType::River));
    /// assert!(!WaterFilter::Only(WaterType::Sea).accepts(WaterType::River));
    /// ```
    #[must_use]
    pub fn accepts(self, water: WaterType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == water,
        }
    }

    /// Return the English lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(water) => water.as_str(),
        }
    }
}

impl std::fmt::Display for WaterFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WaterFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<WaterType>()
            .map(Self::Only)
            .map_err(|_| ParseError::unknown("water filter", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("sea", WaterType::Sea)]
    #[case("mar", WaterType::Sea)]
    #[case("River", WaterType::River)]
    #[case("fluvial", WaterType::River)]
    fn parses_both_vocabularies(#[case] raw: &str, #[case] expected: WaterType) {
        assert_eq!(WaterType::from_str(raw), Ok(expected));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = WaterType::from_str("lagoon").unwrap_err();
        assert!(err.to_string().contains("unknown water type"));
    }

    #[rstest]
    #[case("all", WaterFilter::All)]
    #[case("mar", WaterFilter::Only(WaterType::Sea))]
    #[case("river", WaterFilter::Only(WaterType::River))]
    fn parses_filters(#[case] raw: &str, #[case] expected: WaterFilter) {
        assert_eq!(WaterFilter::from_str(raw), Ok(expected));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(WaterType::River.to_string(), WaterType::River.as_str());
        assert_eq!(WaterFilter::All.to_string(), "all");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case("\"fluvial\"", WaterType::River)]
    #[case("\"sea\"", WaterType::Sea)]
    #[case("\"lagoon\"", WaterType::Sea)]
    #[case("null", WaterType::Sea)]
    #[case("3", WaterType::Sea)]
    fn deserialises_leniently(#[case] json: &str, #[case] expected: WaterType) {
        let parsed: WaterType = serde_json::from_str(json).expect("deserialise water type");
        assert_eq!(parsed, expected);
    }
}
