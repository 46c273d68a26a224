//! Classify free-form breakdown factor names into display categories.
//!
//! Providers name their factors inconsistently (`wind_kmh`, `vento`,
//! `offshore_factor`, ...). [`classify`] applies an ordered table of
//! case-insensitive substring rules and returns the first match. The rules
//! overlap on purpose: `sea_temp` hits the waves rule before the water
//! temperature rule, and `offshore_wind` is an offshore factor rather than a
//! wind factor. Keep the table order stable.
//!
//! # Examples
//! ```
//! use praiafinder_core::{Category, FactorKind, classify};
//!
//! assert_eq!(classify("Wind_kmh").kind, FactorKind::Known(Category::Wind));
//! assert_eq!(classify("cross_shore").kind, FactorKind::Known(Category::Offshore));
//!
//! let other = classify("UV index");
//! assert_eq!(other.id(), "uv_index");
//! assert_eq!(other.label, "UV index");
//! ```

/// A known breakdown category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Wind direction relative to the shore.
    Offshore,
    /// Wind speed.
    Wind,
    /// Wave height, swell and general sea state.
    Waves,
    /// Cloud cover, precipitation and general weather.
    Weather,
    /// River current or water agitation.
    Current,
    /// Water temperature.
    WaterTemp,
}

impl Category {
    /// Stable identifier used as the deduplication key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Offshore => "offshore",
            Self::Wind => "wind",
            Self::Waves => "waves",
            Self::Weather => "weather",
            Self::Current => "current",
            Self::WaterTemp => "water_temp",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offshore => "Offshore",
            Self::Wind => "Wind",
            Self::Waves => "Waves",
            Self::Weather => "Weather",
            Self::Current => "Current",
            Self::WaterTemp => "Water temp.",
        }
    }

    /// Display icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Offshore => "🧭",
            Self::Wind => "🌬️",
            Self::Waves => "🌊",
            Self::Weather => "📈",
            Self::Current => "💧",
            Self::WaterTemp => "🌡️",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Icon shown for factors outside the known categories.
pub const GENERIC_ICON: &str = "•";

/// The category a factor name resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FactorKind {
    /// One of the known categories.
    Known(Category),
    /// A factor no rule recognised, keyed by a slug of its raw name.
    Other(String),
}

impl FactorKind {
    /// Identifier used as the deduplication key.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Known(category) => category.id(),
            Self::Other(slug) => slug,
        }
    }

    /// Return the known category, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Other(_) => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FactorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Result of classifying a raw factor name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorInfo {
    /// Resolved category.
    pub kind: FactorKind,
    /// Display label.
    pub label: String,
    /// Display icon.
    pub icon: &'static str,
}

impl FactorInfo {
    /// Identifier of the resolved category.
    #[must_use]
    pub fn id(&self) -> &str {
        self.kind.id()
    }
}

struct Rule {
    category: Category,
    needles: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        category: Category::Offshore,
        needles: &["offshore", "cross", "onshore"],
    },
    Rule {
        category: Category::Wind,
        needles: &["wind", "vento"],
    },
    Rule {
        category: Category::Waves,
        needles: &["wave", "swell", "sea", "onda"],
    },
    Rule {
        category: Category::Weather,
        needles: &["weather", "cloud", "precip", "meteo", "wx", "tempo", "nuv"],
    },
    Rule {
        category: Category::Current,
        needles: &["current", "agitation", "corrente", "agita"],
    },
    Rule {
        category: Category::WaterTemp,
        needles: &["water-temp", "water_temp", "sst", "agua", "água"],
    },
];

/// Classify a raw factor name.
///
/// Never fails: names no rule recognises become [`FactorKind::Other`] with a
/// slug id, the raw name as label and [`GENERIC_ICON`].
#[must_use]
pub fn classify(raw: &str) -> FactorInfo {
    let lowered = raw.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| lowered.contains(needle)))
        .map_or_else(
            || FactorInfo {
                kind: FactorKind::Other(slug(&lowered)),
                label: display_label(raw),
                icon: GENERIC_ICON,
            },
            |rule| FactorInfo {
                kind: FactorKind::Known(rule.category),
                label: rule.category.label().to_owned(),
                icon: rule.category.icon(),
            },
        )
}

/// Lowercased key with every run of characters outside `[A-Za-z0-9_]`
/// collapsed into a single `_`.
fn slug(lowered: &str) -> String {
    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
            in_gap = false;
        } else if !in_gap {
            out.push('_');
            in_gap = true;
        }
    }
    out
}

/// Raw key with underscores read as spaces and whitespace collapsed.
fn display_label(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
