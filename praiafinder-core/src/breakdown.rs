//! Compact a raw factor breakdown into a handful of display rows.
//!
//! [`compact`] classifies every factor, keeps the strongest entry per
//! category, drops categories that do not apply to the beach's water type and
//! returns at most [`MAX_BREAKDOWN_ENTRIES`] rows ordered by impact.

use log::debug;

use crate::{Category, FactorInfo, FactorKind, WaterType, classify};

/// Maximum number of rows [`compact`] returns.
pub const MAX_BREAKDOWN_ENTRIES: usize = 4;

/// Bound applied to every compacted value, in both directions.
pub const MAX_CONTRIBUTION: f64 = 10.0;

/// A raw factor mapping in document order.
///
/// Order matters: when two factors of the same category tie on magnitude the
/// first one wins, and categories with equal magnitude keep their first-seen
/// order after sorting.
///
/// # Examples
/// ```
/// use praiafinder_core::Breakdown;
///
/// let breakdown = Breakdown::from_iter([("vento", 3.0), ("ondas", -1.5)]);
/// assert_eq!(breakdown.len(), 2);
/// assert_eq!(breakdown.get("ondas"), Some(-1.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Breakdown {
    factors: Vec<(String, f64)>,
}

impl Breakdown {
    /// Construct an empty breakdown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Append a factor, keeping any earlier factor with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.factors.push((name.into(), value));
    }

    /// Return the first value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Iterate over factors in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of raw factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Report whether no factors are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Compact this breakdown for `water`. See [`compact`].
    #[must_use]
    pub fn compact(&self, water: WaterType) -> Vec<BreakdownEntry> {
        compact(self.iter(), water)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            factors: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

/// One compacted display row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BreakdownEntry {
    /// Category the row represents.
    #[cfg_attr(feature = "serde", serde(rename = "category"))]
    pub kind: FactorKind,
    /// Display label.
    pub label: String,
    /// Display icon.
    pub icon: &'static str,
    /// Contribution clamped to `-10.0..=10.0`.
    pub value: f64,
}

impl BreakdownEntry {
    fn new(info: FactorInfo, raw: f64) -> Self {
        Self {
            kind: info.kind,
            label: info.label,
            icon: info.icon,
            value: raw.clamp(-MAX_CONTRIBUTION, MAX_CONTRIBUTION),
        }
    }

    /// Identifier of the row's category.
    #[must_use]
    pub fn id(&self) -> &str {
        self.kind.id()
    }

    /// Report whether the factor lowers the rating.
    #[must_use]
    pub fn is_penalty(&self) -> bool {
        self.value < 0.0
    }

    /// Width of the row's bar as a whole percentage.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the magnitude is bounded by MAX_CONTRIBUTION so the percentage fits a u8"
    )]
    pub fn bar_percent(&self) -> u8 {
        (self.value.abs() * 10.0 + 0.5).floor().clamp(0.0, 100.0) as u8
    }

    /// Value formatted for display, e.g. `"7.0/10"` or `"-3.0/10 penal."`.
    ///
    /// # Examples
    /// ```
    /// use praiafinder_core::{Breakdown, WaterType};
    ///
    /// let rows = Breakdown::from_iter([("wind", -3.0)]).compact(WaterType::Sea);
    /// assert_eq!(rows[0].display_value(), "-3.0/10 penal.");
    /// ```
    #[must_use]
    pub fn display_value(&self) -> String {
        let suffix = if self.is_penalty() { " penal." } else { "" };
        format!("{:.1}/10{suffix}", self.value)
    }
}

/// Report whether a category applies to a beach of the given water type.
///
/// River beaches have no waves or offshore wind to speak of; sea beaches
/// have no river current.
#[must_use]
pub fn category_applies(category: Category, water: WaterType) -> bool {
    match water {
        WaterType::River => !matches!(category, Category::Waves | Category::Offshore),
        WaterType::Sea => category != Category::Current,
    }
}

/// Compact raw `(name, value)` factors into display rows.
///
/// 1. Non-finite values are skipped.
/// 2. Each name is classified with [`classify`]; per category only the value
///    with the strictly largest magnitude is kept, so ties favour the first.
/// 3. Categories that do not apply to `water` are dropped.
/// 4. Rows are stably sorted by descending magnitude and truncated to
///    [`MAX_BREAKDOWN_ENTRIES`].
///
/// # Examples
/// ```
/// use praiafinder_core::{WaterType, compact};
///
/// let rows = compact(
///     [("wind_kmh", -3.0), ("wave_height_m", 7.0), ("current_strength", 5.0)],
///     WaterType::Sea,
/// );
/// let ids: Vec<_> = rows.iter().map(|row| (row.id(), row.value)).collect();
/// assert_eq!(ids, [("waves", 7.0), ("wind", -3.0)]);
/// ```
#[must_use]
pub fn compact<'a, I>(factors: I, water: WaterType) -> Vec<BreakdownEntry>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut best: Vec<BreakdownEntry> = Vec::new();
    for (name, raw) in factors {
        if !raw.is_finite() {
            debug!("skipping non-finite breakdown factor {name:?}");
            continue;
        }
        let info = classify(name);
        match best.iter_mut().find(|entry| entry.id() == info.id()) {
            Some(entry) if raw.abs() > entry.value.abs() => {
                *entry = BreakdownEntry::new(info, raw);
            }
            Some(_) => {}
            None => best.push(BreakdownEntry::new(info, raw)),
        }
    }

    best.retain(|entry| {
        entry
            .kind
            .category()
            .is_none_or(|category| category_applies(category, water))
    });
    best.sort_by(|left, right| right.value.abs().total_cmp(&left.value.abs()));
    best.truncate(MAX_BREAKDOWN_ENTRIES);
    best
}

/// Compact an optional breakdown; an absent mapping yields no rows.
#[must_use]
pub fn compact_optional(breakdown: Option<&Breakdown>, water: WaterType) -> Vec<BreakdownEntry> {
    breakdown.map_or_else(Vec::new, |raw| raw.compact(water))
}

#[cfg(feature = "serde")]
mod wire {
    //! Lenient JSON decoding for [`Breakdown`].

    use std::fmt;

    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, SerializeMap, Serializer};
    use serde_json::Value;

    use super::Breakdown;

    /// Numbers and numeric strings are kept; everything else becomes NaN so
    /// compaction drops it.
    fn lenient_value(value: &Value) -> f64 {
        match value {
            Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
            Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    struct BreakdownVisitor;

    impl<'de> Visitor<'de> for BreakdownVisitor {
        type Value = Breakdown;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of factor names to numbers")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Breakdown::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut breakdown = Breakdown::new();
            while let Some((name, value)) = access.next_entry::<String, Value>()? {
                breakdown.push(name, lenient_value(&value));
            }
            Ok(breakdown)
        }
    }

    impl<'de> Deserialize<'de> for Breakdown {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(BreakdownVisitor)
        }
    }

    impl Serialize for Breakdown {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self.iter() {
                map.serialize_entry(name, &value)?;
            }
            map.end()
        }
    }
}
