//! Canonical 0–10 ratings and their severity bands.
//!
//! Providers report either a `nota` on the 0–10 scale or a legacy `score` on
//! the 0–40 scale. [`normalize_rating`] folds both into one clamped value that
//! is never NaN, and [`RatingBand`] buckets it for colouring.

/// Upper bound of the canonical rating scale.
pub const MAX_RATING: f64 = 10.0;

/// Upper bound of the legacy score scale.
pub const MAX_LEGACY_SCORE: f64 = 40.0;

/// Resolve the canonical rating from an optional rating and legacy score.
///
/// A finite or infinite `rating` is clamped into `0.0..=10.0`. Otherwise a
/// numeric `score` is converted with [`rating_from_score`]. Anything else
/// yields `0.0`.
///
/// # Examples
/// ```
/// use praiafinder_core::normalize_rating;
///
/// assert_eq!(normalize_rating(Some(12.0), None), 10.0);
/// assert_eq!(normalize_rating(None, Some(20.0)), 5.0);
/// assert_eq!(normalize_rating(Some(f64::NAN), None), 0.0);
/// ```
#[must_use]
pub fn normalize_rating(rating: Option<f64>, score: Option<f64>) -> f64 {
    match (rating.filter(|value| !value.is_nan()), score) {
        (Some(value), _) => value.clamp(0.0, MAX_RATING),
        (None, Some(legacy)) => rating_from_score(legacy),
        (None, None) => 0.0,
    }
}

/// Convert a legacy 0–40 score into a rating rounded to one decimal.
///
/// Rounding is half-up so `score = 1.8` maps to `0.5`. Non-finite scores
/// clamp like any other out-of-range value and NaN becomes `0.0`.
///
/// # Examples
/// ```
/// use praiafinder_core::rating_from_score;
///
/// assert_eq!(rating_from_score(40.0), 10.0);
/// assert_eq!(rating_from_score(33.0), 8.3);
/// assert_eq!(rating_from_score(-4.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the legacy scale conversion divides and rounds to tenths"
)]
pub fn rating_from_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    let tenths = round_half_up(score / 4.0 * 10.0);
    (tenths / 10.0).clamp(0.0, MAX_RATING)
}

#[expect(
    clippy::float_arithmetic,
    reason = "half-up rounding shifts by one half before flooring"
)]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Width of a rating bar as a whole percentage of the scale.
///
/// # Examples
/// ```
/// use praiafinder_core::rating_percent;
///
/// assert_eq!(rating_percent(7.46), 75);
/// assert_eq!(rating_percent(11.0), 100);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the percentage is clamped to 0..=100 before the cast"
)]
pub fn rating_percent(rating: f64) -> u8 {
    let sanitised = normalize_rating(Some(rating), None);
    round_half_up(sanitised / MAX_RATING * 100.0).clamp(0.0, 100.0) as u8
}

/// Severity band used to colour a rating.
///
/// Bands are half-open on their upper edge, so boundary values belong to the
/// higher band.
///
/// # Examples
/// ```
/// use praiafinder_core::RatingBand;
///
/// assert_eq!(RatingBand::from_rating(4.5), RatingBand::Moderate);
/// assert_eq!(RatingBand::from_rating(8.49), RatingBand::Good);
/// assert_eq!(RatingBand::from_rating(8.5), RatingBand::Excellent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RatingBand {
    /// `[0, 4.5)`.
    Low,
    /// `[4.5, 6.5)`.
    Moderate,
    /// `[6.5, 8.5)`.
    Good,
    /// `[8.5, 10]`.
    Excellent,
}

impl RatingBand {
    /// Lower edge of [`RatingBand::Moderate`].
    pub const MODERATE_FROM: f64 = 4.5;
    /// Lower edge of [`RatingBand::Good`].
    pub const GOOD_FROM: f64 = 6.5;
    /// Lower edge of [`RatingBand::Excellent`].
    pub const EXCELLENT_FROM: f64 = 8.5;

    /// Bucket a rating. NaN is treated as `0.0`.
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        let value = normalize_rating(Some(rating), None);
        if value < Self::MODERATE_FROM {
            Self::Low
        } else if value < Self::GOOD_FROM {
            Self::Moderate
        } else if value < Self::EXCELLENT_FROM {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    /// Return the band as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Colour token used for chips and bars.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Low => "red",
            Self::Moderate => "amber",
            Self::Good => "emerald",
            Self::Excellent => "green",
        }
    }
}

impl std::fmt::Display for RatingBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RatingBand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(-3.0), None, 0.0)]
    #[case(Some(14.2), None, 10.0)]
    #[case(Some(7.3), Some(0.0), 7.3)]
    #[case(Some(f64::INFINITY), None, 10.0)]
    #[case(Some(f64::NEG_INFINITY), None, 0.0)]
    #[case(Some(f64::NAN), Some(20.0), 5.0)]
    #[case(None, Some(40.0), 10.0)]
    #[case(None, Some(0.0), 0.0)]
    #[case(None, Some(20.0), 5.0)]
    #[case(None, Some(55.0), 10.0)]
    #[case(None, None, 0.0)]
    fn normalises_rating(
        #[case] rating: Option<f64>,
        #[case] score: Option<f64>,
        #[case] expected: f64,
    ) {
        assert_eq!(normalize_rating(rating, score), expected);
    }

    #[rstest]
    #[case(1.8, 0.5)]
    #[case(29.8, 7.5)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 10.0)]
    fn converts_legacy_scores(#[case] score: f64, #[case] expected: f64) {
        assert_eq!(rating_from_score(score), expected);
    }

    #[rstest]
    #[case(0.0, RatingBand::Low)]
    #[case(4.49, RatingBand::Low)]
    #[case(4.5, RatingBand::Moderate)]
    #[case(6.49, RatingBand::Moderate)]
    #[case(6.5, RatingBand::Good)]
    #[case(8.5, RatingBand::Excellent)]
    #[case(10.0, RatingBand::Excellent)]
    #[case(f64::NAN, RatingBand::Low)]
    fn bands_are_upper_inclusive(#[case] rating: f64, #[case] expected: RatingBand) {
        assert_eq!(RatingBand::from_rating(rating), expected);
    }

    #[test]
    fn band_colours_are_distinct() {
        let colours = [
            RatingBand::Low.colour(),
            RatingBand::Moderate.colour(),
            RatingBand::Good.colour(),
            RatingBand::Excellent.colour(),
        ];
        let unique: std::collections::HashSet<_> = colours.iter().collect();
        assert_eq!(unique.len(), colours.len());
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(5.0, 50)]
    #[case(9.96, 100)]
    #[case(-1.0, 0)]
    fn rating_percent_is_bounded(#[case] rating: f64, #[case] expected: u8) {
        assert_eq!(rating_percent(rating), expected);
    }
}
