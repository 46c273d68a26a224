//! Filter and order recommendations for display.

use praiafinder_core::{RatingBand, RecommendationItem, WaterFilter, rating_percent};
use serde::Serialize;

use crate::config::SortOrder;

/// Keep the items whose water type passes `filter`, preserving order.
#[must_use]
pub fn filter_by_water(items: &[RecommendationItem], filter: WaterFilter) -> Vec<&RecommendationItem> {
    items
        .iter()
        .filter(|item| filter.accepts(item.water_type))
        .collect()
}

/// Stably sort items in place.
///
/// [`SortOrder::Rating`] puts the highest normalised rating first.
/// [`SortOrder::Distance`] puts the nearest first and items without a
/// distance last.
pub fn sort_items(items: &mut [&RecommendationItem], order: SortOrder) {
    match order {
        SortOrder::Rating => items.sort_by(|left, right| right.rating().total_cmp(&left.rating())),
        SortOrder::Distance => items.sort_by(|left, right| {
            distance_key(left).total_cmp(&distance_key(right))
        }),
    }
}

fn distance_key(item: &RecommendationItem) -> f64 {
    item.distance_km.unwrap_or(f64::INFINITY)
}

/// Report whether any item carries a distance.
#[must_use]
pub fn has_distance(items: &[RecommendationItem]) -> bool {
    items.iter().any(|item| item.distance_km.is_some())
}

/// An item paired with its display rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem<'a> {
    /// Underlying recommendation.
    #[serde(flatten)]
    pub item: &'a RecommendationItem,
    /// Normalised 0–10 rating.
    #[serde(rename = "normalizedRating")]
    pub rating: f64,
    /// Severity band of `rating`.
    pub band: RatingBand,
    /// Width of the rating bar in percent.
    #[serde(rename = "ratingPercent")]
    pub percent: u8,
}

impl<'a> RankedItem<'a> {
    /// Pair `item` with its display rating.
    #[must_use]
    pub fn new(item: &'a RecommendationItem) -> Self {
        let rating = item.rating();
        Self {
            item,
            rating,
            band: RatingBand::from_rating(rating),
            percent: rating_percent(rating),
        }
    }
}

/// Filter, sort and annotate items for display.
///
/// # Examples
/// ```
/// use praiafinder_core::{RecommendationItem, WaterFilter, WaterType};
/// use praiafinder_view::{SortOrder, rank};
///
/// let items = [
///     RecommendationItem::new("a", "A").with_rating(5.0),
///     RecommendationItem::new("b", "B").with_rating(9.0),
///     RecommendationItem::new("c", "C").with_rating(7.0).with_water_type(WaterType::River),
/// ];
/// let ranked = rank(&items, WaterFilter::Only(WaterType::Sea), SortOrder::Rating);
/// let ids: Vec<_> = ranked.iter().map(|row| row.item.id.as_str()).collect();
/// assert_eq!(ids, ["b", "a"]);
/// ```
#[must_use]
pub fn rank(
    items: &[RecommendationItem],
    filter: WaterFilter,
    order: SortOrder,
) -> Vec<RankedItem<'_>> {
    let mut visible = filter_by_water(items, filter);
    sort_items(&mut visible, order);
    visible.into_iter().map(RankedItem::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use praiafinder_core::WaterType;
    use rstest::{fixture, rstest};

    #[fixture]
    fn items() -> Vec<RecommendationItem> {
        vec![
            RecommendationItem::new("far", "Far")
                .with_rating(8.0)
                .with_distance_km(40.0),
            RecommendationItem::new("unknown", "Unknown").with_rating(9.0),
            RecommendationItem::new("near", "Near")
                .with_score(20.0)
                .with_distance_km(3.5)
                .with_water_type(WaterType::River),
            RecommendationItem::new("tied", "Tied")
                .with_rating(8.0)
                .with_distance_km(40.0),
        ]
    }

    fn ids(rows: &[RankedItem<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.item.id.clone()).collect()
    }

    #[rstest]
    fn rating_order_is_descending_and_stable(items: Vec<RecommendationItem>) {
        let rows = rank(&items, WaterFilter::All, SortOrder::Rating);
        assert_eq!(ids(&rows), ["unknown", "far", "tied", "near"]);
    }

    #[rstest]
    fn distance_order_puts_missing_last(items: Vec<RecommendationItem>) {
        let rows = rank(&items, WaterFilter::All, SortOrder::Distance);
        assert_eq!(ids(&rows), ["near", "far", "tied", "unknown"]);
    }

    #[rstest]
    #[case(WaterFilter::Only(WaterType::River), &["near"])]
    #[case(WaterFilter::Only(WaterType::Sea), &["far", "unknown", "tied"])]
    fn water_filter_uses_defaulted_type(
        items: Vec<RecommendationItem>,
        #[case] filter: WaterFilter,
        #[case] expected: &[&str],
    ) {
        let kept: Vec<_> = filter_by_water(&items, filter)
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(kept, expected);
    }

    #[rstest]
    fn ranked_rows_carry_rating_and_band(items: Vec<RecommendationItem>) {
        let rows = rank(&items, WaterFilter::Only(WaterType::River), SortOrder::Rating);
        let row = rows.first().expect("one river item");
        assert_eq!(row.rating, 5.0);
        assert_eq!(row.band, RatingBand::Moderate);
        assert_eq!(row.percent, 50);
        assert!(has_distance(&items));
    }
}
