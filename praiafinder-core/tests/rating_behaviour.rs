//! Behaviour tests for rating normalisation and banding.

use std::cell::{Cell, RefCell};

use praiafinder_core::{RatingBand, RecommendationItem};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct RatingWorld {
    item: RefCell<RecommendationItem>,
    rating: Cell<f64>,
    band: Cell<Option<RatingBand>>,
}

#[fixture]
fn world() -> RatingWorld {
    RatingWorld::default()
}

#[given("an item with rating {rating:f64}")]
fn given_rating(world: &RatingWorld, rating: f64) {
    world.item.replace(RecommendationItem::new("a", "A").with_rating(rating));
}

#[given("an item with score {score:f64}")]
fn given_score(world: &RatingWorld, score: f64) {
    world.item.replace(RecommendationItem::new("a", "A").with_score(score));
}

#[given("an item with both rating {rating:f64} and score {score:f64}")]
fn given_both(world: &RatingWorld, rating: f64, score: f64) {
    world.item.replace(
        RecommendationItem::new("a", "A")
            .with_rating(rating)
            .with_score(score),
    );
}

#[given("an unrated item")]
fn given_unrated(world: &RatingWorld) {
    world.item.replace(RecommendationItem::new("a", "A"));
}

#[when("I normalise the rating")]
fn when_normalise(world: &RatingWorld) {
    let item = world.item.borrow();
    world.rating.set(item.rating());
    world.band.set(Some(item.band()));
}

#[then("the rating is {expected:f64}")]
fn then_rating(world: &RatingWorld, expected: f64) {
    assert!((world.rating.get() - expected).abs() <= 1e-9);
}

#[then("the band is {band:string}")]
fn then_band(world: &RatingWorld, band: String) {
    let recorded = world.band.get().expect("band should be recorded");
    assert_eq!(recorded.as_str(), band.trim_matches('"'));
}

#[scenario(path = "tests/features/rating.feature", index = 0)]
fn out_of_range_rating(world: RatingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/rating.feature", index = 1)]
fn legacy_score(world: RatingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/rating.feature", index = 2)]
fn rating_precedence(world: RatingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/rating.feature", index = 3)]
fn unrated_item(world: RatingWorld) {
    let _ = world;
}
