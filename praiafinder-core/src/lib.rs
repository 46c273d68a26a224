//! Core domain types for PraiaFinder beach recommendations.
//!
//! The crate turns loosely shaped provider data into values a listing can
//! display: a canonical 0–10 rating ([`normalize_rating`]), a category for
//! every raw breakdown factor ([`classify`]) and a short, water-type-aware
//! list of the factors that moved the rating most ([`compact`]).
//!
//! Everything here is pure and synchronous. Deserialisation (behind the
//! default `serde` feature) is lenient: malformed fields degrade to
//! "absent" instead of rejecting a whole item.

#![forbid(unsafe_code)]

pub mod breakdown;
pub mod category;
mod error;
pub mod item;
pub mod rating;
pub mod water;

pub use breakdown::{
    Breakdown, BreakdownEntry, MAX_BREAKDOWN_ENTRIES, MAX_CONTRIBUTION, category_applies,
    compact, compact_optional,
};
pub use category::{Category, FactorInfo, FactorKind, GENERIC_ICON, classify};
pub use error::ParseError;
pub use item::{Beach, RecommendationItem};
pub use rating::{
    MAX_LEGACY_SCORE, MAX_RATING, RatingBand, normalize_rating, rating_from_score,
    rating_percent,
};
pub use water::{WaterFilter, WaterType};
