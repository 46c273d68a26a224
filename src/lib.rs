//! Facade crate for PraiaFinder beach recommendations.
//!
//! This crate re-exports the rating, classification and breakdown types of
//! `praiafinder-core` together with the listing logic of
//! `praiafinder-view`.

#![forbid(unsafe_code)]

pub use praiafinder_core::{
    Beach, Breakdown, BreakdownEntry, Category, FactorInfo, FactorKind, MAX_BREAKDOWN_ENTRIES,
    MAX_RATING, ParseError, RatingBand, RecommendationItem, WaterFilter, WaterType, classify,
    compact, normalize_rating,
};

pub use praiafinder_view::{
    FetchCommand, QueryError, RankedItem, ResponseError, SortOrder, SourceError, TopQuery,
    TopResponse, TopSource, ViewConfig, ViewEvent, ViewState, dispatch, parse_top_response,
    pick_beach, rank, search_beaches,
};
