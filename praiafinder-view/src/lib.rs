//! Listing logic for PraiaFinder beach recommendations.
//!
//! The crate sits between the pure domain types of [`praiafinder_core`] and
//! whatever performs network requests:
//! - **Configuration** ([`ViewConfig`]) names the tab, zone, radius, day,
//!   slot, activity mode, water filter and order a user selected.
//! - **Queries** ([`TopQuery`]) render those settings into `/top` requests,
//!   and [`parse_top_response`] reads the answers.
//! - **State** ([`ViewState`]) is updated by a reducer that issues
//!   [`FetchCommand`]s tagged with increasing [`RequestId`]s and drops any
//!   result that is no longer current.
//! - **Ranking** ([`rank`]) filters by water type and orders by rating or
//!   distance for display.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use praiafinder_view::{StaticSource, ViewConfig, ViewEvent, ViewState, dispatch};
//!
//! let body = r#"[
//!     {"beach_id": "a", "nome": "Praia A", "score": 20},
//!     {"beach_id": "b", "nome": "Praia B", "nota": 9.1}
//! ]"#;
//! let source = StaticSource::from_body(body, None).expect("valid body");
//! let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
//! let mut state = ViewState::new(ViewConfig::default(), today);
//!
//! dispatch(&mut state, &source, ViewEvent::Refresh);
//! let names: Vec<_> = state.visible_items().iter().map(|row| row.item.name.clone()).collect();
//! assert_eq!(names, ["Praia B", "Praia A"]);
//! ```

#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod query;
pub mod ranking;
pub mod response;
pub mod schedule;
pub mod search;
pub mod source;
pub mod state;

pub use config::{
    ActivityMode, DEFAULT_API_BASE, DEFAULT_RADIUS_KM, Position, RADIUS_KM_RANGE, SortOrder, Tab,
    ViewConfig, Zone, clamp_radius,
};
pub use error::{QueryError, ResponseError, SourceError};
pub use query::{BEACH_CHECK_RADIUS_KM, LISTING_LIMIT, TopQuery, ZONE_DISTANCE_RADIUS_KM};
pub use ranking::{RankedItem, filter_by_water, has_distance, rank, sort_items};
pub use response::{AVAILABLE_UNTIL_HEADER, TopResponse, parse_top_response};
pub use schedule::{
    DayOption, FORECAST_DAYS, TimeSlot, day_option, forecast_when, upcoming_days, weekday_label,
    window_label,
};
pub use search::{SEARCH_LIMIT, pick_beach, search_beaches};
pub use source::{FailingSource, StaticSource, TopSource};
pub use state::{
    DAY_UNAVAILABLE_MESSAGE, EMPTY_LISTING_MESSAGE, FetchCommand, FetchPurpose,
    NEAR_FETCH_FAILED_MESSAGE, POSITION_UNAVAILABLE_MESSAGE, PositionStatus, RequestId, ViewEvent,
    ViewState, ZONE_FETCH_FAILED_MESSAGE, dispatch,
};
