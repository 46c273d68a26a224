//! Listing state driven by a reducer.
//!
//! [`ViewState::apply`] folds one [`ViewEvent`] into the state and returns
//! the fetch, if any, the caller must perform. Every fetch carries a fresh
//! [`RequestId`]. Only the most recently issued listing request and the most
//! recently issued beach check are current; results tagged with any other id
//! are dropped, so a slow response can never overwrite a newer one.
//!
//! ```
//! use chrono::NaiveDate;
//! use praiafinder_view::{StaticSource, ViewEvent, ViewState, Zone, dispatch};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
//! let mut state = ViewState::new(Default::default(), today);
//! let source = StaticSource::from_body(r#"[{"beach_id": "a", "nome": "A", "nota": 8}]"#, None)
//!     .expect("valid body");
//!
//! dispatch(&mut state, &source, ViewEvent::SelectZone(Zone::Algarve));
//! assert_eq!(state.items().len(), 1);
//! assert!(!state.is_loading());
//! ```

use chrono::NaiveDate;
use log::{debug, warn};
use praiafinder_core::{Beach, RecommendationItem, WaterFilter};

use crate::config::{ActivityMode, Position, SortOrder, Tab, ViewConfig, Zone, clamp_radius};
use crate::error::QueryError;
use crate::query::TopQuery;
use crate::ranking::{RankedItem, has_distance, rank};
use crate::response::TopResponse;
use crate::schedule::{DayOption, FORECAST_DAYS, TimeSlot, day_option, forecast_when, window_label};
use crate::source::TopSource;

/// Shown when the near tab is selected but no position can be obtained.
pub const POSITION_UNAVAILABLE_MESSAGE: &str = "Geolocalização indisponível. Usa a aba 'Zonas'.";
/// Shown when a near-tab listing fails.
pub const NEAR_FETCH_FAILED_MESSAGE: &str = "Falha a carregar recomendações perto de ti.";
/// Shown when a zone-tab listing fails.
pub const ZONE_FETCH_FAILED_MESSAGE: &str = "Falha a carregar recomendações por zona.";
/// Shown when the selected day has no forecast window.
pub const DAY_UNAVAILABLE_MESSAGE: &str = "Dia fora da janela de previsão.";
/// Shown when a listing has no items.
pub const EMPTY_LISTING_MESSAGE: &str = "Sem dados para esta janela.";

/// Identifier tagging one fetch. Later requests have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a fetch is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPurpose {
    /// The main recommendation listing.
    Listing,
    /// A single beach picked from search.
    BeachCheck,
}

/// A fetch the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    /// Tag to echo in the result event.
    pub id: RequestId,
    /// What the result will be used for.
    pub purpose: FetchPurpose,
    /// Request to send.
    pub query: TopQuery,
}

impl FetchCommand {
    /// Run the command against `source` and wrap the outcome as an event.
    pub fn resolve<S: TopSource + ?Sized>(&self, source: &S) -> ViewEvent {
        match source.fetch(&self.query) {
            Ok(response) => ViewEvent::FetchSucceeded {
                id: self.id,
                response,
            },
            Err(err) => ViewEvent::FetchFailed {
                id: self.id,
                reason: err.to_string(),
            },
        }
    }
}

/// Where the user's position stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionStatus {
    /// Not requested or not answered yet.
    #[default]
    Unknown,
    /// A position was obtained.
    Resolved(Position),
    /// The position cannot be obtained.
    Unavailable,
}

impl PositionStatus {
    /// The resolved position, if any.
    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Self::Resolved(position) => Some(position),
            Self::Unknown | Self::Unavailable => None,
        }
    }
}

/// Inputs to [`ViewState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Reload the listing with the current settings.
    Refresh,
    /// Switch tab.
    SelectTab(Tab),
    /// Choose a zone.
    SelectZone(Zone),
    /// Move the near-tab radius slider.
    SetRadius(u16),
    /// Choose a day by offset from today.
    SelectDay(u8),
    /// Choose a time slot.
    SelectSlot(TimeSlot),
    /// Choose an activity mode.
    SelectMode(ActivityMode),
    /// Change the water filter.
    SetWaterFilter(WaterFilter),
    /// Change the listing order.
    SetOrder(SortOrder),
    /// Expand or collapse the card of a beach.
    ToggleCard(String),
    /// The user's position became known.
    PositionResolved(Position),
    /// The user's position cannot be obtained.
    PositionUnavailable,
    /// Check the conditions at one beach picked from search.
    CheckBeach(Beach),
    /// A fetch completed.
    FetchSucceeded {
        /// Id of the originating command.
        id: RequestId,
        /// Parsed response.
        response: TopResponse,
    },
    /// A fetch failed.
    FetchFailed {
        /// Id of the originating command.
        id: RequestId,
        /// Human-readable cause, for logs.
        reason: String,
    },
}

/// Everything the listing shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    config: ViewConfig,
    today: NaiveDate,
    position: PositionStatus,
    items: Vec<RecommendationItem>,
    available_until: Option<String>,
    error: Option<String>,
    open_card: Option<String>,
    last_issued: u64,
    pending: Option<RequestId>,
    picked: Option<Beach>,
    check: Option<RecommendationItem>,
    pending_check: Option<RequestId>,
}

impl ViewState {
    /// Create an empty state. `today` anchors the selectable days.
    ///
    /// Out-of-range settings are repaired with [`ViewConfig::normalized`].
    #[must_use]
    pub fn new(config: ViewConfig, today: NaiveDate) -> Self {
        let normalized = config.clone().normalized();
        if normalized != config {
            warn!(
                "adjusted listing settings: radius {} km, day {}",
                normalized.radius_km, normalized.day
            );
        }
        Self {
            config: normalized,
            today,
            position: PositionStatus::Unknown,
            items: Vec::new(),
            available_until: None,
            error: None,
            open_card: None,
            last_issued: 0,
            pending: None,
            picked: None,
            check: None,
            pending_check: None,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Current position status.
    #[must_use]
    pub const fn position(&self) -> PositionStatus {
        self.position
    }

    /// Items of the last successful listing, as received.
    #[must_use]
    pub fn items(&self) -> &[RecommendationItem] {
        &self.items
    }

    /// Forecast horizon of the last successful listing.
    #[must_use]
    pub fn available_until(&self) -> Option<&str> {
        self.available_until.as_deref()
    }

    /// Message describing the last failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Identifier of the expanded card.
    #[must_use]
    pub fn open_card(&self) -> Option<&str> {
        self.open_card.as_deref()
    }

    /// Report whether a listing request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The in-flight listing request.
    #[must_use]
    pub const fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    /// Beach last picked for a check.
    #[must_use]
    pub const fn picked(&self) -> Option<&Beach> {
        self.picked.as_ref()
    }

    /// Result of the last beach check.
    #[must_use]
    pub const fn check(&self) -> Option<&RecommendationItem> {
        self.check.as_ref()
    }

    /// Report whether a beach check is in flight.
    #[must_use]
    pub const fn is_checking(&self) -> bool {
        self.pending_check.is_some()
    }

    /// The selected day.
    #[must_use]
    pub fn day(&self) -> Option<DayOption> {
        day_option(self.today, self.config.day)
    }

    /// The `when` parameter for the selected day and slot.
    #[must_use]
    pub fn when(&self) -> Option<String> {
        self.day().map(|day| forecast_when(day.date, self.config.slot))
    }

    /// Label of the selected window, e.g. `"Hoje 09–12"`.
    #[must_use]
    pub fn window_label(&self) -> Option<String> {
        self.day().map(|day| window_label(&day, self.config.slot))
    }

    /// Items after the water filter and sort order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<RankedItem<'_>> {
        rank(&self.items, self.config.water, self.config.order)
    }

    /// Fold `event` into the state.
    ///
    /// Returns the fetch the caller must perform, if the event changed what
    /// the listing should show.
    pub fn apply(&mut self, event: ViewEvent) -> Option<FetchCommand> {
        match event {
            ViewEvent::Refresh => self.request_listing(),
            ViewEvent::SelectTab(tab) => {
                if self.config.tab == tab {
                    return None;
                }
                self.config.tab = tab;
                self.reset_order();
                self.request_listing()
            }
            ViewEvent::SelectZone(zone) => {
                if self.config.zone == zone {
                    return None;
                }
                self.config.zone = zone;
                self.refetch_on(Tab::Zone)
            }
            ViewEvent::SetRadius(radius_km) => {
                let clamped = clamp_radius(radius_km);
                if self.config.radius_km == clamped {
                    return None;
                }
                self.config.radius_km = clamped;
                self.refetch_on(Tab::Near)
            }
            ViewEvent::SelectDay(day) => {
                if day >= FORECAST_DAYS {
                    debug!("ignoring day offset {day} outside the forecast window");
                    return None;
                }
                if self.config.day == day {
                    return None;
                }
                self.config.day = day;
                self.request_listing()
            }
            ViewEvent::SelectSlot(slot) => {
                if self.config.slot == slot {
                    return None;
                }
                self.config.slot = slot;
                self.request_listing()
            }
            ViewEvent::SelectMode(mode) => {
                if self.config.mode == mode {
                    return None;
                }
                self.config.mode = mode;
                self.request_listing()
            }
            ViewEvent::SetWaterFilter(filter) => {
                self.config.water = filter;
                None
            }
            ViewEvent::SetOrder(order) => {
                self.config.order = order;
                None
            }
            ViewEvent::ToggleCard(id) => {
                self.open_card = if self.open_card.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    Some(id)
                };
                None
            }
            ViewEvent::PositionResolved(position) => {
                let status = PositionStatus::Resolved(position);
                if self.position == status {
                    return None;
                }
                self.position = status;
                self.request_listing()
            }
            ViewEvent::PositionUnavailable => {
                self.position = PositionStatus::Unavailable;
                if self.config.tab == Tab::Near {
                    self.pending = None;
                    self.error = Some(POSITION_UNAVAILABLE_MESSAGE.to_owned());
                }
                None
            }
            ViewEvent::CheckBeach(beach) => self.request_check(beach),
            ViewEvent::FetchSucceeded { id, response } => {
                self.complete(id, response);
                None
            }
            ViewEvent::FetchFailed { id, reason } => {
                self.fail(id, &reason);
                None
            }
        }
    }

    fn next_id(&mut self) -> RequestId {
        self.last_issued = self.last_issued.saturating_add(1);
        RequestId(self.last_issued)
    }

    fn refetch_on(&mut self, tab: Tab) -> Option<FetchCommand> {
        if self.config.tab == tab {
            self.request_listing()
        } else {
            None
        }
    }

    fn request_listing(&mut self) -> Option<FetchCommand> {
        let Some(when) = self.forecast_when() else {
            self.pending = None;
            return None;
        };
        match TopQuery::for_view(&self.config, self.position.position(), &when) {
            Ok(query) => {
                let id = self.next_id();
                self.pending = Some(id);
                self.error = None;
                Some(FetchCommand {
                    id,
                    purpose: FetchPurpose::Listing,
                    query,
                })
            }
            Err(QueryError::MissingPosition) => {
                self.pending = None;
                if self.position == PositionStatus::Unavailable {
                    self.error = Some(POSITION_UNAVAILABLE_MESSAGE.to_owned());
                } else {
                    debug!("near listing waits for a position");
                }
                None
            }
        }
    }

    fn forecast_when(&mut self) -> Option<String> {
        let when = self.when();
        if when.is_none() {
            warn!(
                "day offset {} from {} has no forecast window",
                self.config.day, self.today
            );
            self.error = Some(DAY_UNAVAILABLE_MESSAGE.to_owned());
        }
        when
    }

    fn request_check(&mut self, beach: Beach) -> Option<FetchCommand> {
        let when = self.forecast_when()?;
        let query = TopQuery::beach_check(&beach, self.config.mode, &when);
        let id = self.next_id();
        self.pending_check = Some(id);
        self.picked = Some(beach);
        self.check = None;
        Some(FetchCommand {
            id,
            purpose: FetchPurpose::BeachCheck,
            query,
        })
    }

    fn complete(&mut self, id: RequestId, response: TopResponse) {
        if self.pending == Some(id) {
            self.pending = None;
            self.items = response.items;
            self.available_until = response.available_until;
            self.error = None;
            self.reset_order();
        } else if self.pending_check == Some(id) {
            self.pending_check = None;
            self.check = response.items.into_iter().next();
        } else {
            debug!("ignoring stale response {id}");
        }
    }

    fn fail(&mut self, id: RequestId, reason: &str) {
        if self.pending == Some(id) {
            self.pending = None;
            warn!("listing request {id} failed: {reason}");
            let message = match self.config.tab {
                Tab::Near => NEAR_FETCH_FAILED_MESSAGE,
                Tab::Zone => ZONE_FETCH_FAILED_MESSAGE,
            };
            self.error = Some(message.to_owned());
        } else if self.pending_check == Some(id) {
            self.pending_check = None;
            self.check = None;
            warn!("beach check {id} failed: {reason}");
        } else {
            debug!("ignoring stale failure {id}: {reason}");
        }
    }

    fn reset_order(&mut self) {
        self.config.order = if self.config.tab == Tab::Near && has_distance(&self.items) {
            SortOrder::Distance
        } else {
            SortOrder::Rating
        };
    }
}

/// Apply `event` and perform every fetch it triggers against `source`.
///
/// Returns once the state has no further fetch to perform.
pub fn dispatch<S: TopSource + ?Sized>(state: &mut ViewState, source: &S, event: ViewEvent) {
    let mut next = Some(event);
    while let Some(current) = next.take() {
        next = state.apply(current).map(|command| command.resolve(source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FailingSource, StaticSource};
    use praiafinder_core::WaterType;
    use rstest::{fixture, rstest};

    #[fixture]
    fn state() -> ViewState {
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
        ViewState::new(ViewConfig::default(), today)
    }

    fn response(items: Vec<RecommendationItem>) -> TopResponse {
        TopResponse {
            items,
            available_until: Some("2025-07-03T00:00:00Z".to_owned()),
        }
    }

    fn issue(state: &mut ViewState, event: ViewEvent) -> FetchCommand {
        state.apply(event).expect("event should trigger a fetch")
    }

    #[rstest]
    fn control_changes_issue_increasing_ids(mut state: ViewState) {
        let first = issue(&mut state, ViewEvent::Refresh);
        let second = issue(&mut state, ViewEvent::SelectSlot(TimeSlot::Evening));
        let third = issue(&mut state, ViewEvent::SelectZone(Zone::Algarve));
        assert!(first.id < second.id && second.id < third.id);
        assert_eq!(state.pending(), Some(third.id));
        assert_eq!(third.query.get("when"), Some("2025-07-01T19:00:00Z"));
        assert_eq!(third.query.get("zone"), Some("algarve"));
    }

    #[rstest]
    fn unchanged_selection_does_not_refetch(mut state: ViewState) {
        assert!(state.apply(ViewEvent::SelectZone(Zone::Lisboa)).is_none());
        assert!(state.apply(ViewEvent::SelectTab(Tab::Zone)).is_none());
    }

    #[rstest]
    #[case(ViewEvent::SetWaterFilter(WaterFilter::Only(WaterType::River)))]
    #[case(ViewEvent::SetOrder(SortOrder::Distance))]
    #[case(ViewEvent::ToggleCard("a".to_owned()))]
    #[case(ViewEvent::SetRadius(90))]
    fn display_only_events_never_fetch(mut state: ViewState, #[case] event: ViewEvent) {
        assert!(state.apply(event).is_none());
        assert!(!state.is_loading());
    }

    #[rstest]
    fn stale_results_are_ignored(mut state: ViewState) {
        let stale = issue(&mut state, ViewEvent::Refresh);
        let fresh = issue(&mut state, ViewEvent::SelectDay(2));

        state.apply(ViewEvent::FetchSucceeded {
            id: stale.id,
            response: response(vec![RecommendationItem::new("old", "Old")]),
        });
        assert!(state.items().is_empty());
        assert!(state.is_loading());

        state.apply(ViewEvent::FetchFailed {
            id: stale.id,
            reason: "aborted".to_owned(),
        });
        assert_eq!(state.error(), None);

        state.apply(ViewEvent::FetchSucceeded {
            id: fresh.id,
            response: response(vec![RecommendationItem::new("new", "New")]),
        });
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.available_until(), Some("2025-07-03T00:00:00Z"));
        assert!(!state.is_loading());
    }

    #[rstest]
    fn failure_keeps_items_and_records_message(mut state: ViewState) {
        let source = StaticSource::new(response(vec![RecommendationItem::new("a", "A")]));
        dispatch(&mut state, &source, ViewEvent::Refresh);
        dispatch(&mut state, &FailingSource { status: 503 }, ViewEvent::SelectMode(ActivityMode::Surf));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.error(), Some(ZONE_FETCH_FAILED_MESSAGE));

        dispatch(&mut state, &source, ViewEvent::Refresh);
        assert_eq!(state.error(), None);
    }

    #[rstest]
    fn near_tab_waits_for_position_then_orders_by_distance(mut state: ViewState) {
        let zone_fetch = issue(&mut state, ViewEvent::Refresh);
        assert!(state.apply(ViewEvent::SelectTab(Tab::Near)).is_none());
        assert!(!state.is_loading());

        let near = issue(&mut state, ViewEvent::PositionResolved(Position::new(38.7, -9.1)));
        assert_eq!(near.query.get("radius_km"), Some("50"));

        state.apply(ViewEvent::FetchSucceeded {
            id: zone_fetch.id,
            response: response(Vec::new()),
        });
        assert!(state.is_loading());

        state.apply(ViewEvent::FetchSucceeded {
            id: near.id,
            response: response(vec![
                RecommendationItem::new("far", "Far").with_rating(9.0).with_distance_km(30.0),
                RecommendationItem::new("near", "Near").with_rating(4.0).with_distance_km(2.0),
            ]),
        });
        assert_eq!(state.config().order, SortOrder::Distance);
        let ids: Vec<_> = state
            .visible_items()
            .iter()
            .map(|row| row.item.id.clone())
            .collect();
        assert_eq!(ids, ["near", "far"]);

        let radius = issue(&mut state, ViewEvent::SetRadius(200));
        assert_eq!(radius.query.get("radius_km"), Some("120"));

        assert!(state.apply(ViewEvent::SelectTab(Tab::Zone)).is_some());
        assert_eq!(state.config().order, SortOrder::Rating);
    }

    #[rstest]
    fn unavailable_position_reports_error_on_near_tab(mut state: ViewState) {
        state.apply(ViewEvent::PositionUnavailable);
        assert_eq!(state.error(), None);
        assert!(state.apply(ViewEvent::SelectTab(Tab::Near)).is_none());
        assert_eq!(state.error(), Some(POSITION_UNAVAILABLE_MESSAGE));
    }

    #[rstest]
    fn zone_queries_include_a_known_position(mut state: ViewState) {
        let located = issue(&mut state, ViewEvent::PositionResolved(Position::new(37.1, -8.5)));
        assert_eq!(located.query.get("radius_km"), Some("10000"));
        assert_eq!(located.query.get("zone"), Some("lisboa"));
    }

    #[rstest]
    fn beach_check_runs_beside_the_listing(mut state: ViewState) {
        let listing = issue(&mut state, ViewEvent::Refresh);
        let beach = Beach {
            id: "nazare".to_owned(),
            name: "Nazaré".to_owned(),
            lat: 39.6,
            lon: -9.07,
            zone_tags: vec!["centro".to_owned()],
        };
        let check = issue(&mut state, ViewEvent::CheckBeach(beach));
        assert_eq!(check.purpose, FetchPurpose::BeachCheck);
        assert!(state.is_loading() && state.is_checking());

        state.apply(ViewEvent::FetchSucceeded {
            id: check.id,
            response: response(vec![RecommendationItem::new("nazare", "Nazaré").with_rating(7.0)]),
        });
        assert_eq!(state.check().map(|item| item.id.as_str()), Some("nazare"));
        assert_eq!(state.pending(), Some(listing.id));
        assert!(state.items().is_empty());
    }

    #[rstest]
    fn toggling_a_card_twice_collapses_it(mut state: ViewState) {
        state.apply(ViewEvent::ToggleCard("a".to_owned()));
        assert_eq!(state.open_card(), Some("a"));
        state.apply(ViewEvent::ToggleCard("b".to_owned()));
        assert_eq!(state.open_card(), Some("b"));
        state.apply(ViewEvent::ToggleCard("b".to_owned()));
        assert_eq!(state.open_card(), None);
    }

    #[rstest]
    fn out_of_range_day_is_ignored(mut state: ViewState) {
        assert!(state.apply(ViewEvent::SelectDay(FORECAST_DAYS)).is_none());
        assert_eq!(state.config().day, 0);
        assert_eq!(state.window_label().as_deref(), Some("Hoje 09–12"));
    }

    #[rstest]
    fn deserialised_radius_stays_in_range() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"tab": "near", "radius_km": 500}"#).expect("config");
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
        let mut state = ViewState::new(config, today);
        let near = issue(&mut state, ViewEvent::PositionResolved(Position::new(38.7, -9.1)));
        assert_eq!(near.query.get("radius_km"), Some("120"));
    }

    #[rstest]
    fn literal_settings_are_repaired_on_creation() {
        let config = ViewConfig {
            tab: Tab::Near,
            radius_km: 1,
            day: 9,
            ..ViewConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
        let mut state = ViewState::new(config, today);
        assert_eq!(state.config().day, 0);
        let near = issue(&mut state, ViewEvent::PositionResolved(Position::new(38.7, -9.1)));
        assert_eq!(near.query.get("radius_km"), Some("10"));
        assert_eq!(near.query.get("when"), Some("2025-07-01T10:00:00Z"));
    }

    #[rstest]
    fn missing_forecast_window_is_reported() {
        let config = ViewConfig {
            day: 1,
            ..ViewConfig::default()
        };
        let mut state = ViewState::new(config, NaiveDate::MAX);
        assert!(state.apply(ViewEvent::Refresh).is_none());
        assert_eq!(state.error(), Some(DAY_UNAVAILABLE_MESSAGE));
        assert!(!state.is_loading());

        let beach = Beach {
            id: "nazare".to_owned(),
            name: "Nazaré".to_owned(),
            ..Beach::default()
        };
        assert!(state.apply(ViewEvent::CheckBeach(beach)).is_none());
        assert!(!state.is_checking());
    }
}
