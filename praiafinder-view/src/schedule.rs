//! Forecast windows: the selectable days and three-hour time slots.
//!
//! The API expects the forecast instant as the local wall-clock date and slot
//! hour written with a `Z` suffix, e.g. `2025-07-01T10:00:00Z` for the
//! `09-12` slot on the 1st of July. No timezone conversion happens.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use praiafinder_core::ParseError;

/// Number of selectable days, today included.
pub const FORECAST_DAYS: u8 = 7;

/// A three-hour forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeSlot {
    /// `06-09`.
    #[serde(rename = "06-09")]
    Early,
    /// `09-12`.
    #[default]
    #[serde(rename = "09-12")]
    Morning,
    /// `12-15`.
    #[serde(rename = "12-15")]
    Midday,
    /// `15-18`.
    #[serde(rename = "15-18")]
    Afternoon,
    /// `18-21`.
    #[serde(rename = "18-21")]
    Evening,
}

impl TimeSlot {
    /// Every slot in chronological order.
    pub const ALL: [Self; 5] = [
        Self::Early,
        Self::Morning,
        Self::Midday,
        Self::Afternoon,
        Self::Evening,
    ];

    /// Slot identifier, e.g. `"09-12"`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Early => "06-09",
            Self::Morning => "09-12",
            Self::Midday => "12-15",
            Self::Afternoon => "15-18",
            Self::Evening => "18-21",
        }
    }

    /// Display label, e.g. `"09–12"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Early => "06–09",
            Self::Morning => "09–12",
            Self::Midday => "12–15",
            Self::Afternoon => "15–18",
            Self::Evening => "18–21",
        }
    }

    /// Representative hour sent to the API.
    #[must_use]
    pub const fn hour(self) -> u32 {
        match self {
            Self::Early => 7,
            Self::Morning => 10,
            Self::Midday => 13,
            Self::Afternoon => 16,
            Self::Evening => 19,
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('–', "-");
        Self::ALL
            .into_iter()
            .find(|slot| slot.id() == wanted)
            .ok_or_else(|| ParseError::unknown("time slot", s))
    }
}

/// One selectable forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOption {
    /// Offset from today.
    pub offset: u8,
    /// Calendar date.
    pub date: NaiveDate,
    /// Display label: `Hoje`, `Amanhã` or a short weekday.
    pub label: &'static str,
}

/// Short Portuguese weekday name.
#[must_use]
pub const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Dom",
        Weekday::Mon => "Seg",
        Weekday::Tue => "Ter",
        Weekday::Wed => "Qua",
        Weekday::Thu => "Qui",
        Weekday::Fri => "Sex",
        Weekday::Sat => "Sáb",
    }
}

/// Return the day `offset` days after `today`.
///
/// `None` when `offset` is outside `0..FORECAST_DAYS` or the date would
/// overflow the calendar.
#[must_use]
pub fn day_option(today: NaiveDate, offset: u8) -> Option<DayOption> {
    if offset >= FORECAST_DAYS {
        return None;
    }
    let date = today.checked_add_days(Days::new(u64::from(offset)))?;
    let label = match offset {
        0 => "Hoje",
        1 => "Amanhã",
        _ => weekday_label(date.weekday()),
    };
    Some(DayOption {
        offset,
        date,
        label,
    })
}

/// The selectable days starting at `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use praiafinder_view::upcoming_days;
///
/// let today = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
/// let labels: Vec<_> = upcoming_days(today).iter().map(|day| day.label).collect();
/// assert_eq!(labels, ["Hoje", "Amanhã", "Qui", "Sex", "Sáb", "Dom", "Seg"]);
/// ```
#[must_use]
pub fn upcoming_days(today: NaiveDate) -> Vec<DayOption> {
    (0..FORECAST_DAYS)
        .filter_map(|offset| day_option(today, offset))
        .collect()
}

/// Render the `when` query parameter for a date and slot.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use praiafinder_view::{TimeSlot, forecast_when};
///
/// let date = NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date");
/// assert_eq!(forecast_when(date, TimeSlot::Early), "2025-07-01T07:00:00Z");
/// ```
#[must_use]
pub fn forecast_when(date: NaiveDate, slot: TimeSlot) -> String {
    format!("{}T{:02}:00:00Z", date.format("%Y-%m-%d"), slot.hour())
}

/// Short description of the selected window, e.g. `"Amanhã 15–18"`.
#[must_use]
pub fn window_label(day: &DayOption, slot: TimeSlot) -> String {
    format!("{} {}", day.label, slot.label())
}
