//! Query command: print the `/top` request for a set of listing choices.

use chrono::NaiveDate;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use praiafinder_view::{
    DEFAULT_API_BASE, DEFAULT_RADIUS_KM, FORECAST_DAYS, Position, Tab, TopQuery, ViewConfig,
    day_option, forecast_when,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_API_BASE, ARG_DAY, ARG_LAT, ARG_LON, ARG_MODE, ARG_RADIUS_KM, ARG_SLOT, ARG_TAB,
    ARG_ZONE, CliError, parse_option, position_from,
};

/// CLI arguments for the `query` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "query",
    long_about = "Print the /top request the listing would send for the \
                 given tab, zone, position, radius, activity mode and \
                 forecast window. Supplying --lat and --lon without --tab \
                 selects the near-me tab.",
    about = "Print the /top request for a listing"
)]
#[ortho_config(prefix = "PRAIAFINDER")]
pub(crate) struct QueryArgs {
    /// Listing tab: `near` or `zone`.
    #[arg(long = ARG_TAB, value_name = "tab")]
    #[serde(default)]
    pub(crate) tab: Option<String>,
    /// Zone listed by the zone tab, e.g. `algarve`.
    #[arg(long = ARG_ZONE, value_name = "zone")]
    #[serde(default)]
    pub(crate) zone: Option<String>,
    /// Latitude of the user.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the user.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Search radius for the near tab, clamped to 10–120 km.
    #[arg(long = ARG_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<u16>,
    /// Activity mode: `familia`, `surf` or `snorkel`.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Day offset from today, `0` to `6`.
    #[arg(long = ARG_DAY, value_name = "offset")]
    #[serde(default)]
    pub(crate) day: Option<u8>,
    /// Time slot, e.g. `09-12`.
    #[arg(long = ARG_SLOT, value_name = "slot")]
    #[serde(default)]
    pub(crate) slot: Option<String>,
    /// Base path or URL of the recommendations API.
    #[arg(long = ARG_API_BASE, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base: Option<String>,
}

impl QueryArgs {
    pub(crate) fn into_config(self) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from(merged)
    }
}

/// Resolved `query` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueryConfig {
    /// Listing choices.
    pub(crate) view: ViewConfig,
    /// User position, if known.
    pub(crate) position: Option<Position>,
}

impl TryFrom<QueryArgs> for QueryConfig {
    type Error = CliError;

    fn try_from(args: QueryArgs) -> Result<Self, Self::Error> {
        let position = position_from(args.lat, args.lon)?;
        let day = args.day.unwrap_or_default();
        if day >= FORECAST_DAYS {
            return Err(CliError::DayOutOfRange {
                day,
                max: FORECAST_DAYS,
            });
        }
        let implied_tab = if position.is_some() {
            Tab::Near
        } else {
            Tab::Zone
        };
        let view = ViewConfig {
            tab: parse_option(ARG_TAB, args.tab.as_deref())?.unwrap_or(implied_tab),
            zone: parse_option(ARG_ZONE, args.zone.as_deref())?.unwrap_or_default(),
            day,
            slot: parse_option(ARG_SLOT, args.slot.as_deref())?.unwrap_or_default(),
            mode: parse_option(ARG_MODE, args.mode.as_deref())?.unwrap_or_default(),
            api_base: args
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
            ..ViewConfig::default()
        }
        .with_radius_km(args.radius_km.unwrap_or(DEFAULT_RADIUS_KM));
        Ok(Self { view, position })
    }
}

impl QueryConfig {
    /// Build the request for the selected day, counted from `today`.
    pub(crate) fn top_query(&self, today: NaiveDate) -> Result<TopQuery, CliError> {
        let day = day_option(today, self.view.day).ok_or(CliError::DayOutOfRange {
            day: self.view.day,
            max: FORECAST_DAYS,
        })?;
        let when = forecast_when(day.date, self.view.slot);
        Ok(TopQuery::for_view(&self.view, self.position, &when)?)
    }
}

pub(crate) fn run_query(args: QueryArgs) -> Result<(), CliError> {
    let today = chrono::Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();
    run_query_with(args, today, &mut stdout)
}

pub(crate) fn run_query_with(
    args: QueryArgs,
    today: NaiveDate,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let query = config.top_query(today)?;
    writeln!(writer, "{}", query.to_url(&config.view.api_base)).map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QueryConfig, CliError> {
    let merged = QueryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QueryConfig::try_from(merged)
}
