//! Rank command: replay a saved `/top` response through the listing state.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use praiafinder_core::{BreakdownEntry, WaterFilter};
use praiafinder_view::{
    EMPTY_LISTING_MESSAGE, Position, RankedItem, SortOrder, StaticSource, Tab, ViewConfig,
    ViewEvent, ViewState, dispatch, parse_top_response,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_AVAILABLE_UNTIL, ARG_FORMAT, ARG_LAT, ARG_LIMIT, ARG_LON, ARG_ORDER, ARG_RANK_PAYLOAD,
    ARG_WATER, CliError, ENV_RANK_PAYLOAD, OutputFormat, fs, parse_option, position_from,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank the items of a `/top` response saved to disk. The \
                 items go through the same normalisation, filtering and \
                 ordering as the web listing. Supplying --lat and --lon \
                 treats the response as a near-me listing.",
    about = "Rank a saved /top response"
)]
#[ortho_config(prefix = "PRAIAFINDER")]
pub(crate) struct RankArgs {
    /// Path to a JSON file holding a `/top` response body.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) payload: Option<Utf8PathBuf>,
    /// Value of the `x-available-until` header the response came with.
    #[arg(long = ARG_AVAILABLE_UNTIL, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) available_until: Option<String>,
    /// Water types to show: `all`, `sea` or `river`.
    #[arg(long = ARG_WATER, value_name = "filter")]
    #[serde(default)]
    pub(crate) water: Option<String>,
    /// Listing order: `rating` or `distance`.
    #[arg(long = ARG_ORDER, value_name = "order")]
    #[serde(default)]
    pub(crate) order: Option<String>,
    /// Latitude the response was requested around.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude the response was requested around.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Print at most this many cards.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Include the compacted breakdown of every card.
    #[arg(long)]
    #[serde(default)]
    pub(crate) expand: bool,
    /// Output format: `text` or `json`.
    #[arg(long = ARG_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Saved response body.
    pub(crate) payload: Utf8PathBuf,
    /// Horizon header value, if any.
    pub(crate) available_until: Option<String>,
    /// Water filter to apply.
    pub(crate) water: WaterFilter,
    /// Explicit order; `None` keeps the listing default.
    pub(crate) order: Option<SortOrder>,
    /// Position the response was requested around.
    pub(crate) position: Option<Position>,
    /// Maximum number of cards.
    pub(crate) limit: Option<usize>,
    /// Whether breakdowns are printed.
    pub(crate) expand: bool,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let payload = args.payload.ok_or(CliError::MissingArgument {
            field: ARG_RANK_PAYLOAD,
            env: ENV_RANK_PAYLOAD,
        })?;
        let position = position_from(args.lat, args.lon)?;
        Ok(Self {
            payload,
            available_until: args.available_until,
            water: parse_option(ARG_WATER, args.water.as_deref())?.unwrap_or_default(),
            order: parse_option(ARG_ORDER, args.order.as_deref())?,
            position,
            limit: args.limit,
            expand: args.expand,
            format: parse_option(ARG_FORMAT, args.format.as_deref())?.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let today = chrono::Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, today, &mut stdout)
}

pub(crate) fn run_rank_with(
    args: RankArgs,
    today: NaiveDate,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    crate::require_existing(&config.payload, ARG_RANK_PAYLOAD)?;
    let state = replay(&config, today)?;
    write_listing(writer, &config, &state)
}

/// Load the saved response and feed it through a fresh listing state.
pub(crate) fn replay(config: &RankConfig, today: NaiveDate) -> Result<ViewState, CliError> {
    let source = load_source(&config.payload, config.available_until.as_deref())?;
    let view = ViewConfig {
        tab: if config.position.is_some() {
            Tab::Near
        } else {
            Tab::Zone
        },
        ..ViewConfig::default()
    };
    let mut state = ViewState::new(view, today);
    let first = config
        .position
        .map_or(ViewEvent::Refresh, ViewEvent::PositionResolved);
    dispatch(&mut state, &source, first);
    if let Some(message) = state.error() {
        return Err(CliError::Listing {
            message: message.to_owned(),
        });
    }
    dispatch(&mut state, &source, ViewEvent::SetWaterFilter(config.water));
    if let Some(order) = config.order {
        dispatch(&mut state, &source, ViewEvent::SetOrder(order));
    }
    debug!(
        "replayed {} items ordered by {}",
        state.items().len(),
        state.config().order
    );
    Ok(state)
}

fn load_source(path: &Utf8Path, available_until: Option<&str>) -> Result<StaticSource, CliError> {
    let body = fs::read_input(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let response =
        parse_top_response(&body, available_until).map_err(|source| CliError::ParseResponse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(StaticSource::new(response))
}

#[derive(Serialize)]
struct Card<'a> {
    #[serde(flatten)]
    ranked: RankedItem<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    factors: Vec<BreakdownEntry>,
}

#[derive(Serialize)]
struct Listing<'a> {
    #[serde(rename = "availableUntil", skip_serializing_if = "Option::is_none")]
    available_until: Option<&'a str>,
    order: SortOrder,
    items: Vec<Card<'a>>,
}

fn write_listing(
    writer: &mut dyn Write,
    config: &RankConfig,
    state: &ViewState,
) -> Result<(), CliError> {
    let limit = config.limit.unwrap_or(usize::MAX);
    let cards: Vec<Card<'_>> = state
        .visible_items()
        .into_iter()
        .take(limit)
        .map(|ranked| Card {
            factors: if config.expand {
                ranked.item.compact_breakdown()
            } else {
                Vec::new()
            },
            ranked,
        })
        .collect();
    let listing = Listing {
        available_until: state.available_until(),
        order: state.config().order,
        items: cards,
    };
    let text = match config.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&listing).map_err(CliError::SerializeOutput)?
        }
        OutputFormat::Text => render_text(&listing),
    };
    writer
        .write_all(text.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn render_text(listing: &Listing<'_>) -> String {
    let mut lines = Vec::new();
    if let Some(until) = listing.available_until {
        lines.push(format!("Previsão disponível até {until}"));
    }
    if listing.items.is_empty() {
        lines.push(EMPTY_LISTING_MESSAGE.to_owned());
    }
    for (position, card) in (1_usize..).zip(&listing.items) {
        lines.push(card_heading(position, &card.ranked));
        lines.push(format!("   {}", card_details(&card.ranked)));
        for factor in &card.factors {
            lines.push(format!(
                "   {} {:<12} {}",
                factor.icon,
                factor.label,
                factor.display_value()
            ));
        }
    }
    lines.join("\n")
}

fn card_heading(position: usize, ranked: &RankedItem<'_>) -> String {
    format!(
        "{position}. {} {:.1}/10 ({})",
        ranked.item.name, ranked.rating, ranked.band
    )
}

fn card_details(ranked: &RankedItem<'_>) -> String {
    let mut parts = vec![ranked.item.water_type.description().to_owned()];
    if let Some(distance) = ranked.item.distance_km {
        parts.push(format!("{distance:.1} km"));
    }
    if let Some(at) = ranked.item.forecast_at {
        parts.push(format!("previsão {}", at.format("%Y-%m-%d %H:%M")));
    }
    parts.join(" · ")
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
