//! Command-line interface for PraiaFinder's offline tooling.
//!
//! The commands work on files saved from the recommendations API so a
//! listing can be inspected without a browser:
//! - `rank` reads a `/top` response and prints the ranked cards;
//! - `query` prints the `/top` request a given set of choices produces;
//! - `beaches` searches a saved beach list by name.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use praiafinder_core::ParseError;
use praiafinder_view::Position;
use std::str::FromStr;

mod beaches;
mod error;
mod fs;
mod query;
mod rank;

pub use error::CliError;

use beaches::{BeachesArgs, run_beaches};
use query::{QueryArgs, run_query};
use rank::{RankArgs, run_rank};

pub(crate) const ARG_RANK_PAYLOAD: &str = "payload";
pub(crate) const ARG_AVAILABLE_UNTIL: &str = "available-until";
pub(crate) const ARG_WATER: &str = "water";
pub(crate) const ARG_ORDER: &str = "order";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_TAB: &str = "tab";
pub(crate) const ARG_ZONE: &str = "zone";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_RADIUS_KM: &str = "radius-km";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_DAY: &str = "day";
pub(crate) const ARG_SLOT: &str = "slot";
pub(crate) const ARG_API_BASE: &str = "api-base";
pub(crate) const ARG_BEACHES_FILE: &str = "file";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ENV_RANK_PAYLOAD: &str = "PRAIAFINDER_CMDS_RANK_PAYLOAD";
pub(crate) const ENV_BEACHES_FILE: &str = "PRAIAFINDER_CMDS_BEACHES_FILE";
pub(crate) const ENV_SEARCH: &str = "PRAIAFINDER_CMDS_BEACHES_SEARCH";

/// Run the PraiaFinder CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when argument parsing, configuration merging,
/// input loading or output writing fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => run_rank(args),
        Command::Query(args) => run_query(args),
        Command::Beaches(args) => run_beaches(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "praiafinder",
    about = "Inspect PraiaFinder beach recommendations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the items of a saved `/top` response.
    Rank(RankArgs),
    /// Print the `/top` request for a set of listing choices.
    Query(QueryArgs),
    /// Search a saved beach list by name.
    Beaches(BeachesArgs),
}

/// Output format shared by the commands that print listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseError::unknown("output format", s)),
        }
    }
}

/// Parse an optional textual option, naming the flag on failure.
pub(crate) fn parse_option<T>(field: &'static str, value: Option<&str>) -> Result<Option<T>, CliError>
where
    T: FromStr<Err = ParseError>,
{
    value
        .map(|raw| raw.parse().map_err(|source| CliError::InvalidOption { field, source }))
        .transpose()
}

/// Combine optional coordinates into a position; both or neither must be set.
pub(crate) fn position_from(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Position>, CliError> {
    match (lat, lon) {
        (Some(lat_deg), Some(lon_deg)) => Ok(Some(Position::new(lat_deg, lon_deg))),
        (None, None) => Ok(None),
        _ => Err(CliError::IncompletePosition),
    }
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
