//! Beaches command: search a saved beach list by name.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use praiafinder_core::Beach;
use praiafinder_view::{SEARCH_LIMIT, search_beaches};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::{
    ARG_BEACHES_FILE, ARG_FORMAT, ARG_SEARCH, CliError, ENV_BEACHES_FILE, ENV_SEARCH,
    OutputFormat, fs::open_input, parse_option, require_existing,
};

/// CLI arguments for the `beaches` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "beaches",
    long_about = "Search a JSON beach list (as served by /beaches) by a \
                 case-insensitive fragment of the beach name. At most \
                 eight matches are printed, in list order.",
    about = "Search a saved beach list"
)]
#[ortho_config(prefix = "PRAIAFINDER")]
pub(crate) struct BeachesArgs {
    /// Path to a JSON array of beaches.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) file: Option<Utf8PathBuf>,
    /// Name fragment to look for.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Output format: `text` or `json`.
    #[arg(long = ARG_FORMAT, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl BeachesArgs {
    pub(crate) fn into_config(self) -> Result<BeachesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BeachesConfig::try_from(merged)
    }
}

/// Resolved `beaches` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BeachesConfig {
    pub(crate) file: Utf8PathBuf,
    pub(crate) search: String,
    pub(crate) format: OutputFormat,
}

impl TryFrom<BeachesArgs> for BeachesConfig {
    type Error = CliError;

    fn try_from(args: BeachesArgs) -> Result<Self, Self::Error> {
        let file = args.file.ok_or(CliError::MissingArgument {
            field: ARG_BEACHES_FILE,
            env: ENV_BEACHES_FILE,
        })?;
        let search = args.search.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH,
            env: ENV_SEARCH,
        })?;
        Ok(Self {
            file,
            search,
            format: parse_option(ARG_FORMAT, args.format.as_deref())?.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_beaches(args: BeachesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_beaches_with(args, &mut stdout)
}

pub(crate) fn run_beaches_with(args: BeachesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.file, ARG_BEACHES_FILE)?;
    let beaches = load_beaches(&config.file)?;
    let hits: Vec<&Beach> = search_beaches(&beaches, &config.search)
        .take(SEARCH_LIMIT)
        .collect();
    let text = match config.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&hits).map_err(CliError::SerializeOutput)?
        }
        OutputFormat::Text => hits
            .iter()
            .map(|beach| describe(beach))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    if !text.is_empty() {
        writeln!(writer, "{text}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

/// Loads a JSON-encoded beach list from disk.
pub(crate) fn load_beaches(path: &Utf8Path) -> Result<Vec<Beach>, CliError> {
    let file = open_input(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseBeaches {
        path: path.to_path_buf(),
        source,
    })
}

fn describe(beach: &Beach) -> String {
    beach.zone_tags.first().map_or_else(
        || format!("{} ({})", beach.name, beach.id),
        |zone| format!("{} ({}) [{zone}]", beach.name, beach.id),
    )
}
