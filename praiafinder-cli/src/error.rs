//! Error types emitted by the PraiaFinder CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use praiafinder_core::ParseError;
use praiafinder_view::{QueryError, ResponseError};
use thiserror::Error;

/// Errors emitted by the PraiaFinder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// An option names a value outside its vocabulary.
    #[error("invalid --{field}: {source}")]
    InvalidOption {
        /// Flag name.
        field: &'static str,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
    /// The selected day is outside the forecast window.
    #[error("--day {day} is outside the forecast window of {max} days")]
    DayOutOfRange {
        /// Requested offset.
        day: u8,
        /// Number of selectable days.
        max: u8,
    },
    /// Only one of latitude and longitude was supplied.
    #[error("--lat and --lon must be given together")]
    IncompletePosition,
    /// The listing query could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument naming the path.
        field: &'static str,
        /// Requested path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument naming the path.
        field: &'static str,
        /// Requested path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument naming the path.
        field: &'static str,
        /// Requested path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Reading an input file failed.
    #[error("failed to read {path:?}: {source}")]
    ReadInput {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// A saved `/top` response could not be parsed.
    #[error("failed to parse /top response at {path:?}: {source}")]
    ParseResponse {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Parse failure.
        #[source]
        source: ResponseError,
    },
    /// A saved beach list could not be parsed.
    #[error("failed to parse beach list at {path:?}: {source}")]
    ParseBeaches {
        /// File being parsed.
        path: Utf8PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The listing could not be loaded.
    #[error("{message}")]
    Listing {
        /// Message recorded by the listing state.
        message: String,
    },
    /// Serializing JSON output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
