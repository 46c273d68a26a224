//! Errors raised when parsing wire vocabulary.

use thiserror::Error;

/// A string did not name a known value of a closed vocabulary.
///
/// # Examples
/// ```
/// use std::str::FromStr;
/// use praiafinder_core::{ParseError, WaterType};
///
/// let err = WaterType::from_str("lake").unwrap_err();
/// assert_eq!(err, ParseError::Unknown { kind: "water type", value: "lake".into() });
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The value is not part of the vocabulary.
    #[error("unknown {kind} '{value}'")]
    Unknown {
        /// Name of the vocabulary, e.g. `"water type"`.
        kind: &'static str,
        /// Value that failed to parse.
        value: String,
    },
}

impl ParseError {
    /// Build an [`ParseError::Unknown`] for `kind`.
    #[must_use]
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        Self::Unknown {
            kind,
            value: value.to_owned(),
        }
    }
}
