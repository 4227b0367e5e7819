//! Error definitions for directive parsing.

use thiserror::Error;

use crate::directives::source::AnnotationSource;

/// Why a strict numeric literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberErrorKind {
    /// Not a literal of the target grammar at all.
    #[error("invalid syntax")]
    Syntax,

    /// A well-formed literal that does not fit the target width.
    #[error("value out of range")]
    Range,
}

/// A strict numeric parse failure.
///
/// Displays as `parsing "<input>": <kind>`, which is the cause text embedded in
/// [`MapKeyError`] messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {input:?}: {kind}")]
pub struct NumberError {
    pub input: String,
    pub kind: NumberErrorKind,
}

impl NumberError {
    pub(crate) fn syntax(input: &str) -> Self {
        Self {
            input: input.to_string(),
            kind: NumberErrorKind::Syntax,
        }
    }

    pub(crate) fn range(input: &str) -> Self {
        Self {
            input: input.to_string(),
            kind: NumberErrorKind::Range,
        }
    }
}

/// Errors returned by the directive parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed grammar: bad delimiters, missing or extra tokens.
    #[error("invalid {directive} {input:?}: {reason}")]
    Structural {
        directive: &'static str,
        input: String,
        reason: String,
    },

    /// Well-formed value outside its permitted bounds.
    #[error("invalid {directive} {input:?}: {reason}")]
    Range {
        directive: &'static str,
        input: String,
        reason: String,
    },

    /// Unrecognized unit suffix.
    #[error("invalid {directive} {input:?}: unknown unit {unit:?}")]
    UnknownUnit {
        directive: &'static str,
        input: String,
        unit: String,
    },

    /// Strict numeric grammar failure.
    #[error(transparent)]
    Number(#[from] NumberError),
}

impl ParseError {
    pub(crate) fn structural(
        directive: &'static str,
        input: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Structural {
            directive,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range(directive: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self::Range {
            directive,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_unit(directive: &'static str, input: &str, unit: &str) -> Self {
        Self::UnknownUnit {
            directive,
            input: input.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Result type for directive parsers.
pub type ParseResult<T> = Result<T, ParseError>;

/// A present-but-invalid value found in a resource's string map.
///
/// The trailing "ignoring" tells the caller to keep its default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{origin} '{key}' contains invalid {expected}: {cause}, ignoring")]
pub struct MapKeyError {
    pub origin: AnnotationSource,
    pub key: String,
    pub expected: &'static str,
    pub cause: ParseError,
}
