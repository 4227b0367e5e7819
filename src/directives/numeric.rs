//! Strict numeric and boolean literals.
//!
//! No surrounding whitespace, no grouping separators, and overflow of the
//! target width is an error.

use std::num::{IntErrorKind, ParseIntError};

use crate::directives::error::NumberError;

fn int_error(input: &str, err: &ParseIntError) -> NumberError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumberError::range(input),
        _ => NumberError::syntax(input),
    }
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
pub fn parse_bool(s: &str) -> Result<bool, NumberError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(NumberError::syntax(s)),
    }
}

/// Parse a signed integer at the platform word width of the controller
/// (64-bit).
pub fn parse_int(s: &str) -> Result<i64, NumberError> {
    s.parse::<i64>().map_err(|e| int_error(s, &e))
}

/// Parse a signed 64-bit integer.
pub fn parse_int64(s: &str) -> Result<i64, NumberError> {
    s.parse::<i64>().map_err(|e| int_error(s, &e))
}

/// Parse an unsigned 64-bit integer. A sign of either kind is rejected.
pub fn parse_uint64(s: &str) -> Result<u64, NumberError> {
    if s.starts_with('+') {
        return Err(NumberError::syntax(s));
    }
    s.parse::<u64>().map_err(|e| int_error(s, &e))
}

/// Parse a finite 64-bit float.
///
/// Magnitudes beyond `f64::MAX` round to infinity and are reported as out of
/// range, as are the literal `inf` and `nan` spellings.
pub fn parse_float64(s: &str) -> Result<f64, NumberError> {
    let value = s.parse::<f64>().map_err(|_| NumberError::syntax(s))?;
    if !value.is_finite() {
        return Err(NumberError::range(s));
    }
    Ok(value)
}
