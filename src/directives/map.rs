//! Typed lookups in a resource's string map.
//!
//! Every lookup has three outcomes: the key is absent, present with a valid
//! value, or present with a value that does not parse. The last carries a
//! [`MapKeyError`] whose text ends in "ignoring": callers keep their default
//! and surface the message.

use std::collections::HashMap;

use crate::directives::error::{MapKeyError, ParseError};
use crate::directives::numeric::{parse_bool, parse_float64, parse_int, parse_int64, parse_uint64};
use crate::directives::source::AnnotationSource;

/// Raw annotations or config data, keyed by directive name.
pub type StringMap = HashMap<String, String>;

/// Outcome of a typed map lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MapValue<T> {
    Absent,
    Valid(T),
    Invalid(MapKeyError),
}

impl<T> MapValue<T> {
    /// Whether the key was present, valid or not.
    pub fn existed(&self) -> bool {
        !matches!(self, MapValue::Absent)
    }

    /// The parsed value, if the key was present and valid.
    pub fn value(self) -> Option<T> {
        match self {
            MapValue::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// The parse failure, if the key was present and invalid.
    pub fn error(&self) -> Option<&MapKeyError> {
        match self {
            MapValue::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse into `Ok(None)` for absent, `Ok(Some)` for valid.
    pub fn into_result(self) -> Result<Option<T>, MapKeyError> {
        match self {
            MapValue::Absent => Ok(None),
            MapValue::Valid(value) => Ok(Some(value)),
            MapValue::Invalid(err) => Err(err),
        }
    }

    /// The parsed value, or `default` when absent or invalid.
    pub fn unwrap_or(self, default: T) -> T {
        self.value().unwrap_or(default)
    }
}

fn lookup<T, E>(
    map: &StringMap,
    key: &str,
    origin: &AnnotationSource,
    expected: &'static str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> MapValue<T>
where
    E: Into<ParseError>,
{
    let Some(raw) = map.get(key) else {
        return MapValue::Absent;
    };

    match parse(raw) {
        Ok(value) => MapValue::Valid(value),
        Err(cause) => MapValue::Invalid(MapKeyError {
            origin: origin.clone(),
            key: key.to_string(),
            expected,
            cause: cause.into(),
        }),
    }
}

/// Look up `key` as a boolean.
pub fn get_map_key_as_bool(map: &StringMap, key: &str, origin: &AnnotationSource) -> MapValue<bool> {
    lookup(map, key, origin, "bool", parse_bool)
}

/// Look up `key` as a word-width integer.
pub fn get_map_key_as_int(map: &StringMap, key: &str, origin: &AnnotationSource) -> MapValue<i64> {
    lookup(map, key, origin, "integer", parse_int)
}

/// Look up `key` as a 64-bit integer.
pub fn get_map_key_as_int64(map: &StringMap, key: &str, origin: &AnnotationSource) -> MapValue<i64> {
    lookup(map, key, origin, "integer", parse_int64)
}

/// Look up `key` as an unsigned 64-bit integer, optionally rejecting zero.
pub fn get_map_key_as_uint64(
    map: &StringMap,
    key: &str,
    origin: &AnnotationSource,
    non_zero: bool,
) -> MapValue<u64> {
    lookup(map, key, origin, "unsigned integer", |raw| match parse_uint64(raw) {
        Ok(0) if non_zero => Err(ParseError::range("unsigned integer", raw, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(err) => Err(ParseError::from(err)),
    })
}

/// Look up `key` as a finite float.
pub fn get_map_key_as_float64(
    map: &StringMap,
    key: &str,
    origin: &AnnotationSource,
) -> MapValue<f64> {
    lookup(map, key, origin, "float", parse_float64)
}

/// Split the value of `key` on `delimiter`.
///
/// Segments are not trimmed so multi-line snippets keep their indentation.
/// Returns `None` when the key is absent.
pub fn get_map_key_as_string_slice(
    map: &StringMap,
    key: &str,
    _origin: &AnnotationSource,
    delimiter: &str,
) -> Option<Vec<String>> {
    map.get(key)
        .map(|raw| raw.split(delimiter).map(str::to_string).collect())
}
