//! Unit-bearing literals: durations, sizes, offsets and buffer specs.
//!
//! `parse_time` normalizes; the size-like parsers only validate and hand the
//! input back unchanged.

use crate::directives::error::{ParseError, ParseResult};

/// Duration units in the order they are emitted.
const TIME_UNITS: [&str; 8] = ["y", "M", "w", "d", "h", "m", "s", "ms"];

const SIZE_UNITS: &[char] = &['k', 'K', 'm', 'M'];
const OFFSET_UNITS: &[char] = &['k', 'K', 'm', 'M', 'g', 'G'];

/// Split a leading run of ASCII digits off `s`.
fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a composite duration such as `1h30m 5 100ms`.
///
/// Tokens are a magnitude followed by an optional unit (bare magnitudes are
/// seconds), optionally separated by whitespace. Each unit may appear once.
/// The result is the tokens joined without whitespace, largest unit first:
/// `1h30m 5 100ms` becomes `1h30m5s100ms`.
pub fn parse_time(s: &str) -> ParseResult<String> {
    const DIRECTIVE: &str = "time";

    let mut rest = s.trim_start();
    if rest.is_empty() {
        return Err(ParseError::structural(DIRECTIVE, s, "empty duration"));
    }

    let mut slots: [Option<&str>; TIME_UNITS.len()] = Default::default();
    while !rest.is_empty() {
        if rest.starts_with('-') {
            return Err(ParseError::range(DIRECTIVE, s, "negative magnitude"));
        }

        let (magnitude, after) = split_digits(rest);
        if magnitude.is_empty() {
            return Err(ParseError::structural(
                DIRECTIVE,
                s,
                format!("expected a magnitude at {:?}", rest),
            ));
        }

        let unit_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let unit = if unit.is_empty() { "s" } else { unit };

        let slot = TIME_UNITS
            .iter()
            .position(|u| *u == unit)
            .ok_or_else(|| ParseError::unknown_unit(DIRECTIVE, s, unit))?;
        if slots[slot].is_some() {
            return Err(ParseError::structural(
                DIRECTIVE,
                s,
                format!("unit {:?} given more than once", unit),
            ));
        }
        slots[slot] = Some(magnitude);

        rest = after.trim_start();
    }

    let normalized = slots
        .iter()
        .zip(TIME_UNITS)
        .filter_map(|(magnitude, unit)| magnitude.map(|m| format!("{}{}", m, unit)))
        .collect();
    Ok(normalized)
}

/// Validate `<digits>[unit]` where `unit` is one of `units`.
fn check_sized(directive: &'static str, input: &str, value: &str, units: &[char]) -> ParseResult<()> {
    if value.starts_with('-') {
        return Err(ParseError::range(directive, input, "negative magnitude"));
    }

    let (magnitude, suffix) = split_digits(value);
    if magnitude.is_empty() {
        return Err(ParseError::structural(directive, input, "missing magnitude"));
    }

    let mut chars = suffix.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(()),
        (Some(unit), None) if units.contains(&unit) => Ok(()),
        (Some(unit), None) if unit.is_ascii_alphabetic() => {
            Err(ParseError::unknown_unit(directive, input, suffix))
        }
        _ => Err(ParseError::structural(
            directive,
            input,
            format!("unexpected suffix {:?}", suffix),
        )),
    }
}

/// Validate an offset: a magnitude with an optional `k`, `m` or `g` suffix
/// (either case). Returns the input unchanged.
pub fn parse_offset(s: &str) -> ParseResult<String> {
    check_sized("offset", s, s, OFFSET_UNITS)?;
    Ok(s.to_string())
}

/// Validate a size: a magnitude with an optional `k` or `m` suffix (either
/// case). Returns the input unchanged.
pub fn parse_size(s: &str) -> ParseResult<String> {
    check_sized("size", s, s, SIZE_UNITS)?;
    Ok(s.to_string())
}

/// Validate a `proxy_buffers` value: `<count> <size>` with a positive count.
/// Returns the input unchanged.
pub fn parse_proxy_buffers_spec(s: &str) -> ParseResult<String> {
    const DIRECTIVE: &str = "proxy buffers";

    let (count, size) = s
        .split_once(' ')
        .ok_or_else(|| ParseError::structural(DIRECTIVE, s, "expected \"<count> <size>\""))?;

    if count.starts_with('-') {
        return Err(ParseError::range(DIRECTIVE, s, "negative buffer count"));
    }
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::structural(
            DIRECTIVE,
            s,
            format!("buffer count {:?} is not a whole number", count),
        ));
    }
    if count.bytes().all(|b| b == b'0') {
        return Err(ParseError::range(DIRECTIVE, s, "buffer count must be positive"));
    }

    check_sized(DIRECTIVE, s, size, SIZE_UNITS)?;
    Ok(s.to_string())
}
