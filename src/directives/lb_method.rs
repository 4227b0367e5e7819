//! Load-balancing method directive.
//!
//! Two dialects share a grammar of enumerated forms. The extended dialect adds
//! the `least_time` family. Matching is on the whole trimmed string, so any
//! unknown word invalidates the value.

use crate::directives::error::{ParseError, ParseResult};

const DIRECTIVE: &str = "load balancing method";

const BASE_METHODS: &[&str] = &[
    "least_conn",
    "ip_hash",
    "random",
    "random two",
    "random two least_conn",
];

const EXTENDED_METHODS: &[&str] = &[
    "random two least_time=header",
    "random two least_time=last_byte",
    "least_time header",
    "least_time last_byte",
    "least_time header inflight",
    "least_time last_byte inflight",
];

/// Which method grammar to accept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LbDialect {
    #[default]
    Base,
    Extended,
}

impl LbDialect {
    fn accepts(self, method: &str) -> bool {
        BASE_METHODS.contains(&method)
            || (self == LbDialect::Extended && EXTENDED_METHODS.contains(&method))
    }
}

/// `hash <key>` or `hash <key> consistent`.
fn is_hash_method(method: &str) -> bool {
    let words: Vec<&str> = method.split(' ').collect();
    match words.as_slice() {
        ["hash", key] => !key.is_empty(),
        ["hash", key, "consistent"] => !key.is_empty(),
        _ => false,
    }
}

/// Parse a method under the given dialect.
///
/// `round_robin` is the upstream default and normalizes to the empty string,
/// meaning "emit nothing".
pub fn parse_lb_method_with(method: &str, dialect: LbDialect) -> ParseResult<String> {
    let method = method.trim();

    if method == "round_robin" {
        return Ok(String::new());
    }
    if is_hash_method(method) || dialect.accepts(method) {
        return Ok(method.to_string());
    }

    Err(ParseError::structural(DIRECTIVE, method, "not a supported method"))
}

/// Parse a method in the base dialect.
pub fn parse_lb_method(method: &str) -> ParseResult<String> {
    parse_lb_method_with(method, LbDialect::Base)
}

/// Parse a method in the extended dialect.
pub fn parse_lb_method_for_plus(method: &str) -> ParseResult<String> {
    parse_lb_method_with(method, LbDialect::Extended)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lb_method() {
        for (input, expected) in [
            ("least_conn", "least_conn"),
            ("round_robin", ""),
            ("ip_hash", "ip_hash"),
            ("random", "random"),
            ("random two", "random two"),
            ("random two least_conn", "random two least_conn"),
            ("hash $request_id", "hash $request_id"),
            ("hash $request_id consistent", "hash $request_id consistent"),
        ] {
            assert_eq!(parse_lb_method(input).as_deref(), Ok(expected), "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_lb_method_rejects_bogus() {
        for input in [
            "",
            "blabla",
            "least_time header",
            "hash123",
            "hash $request_id conwrongspelling",
            "random one",
            "random two least_time=header",
            "random two least_time=last_byte",
            "random two ip_hash",
            "hash",
        ] {
            assert!(parse_lb_method(input).is_err(), "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_lb_method_for_plus() {
        for (input, expected) in [
            ("least_conn", "least_conn"),
            ("round_robin", ""),
            ("ip_hash", "ip_hash"),
            ("random", "random"),
            ("random two", "random two"),
            ("random two least_conn", "random two least_conn"),
            ("random two least_time=header", "random two least_time=header"),
            ("random two least_time=last_byte", "random two least_time=last_byte"),
            ("hash $request_id", "hash $request_id"),
            ("least_time header", "least_time header"),
            ("least_time last_byte", "least_time last_byte"),
            ("least_time header inflight", "least_time header inflight"),
            ("least_time last_byte inflight", "least_time last_byte inflight"),
        ] {
            assert_eq!(
                parse_lb_method_for_plus(input).as_deref(),
                Ok(expected),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_lb_method_for_plus_rejects_bogus() {
        for input in [
            "",
            "blabla",
            "hash123",
            "least_time",
            "last_byte",
            "least_time inflight header",
            "random one",
            "random two ip_hash",
            "random two least_time",
        ] {
            assert!(parse_lb_method_for_plus(input).is_err(), "input {:?}", input);
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(parse_lb_method("  least_conn ").unwrap(), "least_conn");
    }
}
