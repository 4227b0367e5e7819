//! Delimited list directives.
//!
//! # Grammars
//! ```text
//! headers   : "name:value" per entry, split at the first colon
//! services  : svc ("," svc)*
//! ports     : port ("," port)*              port in 1..=65535
//! sticky    : entry (";" entry)*            entry = "serviceName=" svc " " cookie-params
//! rewrites  : entry (";" entry)*            entry = "serviceName=" svc " rewrite=" path
//! ```
//!
//! Sticky and rewrite lists are all-or-nothing: one bad entry fails the call.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::directives::error::{ParseError, ParseResult};

/// Cookie name followed by the optional `sticky cookie` parameters in their
/// fixed order.
static STICKY_COOKIE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9_-]+",
        r"(\s+expires=(max|[0-9]+(ms|s|m|h|d|w|M|y)?))?",
        r"(\s+domain=[^\s;]+)?",
        r"(\s+httponly)?",
        r"(\s+secure)?",
        r"(\s+path=/[^\s;]*)?$",
    ))
    .expect("sticky cookie pattern is valid")
});

/// One forwarded header directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// A service with session persistence via a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickyService {
    pub service: String,
    /// Cookie name and parameters, verbatim.
    pub cookie: String,
}

/// A path rewrite applied to one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    pub service: String,
    pub path: String,
}

/// Split each entry at its first colon.
///
/// An empty entry keeps its position as a zero-value [`Header`]. An empty
/// input returns `None` so callers can tell "nothing configured" apart from
/// a single blank entry.
pub fn parse_headers<S: AsRef<str>>(entries: &[S]) -> Option<Vec<Header>> {
    if entries.is_empty() {
        return None;
    }

    let headers = entries
        .iter()
        .map(|entry| match entry.as_ref().split_once(':') {
            Some((name, value)) => Header {
                name: name.to_string(),
                value: value.to_string(),
            },
            None => Header {
                name: entry.as_ref().to_string(),
                value: String::new(),
            },
        })
        .collect();
    Some(headers)
}

/// Split a comma separated list of service names into a set.
///
/// The empty string yields a set holding the empty name; callers must not
/// read that as "no services".
pub fn parse_service_list(s: &str) -> HashSet<String> {
    s.split(',').map(str::to_string).collect()
}

/// Parse a comma separated list of ports, keeping input order and duplicates.
pub fn parse_port_list(s: &str) -> ParseResult<Vec<u16>> {
    const DIRECTIVE: &str = "port list";

    if s.is_empty() {
        return Err(ParseError::structural(DIRECTIVE, s, "list is empty"));
    }

    s.split(',')
        .map(|segment| {
            if segment.is_empty() {
                return Err(ParseError::structural(DIRECTIVE, s, "empty port entry"));
            }
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::structural(
                    DIRECTIVE,
                    s,
                    format!("port {:?} is not a whole number", segment),
                ));
            }
            match segment.parse::<u16>() {
                Ok(0) | Err(_) => Err(ParseError::range(
                    DIRECTIVE,
                    s,
                    format!("port {} must be between 1 and 65535", segment),
                )),
                Ok(port) => Ok(port),
            }
        })
        .collect()
}

/// Check a rewrite target: must start with `/` and contain no whitespace,
/// `{`, `}` or `$`.
pub fn verify_path(path: &str) -> bool {
    path.starts_with('/')
        && !path
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '$'))
}

/// Split `serviceName=<svc>` off the front of an entry.
fn split_service<'a>(
    directive: &'static str,
    list: &str,
    entry: &'a str,
) -> ParseResult<(&'a str, &'a str)> {
    let (head, rest) = entry.split_once(' ').ok_or_else(|| {
        ParseError::structural(directive, list, format!("entry {:?} has no parameters", entry))
    })?;

    match head.split_once('=') {
        Some(("serviceName", service)) if !service.is_empty() && !service.contains('=') => {
            Ok((service, rest))
        }
        _ => Err(ParseError::structural(
            directive,
            list,
            format!("entry {:?} must start with serviceName=<name>", entry),
        )),
    }
}

/// Parse `;` separated sticky-cookie entries.
pub fn parse_sticky_service_list(s: &str) -> ParseResult<Vec<StickyService>> {
    const DIRECTIVE: &str = "sticky service list";

    s.split(';')
        .map(|entry| {
            if entry.is_empty() {
                return Err(ParseError::structural(DIRECTIVE, s, "empty entry"));
            }
            let (service, cookie) = split_service(DIRECTIVE, s, entry)?;
            if !STICKY_COOKIE.is_match(cookie) {
                return Err(ParseError::structural(
                    DIRECTIVE,
                    s,
                    format!("invalid sticky-cookie parameters {:?}", cookie),
                ));
            }
            Ok(StickyService {
                service: service.to_string(),
                cookie: cookie.to_string(),
            })
        })
        .collect()
}

/// Parse `;` separated rewrite entries.
pub fn parse_rewrite_list(s: &str) -> ParseResult<Vec<Rewrite>> {
    const DIRECTIVE: &str = "rewrite list";

    s.split(';')
        .map(|raw| {
            let entry = raw.trim();
            if entry.is_empty() {
                return Err(ParseError::structural(DIRECTIVE, s, "empty entry"));
            }
            let (service, rest) = split_service(DIRECTIVE, s, entry)?;
            let path = match rest.trim().split_once('=') {
                Some(("rewrite", path)) => path.trim(),
                _ => {
                    return Err(ParseError::structural(
                        DIRECTIVE,
                        s,
                        format!("entry {:?} must contain rewrite=<path>", entry),
                    ))
                }
            };
            if !verify_path(path) {
                return Err(ParseError::structural(
                    DIRECTIVE,
                    s,
                    format!(
                        "path {:?} must start with '/' and must not include any whitespace character, '{{', '}}' or '$'",
                        path
                    ),
                ));
            }
            Ok(Rewrite {
                service: service.to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}
