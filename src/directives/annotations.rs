//! Registry of known routing annotations and the grammar each one obeys.
//!
//! Used to vet a resource's annotations in one pass before the values are
//! assembled into a config model. Unknown keys are left alone.

use crate::directives::error::{MapKeyError, ParseError, ParseResult};
use crate::directives::lb_method::{parse_lb_method_with, LbDialect};
use crate::directives::lists::{parse_port_list, parse_rewrite_list, parse_sticky_service_list};
use crate::directives::map::StringMap;
use crate::directives::numeric::{parse_bool, parse_int, parse_int64};
use crate::directives::source::AnnotationSource;
use crate::directives::thresholds::verify_app_protect_thresholds;
use crate::directives::units::{parse_offset, parse_proxy_buffers_spec, parse_size, parse_time};
use crate::observability::metrics;

/// Grammar a directive value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Bool,
    Int,
    Int64,
    Time,
    Size,
    Offset,
    ProxyBuffers,
    LbMethod,
    PortList,
    StickyServices,
    Rewrites,
    Thresholds,
}

const KNOWN_DIRECTIVES: &[(&str, DirectiveKind)] = &[
    ("nginx.org/lb-method", DirectiveKind::LbMethod),
    ("nginx.org/proxy-connect-timeout", DirectiveKind::Time),
    ("nginx.org/proxy-read-timeout", DirectiveKind::Time),
    ("nginx.org/proxy-send-timeout", DirectiveKind::Time),
    ("nginx.org/fail-timeout", DirectiveKind::Time),
    ("nginx.org/slow-start", DirectiveKind::Time),
    ("nginx.org/client-max-body-size", DirectiveKind::Size),
    ("nginx.org/proxy-buffer-size", DirectiveKind::Size),
    ("nginx.org/proxy-max-temp-file-size", DirectiveKind::Offset),
    ("nginx.org/proxy-buffers", DirectiveKind::ProxyBuffers),
    ("nginx.org/proxy-buffering", DirectiveKind::Bool),
    ("nginx.org/server-tokens", DirectiveKind::Bool),
    ("nginx.org/redirect-to-https", DirectiveKind::Bool),
    ("nginx.org/hsts", DirectiveKind::Bool),
    ("nginx.org/hsts-include-subdomains", DirectiveKind::Bool),
    ("nginx.org/hsts-max-age", DirectiveKind::Int64),
    ("nginx.org/max-fails", DirectiveKind::Int),
    ("nginx.org/max-conns", DirectiveKind::Int),
    ("nginx.org/keepalive", DirectiveKind::Int),
    ("nginx.org/listen-ports", DirectiveKind::PortList),
    ("nginx.org/listen-ports-ssl", DirectiveKind::PortList),
    ("nginx.org/sticky-cookie-services", DirectiveKind::StickyServices),
    ("nginx.org/rewrites", DirectiveKind::Rewrites),
    ("app-protect-physical-memory-util-thresholds", DirectiveKind::Thresholds),
];

impl DirectiveKind {
    /// Short type name used in error text.
    pub fn expected(self) -> &'static str {
        match self {
            DirectiveKind::Bool => "bool",
            DirectiveKind::Int | DirectiveKind::Int64 => "integer",
            DirectiveKind::Time => "time",
            DirectiveKind::Size => "size",
            DirectiveKind::Offset => "offset",
            DirectiveKind::ProxyBuffers => "proxy buffers",
            DirectiveKind::LbMethod => "load balancing method",
            DirectiveKind::PortList => "port list",
            DirectiveKind::StickyServices => "sticky services",
            DirectiveKind::Rewrites => "rewrites",
            DirectiveKind::Thresholds => "thresholds",
        }
    }

    /// Check `value` against this kind's grammar.
    pub fn check(self, value: &str, dialect: LbDialect) -> ParseResult<()> {
        match self {
            DirectiveKind::Bool => parse_bool(value).map(drop)?,
            DirectiveKind::Int => parse_int(value).map(drop)?,
            DirectiveKind::Int64 => parse_int64(value).map(drop)?,
            DirectiveKind::Time => parse_time(value).map(drop)?,
            DirectiveKind::Size => parse_size(value).map(drop)?,
            DirectiveKind::Offset => parse_offset(value).map(drop)?,
            DirectiveKind::ProxyBuffers => parse_proxy_buffers_spec(value).map(drop)?,
            DirectiveKind::LbMethod => parse_lb_method_with(value, dialect).map(drop)?,
            DirectiveKind::PortList => parse_port_list(value).map(drop)?,
            DirectiveKind::StickyServices => parse_sticky_service_list(value).map(drop)?,
            DirectiveKind::Rewrites => parse_rewrite_list(value).map(drop)?,
            DirectiveKind::Thresholds => {
                if !verify_app_protect_thresholds(value) {
                    return Err(ParseError::structural(
                        "thresholds",
                        value,
                        "expected \"high=<1-100> low=<1-100>\" with low below high",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Grammar of a known directive key.
pub fn directive_kind(key: &str) -> Option<DirectiveKind> {
    KNOWN_DIRECTIVES
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, kind)| *kind)
}

/// Check every known key in `map`, returning one error per rejected key,
/// ordered by key.
pub fn validate_annotations(
    map: &StringMap,
    origin: &AnnotationSource,
    dialect: LbDialect,
) -> Vec<MapKeyError> {
    let mut errors: Vec<MapKeyError> = map
        .iter()
        .filter_map(|(key, value)| {
            let kind = directive_kind(key)?;
            let cause = kind.check(value, dialect).err()?;
            metrics::record_annotation_rejection(kind.expected());
            Some(MapKeyError {
                origin: origin.clone(),
                key: key.clone(),
                expected: kind.expected(),
                cause,
            })
        })
        .collect();

    errors.sort_by(|a, b| a.key.cmp(&b.key));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(pairs: &[(&str, &str)]) -> StringMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_directive_kind_lookup() {
        assert_eq!(directive_kind("nginx.org/lb-method"), Some(DirectiveKind::LbMethod));
        assert_eq!(directive_kind("nginx.org/unknown"), None);
    }

    #[test]
    fn test_valid_annotations_pass() {
        let map = annotations(&[
            ("nginx.org/lb-method", "least_conn"),
            ("nginx.org/proxy-connect-timeout", "1m 30s"),
            ("nginx.org/proxy-buffers", "8 4k"),
            ("nginx.org/listen-ports", "80,8080"),
            ("nginx.org/server-tokens", "False"),
            ("kubernetes.io/ingress.class", "anything goes"),
        ]);
        let source = AnnotationSource::ingress("default", "cafe");
        assert!(validate_annotations(&map, &source, LbDialect::Base).is_empty());
    }

    #[test]
    fn test_invalid_annotations_reported_in_key_order() {
        let map = annotations(&[
            ("nginx.org/server-tokens", "maybe"),
            ("nginx.org/client-max-body-size", "1g"),
            ("nginx.org/lb-method", "least_time header"),
        ]);
        let source = AnnotationSource::ingress("default", "cafe");
        let errors = validate_annotations(&map, &source, LbDialect::Base);

        let keys: Vec<&str> = errors.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["nginx.org/client-max-body-size", "nginx.org/lb-method", "nginx.org/server-tokens"]
        );
        assert_eq!(
            errors[2].to_string(),
            r#"Ingress default/cafe 'nginx.org/server-tokens' contains invalid bool: parsing "maybe": invalid syntax, ignoring"#
        );
    }

    #[test]
    fn test_dialect_controls_lb_method() {
        let map = annotations(&[("nginx.org/lb-method", "least_time last_byte inflight")]);
        let source = AnnotationSource::ingress("default", "cafe");
        assert_eq!(validate_annotations(&map, &source, LbDialect::Base).len(), 1);
        assert!(validate_annotations(&map, &source, LbDialect::Extended).is_empty());
    }

    #[test]
    fn test_thresholds_key() {
        let source = AnnotationSource::config_map("nginx-ingress", "nginx-config");
        let ok = annotations(&[("app-protect-physical-memory-util-thresholds", "high=80 low=60")]);
        assert!(validate_annotations(&ok, &source, LbDialect::Base).is_empty());

        let bad = annotations(&[("app-protect-physical-memory-util-thresholds", "high=60 low=80")]);
        let errors = validate_annotations(&bad, &source, LbDialect::Base);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].expected, "thresholds");
    }
}
