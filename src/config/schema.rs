//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML settings
//! file. Every field has a default so a minimal file is valid.

use serde::{Deserialize, Serialize};

use crate::directives::LbDialect;

/// Root settings for the config generator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConfgenConfig {
    /// Template sources for the two render targets.
    pub templates: TemplatesConfig,

    /// Directive parsing options.
    pub directives: DirectivesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Paths of the templates compiled at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Main (process-wide) template.
    pub main: String,

    /// Per-routing-object template.
    pub per_object: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            main: "templates/main.tmpl".to_string(),
            per_object: "templates/object.tmpl".to_string(),
        }
    }
}

/// Directive parsing options.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DirectivesConfig {
    /// Accept the extended load-balancing dialect (`least_time` family).
    pub extended_lb_methods: bool,
}

impl DirectivesConfig {
    pub fn lb_dialect(&self) -> LbDialect {
        if self.extended_lb_methods {
            LbDialect::Extended
        } else {
            LbDialect::Base
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
