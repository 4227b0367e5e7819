//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Template paths are set
//! - Log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConfgenConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ConfgenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("templates.{0} must not be empty")]
    EmptyTemplatePath(&'static str),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ConfgenConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.templates.main.trim().is_empty() {
        errors.push(ValidationError::EmptyTemplatePath("main"));
    }
    if config.templates.per_object.trim().is_empty() {
        errors.push(ValidationError::EmptyTemplatePath("per_object"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
