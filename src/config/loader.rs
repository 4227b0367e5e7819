//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ConfgenConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse and validate settings from TOML text.
pub fn parse_config(content: &str) -> Result<ConfgenConfig, ConfigError> {
    let config: ConfgenConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<ConfgenConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.templates.main, "templates/main.tmpl");
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.directives.extended_lb_methods);
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config(
            r#"
            [templates]
            main = "/etc/confgen/main.tmpl"

            [directives]
            extended_lb_methods = true
            "#,
        )
        .unwrap();
        assert_eq!(config.templates.main, "/etc/confgen/main.tmpl");
        assert_eq!(config.templates.per_object, "templates/object.tmpl");
        assert!(config.directives.extended_lb_methods);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_config("[templates"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error() {
        let err = parse_config("[observability]\nlog_level = \"chatty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }
}
