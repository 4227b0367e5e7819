//! Template compile and render errors.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One of the executor's two render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Process-wide configuration.
    Main,
    /// Configuration for one routing object.
    PerObject,
}

impl Slot {
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Main => "main",
            Slot::PerObject => "per-object",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading, compiling or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read {slot} template {path:?}: {source}")]
    Io {
        slot: Slot,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The template source does not compile.
    #[error("failed to compile {slot} template {name:?}: {source}")]
    Compile {
        slot: Slot,
        name: String,
        source: minijinja::Error,
    },

    /// The model does not fit the template.
    #[error("failed to render {slot} template {name:?}: {source}")]
    Render {
        slot: Slot,
        name: String,
        source: minijinja::Error,
    },
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
