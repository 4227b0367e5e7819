//! Configuration synthesis core for a reverse-proxy ingress controller.
//!
//! Turns routing annotations into typed, validated values and renders a
//! config model into proxy configuration through swappable templates.

pub mod config;
pub mod directives;
pub mod observability;
pub mod template;

pub use config::ConfgenConfig;
pub use directives::{AnnotationSource, MapValue, ParseError};
pub use template::{Slot, TemplateError, TemplateExecutor};
