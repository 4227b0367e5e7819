//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! template executor, annotation registry
//!     → logging.rs (structured log events to stderr)
//!     → metrics.rs (counters, histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Rendered output goes to stdout, logs never do
//! - Parsers stay silent; callers decide what to log

pub mod logging;
pub mod metrics;
