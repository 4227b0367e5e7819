//! Metrics for template slot transitions, renders and rejected directives.
//!
//! # Metrics
//! - `confgen_template_updates_total` (counter): slot transitions by slot, outcome
//!   (`applied`, `rejected`, `original`)
//! - `confgen_template_renders_total` (counter): renders by slot, outcome (`ok`, `error`)
//! - `confgen_template_render_duration_seconds` (histogram): render latency by slot
//! - `confgen_annotation_rejections_total` (counter): rejected annotations by kind
//!
//! # Design Decisions
//! - Emits through the `metrics` facade only; the embedding process installs
//!   the recorder and exporter
//! - Labels are static strings, no per-resource cardinality

use std::time::Instant;

/// Record a slot transition.
pub fn record_template_update(slot: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "confgen_template_updates_total",
        "slot" => slot,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a finished render and its latency.
pub fn record_render(slot: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!(
        "confgen_template_renders_total",
        "slot" => slot,
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("confgen_template_render_duration_seconds", "slot" => slot)
        .record(start.elapsed().as_secs_f64());
}

/// Record an annotation rejected by the registry.
pub fn record_annotation_rejection(kind: &'static str) {
    ::metrics::counter!("confgen_annotation_rejections_total", "kind" => kind).increment(1);
}
