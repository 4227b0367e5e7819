//! Two-slot template executor with runtime replacement and rollback.
//!
//! Each slot keeps the definition compiled at construction (`original`) and
//! the one currently serving renders (`active`). Updates compile first and
//! only then swap `active`, so a failed compile leaves the slot untouched
//! and a concurrent render always sees one whole definition.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::observability::metrics;
use crate::template::definition::TemplateDefinition;
use crate::template::error::{Slot, TemplateError, TemplateResult};

/// Name given to definitions compiled by a runtime update.
fn update_name(slot: Slot) -> &'static str {
    match slot {
        Slot::Main => "main-template",
        Slot::PerObject => "per-object-template",
    }
}

#[derive(Debug)]
struct TemplateSlot {
    original: Arc<TemplateDefinition>,
    active: ArcSwap<TemplateDefinition>,
}

impl TemplateSlot {
    fn new(definition: TemplateDefinition) -> Self {
        let original = Arc::new(definition);
        Self {
            active: ArcSwap::new(Arc::clone(&original)),
            original,
        }
    }
}

/// Renders the main and per-object configuration from swappable templates.
///
/// All methods take `&self`; share the executor behind an `Arc` to update
/// and render from different threads.
#[derive(Debug)]
pub struct TemplateExecutor {
    main: TemplateSlot,
    per_object: TemplateSlot,
}

impl TemplateExecutor {
    /// Compile both templates. Fails if either does not compile.
    pub fn new(
        main_name: impl Into<String>,
        main_source: impl Into<String>,
        per_object_name: impl Into<String>,
        per_object_source: impl Into<String>,
    ) -> TemplateResult<Self> {
        let main = TemplateDefinition::compile(Slot::Main, main_name, main_source)?;
        let per_object =
            TemplateDefinition::compile(Slot::PerObject, per_object_name, per_object_source)?;

        tracing::info!(
            main = %main.name(),
            per_object = %per_object.name(),
            "Templates compiled"
        );

        Ok(Self {
            main: TemplateSlot::new(main),
            per_object: TemplateSlot::new(per_object),
        })
    }

    /// Read and compile both templates from disk, naming each after its file.
    pub fn from_files(main_path: &Path, per_object_path: &Path) -> TemplateResult<Self> {
        let (main_name, main_source) = read_template(Slot::Main, main_path)?;
        let (per_object_name, per_object_source) = read_template(Slot::PerObject, per_object_path)?;
        Self::new(main_name, main_source, per_object_name, per_object_source)
    }

    fn slot(&self, slot: Slot) -> &TemplateSlot {
        match slot {
            Slot::Main => &self.main,
            Slot::PerObject => &self.per_object,
        }
    }

    /// Compile `source` and make it the active definition of `slot`.
    ///
    /// On a compile error the active definition keeps serving.
    pub fn update(&self, slot: Slot, source: &str) -> TemplateResult<()> {
        let definition = match TemplateDefinition::compile(slot, update_name(slot), source) {
            Ok(definition) => definition,
            Err(e) => {
                tracing::warn!(
                    slot = %slot,
                    name = update_name(slot),
                    error = %e,
                    "Template update rejected, keeping active template"
                );
                metrics::record_template_update(slot.as_str(), "rejected");
                return Err(e);
            }
        };

        self.slot(slot).active.store(Arc::new(definition));
        tracing::info!(slot = %slot, "Template updated");
        metrics::record_template_update(slot.as_str(), "applied");
        Ok(())
    }

    /// Restore the definition compiled at construction.
    pub fn use_original(&self, slot: Slot) {
        let state = self.slot(slot);
        state.active.store(Arc::clone(&state.original));
        tracing::info!(slot = %slot, name = %state.original.name(), "Using original template");
        metrics::record_template_update(slot.as_str(), "original");
    }

    /// Whether `slot` currently serves its original definition.
    pub fn is_original(&self, slot: Slot) -> bool {
        let state = self.slot(slot);
        Arc::ptr_eq(&state.active.load(), &state.original)
    }

    /// Name of the definition currently serving `slot`.
    pub fn active_name(&self, slot: Slot) -> String {
        self.slot(slot).active.load().name().to_string()
    }

    /// Render `model` with the active definition of `slot`.
    ///
    /// The definition is pinned for the whole render, so a concurrent update
    /// only affects later renders.
    pub fn render<M: Serialize + ?Sized>(&self, slot: Slot, model: &M) -> TemplateResult<Vec<u8>> {
        let start = Instant::now();
        let definition = self.slot(slot).active.load_full();
        let result = definition.render(model);

        if let Err(e) = &result {
            tracing::debug!(slot = %slot, error = %e, "Template render failed");
        }
        metrics::record_render(slot.as_str(), result.is_ok(), start);
        result
    }

    pub fn update_main(&self, source: &str) -> TemplateResult<()> {
        self.update(Slot::Main, source)
    }

    pub fn update_per_object(&self, source: &str) -> TemplateResult<()> {
        self.update(Slot::PerObject, source)
    }

    pub fn use_original_main(&self) {
        self.use_original(Slot::Main)
    }

    pub fn use_original_per_object(&self) {
        self.use_original(Slot::PerObject)
    }

    /// Render the process-wide configuration.
    pub fn render_main<M: Serialize + ?Sized>(&self, model: &M) -> TemplateResult<Vec<u8>> {
        self.render(Slot::Main, model)
    }

    /// Render the configuration of one routing object.
    pub fn render_per_object<M: Serialize + ?Sized>(&self, model: &M) -> TemplateResult<Vec<u8>> {
        self.render(Slot::PerObject, model)
    }
}

fn read_template(slot: Slot, path: &Path) -> TemplateResult<(String, String)> {
    let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        slot,
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| update_name(slot).to_string());
    Ok((name, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn executor() -> TemplateExecutor {
        TemplateExecutor::new(
            "main.tmpl",
            "worker_processes {{ workers }};\n",
            "object.tmpl",
            "server_name {{ host }};\n",
        )
        .unwrap()
    }

    #[test]
    fn test_new_fails_if_either_template_is_invalid() {
        assert!(TemplateExecutor::new("m", "{% if %}", "o", "ok").is_err());
        let err = TemplateExecutor::new("m", "ok", "o", "{% endfor %}").unwrap_err();
        assert!(matches!(err, TemplateError::Compile { slot: Slot::PerObject, .. }));
    }

    #[test]
    fn test_update_then_use_original() {
        let exec = executor();
        let model = json!({ "workers": 4 });
        let before = exec.render_main(&model).unwrap();

        exec.update_main("workers={{ workers }}").unwrap();
        assert_eq!(exec.render_main(&model).unwrap(), b"workers=4");
        assert!(!exec.is_original(Slot::Main));
        assert_eq!(exec.active_name(Slot::Main), "main-template");

        exec.use_original_main();
        assert_eq!(exec.render_main(&model).unwrap(), before);
        assert!(exec.is_original(Slot::Main));
    }

    #[test]
    fn test_failed_update_keeps_active() {
        let exec = executor();
        exec.update_per_object("host={{ host }}").unwrap();

        let err = exec.update_per_object("{% for %}").unwrap_err();
        assert!(matches!(err, TemplateError::Compile { .. }));
        let out = exec.render_per_object(&json!({ "host": "tea" })).unwrap();
        assert_eq!(out, b"host=tea");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_rejected_update_warning_names_template() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let exec = executor();
        tracing::subscriber::with_default(subscriber, || {
            assert!(exec.update_main("{% for %}").is_err());
        });

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("slot=main"));
        assert!(output.contains("main-template"));
    }

    #[test]
    fn test_slots_are_independent() {
        let exec = executor();
        exec.update_main("replaced").unwrap();
        assert!(exec.is_original(Slot::PerObject));
        assert_eq!(
            exec.render_per_object(&json!({ "host": "a" })).unwrap(),
            b"server_name a;\n"
        );
    }

    #[test]
    fn test_use_original_without_update() {
        let exec = executor();
        exec.use_original_per_object();
        assert!(exec.is_original(Slot::PerObject));
    }
}
