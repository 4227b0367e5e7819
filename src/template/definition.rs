//! A compiled, named template plus its helper set.

use std::collections::HashSet;
use std::fmt;

use minijinja::machinery::{self, Instruction, Instructions};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use crate::template::error::{Slot, TemplateError, TemplateResult};
use crate::template::helpers;

/// An immutable compiled template.
///
/// Rendering is strict: a model missing a field the template references is
/// a render error rather than an empty string. Calling a function that is
/// neither a helper, a builtin, nor bound in the template itself fails the
/// compile. Trailing newlines in the source are kept in the output.
pub struct TemplateDefinition {
    slot: Slot,
    name: String,
    env: Environment<'static>,
}

impl TemplateDefinition {
    /// Compile `source` under `name` for the given slot.
    pub fn compile(slot: Slot, name: impl Into<String>, source: impl Into<String>) -> TemplateResult<Self> {
        let name = name.into();

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        helpers::register(&mut env);

        let compiled = env
            .add_template_owned(name.clone(), source.into())
            .and_then(|()| check_call_targets(&env, &name));
        if let Err(source) = compiled {
            return Err(TemplateError::Compile { slot, name, source });
        }

        Ok(Self { slot, name, env })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Render `model` into bytes. No bytes are returned on failure.
    pub fn render<M: Serialize + ?Sized>(&self, model: &M) -> TemplateResult<Vec<u8>> {
        let render_error = |source| TemplateError::Render {
            slot: self.slot,
            name: self.name.clone(),
            source,
        };

        let template = self.env.get_template(&self.name).map_err(render_error)?;
        let output = template.render(model).map_err(render_error)?;
        Ok(output.into_bytes())
    }
}

/// Callables the engine binds on its own inside loops, call blocks and
/// child blocks.
const IMPLICIT_CALLABLES: &[&str] = &["caller", "loop", "super"];

fn instructions<'a, 's>(code: &'a Instructions<'s>) -> impl Iterator<Item = &'a Instruction<'s>> {
    (0..code.len()).filter_map(move |idx| code.get(idx as u32))
}

/// Reject calls to names nothing can resolve at render time.
fn check_call_targets(env: &Environment<'static>, name: &str) -> Result<(), minijinja::Error> {
    let template = env.get_template(name)?;
    let compiled = machinery::get_compiled_template(&template);
    let code: Vec<&Instruction<'_>> = std::iter::once(&compiled.instructions)
        .chain(compiled.blocks.values())
        .flat_map(instructions)
        .collect();

    let mut bound: HashSet<&str> = env.globals().map(|(global, _)| global).collect();
    bound.extend(IMPLICIT_CALLABLES);
    bound.extend(code.iter().filter_map(|instr| match instr {
        Instruction::StoreLocal(local) => Some(*local),
        _ => None,
    }));

    let unknown = code.iter().find_map(|instr| match instr {
        Instruction::CallFunction(callee, _) if !bound.contains(callee) => Some(*callee),
        _ => None,
    });
    match unknown {
        Some(callee) => Err(minijinja::Error::new(
            ErrorKind::UnknownFunction,
            format!("{callee} is unknown"),
        )),
        None => Ok(()),
    }
}

impl fmt::Debug for TemplateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDefinition")
            .field("slot", &self.slot)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_and_render() {
        let def = TemplateDefinition::compile(
            Slot::PerObject,
            "object.tmpl",
            "server_name {{ host }};\n",
        )
        .unwrap();
        let out = def.render(&json!({ "host": "cafe.example.com" })).unwrap();
        assert_eq!(out, b"server_name cafe.example.com;\n");
        assert_eq!(def.name(), "object.tmpl");
    }

    #[test]
    fn test_compile_error() {
        let err = TemplateDefinition::compile(Slot::Main, "broken", "{% if %}").unwrap_err();
        assert!(matches!(err, TemplateError::Compile { slot: Slot::Main, .. }));
    }

    #[test]
    fn test_unknown_function_is_compile_error() {
        let err = TemplateDefinition::compile(Slot::Main, "main", "{{ no_such_fn(workers) }}")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Compile { slot: Slot::Main, .. }));
        assert!(err.to_string().contains("no_such_fn"));

        let in_block = "{% if tls %}{% for p in ports %}{{ listen_on(p) }}{% endfor %}{% endif %}";
        assert!(TemplateDefinition::compile(Slot::PerObject, "obj", in_block).is_err());
    }

    #[test]
    fn test_helpers_builtins_and_macros_resolve() {
        let source = "{% macro upstream(n) %}upstream {{ n }};{% endmacro %}\
                      {{ upstream(to_lower(name)) }} {{ range(2) | join(',') }}";
        let def = TemplateDefinition::compile(Slot::PerObject, "obj", source).unwrap();
        let out = def.render(&json!({ "name": "Tea" })).unwrap();
        assert_eq!(out, b"upstream tea; 0,1");
    }

    #[test]
    fn test_missing_field_is_render_error() {
        let def = TemplateDefinition::compile(Slot::Main, "main", "workers {{ worker_processes }};")
            .unwrap();
        let err = def.render(&json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Render { slot: Slot::Main, .. }));
    }
}
