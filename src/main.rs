//! ingress-confgen
//!
//! Operator tool around the configuration synthesis core.
//!
//! # Commands
//!
//! ```text
//!   validate   annotations.toml ──▶ directive registry ──▶ rejected keys (exit 1 if any)
//!
//!   render     main + per-object templates ──▶ TemplateExecutor
//!              [--template override] ──▶ update slot (fallback: original keeps serving)
//!              model.json ──▶ render slot ──▶ stdout
//! ```

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use ingress_confgen::config::{load_config, ConfgenConfig};
use ingress_confgen::directives::{validate_annotations, AnnotationSource, LbDialect, StringMap};
use ingress_confgen::observability::logging;
use ingress_confgen::template::{Slot, TemplateExecutor};

#[derive(Parser)]
#[command(name = "ingress-confgen")]
#[command(about = "Validate routing annotations and render proxy configuration", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check annotations against the known directive grammars
    Validate {
        /// Flat TOML table of annotation key = "value"
        #[arg(short, long)]
        annotations: PathBuf,

        #[arg(long, default_value = "Ingress")]
        kind: String,

        #[arg(long, default_value = "default")]
        namespace: String,

        #[arg(long, default_value = "unnamed")]
        name: String,

        /// Accept the extended load-balancing dialect
        #[arg(long)]
        extended: bool,
    },
    /// Render a JSON config model through one of the templates
    Render {
        #[arg(short, long, value_enum, default_value_t = Target::PerObject)]
        target: Target,

        /// JSON file holding the config model
        #[arg(short, long)]
        model: PathBuf,

        /// Replacement template for the target slot
        #[arg(long)]
        template: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Main,
    PerObject,
}

impl From<Target> for Slot {
    fn from(target: Target) -> Self {
        match target {
            Target::Main => Slot::Main,
            Target::PerObject => Slot::PerObject,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ConfgenConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Validate {
            annotations,
            kind,
            namespace,
            name,
            extended,
        } => {
            let dialect = if extended {
                LbDialect::Extended
            } else {
                config.directives.lb_dialect()
            };
            let source = AnnotationSource::new(kind.as_str(), namespace, name);
            run_validate(&annotations, &source, dialect)
        }
        Commands::Render {
            target,
            model,
            template,
        } => run_render(&config, target.into(), &model, template.as_deref()).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every known annotation passed.
fn run_validate(
    path: &Path,
    source: &AnnotationSource,
    dialect: LbDialect,
) -> Result<bool, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    let annotations: StringMap = toml::from_str(&content)?;

    let errors = validate_annotations(&annotations, source, dialect);
    for err in &errors {
        tracing::warn!(key = %err.key, "{}", err);
        println!("{}", err);
    }

    tracing::info!(
        resource = %source,
        checked = annotations.len(),
        rejected = errors.len(),
        "Annotations validated"
    );
    Ok(errors.is_empty())
}

fn run_render(
    config: &ConfgenConfig,
    slot: Slot,
    model_path: &Path,
    template: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let executor = TemplateExecutor::from_files(
        Path::new(&config.templates.main),
        Path::new(&config.templates.per_object),
    )?;

    if let Some(path) = template {
        let source = std::fs::read_to_string(path)?;
        if let Err(e) = executor.update(slot, &source) {
            tracing::warn!(
                template = %path.display(),
                error = %e,
                "Replacement template rejected, rendering with the original"
            );
        }
    }

    let model: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(model_path)?)?;
    let output = executor.render(slot, &model)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ingress-confgen",
            "render",
            "--config",
            "demos/confgen.toml",
            "--target",
            "main",
            "--model",
            "demos/main-model.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("demos/confgen.toml")));
        assert!(matches!(cli.command, Commands::Render { target: Target::Main, .. }));
    }

    #[test]
    fn test_config_flag_before_subcommand() {
        let cli = Cli::try_parse_from([
            "ingress-confgen",
            "-c",
            "demos/confgen.toml",
            "validate",
            "--annotations",
            "demos/annotations.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("demos/confgen.toml")));
        assert!(matches!(cli.command, Commands::Validate { extended: false, .. }));
    }
}
