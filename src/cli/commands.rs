//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};
use std::path::Path;

use crate::backend::{FileSink, GeneratorOptions, MemorySink, generate};
use crate::frontend::loader;
use crate::frontend::model::ModelGraph;

use super::{CliError, CliResult, ExitCode};

/// Render a library error as a miette report.
fn report<E>(err: E) -> CliError
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

fn load(model: &Path) -> CliResult<ModelGraph> {
    loader::load_path(model).map_err(report)
}

/// Refuse to clear an output directory that holds the model source.
fn ensure_model_outside(model: &Path, output_dir: &Path) -> CliResult<()> {
    // Either path missing means nothing of the model can be cleared.
    let (Ok(model_abs), Ok(output_abs)) = (model.canonicalize(), output_dir.canonicalize()) else {
        return Ok(());
    };
    if model_abs.starts_with(&output_abs) {
        return Err(CliError::failure(format!(
            "Refusing to clear output directory '{}': it contains the model source '{}' (use --no-clean or another directory)",
            output_dir.display(),
            model.display()
        )));
    }
    Ok(())
}

/// Generate the model into `output_dir`, clearing it first unless `clean` is false.
///
/// Fails before touching anything when clearing would delete the model itself.
pub fn generate_dir(model: &Path, output_dir: &Path, clean: bool) -> CliResult<ExitCode> {
    if clean {
        ensure_model_outside(model, output_dir)?;
    }
    let graph = load(model)?;

    let mut sink = FileSink::new(output_dir);
    if clean {
        sink.clear().map_err(|e| {
            CliError::failure(format!("Error clearing output directory '{}': {}", output_dir.display(), e))
        })?;
    }
    generate(&graph, &GeneratorOptions::default(), &mut sink).map_err(report)?;

    tracing::info!(
        files = sink.written().len(),
        dir = %output_dir.display(),
        "wrote generated sources"
    );
    Ok(ExitCode::SUCCESS)
}

/// Generate the model and print every unit to stdout instead of writing files.
pub fn emit_stdout(model: &Path) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit_units(model, &mut out)
}

/// Generate the model and write every unit to `out`, each under a `// ==> <unit>` header.
pub fn emit_units(model: &Path, out: &mut impl Write) -> CliResult<ExitCode> {
    let graph = load(model)?;
    let mut sink = MemorySink::new();
    generate(&graph, &GeneratorOptions::default(), &mut sink).map_err(report)?;

    for unit in sink.units() {
        write!(out, "// ==> {}\n{}", unit.name, unit.text())
            .map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    }
    Ok(ExitCode::SUCCESS)
}
