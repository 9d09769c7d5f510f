//! CLI module for the model generator
//!
//! This module provides the command-line interface.
//!
//! ## Usage
//!
//! - `modelgen <MODEL> <OUTPUT_DIR>` - clear `OUTPUT_DIR`, then generate into it
//! - `--no-clean` - keep whatever `OUTPUT_DIR` already contains
//! - `--emit` - print the generated units to stdout instead of writing files
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::ffi::OsString;
use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process;

use clap::Parser;

use crate::version::MODELGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate Rust/serde types from a model set
#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(version = MODELGEN_VERSION)]
#[command(about = "Generate Rust/serde types from a model set", long_about = None)]
pub struct Cli {
    /// Model file (JSON metamodel) or directory of model files
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Directory receiving the generated sources
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Keep prior contents of OUTPUT_DIR instead of clearing it
    #[arg(long)]
    pub no_clean: bool,

    /// Print generated units to stdout instead of writing files
    #[arg(long)]
    pub emit: bool,
}

/// Append a path separator to `dir` unless it already ends with one.
pub fn normalize_output_dir(dir: &Path) -> PathBuf {
    let mut raw: OsString = dir.as_os_str().to_owned();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR) {
        raw.push(MAIN_SEPARATOR.to_string());
    }
    PathBuf::from(raw)
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    // Usage errors exit with clap's status (2) from here.
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.emit {
        return commands::emit_stdout(&cli.model);
    }
    let output_dir = normalize_output_dir(&cli.output_dir);
    tracing::debug!(model = %cli.model.display(), output = %output_dir.display(), "generating");
    commands::generate_dir(&cli.model, &output_dir, !cli.no_clean)
}

// ============================================================================
// Tests
// ============================================================================
