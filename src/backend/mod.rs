//! Generator backend
//!
//! This module turns a model graph into Rust source units.
//!
//! The pipeline is:
//! 1. `ModelGraph` from the frontend → `RustGenerator` → units on an `OutputSink`
//! 2. The sink keeps units in memory (`MemorySink`) or writes them to a directory (`FileSink`)
//!
//! ## Module Organization
//!
//! - `codegen/` - Code generation from the model graph to Rust
//!   - `mod.rs` - Main RustGenerator struct and the root emitter
//!   - `namespace.rs` - Namespace unit emission and imports
//!   - `declarations.rs` - Class, enum and scalar emission
//!   - `type_conv.rs` - Type conversion utilities
//!   - `decorators.rs` - Decorator extraction
//!   - `recursion.rs` - Recursion detection
//!   - `utils.rs` - The shared date-time utility unit
//! - `rust_emitter.rs` - Low-level Rust line writer
//! - `sink.rs` - Output sink trait, unit guard and in-memory sink
//! - `project.rs` - Output directory writer
//! - `options.rs` - Generation options
//! - `errors.rs` - Sink and generation errors

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod codegen;
pub mod errors;
pub mod options;
pub mod project;
pub mod rust_emitter;
pub mod sink;

pub use codegen::{RustGenerator, generate};
pub use errors::{GenerationError, SinkError};
pub use options::GeneratorOptions;
pub use project::FileSink;
pub use sink::{MemorySink, OutputSink, Unit, UnitBuffer};
