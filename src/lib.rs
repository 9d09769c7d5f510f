#![forbid(unsafe_code)]
//! Model-to-Rust code generator
//!
//! Reads a set of namespaced model declarations and emits Rust source with serde annotations: one
//! module per namespace, a manifest listing them, and a shared date-time utility module.
//!
//! - `frontend`: the declaration graph and its JSON metamodel loader
//! - `backend`: type mapping, recursion detection, emitters and output sinks
//! - `cli`: the `modelgen` command line
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```rust
//! use modelgen::backend::{GeneratorOptions, MemorySink, generate};
//! use modelgen::frontend::model::{Declaration, ModelGraph, Namespace, Property, TypeRef};
//!
//! let graph = ModelGraph::new(vec![Namespace::new("org.acme").with_declaration(Declaration::class(
//!     "org.acme",
//!     "Person",
//!     vec![Property::field("name", TypeRef::named("String"))],
//! ))]);
//! let mut sink = MemorySink::new();
//! generate(&graph, &GeneratorOptions::default(), &mut sink).unwrap();
//! assert!(sink.unit("org_acme.rs").unwrap().text().contains("pub name: String,"));
//! ```

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod version;

pub use backend::{GenerationError, GeneratorOptions, RustGenerator, generate};
pub use frontend::loader::{LoadError, load_path, load_str};
pub use frontend::model::ModelGraph;
