//! Provide pure naming rules and canonical vocabulary for the modelgen code generator.
//!
//! This crate is intentionally small and dependency-free. It holds the deterministic pieces that every
//! emitter relies on:
//! - the Rust keyword table used for identifier escaping,
//! - the primitive-type registry of the modelling language (and its Rust spelling),
//! - the name sanitizers that turn model names into legal Rust identifiers and module names.
//!
//! ## Notes
//!
//! - **No IO**, no global state, and no model-graph types. Callers pass plain strings.

pub mod lang;
pub mod naming;
