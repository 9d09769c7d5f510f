//! Generator frontend
//!
//! This module contains everything upstream of code generation:
//! - `model`: the declaration graph and its resolution queries
//! - `loader`: JSON metamodel → declaration graph

pub mod loader;
pub mod model;
