//! Rust code generation from a model graph
//!
//! The generator walks the graph top-down and writes one unit at a time:
//!
//! ```text
//! ModelGraph → mod.rs (manifest) → utils.rs (date-time hooks) → <module>.rs per namespace
//! ```
//!
//! ## Module Organization
//!
//! - `mod.rs` - `RustGenerator` and the root emitter
//! - `namespace.rs` - one unit per namespace, imports included
//! - `declarations.rs` - class, enum and scalar emission
//! - `type_conv.rs` - model type → Rust type mapping
//! - `decorators.rs` - decorator extraction
//! - `recursion.rs` - reference cycle detection
//! - `utils.rs` - the shared utility unit

mod declarations;
pub mod decorators;
mod namespace;
pub mod recursion;
pub mod type_conv;
pub mod utils;

use std::collections::HashMap;

use modelgen_core::naming::{self, NameCache};

use crate::frontend::model::ModelGraph;

use self::recursion::RecursionDetector;
use self::utils::UTILS_MODULE;
use super::errors::GenerationError;
use super::options::GeneratorOptions;
use super::rust_emitter::RustEmitter;
use super::sink::OutputSink;

/// Name of the manifest unit
pub const MANIFEST_UNIT: &str = "mod.rs";

const RESERVED_MODULES: &[&str] = &[UTILS_MODULE, "mod"];

/// Rust code generator for one model graph
pub struct RustGenerator<'g> {
    graph: &'g ModelGraph,
    options: &'g GeneratorOptions,
    /// Member names, sanitized once per distinct input
    names: NameCache,
    recursion: RecursionDetector<'g>,
}

impl<'g> RustGenerator<'g> {
    pub fn new(graph: &'g ModelGraph, options: &'g GeneratorOptions) -> Self {
        Self {
            graph,
            options,
            names: NameCache::new(),
            recursion: RecursionDetector::new(graph),
        }
    }

    /// Generate every unit into `sink`. The first failure aborts the run.
    #[tracing::instrument(skip_all, fields(namespaces = self.graph.namespaces().len()))]
    pub fn generate(&mut self, sink: &mut dyn OutputSink) -> Result<(), GenerationError> {
        let modules = self.module_names()?;

        let mut manifest = RustEmitter::open(sink, MANIFEST_UNIT)?;
        for module in &modules {
            manifest.line(&format!("pub mod {};", module))?;
        }
        manifest.line(&format!("pub mod {};", UTILS_MODULE))?;
        manifest.finish()?;

        utils::emit_utils(sink, self.options)?;

        let graph = self.graph;
        for (ns, module) in graph.namespaces().iter().zip(&modules) {
            self.emit_namespace(sink, ns, module)?;
        }

        tracing::info!(
            units = modules.len() + 2,
            declarations = graph.declaration_count(),
            "generation complete"
        );
        Ok(())
    }

    /// Module name of every namespace, in enumeration order. Fails if two namespaces collide or one
    /// takes a reserved module name or a reserved word (`pub mod match;` does not parse).
    fn module_names(&self) -> Result<Vec<String>, GenerationError> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        let mut modules = Vec::with_capacity(self.graph.namespaces().len());
        for ns in self.graph.namespaces() {
            let module = naming::module_name(&ns.name);
            if RESERVED_MODULES.contains(&module.as_str()) || self.options.is_reserved(&module) {
                return Err(GenerationError::ReservedModule {
                    namespace: ns.name.clone(),
                    module,
                });
            }
            if let Some(first) = owners.insert(module.clone(), &ns.name) {
                return Err(GenerationError::ModuleCollision {
                    module,
                    first: first.to_string(),
                    second: ns.name.clone(),
                });
            }
            modules.push(module);
        }
        Ok(modules)
    }

    /// Sanitized member name
    fn member_name(&mut self, raw: &str) -> String {
        let options = self.options;
        self.names.sanitize(raw, |n| options.is_reserved(n)).to_string()
    }

    /// Escaped declaration or variant name
    fn type_name(&self, raw: &str) -> String {
        naming::type_ident_with(raw, |n| self.options.is_reserved(n))
    }
}

/// Generate `graph` into `sink` with `options`.
pub fn generate(graph: &ModelGraph, options: &GeneratorOptions, sink: &mut dyn OutputSink) -> Result<(), GenerationError> {
    RustGenerator::new(graph, options).generate(sink)
}
