//! Namespace unit emission.

use modelgen_core::naming;

use crate::backend::errors::GenerationError;
use crate::backend::rust_emitter::RustEmitter;
use crate::backend::sink::OutputSink;
use crate::frontend::model::Namespace;

use super::RustGenerator;
use super::utils::UTILS_MODULE;

impl<'g> RustGenerator<'g> {
    /// Emit `<module>.rs` for one namespace.
    pub(super) fn emit_namespace(
        &mut self,
        sink: &mut dyn OutputSink,
        ns: &'g Namespace,
        module: &str,
    ) -> Result<(), GenerationError> {
        let mut e = RustEmitter::open(sink, &format!("{}.rs", module))?;

        e.line("#![allow(unused_imports)]")?;
        e.use_stmt("serde::{ Deserialize, Serialize }")?;
        e.use_stmt("chrono::{ DateTime, TimeZone, Utc }")?;
        e.blank_line()?;
        for imported in imported_modules(ns) {
            e.use_stmt(&format!("crate::{}::*", imported))?;
        }
        e.use_stmt(&format!("crate::{}::*", UTILS_MODULE))?;

        for decl in &ns.declarations {
            self.emit_declaration(&mut e, decl)?;
        }

        tracing::debug!(namespace = %ns.name, declarations = ns.declarations.len(), "emitted namespace");
        e.finish()?;
        Ok(())
    }
}

/// Modules of the namespaces `ns` imports from, first-seen order, self-imports dropped.
pub(super) fn imported_modules(ns: &Namespace) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for import in &ns.imports {
        let owner = import.namespace();
        if owner != ns.name && !seen.contains(&owner) {
            seen.push(owner);
        }
    }
    seen.into_iter().map(naming::module_name).collect()
}
