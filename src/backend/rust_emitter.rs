//! Rust code emitter - writes Rust source lines into an open output unit
//!
//! The emitter tracks indentation and owns the [`UnitGuard`] of the unit it writes to. Dropping an
//! emitter without calling [`RustEmitter::finish`] abandons the unit.

use super::errors::SinkError;
use super::sink::{OutputSink, UnitGuard};

/// Indentation-aware line writer over one output unit
pub struct RustEmitter<'s> {
    unit: UnitGuard<'s>,
    indent_level: usize,
}

impl<'s> RustEmitter<'s> {
    /// Open `name` on `sink` and start writing at indent level 0.
    pub fn open(sink: &'s mut dyn OutputSink, name: &str) -> Result<Self, SinkError> {
        Ok(Self {
            unit: UnitGuard::open(sink, name)?,
            indent_level: 0,
        })
    }

    /// Name of the unit being written
    pub fn unit_name(&self) -> &str {
        self.unit.name()
    }

    /// Seal the unit
    pub fn finish(self) -> Result<(), SinkError> {
        self.unit.seal()
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) -> Result<(), SinkError> {
        self.unit.write_line(self.indent_level, s)
    }

    /// Write a line at an explicit indentation level, ignoring the current one
    pub fn line_at(&mut self, indent: usize, s: &str) -> Result<(), SinkError> {
        self.unit.write_line(indent, s)
    }

    /// Write a blank line
    pub fn blank_line(&mut self) -> Result<(), SinkError> {
        self.unit.write_line(0, "")
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<E, F>(&mut self, header: &str, f: F) -> Result<(), E>
    where
        E: From<SinkError>,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.line(&format!("{} {{", header))?;
        self.indent();
        f(self)?;
        self.dedent();
        self.line("}")?;
        Ok(())
    }

    /// Write a `#[derive(...)]` attribute
    pub fn derive(&mut self, derives: &[&str]) -> Result<(), SinkError> {
        if derives.is_empty() {
            return Ok(());
        }
        self.line(&format!("#[derive({})]", derives.join(", ")))
    }

    /// Write an outer attribute, `body` being the text between `#[` and `]`
    pub fn attribute(&mut self, body: &str) -> Result<(), SinkError> {
        self.line(&format!("#[{}]", body))
    }

    /// Write a use statement
    pub fn use_stmt(&mut self, path: &str) -> Result<(), SinkError> {
        self.line(&format!("use {};", path))
    }

    /// Write a doc comment
    pub fn doc_comment(&mut self, text: &str) -> Result<(), SinkError> {
        self.line(&format!("/// {}", text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::sink::MemorySink;

    #[test]
    fn test_emitter_struct() {
        let mut sink = MemorySink::new();
        let mut e = RustEmitter::open(&mut sink, "user.rs").unwrap();
        e.doc_comment("A user").unwrap();
        e.derive(&["Debug", "Clone"]).unwrap();
        e.block::<SinkError, _>("pub struct User", |e| {
            e.line("pub name: String,")?;
            e.line("pub age: i64,")
        })
        .unwrap();
        e.finish().unwrap();

        let code = sink.unit("user.rs").unwrap().text();
        assert_eq!(
            code,
            "/// A user\n#[derive(Debug, Clone)]\npub struct User {\n    pub name: String,\n    pub age: i64,\n}\n"
        );
    }

    #[test]
    fn test_blank_line_ignores_indent() {
        let mut sink = MemorySink::new();
        let mut e = RustEmitter::open(&mut sink, "x.rs").unwrap();
        e.indent();
        e.blank_line().unwrap();
        e.line_at(0, "fn f() {}").unwrap();
        e.dedent();
        e.dedent();
        e.use_stmt("crate::utils::*").unwrap();
        e.finish().unwrap();
        assert_eq!(sink.units()[0].lines, vec!["", "fn f() {}", "use crate::utils::*;"]);
    }

    #[test]
    fn test_dropped_emitter_abandons_unit() {
        let mut sink = MemorySink::new();
        {
            let mut e = RustEmitter::open(&mut sink, "lost.rs").unwrap();
            e.line("// never sealed").unwrap();
            assert_eq!(e.unit_name(), "lost.rs");
        }
        assert!(!sink.is_open());
        assert!(sink.units().is_empty());
    }
}
