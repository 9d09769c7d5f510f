//! Output sinks: where generated units go.
//!
//! A sink holds at most one open unit. Emitters never call the sink directly; they go through a
//! [`UnitGuard`], which seals the unit on success and abandons it on every other exit path (early
//! `?` returns and panics included), so no unit stays open once control leaves the emitter.

use super::errors::SinkError;

/// Spaces per indentation level in every sink.
pub const INDENT: &str = "    ";

/// Downstream collaborator receiving generated text.
pub trait OutputSink {
    /// Begin a new named unit. Fails if a unit is already open.
    fn open_unit(&mut self, name: &str) -> Result<(), SinkError>;

    /// Append one line at `indent` levels to the open unit.
    fn write_line(&mut self, indent: usize, text: &str) -> Result<(), SinkError>;

    /// Seal the open unit. Fails if no unit is open.
    fn close_unit(&mut self) -> Result<(), SinkError>;

    /// Close the open unit without publishing it. No-op when nothing is open.
    fn abandon_unit(&mut self);
}

/// Render one line the way every sink stores it.
pub fn render_line(indent: usize, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut line = INDENT.repeat(indent);
    line.push_str(text);
    line
}

/// Scoped handle on an open unit.
pub struct UnitGuard<'s> {
    sink: &'s mut dyn OutputSink,
    name: String,
    sealed: bool,
}

impl<'s> UnitGuard<'s> {
    pub fn open(sink: &'s mut dyn OutputSink, name: &str) -> Result<Self, SinkError> {
        sink.open_unit(name)?;
        tracing::debug!(unit = name, "opened unit");
        Ok(Self {
            sink,
            name: name.to_string(),
            sealed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write_line(&mut self, indent: usize, text: &str) -> Result<(), SinkError> {
        self.sink.write_line(indent, text)
    }

    /// Seal the unit, consuming the guard.
    pub fn seal(mut self) -> Result<(), SinkError> {
        self.sealed = true;
        self.sink.close_unit()?;
        tracing::debug!(unit = %self.name, "sealed unit");
        Ok(())
    }
}

impl Drop for UnitGuard<'_> {
    fn drop(&mut self) {
        if !self.sealed {
            tracing::debug!(unit = %self.name, "abandoned unit");
            self.sink.abandon_unit();
        }
    }
}

/// A sealed unit held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub lines: Vec<String>,
}

impl Unit {
    /// The unit as file contents: lines joined by `\n`, with a trailing newline.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// The single open unit of a sink, shared bookkeeping for every [`OutputSink`] implementation.
#[derive(Debug, Default)]
pub struct UnitBuffer {
    open: Option<Unit>,
}

impl UnitBuffer {
    /// Start `name`. Fails if another unit is open.
    pub fn open(&mut self, name: &str) -> Result<(), SinkError> {
        if let Some(open) = &self.open {
            return Err(SinkError::UnitAlreadyOpen {
                open: open.name.clone(),
                requested: name.to_string(),
            });
        }
        self.open = Some(Unit {
            name: name.to_string(),
            lines: Vec::new(),
        });
        Ok(())
    }

    pub fn write(&mut self, indent: usize, text: &str) -> Result<(), SinkError> {
        let unit = self.open.as_mut().ok_or(SinkError::NoOpenUnit)?;
        unit.lines.push(render_line(indent, text));
        Ok(())
    }

    /// Take the open unit out of the buffer, leaving it empty.
    pub fn take(&mut self) -> Result<Unit, SinkError> {
        self.open.take().ok_or(SinkError::NoOpenUnit)
    }

    pub fn discard(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Sink that keeps sealed units in memory, in the order they were opened.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: UnitBuffer,
    units: Vec<Unit>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sealed units.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn into_units(self) -> Vec<Unit> {
        self.units
    }

    /// Whether a unit is currently open.
    pub fn is_open(&self) -> bool {
        self.buffer.is_open()
    }
}

impl OutputSink for MemorySink {
    fn open_unit(&mut self, name: &str) -> Result<(), SinkError> {
        self.buffer.open(name)
    }

    fn write_line(&mut self, indent: usize, text: &str) -> Result<(), SinkError> {
        self.buffer.write(indent, text)
    }

    fn close_unit(&mut self) -> Result<(), SinkError> {
        let unit = self.buffer.take()?;
        self.units.push(unit);
        Ok(())
    }

    fn abandon_unit(&mut self) {
        self.buffer.discard();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_lifecycle() {
        let mut sink = MemorySink::new();
        sink.open_unit("a.rs").unwrap();
        sink.write_line(0, "struct A {").unwrap();
        sink.write_line(1, "x: i64,").unwrap();
        sink.write_line(3, "").unwrap();
        sink.write_line(0, "}").unwrap();
        sink.close_unit().unwrap();

        let unit = sink.unit("a.rs").unwrap();
        assert_eq!(unit.text(), "struct A {\n    x: i64,\n\n}\n");
    }

    #[test]
    fn test_second_open_fails() {
        let mut sink = MemorySink::new();
        sink.open_unit("a.rs").unwrap();
        match sink.open_unit("b.rs") {
            Err(SinkError::UnitAlreadyOpen { open, requested }) => {
                assert_eq!(open, "a.rs");
                assert_eq!(requested, "b.rs");
            }
            other => panic!("expected UnitAlreadyOpen, got {:?}", other),
        }
    }

    #[test]
    fn test_write_and_close_without_open_fail() {
        let mut sink = MemorySink::new();
        assert!(matches!(sink.write_line(0, "x"), Err(SinkError::NoOpenUnit)));
        assert!(matches!(sink.close_unit(), Err(SinkError::NoOpenUnit)));
    }

    #[test]
    fn test_unit_buffer_take_empties_it() {
        let mut buffer = UnitBuffer::default();
        buffer.open("a.rs").unwrap();
        buffer.write(1, "x").unwrap();
        let unit = buffer.take().unwrap();
        assert_eq!(unit.lines, vec!["    x".to_string()]);
        assert!(!buffer.is_open());
        assert!(matches!(buffer.take(), Err(SinkError::NoOpenUnit)));

        buffer.open("b.rs").unwrap();
        buffer.discard();
        assert!(matches!(buffer.write(0, "y"), Err(SinkError::NoOpenUnit)));
    }

    #[test]
    fn test_guard_seals_on_success() {
        let mut sink = MemorySink::new();
        {
            let mut guard = UnitGuard::open(&mut sink, "ok.rs").unwrap();
            guard.write_line(0, "// ok").unwrap();
            guard.seal().unwrap();
        }
        assert!(!sink.is_open());
        assert_eq!(sink.units().len(), 1);
    }

    #[test]
    fn test_guard_abandons_on_early_exit() {
        fn fails(sink: &mut dyn OutputSink) -> Result<(), SinkError> {
            let mut guard = UnitGuard::open(sink, "broken.rs")?;
            guard.write_line(0, "// partial")?;
            Err(SinkError::NoOpenUnit)
        }

        let mut sink = MemorySink::new();
        assert!(fails(&mut sink).is_err());
        assert!(!sink.is_open());
        assert!(sink.unit("broken.rs").is_none());
        // The sink is usable again.
        sink.open_unit("next.rs").unwrap();
    }
}
