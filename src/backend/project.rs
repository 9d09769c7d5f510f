//! Project output - writes generated units into an output directory
//!
//! Layout of a generated directory:
//! - `mod.rs` listing one module per namespace plus `utils`
//! - `utils.rs` with the date-time (de)serialization hooks
//! - one `<module>.rs` per namespace
//!
//! Units import each other through `crate::<module>::*` and `crate::utils::*`, so they must be mounted
//! at the crate root: declare `pub mod <module>;` and `pub mod utils;` in `lib.rs` (the lines of the
//! generated `mod.rs`), with the directory as `src/` or the modules pulled in through `#[path]`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::errors::SinkError;
use super::sink::{OutputSink, UnitBuffer};

/// Sink writing each sealed unit to `<output_dir>/<unit name>`
#[derive(Debug)]
pub struct FileSink {
    /// Output directory for the generated files
    output_dir: PathBuf,
    /// Unit being written; flushed to disk on close
    buffer: UnitBuffer,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            buffer: UnitBuffer::default(),
            written: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Paths written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Remove every file and directory below the output directory, creating it if missing.
    pub fn clear(&self) -> io::Result<()> {
        if !self.output_dir.exists() {
            return fs::create_dir_all(&self.output_dir);
        }
        for entry in fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        tracing::debug!(dir = %self.output_dir.display(), "cleared output directory");
        Ok(())
    }
}

impl OutputSink for FileSink {
    fn open_unit(&mut self, name: &str) -> Result<(), SinkError> {
        self.buffer.open(name)
    }

    fn write_line(&mut self, indent: usize, text: &str) -> Result<(), SinkError> {
        self.buffer.write(indent, text)
    }

    fn close_unit(&mut self) -> Result<(), SinkError> {
        let unit = self.buffer.take()?;
        let path = self.output_dir.join(&unit.name);
        let io_err = |source| SinkError::Io {
            unit: unit.name.clone(),
            source,
        };
        fs::create_dir_all(&self.output_dir).map_err(io_err)?;
        fs::write(&path, unit.text()).map_err(io_err)?;
        tracing::debug!(path = %path.display(), lines = unit.lines.len(), "wrote unit");
        self.written.push(path);
        Ok(())
    }

    fn abandon_unit(&mut self) {
        self.buffer.discard();
    }
}
