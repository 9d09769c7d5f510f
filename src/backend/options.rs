//! Generation options.
//!
//! One immutable value per run, passed by reference to every emitter. The output sink is not part of
//! it; sinks are handed to [`crate::backend::RustGenerator::generate`] separately.

use std::collections::BTreeSet;

use modelgen_core::lang::rust_keywords::{RESERVED_IDENTS, RUST_KEYWORDS};

/// Wire format of date-time values: ISO-8601 with exactly three fractional digits, always UTC.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Names that can never be emitted as an identifier verbatim
    pub reserved_words: BTreeSet<String>,
    /// chrono format string used by the date-time hooks in the utility unit
    pub datetime_format: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            reserved_words: RUST_KEYWORDS
                .iter()
                .chain(RESERVED_IDENTS)
                .map(|w| w.to_string())
                .collect(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date-time wire format
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Reserve one more identifier
    pub fn with_reserved_word(mut self, word: impl Into<String>) -> Self {
        self.reserved_words.insert(word.into());
        self
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(name)
    }
}
