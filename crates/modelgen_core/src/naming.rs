//! Name sanitizers: model names → legal Rust identifiers.
//!
//! Three transliterations exist and they are deliberately kept apart:
//!
//! | Function | Used for | Example |
//! |---|---|---|
//! | [`sanitize`] | struct fields (members) | `firstName` → `first_name`, `$class` → `_class` |
//! | [`type_ident`] | struct/enum names and enum variants | `light-blue` → `light_blue`, case kept |
//! | [`module_name`] | namespace → module / file name | `org.acme@1.0.0` → `org_acme_1_0_0` |
//!
//! A namespace and a member can therefore map to different identifiers under different rules; callers
//! must not mix them.
//!
//! ## Examples
//! ```rust
//! use modelgen_core::naming;
//!
//! assert_eq!(naming::sanitize("firstName"), "first_name");
//! assert_eq!(naming::sanitize("type"), "type_");
//! assert_eq!(naming::module_name("org.acme@1.0.0"), "org_acme_1_0_0");
//! ```

use std::collections::HashMap;

use crate::lang::rust_keywords;

/// Sanitize a member name against the default Rust reserved-word set.
pub fn sanitize(raw: &str) -> String {
    sanitize_with(raw, rust_keywords::is_reserved)
}

/// Sanitize a member name into lower snake case.
///
/// Steps, in order:
/// 1. every char outside `[A-Za-z0-9_]` becomes `_`
/// 2. `_` is inserted before each uppercase letter not at position 0, and letters are lowercased
/// 3. a leading char that cannot start an identifier (digit, or nothing at all) gets a `_` prefix
/// 4. `_` is appended while the result is reserved
///
/// Total over all inputs, and `sanitize_with(sanitize_with(x)) == sanitize_with(x)`.
pub fn sanitize_with(raw: &str, is_reserved: impl Fn(&str) -> bool) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for (i, ch) in raw.chars().map(legal_or_underscore).enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    if !out.chars().next().is_some_and(is_ident_start) {
        out.insert(0, '_');
    }
    escape_reserved(out, is_reserved)
}

/// Escape a declaration or variant name, keeping its case.
pub fn type_ident(raw: &str) -> String {
    type_ident_with(raw, rust_keywords::is_reserved)
}

/// Escape a declaration or variant name against a caller-supplied reserved-word set.
pub fn type_ident_with(raw: &str, is_reserved: impl Fn(&str) -> bool) -> String {
    let mut out: String = raw.chars().map(legal_or_underscore).collect();
    if !out.chars().next().is_some_and(is_ident_start) {
        out.insert(0, '_');
    }
    escape_reserved(out, is_reserved)
}

/// Derive the module (and file stem) for a namespace: `@` and `.` both become `_`.
///
/// Nothing else is rewritten; namespaces are already validated upstream.
pub fn module_name(namespace: &str) -> String {
    namespace.replace(['@', '.'], "_")
}

/// Memoized member-name sanitizer for one generation run.
#[derive(Debug, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize `raw`, reusing the result of an earlier call with the same input.
    pub fn sanitize(&mut self, raw: &str, is_reserved: impl Fn(&str) -> bool) -> &str {
        self.names
            .entry(raw.to_string())
            .or_insert_with(|| sanitize_with(raw, is_reserved))
            .as_str()
    }

    /// Number of distinct inputs seen so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn legal_or_underscore(ch: char) -> char {
    if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn escape_reserved(mut name: String, is_reserved: impl Fn(&str) -> bool) -> String {
    while is_reserved(&name) {
        name.push('_');
    }
    name
}
