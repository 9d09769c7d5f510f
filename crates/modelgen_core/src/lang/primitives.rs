//! Primitive type vocabulary of the modelling language.
//!
//! Each primitive keyword has exactly one Rust spelling. Anything that is not in this registry is a
//! reference to a declaration and is left to the caller to resolve.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: `String` is a primitive, `string` is a reference.
//!
//! ## Examples
//! ```rust
//! use modelgen_core::lang::primitives::{self, PrimitiveId};
//!
//! assert_eq!(primitives::from_str("Boolean"), Some(PrimitiveId::Boolean));
//! assert_eq!(primitives::from_str("Person"), None);
//! assert_eq!(primitives::rust_type(PrimitiveId::DateTime), "DateTime<Utc>");
//! ```

/// Stable identifier for primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Boolean,
    Integer,
    Long,
    Double,
    DateTime,
    String,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub id: PrimitiveId,
    /// Keyword as written in the model.
    pub canonical: &'static str,
    /// Rust type expression the keyword maps to.
    pub rust: &'static str,
    pub description: &'static str,
}

/// Registry of primitive types.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    info(PrimitiveId::Boolean, "Boolean", "bool", "Boolean value."),
    info(PrimitiveId::Integer, "Integer", "i32", "32-bit signed integer."),
    info(PrimitiveId::Long, "Long", "i64", "64-bit signed integer."),
    info(PrimitiveId::Double, "Double", "f64", "Double-precision float."),
    info(
        PrimitiveId::DateTime,
        "DateTime",
        "DateTime<Utc>",
        "UTC timestamp, serialized with a fixed millisecond ISO-8601 profile.",
    ),
    info(PrimitiveId::String, "String", "String", "UTF-8 string."),
];

/// Resolve a model type keyword to a [`PrimitiveId`].
///
/// ## Returns
/// - `Some(PrimitiveId)` if the spelling is a primitive keyword.
/// - `None` otherwise (the name is a declaration reference).
pub fn from_str(name: &str) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.canonical == name).map(|p| p.id)
}

/// Return the model keyword for a primitive.
pub fn as_str(id: PrimitiveId) -> &'static str {
    lookup(id).canonical
}

/// Return the Rust type expression for a primitive.
pub fn rust_type(id: PrimitiveId) -> &'static str {
    lookup(id).rust
}

/// Return whether `name` is a primitive keyword.
pub fn is_primitive(name: &str) -> bool {
    from_str(name).is_some()
}

fn lookup(id: PrimitiveId) -> &'static PrimitiveInfo {
    match PRIMITIVES.iter().find(|p| p.id == id) {
        Some(info) => info,
        None => unreachable!("every PrimitiveId has a registry entry"),
    }
}

const fn info(id: PrimitiveId, canonical: &'static str, rust: &'static str, description: &'static str) -> PrimitiveInfo {
    PrimitiveInfo {
        id,
        canonical,
        rust,
        description,
    }
}
