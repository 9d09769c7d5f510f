//! Type conversion utilities for code generation
//!
//! Maps model type names to Rust type expressions. Wrapping order is fixed: the base type is boxed
//! (when a member needs indirection), then wrapped in `Vec`, then in `Option`. An absent collection
//! is therefore `Option<Vec<T>>`, distinct from an empty one.

use modelgen_core::lang::primitives::{self, PrimitiveId};

use crate::frontend::model::{Declaration, DeclarationKind, ModelGraph, PropertyKind, TypeRef};

/// Map a model type name to a Rust type, applying array then optional wrapping.
///
/// Names that are not primitive keywords are passed through unchanged.
pub fn map_type(type_name: &str, is_array: bool, is_optional: bool) -> String {
    let base = match primitives::from_str(type_name) {
        Some(id) => primitives::rust_type(id).to_string(),
        None => type_name.to_string(),
    };
    wrap_type(base, is_array, is_optional)
}

/// Wrap an already-mapped base type.
pub fn wrap_type(base: String, is_array: bool, is_optional: bool) -> String {
    let ty = if is_array { format!("Vec<{}>", base) } else { base };
    if is_optional { format!("Option<{}>", ty) } else { ty }
}

/// Names of the (de)serialization functions a member routes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerdeHooks {
    pub serialize_with: &'static str,
    pub deserialize_with: &'static str,
}

pub const DATETIME_HOOKS: SerdeHooks = SerdeHooks {
    serialize_with: "serialize_datetime",
    deserialize_with: "deserialize_datetime",
};

pub const DATETIME_OPTION_HOOKS: SerdeHooks = SerdeHooks {
    serialize_with: "serialize_datetime_option",
    deserialize_with: "deserialize_datetime_option",
};

/// Hooks for a member of primitive type `id`, if it needs any.
///
/// Only scalar date-times are hooked; `Vec<DateTime<Utc>>` uses chrono's own serde support.
pub fn hooks_for(id: PrimitiveId, is_array: bool, is_optional: bool) -> Option<SerdeHooks> {
    match (id, is_array, is_optional) {
        (PrimitiveId::DateTime, false, true) => Some(DATETIME_OPTION_HOOKS),
        (PrimitiveId::DateTime, false, false) => Some(DATETIME_HOOKS),
        _ => None,
    }
}

/// What a member's declared type refers to.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedType<'g> {
    Primitive(PrimitiveId),
    /// A class or enum declaration
    Declaration(&'g Declaration),
    /// Nothing in the graph; emitted verbatim
    Unresolved(&'g str),
}

impl<'g> ResolvedType<'g> {
    /// The class this type refers to, if any.
    pub fn as_class(&self) -> Option<&'g Declaration> {
        match self {
            ResolvedType::Declaration(decl) if decl.is_class() => Some(decl),
            _ => None,
        }
    }
}

/// Resolve a member type written in `from_namespace`.
///
/// Fields map primitive keywords directly and see through scalar aliases. Relationships always
/// name a declaration, so no primitive mapping is applied to them.
pub fn resolve_type<'g>(
    graph: &'g ModelGraph,
    from_namespace: &str,
    kind: PropertyKind,
    type_ref: &'g TypeRef,
) -> ResolvedType<'g> {
    if kind == PropertyKind::Field {
        if let Some(id) = type_ref.as_primitive() {
            return ResolvedType::Primitive(id);
        }
    }
    match graph.resolve(from_namespace, type_ref) {
        Some(decl) => match &decl.kind {
            DeclarationKind::Scalar(scalar) if kind == PropertyKind::Field => ResolvedType::Primitive(scalar.primitive),
            DeclarationKind::Scalar(_) => ResolvedType::Unresolved(&type_ref.name),
            DeclarationKind::Class(_) | DeclarationKind::Enum(_) => ResolvedType::Declaration(decl),
        },
        None => ResolvedType::Unresolved(&type_ref.name),
    }
}
