//! Declaration emission for code generation
//!
//! Handles emitting classes (records), enums and scalar aliases. Scalars produce no output; members
//! typed with a scalar are mapped through its primitive instead.

use std::collections::HashMap;

use modelgen_core::lang::primitives;

use crate::backend::errors::{GenerationError, SinkError};
use crate::backend::rust_emitter::RustEmitter;
use crate::frontend::model::{Declaration, DeclarationKind, Decorator, EnumDeclaration, MemberRef};

use super::RustGenerator;
use super::decorators::{extract_decorators, render_decorators};
use super::type_conv::{ResolvedType, SerdeHooks, hooks_for, map_type, resolve_type, wrap_type};

/// Member name of the discriminator field
pub const DISCRIMINATOR_FIELD: &str = "_class";
/// Wire key of the discriminator field
pub const DISCRIMINATOR_KEY: &str = "$class";
/// Properties with this name are never emitted as data members.
pub const IDENTIFIER_PROPERTY: &str = "identifier";

const DERIVES: &[&str] = &["Debug", "Clone", "Serialize", "Deserialize"];

/// One data member of a record, fully resolved.
struct FieldPlan<'g> {
    rename: &'g str,
    field: String,
    ty: String,
    optional: bool,
    hooks: Option<SerdeHooks>,
    decorators: &'g [Decorator],
}

impl<'g> RustGenerator<'g> {
    /// Emit a declaration
    pub(super) fn emit_declaration(
        &mut self,
        e: &mut RustEmitter<'_>,
        decl: &'g Declaration,
    ) -> Result<(), GenerationError> {
        match &decl.kind {
            DeclarationKind::Class(_) => self.emit_class(e, decl),
            DeclarationKind::Enum(en) => self.emit_enum(e, decl, en),
            DeclarationKind::Scalar(_) => {
                tracing::trace!(scalar = %decl.id(), "scalar alias, nothing emitted");
                Ok(())
            }
        }
    }

    /// Emit a record: discriminator first, then the full property list.
    fn emit_class(&mut self, e: &mut RustEmitter<'_>, decl: &'g Declaration) -> Result<(), GenerationError> {
        let name = self.type_name(&decl.name);
        let recursive = self.recursion.is_recursive(decl);
        if recursive {
            tracing::debug!(class = %decl.id(), "recursive class, members leading back are boxed");
        }

        let mut plans = vec![FieldPlan {
            rename: DISCRIMINATOR_KEY,
            field: DISCRIMINATOR_FIELD.to_string(),
            ty: "String".to_string(),
            optional: false,
            hooks: None,
            decorators: &[],
        }];
        let mut taken: HashMap<String, &str> = HashMap::from([(DISCRIMINATOR_FIELD.to_string(), DISCRIMINATOR_KEY)]);

        let graph = self.graph;
        for member in graph.properties(decl) {
            let property = member.property;
            if property.name == IDENTIFIER_PROPERTY {
                continue;
            }
            let field = self.member_name(&property.name);
            if let Some(first) = taken.insert(field.clone(), &property.name) {
                return Err(GenerationError::MemberCollision {
                    declaration: decl.fully_qualified_name(),
                    field,
                    first: first.to_string(),
                    second: property.name.clone(),
                });
            }
            let (ty, hooks) = self.member_type(decl, member, recursive);
            plans.push(FieldPlan {
                rename: &property.name,
                field,
                ty,
                optional: property.is_optional,
                hooks,
                decorators: &property.decorators,
            });
        }

        e.blank_line()?;
        emit_decorator_docs(e, &decl.decorators)?;
        e.derive(DERIVES)?;
        e.block::<SinkError, _>(&format!("pub struct {}", name), |e| {
            plans.iter().try_for_each(|plan| emit_field(e, plan))
        })?;
        e.blank_line()?;
        e.block::<SinkError, _>(&format!("impl {}", name), |e| {
            e.line(&format!("pub const CLASS: &str = {:?};", decl.fully_qualified_name()))
        })?;
        Ok(())
    }

    /// Rust type of one member of `owner`, plus the serde hooks it routes through.
    fn member_type(
        &self,
        owner: &'g Declaration,
        member: MemberRef<'g>,
        owner_is_recursive: bool,
    ) -> (String, Option<SerdeHooks>) {
        let property = member.property;
        let resolved = resolve_type(self.graph, &member.declared_in.namespace, property.kind, &property.type_ref);
        match resolved {
            ResolvedType::Primitive(id) => (
                map_type(primitives::as_str(id), property.is_array, property.is_optional),
                hooks_for(id, property.is_array, property.is_optional),
            ),
            ResolvedType::Declaration(target) => {
                let ty = self.type_name(&target.name);
                let boxed = owner_is_recursive
                    && !property.is_array
                    && target.is_class()
                    && self.recursion.leads_back(target, owner);
                let base = if boxed { format!("Box<{}>", ty) } else { ty };
                (wrap_type(base, property.is_array, property.is_optional), None)
            }
            ResolvedType::Unresolved(name) => (wrap_type(name.to_string(), property.is_array, property.is_optional), None),
        }
    }

    /// Emit a closed sum type with one unit variant per value.
    fn emit_enum(
        &mut self,
        e: &mut RustEmitter<'_>,
        decl: &'g Declaration,
        en: &'g EnumDeclaration,
    ) -> Result<(), GenerationError> {
        let name = self.type_name(&decl.name);

        let mut variants = Vec::with_capacity(en.values.len());
        let mut taken: HashMap<String, &str> = HashMap::new();
        for value in &en.values {
            let variant = self.type_name(&value.name);
            if let Some(first) = taken.insert(variant.clone(), &value.name) {
                return Err(GenerationError::MemberCollision {
                    declaration: decl.fully_qualified_name(),
                    field: variant,
                    first: first.to_string(),
                    second: value.name.clone(),
                });
            }
            variants.push((variant, value));
        }

        e.blank_line()?;
        emit_decorator_docs(e, &decl.decorators)?;
        e.derive(DERIVES)?;
        e.attribute("allow(non_camel_case_types)")?;
        e.block::<SinkError, _>(&format!("pub enum {}", name), |e| {
            for (variant, value) in &variants {
                emit_decorator_docs(e, &value.decorators)?;
                if *variant != value.name {
                    e.attribute(&format!("serde(rename = {:?})", value.name))?;
                }
                e.line(&format!("{},", variant))?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

/// Emit decorators as doc lines, if there are any.
fn emit_decorator_docs(e: &mut RustEmitter<'_>, decorators: &[Decorator]) -> Result<(), SinkError> {
    if let Some(map) = extract_decorators(decorators) {
        for text in render_decorators(&map) {
            e.doc_comment(&text)?;
        }
    }
    Ok(())
}

/// Emit one data member with its `#[serde(...)]` block.
fn emit_field(e: &mut RustEmitter<'_>, plan: &FieldPlan<'_>) -> Result<(), SinkError> {
    emit_decorator_docs(e, plan.decorators)?;
    e.line("#[serde(")?;
    e.indent();
    e.line(&format!("rename = {:?},", plan.rename))?;
    if plan.optional {
        e.line("skip_serializing_if = \"Option::is_none\",")?;
    }
    if let Some(hooks) = plan.hooks {
        e.line(&format!("serialize_with = {:?},", hooks.serialize_with))?;
        e.line(&format!("deserialize_with = {:?},", hooks.deserialize_with))?;
        if plan.optional {
            e.line("default,")?;
        }
    }
    e.dedent();
    e.line(")]")?;
    e.line(&format!("pub {}: {},", plan.field, plan.ty))
}
