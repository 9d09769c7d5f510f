//! Declaration graph consumed by the generator.
//!
//! The graph is produced upstream (see [`super::loader`]) and is read-only here. It owns every
//! namespace, in the order the upstream collaborator enumerated them, and answers the resolution
//! queries the emitters need:
//!
//! - [`ModelGraph::resolve`] maps a property or supertype reference to its declaration,
//! - [`ModelGraph::resolve_import`] finds the namespace an imported name belongs to,
//! - [`ModelGraph::properties`] returns the full (inherited + own) member list of a class.
//!
//! Node kinds are closed enums, so every consumer dispatches with an exhaustive `match`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use modelgen_core::lang::primitives::{self, PrimitiveId};

/// Identity of a declaration across the whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId {
    pub namespace: String,
    pub name: String,
}

impl DeclId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// A reference to a type by name, as written on a property or supertype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    /// Set when the upstream graph already resolved the owning namespace.
    pub namespace: Option<String>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    pub fn primitive(id: PrimitiveId) -> Self {
        Self::named(primitives::as_str(id))
    }

    /// The primitive this reference names, if any. Qualified references are never primitive.
    pub fn as_primitive(&self) -> Option<PrimitiveId> {
        match self.namespace {
            Some(_) => None,
            None => primitives::from_str(&self.name),
        }
    }
}

/// 2^53, the bound below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Literal argument of a decorator.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorLiteral {
    String(String),
    Number(f64),
    Boolean(bool),
    TypeReference { name: String, is_array: bool },
}

impl fmt::Display for DecoratorLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoratorLiteral::String(s) => write!(f, "{:?}", s),
            // Whole numbers print without `.0` while they are exactly representable.
            DecoratorLiteral::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => write!(f, "{}", *n as i64),
            DecoratorLiteral::Number(n) => write!(f, "{}", n),
            DecoratorLiteral::Boolean(b) => write!(f, "{}", b),
            DecoratorLiteral::TypeReference { name, is_array: true } => write!(f, "{}[]", name),
            DecoratorLiteral::TypeReference { name, is_array: false } => write!(f, "{}", name),
        }
    }
}

/// A named annotation with literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub name: String,
    pub arguments: Vec<DecoratorLiteral>,
}

impl Decorator {
    pub fn new(name: impl Into<String>, arguments: Vec<DecoratorLiteral>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Field,
    Relationship,
    EnumValue,
}

/// A named, typed member of a class or enum.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    pub type_ref: TypeRef,
    pub is_array: bool,
    pub is_optional: bool,
    pub decorators: Vec<Decorator>,
}

impl Property {
    pub fn field(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(name, PropertyKind::Field, type_ref)
    }

    pub fn relationship(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(name, PropertyKind::Relationship, type_ref)
    }

    /// An enum value; `owner` is the enum declaration's name.
    pub fn enum_value(name: impl Into<String>, owner: &str) -> Self {
        Self::new(name, PropertyKind::EnumValue, TypeRef::named(owner))
    }

    fn new(name: impl Into<String>, kind: PropertyKind, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind,
            type_ref,
            is_array: false,
            is_optional: false,
            decorators: Vec::new(),
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }
}

/// The modelling flavors of a class. They are all emitted as records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFlavor {
    Concept,
    Asset,
    Participant,
    Transaction,
    Event,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub flavor: ClassFlavor,
    pub is_abstract: bool,
    pub super_type: Option<TypeRef>,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    pub values: Vec<Property>,
}

/// A named alias for a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDeclaration {
    pub primitive: PrimitiveId,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    Class(ClassDeclaration),
    Enum(EnumDeclaration),
    Scalar(ScalarDeclaration),
}

/// A named model definition owned by one namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    /// Back-reference to the owning namespace.
    pub namespace: String,
    pub decorators: Vec<Decorator>,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn class(namespace: &str, name: &str, properties: Vec<Property>) -> Self {
        Self::new(
            namespace,
            name,
            DeclarationKind::Class(ClassDeclaration {
                flavor: ClassFlavor::Concept,
                is_abstract: false,
                super_type: None,
                properties,
            }),
        )
    }

    pub fn enumeration(namespace: &str, name: &str, values: &[&str]) -> Self {
        let values = values.iter().map(|v| Property::enum_value(*v, name)).collect();
        Self::new(namespace, name, DeclarationKind::Enum(EnumDeclaration { values }))
    }

    pub fn scalar(namespace: &str, name: &str, primitive: PrimitiveId) -> Self {
        Self::new(
            namespace,
            name,
            DeclarationKind::Scalar(ScalarDeclaration {
                primitive,
                default: None,
            }),
        )
    }

    pub fn new(namespace: &str, name: &str, kind: DeclarationKind) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            decorators: Vec::new(),
            kind,
        }
    }

    /// Set the supertype of a class. Has no effect on enums and scalars.
    pub fn extending(mut self, super_type: TypeRef) -> Self {
        if let DeclarationKind::Class(class) = &mut self.kind {
            class.super_type = Some(super_type);
        }
        self
    }

    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn id(&self) -> DeclId {
        DeclId::new(&self.namespace, &self.name)
    }

    /// `namespace.Name`, the value carried by the discriminator field.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match &self.kind {
            DeclarationKind::Class(class) => Some(class),
            DeclarationKind::Enum(_) | DeclarationKind::Scalar(_) => None,
        }
    }

    pub fn is_class(&self) -> bool {
        self.as_class().is_some()
    }

    /// Properties declared directly on this declaration (enum values for enums).
    pub fn own_properties(&self) -> &[Property] {
        match &self.kind {
            DeclarationKind::Class(class) => &class.properties,
            DeclarationKind::Enum(en) => &en.values,
            DeclarationKind::Scalar(_) => &[],
        }
    }
}

/// An import clause of a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    Type { namespace: String, name: String },
    Types { namespace: String, names: Vec<String> },
    All { namespace: String },
}

impl Import {
    pub fn namespace(&self) -> &str {
        match self {
            Import::Type { namespace, .. } | Import::Types { namespace, .. } | Import::All { namespace } => namespace,
        }
    }

    /// Whether this clause brings `type_name` into scope.
    pub fn covers(&self, type_name: &str) -> bool {
        match self {
            Import::Type { name, .. } => name == type_name,
            Import::Types { names, .. } => names.iter().any(|n| n == type_name),
            Import::All { .. } => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    /// Add a declaration; its namespace back-reference is rewritten to this namespace.
    pub fn with_declaration(mut self, mut declaration: Declaration) -> Self {
        declaration.namespace = self.name.clone();
        self.declarations.push(declaration);
        self
    }
}

/// A property together with the declaration that declares it.
///
/// Inherited properties keep pointing at their declaring supertype, so type names are resolved in
/// the namespace they were written in.
#[derive(Debug, Clone, Copy)]
pub struct MemberRef<'g> {
    pub declared_in: &'g Declaration,
    pub property: &'g Property,
}

/// The full declaration graph.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    namespaces: Vec<Namespace>,
    /// DeclId -> (namespace index, declaration index)
    index: HashMap<DeclId, (usize, usize)>,
}

impl ModelGraph {
    pub fn new(namespaces: Vec<Namespace>) -> Self {
        let mut index = HashMap::new();
        for (ns_idx, ns) in namespaces.iter().enumerate() {
            for (decl_idx, decl) in ns.declarations.iter().enumerate() {
                index
                    .entry(DeclId::new(&ns.name, &decl.name))
                    .or_insert((ns_idx, decl_idx));
            }
        }
        Self { namespaces, index }
    }

    /// All namespaces, in upstream enumeration order.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    pub fn declaration(&self, id: &DeclId) -> Option<&Declaration> {
        self.index
            .get(id)
            .map(|&(ns_idx, decl_idx)| &self.namespaces[ns_idx].declarations[decl_idx])
    }

    /// Total declaration count across all namespaces.
    pub fn declaration_count(&self) -> usize {
        self.index.len()
    }

    /// Find the namespace that supplies `type_name` to `from_namespace` through its imports.
    pub fn resolve_import(&self, from_namespace: &str, type_name: &str) -> Option<&str> {
        let ns = self.namespace(from_namespace)?;
        ns.imports
            .iter()
            .filter(|import| import.covers(type_name))
            .map(Import::namespace)
            .find(|candidate| self.index.contains_key(&DeclId::new(*candidate, type_name)))
    }

    /// Resolve a type reference written in `from_namespace`.
    ///
    /// Primitive keywords never resolve. Local declarations shadow imported ones.
    pub fn resolve(&self, from_namespace: &str, type_ref: &TypeRef) -> Option<&Declaration> {
        if let Some(ns) = &type_ref.namespace {
            return self.declaration(&DeclId::new(ns, &type_ref.name));
        }
        if primitives::is_primitive(&type_ref.name) {
            return None;
        }
        self.declaration(&DeclId::new(from_namespace, &type_ref.name)).or_else(|| {
            let owner = self.resolve_import(from_namespace, &type_ref.name)?;
            self.declaration(&DeclId::new(owner, &type_ref.name))
        })
    }

    /// Own properties of a declaration.
    pub fn own_properties<'g>(&self, decl: &'g Declaration) -> &'g [Property] {
        decl.own_properties()
    }

    /// Full property list of a declaration: root-most supertype first, then each subtype down to `decl`.
    ///
    /// Unresolvable supertypes end the chain. A cyclic chain is cut at the first repeat.
    pub fn properties<'g>(&'g self, decl: &'g Declaration) -> Vec<MemberRef<'g>> {
        let mut chain: Vec<&'g Declaration> = vec![decl];
        let mut seen: HashSet<DeclId> = HashSet::from([decl.id()]);
        let mut current = decl;
        while let Some(super_ref) = current.as_class().and_then(|class| class.super_type.as_ref()) {
            let Some(parent) = self.resolve(&current.namespace, super_ref) else {
                tracing::warn!(
                    declaration = %current.id(),
                    super_type = %super_ref.name,
                    "unresolved supertype, inherited properties skipped"
                );
                break;
            };
            if !seen.insert(parent.id()) {
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain
            .into_iter()
            .rev()
            .flat_map(|owner| {
                owner.own_properties().iter().map(move |property| MemberRef {
                    declared_in: owner,
                    property,
                })
            })
            .collect()
    }
}
