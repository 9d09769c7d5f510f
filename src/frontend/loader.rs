//! Load the JSON metamodel form of a model set into a [`ModelGraph`].
//!
//! The upstream parser serializes every node with a `$class` tag such as
//! `concerto.metamodel@1.0.0.ConceptDeclaration`. Only the suffix after the last `.` selects the node
//! kind, so any metamodel version is accepted.
//!
//! Accepted inputs:
//! - a file holding one `Model` or a `Models` wrapper (`{"models": [...]}`),
//! - a directory whose `*.json` files are loaded in file-name order.
//!
//! Nothing here validates model semantics. Structural surprises (unknown node kinds, missing keys,
//! a namespace defined twice) are reported as [`LoadError`] and abort the load.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use modelgen_core::lang::primitives::PrimitiveId;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::model::{
    ClassDeclaration, ClassFlavor, Declaration, DeclarationKind, Decorator, DecoratorLiteral, EnumDeclaration, Import,
    ModelGraph, Namespace, Property, PropertyKind, ScalarDeclaration, TypeRef,
};

/// Errors raised while turning metamodel JSON into a graph.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("cannot read model source '{}'", .path.display())]
    #[diagnostic(code(modelgen::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metamodel JSON in {origin}")]
    #[diagnostic(code(modelgen::load::json), help("the input must be the JSON form of a model, not model source text"))]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognized {role} node kind `{kind}`: {inspection}")]
    #[diagnostic(code(modelgen::load::unrecognized_node))]
    UnrecognizedNode {
        role: &'static str,
        kind: String,
        inspection: String,
    },

    #[error("namespace `{0}` is defined more than once")]
    #[diagnostic(code(modelgen::load::duplicate_namespace))]
    DuplicateNamespace(String),

    #[error("no metamodel JSON files found in '{}'", .0.display())]
    #[diagnostic(code(modelgen::load::empty), help("model directories are scanned for `*.json` files"))]
    NoModels(PathBuf),
}

// ============================================================================
// Raw metamodel shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawModels {
    models: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    namespace: String,
    #[serde(default)]
    imports: Vec<Value>,
    #[serde(default)]
    declarations: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawTypeIdentifier {
    name: String,
    namespace: Option<String>,
}

impl From<RawTypeIdentifier> for TypeRef {
    fn from(raw: RawTypeIdentifier) -> Self {
        TypeRef {
            name: raw.name,
            namespace: raw.namespace,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClassDeclaration {
    name: String,
    #[serde(default)]
    is_abstract: bool,
    super_type: Option<RawTypeIdentifier>,
    #[serde(default)]
    properties: Vec<Value>,
    #[serde(default)]
    decorators: Vec<RawDecorator>,
}

#[derive(Debug, Deserialize)]
struct RawEnumDeclaration {
    name: String,
    #[serde(default)]
    properties: Vec<Value>,
    #[serde(default)]
    decorators: Vec<RawDecorator>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScalarDeclaration {
    name: String,
    default_value: Option<Value>,
    #[serde(default)]
    decorators: Vec<RawDecorator>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperty {
    name: String,
    #[serde(default)]
    is_array: bool,
    #[serde(default)]
    is_optional: bool,
    #[serde(rename = "type")]
    type_id: Option<RawTypeIdentifier>,
    #[serde(default)]
    decorators: Vec<RawDecorator>,
}

#[derive(Debug, Deserialize)]
struct RawDecorator {
    name: String,
    #[serde(default)]
    arguments: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawImport {
    namespace: String,
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLiteral<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeReferenceArg {
    #[serde(rename = "type")]
    type_id: RawTypeIdentifier,
    #[serde(default)]
    is_array: bool,
}

// ============================================================================
// Entry points
// ============================================================================

/// Load a model file, or every `*.json` file of a directory.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_path(path: &Path) -> Result<ModelGraph, LoadError> {
    let files = if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(LoadError::NoModels(path.to_path_buf()));
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut namespaces = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file).map_err(|source| LoadError::Io {
            path: file.clone(),
            source,
        })?;
        namespaces.extend(parse_namespaces(&text, &file.display().to_string())?);
    }
    tracing::debug!(files = files.len(), namespaces = namespaces.len(), "loaded model source");
    build_graph(namespaces)
}

/// Load a graph from one JSON document.
pub fn load_str(json: &str) -> Result<ModelGraph, LoadError> {
    build_graph(parse_namespaces(json, "<string>")?)
}

fn build_graph(namespaces: Vec<Namespace>) -> Result<ModelGraph, LoadError> {
    let mut seen = HashSet::new();
    for ns in &namespaces {
        if !seen.insert(ns.name.as_str()) {
            return Err(LoadError::DuplicateNamespace(ns.name.clone()));
        }
    }
    Ok(ModelGraph::new(namespaces))
}

fn parse_namespaces(json: &str, origin: &str) -> Result<Vec<Namespace>, LoadError> {
    let root: Value = serde_json::from_str(json).map_err(|source| LoadError::Json {
        origin: origin.to_string(),
        source,
    })?;

    let kind = node_kind(&root, "root")?.to_string();
    match kind.as_str() {
        "Models" => {
            let models: RawModels = decode(root, origin)?;
            models.models.into_iter().map(|m| convert_model(m, origin)).collect()
        }
        "Model" => Ok(vec![convert_model(root, origin)?]),
        other => Err(unrecognized("root", other, &root)),
    }
}

// ============================================================================
// Node conversion
// ============================================================================

fn convert_model(node: Value, origin: &str) -> Result<Namespace, LoadError> {
    let raw: RawModel = decode(node, origin)?;
    let mut ns = Namespace::new(raw.namespace);

    for import in raw.imports {
        ns.imports.push(convert_import(import, origin)?);
    }
    for decl in raw.declarations {
        let decl = convert_declaration(decl, &ns.name, origin)?;
        ns.declarations.push(decl);
    }
    Ok(ns)
}

fn convert_import(node: Value, origin: &str) -> Result<Import, LoadError> {
    let kind = node_kind(&node, "import")?.to_string();
    let inspection = node.to_string();
    let raw: RawImport = decode(node, origin)?;
    match kind.as_str() {
        "ImportType" => match raw.name {
            Some(name) => Ok(Import::Type {
                namespace: raw.namespace,
                name,
            }),
            None => Err(LoadError::UnrecognizedNode {
                role: "import",
                kind,
                inspection,
            }),
        },
        "ImportTypes" => Ok(Import::Types {
            namespace: raw.namespace,
            names: raw.types,
        }),
        "ImportAll" => Ok(Import::All {
            namespace: raw.namespace,
        }),
        _ => Err(LoadError::UnrecognizedNode {
            role: "import",
            kind,
            inspection,
        }),
    }
}

fn convert_declaration(node: Value, namespace: &str, origin: &str) -> Result<Declaration, LoadError> {
    let kind = node_kind(&node, "declaration")?.to_string();

    let flavor = match kind.as_str() {
        "ConceptDeclaration" => Some(ClassFlavor::Concept),
        "AssetDeclaration" => Some(ClassFlavor::Asset),
        "ParticipantDeclaration" => Some(ClassFlavor::Participant),
        "TransactionDeclaration" => Some(ClassFlavor::Transaction),
        "EventDeclaration" => Some(ClassFlavor::Event),
        _ => None,
    };
    if let Some(flavor) = flavor {
        let raw: RawClassDeclaration = decode(node, origin)?;
        let properties = raw
            .properties
            .into_iter()
            .map(|p| convert_property(p, origin))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Declaration {
            name: raw.name,
            namespace: namespace.to_string(),
            decorators: convert_decorators(raw.decorators, origin)?,
            kind: DeclarationKind::Class(ClassDeclaration {
                flavor,
                is_abstract: raw.is_abstract,
                super_type: raw.super_type.map(TypeRef::from),
                properties,
            }),
        });
    }

    if kind == "EnumDeclaration" {
        let raw: RawEnumDeclaration = decode(node, origin)?;
        let mut values = Vec::with_capacity(raw.properties.len());
        for value in raw.properties {
            let value_kind = node_kind(&value, "enum value")?;
            if value_kind != "EnumProperty" {
                return Err(unrecognized("enum value", value_kind, &value));
            }
            let prop: RawProperty = decode(value, origin)?;
            values.push(Property {
                name: prop.name,
                kind: PropertyKind::EnumValue,
                type_ref: TypeRef::named(raw.name.clone()),
                is_array: false,
                is_optional: false,
                decorators: convert_decorators(prop.decorators, origin)?,
            });
        }
        return Ok(Declaration {
            name: raw.name,
            namespace: namespace.to_string(),
            decorators: convert_decorators(raw.decorators, origin)?,
            kind: DeclarationKind::Enum(EnumDeclaration { values }),
        });
    }

    let primitive = match kind.as_str() {
        "StringScalar" => PrimitiveId::String,
        "BooleanScalar" => PrimitiveId::Boolean,
        "IntegerScalar" => PrimitiveId::Integer,
        "LongScalar" => PrimitiveId::Long,
        "DoubleScalar" => PrimitiveId::Double,
        "DateTimeScalar" => PrimitiveId::DateTime,
        _ => return Err(unrecognized("declaration", &kind, &node)),
    };
    let raw: RawScalarDeclaration = decode(node, origin)?;
    Ok(Declaration {
        name: raw.name,
        namespace: namespace.to_string(),
        decorators: convert_decorators(raw.decorators, origin)?,
        kind: DeclarationKind::Scalar(ScalarDeclaration {
            primitive,
            default: raw.default_value.map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            }),
        }),
    })
}

fn convert_property(node: Value, origin: &str) -> Result<Property, LoadError> {
    let kind = node_kind(&node, "property")?.to_string();
    let primitive = match kind.as_str() {
        "StringProperty" => Some(PrimitiveId::String),
        "BooleanProperty" => Some(PrimitiveId::Boolean),
        "DateTimeProperty" => Some(PrimitiveId::DateTime),
        "DoubleProperty" => Some(PrimitiveId::Double),
        "IntegerProperty" => Some(PrimitiveId::Integer),
        "LongProperty" => Some(PrimitiveId::Long),
        "ObjectProperty" | "RelationshipProperty" => None,
        _ => return Err(unrecognized("property", &kind, &node)),
    };
    let inspection = node.to_string();
    let raw: RawProperty = decode(node, origin)?;

    let (property_kind, type_ref) = match (primitive, raw.type_id) {
        (Some(id), _) => (PropertyKind::Field, TypeRef::primitive(id)),
        (None, Some(type_id)) if kind == "RelationshipProperty" => (PropertyKind::Relationship, type_id.into()),
        (None, Some(type_id)) => (PropertyKind::Field, type_id.into()),
        (None, None) => {
            return Err(LoadError::UnrecognizedNode {
                role: "property",
                kind,
                inspection,
            });
        }
    };

    Ok(Property {
        name: raw.name,
        kind: property_kind,
        type_ref,
        is_array: raw.is_array,
        is_optional: raw.is_optional,
        decorators: convert_decorators(raw.decorators, origin)?,
    })
}

fn convert_decorators(raw: Vec<RawDecorator>, origin: &str) -> Result<Vec<Decorator>, LoadError> {
    raw.into_iter()
        .map(|d| {
            let arguments = d
                .arguments
                .into_iter()
                .map(|arg| convert_literal(arg, origin))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Decorator::new(d.name, arguments))
        })
        .collect()
}

fn convert_literal(node: Value, origin: &str) -> Result<DecoratorLiteral, LoadError> {
    let kind = node_kind(&node, "decorator argument")?.to_string();
    match kind.as_str() {
        "DecoratorString" => Ok(DecoratorLiteral::String(decode::<RawLiteral<String>>(node, origin)?.value)),
        "DecoratorNumber" => Ok(DecoratorLiteral::Number(decode::<RawLiteral<f64>>(node, origin)?.value)),
        "DecoratorBoolean" => Ok(DecoratorLiteral::Boolean(decode::<RawLiteral<bool>>(node, origin)?.value)),
        "DecoratorTypeReference" => {
            let raw: RawTypeReferenceArg = decode(node, origin)?;
            Ok(DecoratorLiteral::TypeReference {
                name: raw.type_id.name,
                is_array: raw.is_array,
            })
        }
        _ => Err(unrecognized("decorator argument", &kind, &node)),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// The node kind: the `$class` suffix after the last `.`.
fn node_kind<'v>(node: &'v Value, role: &'static str) -> Result<&'v str, LoadError> {
    node.get("$class")
        .and_then(Value::as_str)
        .and_then(|class| class.rsplit('.').next())
        .ok_or_else(|| unrecognized(role, "<missing $class>", node))
}

fn unrecognized(role: &'static str, kind: &str, node: &Value) -> LoadError {
    LoadError::UnrecognizedNode {
        role,
        kind: kind.to_string(),
        inspection: node.to_string(),
    }
}

fn decode<T: DeserializeOwned>(node: Value, origin: &str) -> Result<T, LoadError> {
    serde_json::from_value(node).map_err(|source| LoadError::Json {
        origin: origin.to_string(),
        source,
    })
}
