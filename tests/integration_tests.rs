//! Integration tests for the model generator
//!
//! Loads the fixtures under `tests/fixtures/`, generates every unit and checks the output as parsed
//! Rust rather than as text.

use std::fs;
use std::path::Path;

use modelgen::backend::{FileSink, GeneratorOptions, MemorySink, generate};
use modelgen::frontend::model::{Declaration, ModelGraph, Namespace, Property, TypeRef};
use modelgen::{GenerationError, load_path};

/// Load a fixture and generate all of its units in memory.
fn generate_fixture(fixture: &str) -> MemorySink {
    let graph = load_path(&Path::new("tests/fixtures").join(fixture)).unwrap();
    let mut sink = MemorySink::new();
    generate(&graph, &GeneratorOptions::default(), &mut sink).unwrap();
    sink
}

fn parse_unit(sink: &MemorySink, name: &str) -> syn::File {
    let text = sink.unit(name).unwrap().text();
    syn::parse_file(&text).unwrap_or_else(|e| panic!("{} is not valid Rust: {}\n{}", name, e, text))
}

fn structs(file: &syn::File) -> Vec<&syn::ItemStruct> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Struct(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn field_names(item: &syn::ItemStruct) -> Vec<String> {
    item.fields
        .iter()
        .filter_map(|f| f.ident.as_ref().map(|i| i.to_string()))
        .collect()
}

fn field_type(item: &syn::ItemStruct, field: &str) -> String {
    let f = item
        .fields
        .iter()
        .find(|f| f.ident.as_ref().is_some_and(|i| i == field))
        .unwrap_or_else(|| panic!("{} has no field {}", item.ident, field));
    quote_type(&f.ty)
}

/// Render a type without whitespace, e.g. `Option<Box<Employee>>`.
fn quote_type(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(p) => p
            .path
            .segments
            .iter()
            .map(|seg| match &seg.arguments {
                syn::PathArguments::AngleBracketed(args) => {
                    let inner: Vec<String> = args
                        .args
                        .iter()
                        .filter_map(|a| match a {
                            syn::GenericArgument::Type(t) => Some(quote_type(t)),
                            _ => None,
                        })
                        .collect();
                    format!("{}<{}>", seg.ident, inner.join(","))
                }
                _ => seg.ident.to_string(),
            })
            .collect::<Vec<_>>()
            .join("::"),
        _ => panic!("unexpected type form"),
    }
}

fn find_struct<'f>(file: &'f syn::File, name: &str) -> &'f syn::ItemStruct {
    structs(file)
        .into_iter()
        .find(|s| s.ident == name)
        .unwrap_or_else(|| panic!("no struct {}", name))
}

#[test]
fn test_every_unit_is_valid_rust() {
    for fixture in ["person.json", "helloworld.json", "multi"] {
        let sink = generate_fixture(fixture);
        for unit in sink.units() {
            parse_unit(&sink, &unit.name);
        }
    }
}

#[test]
fn test_directory_units_follow_file_order() {
    let sink = generate_fixture("multi");
    let names: Vec<&str> = sink.units().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["mod.rs", "utils.rs", "org_base_1_0_0.rs", "org_acme.rs"]);
}

#[test]
fn test_discriminator_is_first_member_of_every_record() {
    let sink = generate_fixture("multi");
    for unit in ["org_base_1_0_0.rs", "org_acme.rs"] {
        let file = parse_unit(&sink, unit);
        for item in structs(&file) {
            assert_eq!(field_names(item).first().map(String::as_str), Some("_class"), "{}", item.ident);
        }
    }
}

#[test]
fn test_identifier_never_becomes_a_member() {
    let sink = generate_fixture("multi");
    for unit in ["org_base_1_0_0.rs", "org_acme.rs"] {
        let file = parse_unit(&sink, unit);
        for item in structs(&file) {
            assert!(!field_names(item).contains(&"identifier".to_string()), "{}", item.ident);
        }
    }
}

#[test]
fn test_inherited_members_precede_own_members() {
    let sink = generate_fixture("multi");
    let file = parse_unit(&sink, "org_acme.rs");
    let employee = find_struct(&file, "Employee");
    assert_eq!(
        field_names(employee),
        vec!["_class", "id", "name", "type_", "level", "scores", "address", "joined", "manager", "reports"]
    );
}

#[test]
fn test_member_types_across_namespaces() {
    let sink = generate_fixture("multi");
    let file = parse_unit(&sink, "org_acme.rs");
    let employee = find_struct(&file, "Employee");

    assert_eq!(field_type(employee, "scores"), "Option<Vec<f64>>");
    assert_eq!(field_type(employee, "address"), "Option<Address>");
    // Scalar alias of DateTime, imported from another namespace.
    assert_eq!(field_type(employee, "joined"), "DateTime<Utc>");
    // Self-reference through a single value is boxed, through a sequence it is not.
    assert_eq!(field_type(employee, "manager"), "Option<Box<Employee>>");
    assert_eq!(field_type(employee, "reports"), "Vec<Employee>");

    let promote = find_struct(&file, "Promote");
    assert_eq!(field_type(promote, "employee"), "Employee");
    assert_eq!(field_type(promote, "effective"), "Vec<DateTime<Utc>>");
}

#[test]
fn test_imports_reference_owning_modules() {
    let sink = generate_fixture("multi");
    let text = sink.unit("org_acme.rs").unwrap().text();
    assert_eq!(text.matches("use crate::org_base_1_0_0::*;").count(), 1);
    assert!(!text.contains("use crate::org_acme::*;"));
    assert!(text.contains("use crate::utils::*;"));
}

#[test]
fn test_scalars_produce_no_items() {
    let sink = generate_fixture("multi");
    let text = sink.unit("org_base_1_0_0.rs").unwrap().text();
    assert!(!text.contains("Timestamp"));
}

#[test]
fn test_generation_is_idempotent() {
    let first = generate_fixture("multi").into_units();
    let second = generate_fixture("multi").into_units();
    assert_eq!(first, second);
}

#[test]
fn test_file_sink_matches_memory_sink() {
    let graph = load_path(Path::new("tests/fixtures/multi")).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let mut files = FileSink::new(dir.path());
    files.clear().unwrap();
    generate(&graph, &GeneratorOptions::default(), &mut files).unwrap();
    assert_eq!(files.written().len(), 4);

    let mut memory = MemorySink::new();
    generate(&graph, &GeneratorOptions::default(), &mut memory).unwrap();
    for unit in memory.units() {
        let on_disk = fs::read_to_string(dir.path().join(&unit.name)).unwrap();
        assert_eq!(on_disk, unit.text(), "{}", unit.name);
    }
}

#[test]
fn test_custom_datetime_format_reaches_utils_unit() {
    let graph = load_path(Path::new("tests/fixtures/person.json")).unwrap();
    let options = GeneratorOptions::new().with_datetime_format("%Y-%m-%d %H:%M:%S");
    let mut sink = MemorySink::new();
    generate(&graph, &options, &mut sink).unwrap();

    let text = sink.unit("utils.rs").unwrap().text();
    assert!(text.contains("const DATETIME_FORMAT: &str = \"%Y-%m-%d %H:%M:%S\";"));
    syn::parse_file(&text).unwrap();
}

#[test]
fn test_extra_reserved_word_is_escaped() {
    let graph = load_path(Path::new("tests/fixtures/helloworld.json")).unwrap();
    let options = GeneratorOptions::new().with_reserved_word("input");
    let mut sink = MemorySink::new();
    generate(&graph, &options, &mut sink).unwrap();

    let file = parse_unit(&sink, "org_accordproject_helloworld.rs");
    assert_eq!(field_names(find_struct(&file, "MyRequest")), vec!["_class", "input_"]);
}

#[test]
fn test_member_collision_aborts_generation() {
    let ns = Namespace::new("org.acme").with_declaration(Declaration::class(
        "",
        "Clash",
        vec![
            Property::field("fooBar", TypeRef::named("String")),
            Property::field("foo_bar", TypeRef::named("String")),
        ],
    ));
    let graph = ModelGraph::new(vec![ns]);
    let mut sink = MemorySink::new();
    let err = generate(&graph, &GeneratorOptions::default(), &mut sink).unwrap_err();
    assert!(matches!(err, GenerationError::MemberCollision { ref field, .. } if field == "foo_bar"));
}

#[test]
fn test_missing_directory_models_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_path(dir.path()).unwrap_err();
    assert!(err.to_string().contains("no metamodel JSON files"));
}
