use std::collections::HashSet;

use modelgen_core::lang::{primitives, rust_keywords};
use modelgen_core::naming;

#[test]
fn primitive_spellings_unique_and_resolvable() {
    let mut seen: HashSet<&'static str> = HashSet::new();

    for info in primitives::PRIMITIVES {
        assert_eq!(
            primitives::from_str(info.canonical),
            Some(info.id),
            "primitive canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(primitives::as_str(info.id), info.canonical);
        assert!(
            seen.insert(info.canonical),
            "duplicate primitive spelling {:?}",
            info.canonical
        );
    }
}

#[test]
fn rust_keywords_unique() {
    let mut seen: HashSet<&'static str> = HashSet::new();
    for kw in rust_keywords::RUST_KEYWORDS {
        assert!(seen.insert(kw), "duplicate keyword {:?}", kw);
    }
}

#[test]
fn every_keyword_is_escaped_by_every_sanitizer() {
    for kw in rust_keywords::RUST_KEYWORDS {
        let member = naming::sanitize(kw);
        assert!(!rust_keywords::is_reserved(&member), "{kw} -> {member}");

        let ty = naming::type_ident(kw);
        assert!(!rust_keywords::is_reserved(&ty), "{kw} -> {ty}");
    }
}

#[test]
fn primitive_keywords_are_not_rust_keywords() {
    for info in primitives::PRIMITIVES {
        assert!(!rust_keywords::is_keyword(info.canonical));
    }
}
