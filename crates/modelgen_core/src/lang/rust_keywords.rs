//! Rust keyword vocabulary (for codegen identifier escaping).

/// Strict, reserved and edition-2024 keywords in Rust.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen", "self", "Self",
];

/// Names that are not keywords but still cannot stand alone as a field or variant name.
pub const RESERVED_IDENTS: &[&str] = &["_"];

/// Check whether an identifier is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Check whether an identifier is unusable as a plain Rust identifier (keyword or reserved).
pub fn is_reserved(name: &str) -> bool {
    is_keyword(name) || RESERVED_IDENTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_reserved() {
        assert!(is_reserved("type"));
        assert!(is_reserved("gen"));
        assert!(is_reserved("self"));
        assert!(is_reserved("_"));
        assert!(!is_reserved("name"));
        assert!(!is_reserved("type_"));
    }
}
