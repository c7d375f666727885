use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::shape::TypeShape;

/// Keywords, reserved words, type names and unit suffixes that may not be used
/// as a local variable.
pub static RESERVED: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "address", "after", "assembly", "assert", "bool", "break", "byte",
        "bytes", "calldata", "catch", "constant", "constructor", "continue", "contract",
        "delete", "do", "else", "emit", "enum", "error", "event", "external", "fallback",
        "false", "for", "function", "if", "immutable", "import", "indexed", "int",
        "interface", "internal", "library", "mapping", "memory", "modifier", "new",
        "override", "payable", "pragma", "private", "public", "pure", "receive", "require",
        "return", "returns", "revert", "storage", "string", "struct", "super", "this",
        "true", "try", "type", "uint", "using", "var", "view", "virtual", "while",
        // reserved for future use
        "alias", "apply", "auto", "case", "copyof", "default", "define", "final",
        "implements", "in", "inline", "let", "macro", "match", "mutable", "null", "of",
        "partial", "promise", "reference", "relocatable", "sealed", "sizeof", "static",
        "supports", "switch", "typedef", "typeof", "unchecked",
        // ether and time units
        "wei", "gwei", "ether", "seconds", "minutes", "hours", "days", "weeks",
    ]
    .into_iter()
    .collect()
});

/// Name of the harness field holding the contract under test.
pub const TARGET: &str = "target";

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

/// Safe local name for a parameter; uniqueness is the scope's job.
pub fn local_identifier(declared: &str, descriptor: &str) -> String {
    declared_identifier(declared).unwrap_or_else(|| fallback_identifier(descriptor).to_string())
}

/// The declared name with one leading `_` stripped, if still usable.
pub fn declared_identifier(declared: &str) -> Option<String> {
    if declared.is_empty() || is_reserved(declared) {
        return None;
    }
    let stripped = declared.strip_prefix('_').unwrap_or(declared);
    if stripped.is_empty() || is_reserved(stripped) {
        return None;
    }
    Some(stripped.to_string())
}

pub fn fallback_identifier(descriptor: &str) -> &'static str {
    match TypeShape::parse(descriptor) {
        TypeShape::Address { .. } => "addr",
        TypeShape::Bool => "flag",
        TypeShape::String => "str",
        TypeShape::Bytes => "data",
        TypeShape::FixedBytes(_) => "bval",
        TypeShape::Integer { signed: false, .. } => "amount",
        TypeShape::Integer { signed: true, .. } => "val",
        _ => "arg",
    }
}

// ------------------------------ Per-function ------------------------------ //

/// Names already taken inside one generated test function.
#[derive(Debug, Clone)]
pub struct NameScope {
    taken: BTreeSet<String>,
}

impl NameScope {
    pub fn new() -> Self {
        let mut taken = BTreeSet::new();
        taken.insert(TARGET.to_string());
        Self { taken }
    }

    /// Reserve `base`, or `base1`, `base2`, … if it is already taken.
    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 1usize;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    pub fn claim_parameter(&mut self, declared: &str, descriptor: &str) -> String {
        self.claim(&local_identifier(declared, descriptor))
    }
}

impl Default for NameScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_names_are_kept() {
        assert_eq!(local_identifier("who", "address"), "who");
        assert_eq!(local_identifier("_to", "address"), "to");
        assert_eq!(local_identifier("__x", "uint256"), "_x");
    }

    #[test]
    fn reserved_names_fall_back_to_type() {
        assert_eq!(local_identifier("type", "uint8"), "amount");
        assert_eq!(local_identifier("address", "address"), "addr");
        assert_eq!(local_identifier("_type", "int16"), "val");
        assert_eq!(local_identifier("_", "bool"), "flag");
    }

    #[test]
    fn unnamed_parameters_use_type_table() {
        assert_eq!(local_identifier("", "address"), "addr");
        assert_eq!(local_identifier("", "bool"), "flag");
        assert_eq!(local_identifier("", "string"), "str");
        assert_eq!(local_identifier("", "bytes"), "data");
        assert_eq!(local_identifier("", "bytes4"), "bval");
        assert_eq!(local_identifier("", "uint"), "amount");
        assert_eq!(local_identifier("", "int256"), "val");
        assert_eq!(local_identifier("", "uint256[]"), "arg");
        assert_eq!(local_identifier("", "Order"), "arg");
    }

    #[test]
    fn reserved_set_covers_keywords_and_types() {
        assert!(RESERVED.len() >= 100);
        assert!(is_reserved("type"));
        assert!(!is_reserved("amount"));
    }

    #[test]
    fn unit_and_future_keywords_fall_back_to_type() {
        assert_eq!(local_identifier("_seconds", "uint256"), "amount");
        assert_eq!(local_identifier("_default", "bool"), "flag");
        assert_eq!(local_identifier("_in", "address"), "addr");
        assert_eq!(local_identifier("_ether", "int128"), "val");
        assert_eq!(local_identifier("days", "uint32"), "amount");
        assert_eq!(local_identifier("_unchecked", "bytes"), "data");
        assert_eq!(local_identifier("_delay", "uint256"), "delay");
    }

    #[test]
    fn scope_suffixes_collisions() {
        let mut scope = NameScope::new();
        assert_eq!(scope.claim_parameter("", "uint256"), "amount");
        assert_eq!(scope.claim_parameter("", "uint256"), "amount1");
        assert_eq!(scope.claim_parameter("amount", "uint256"), "amount2");
        assert_eq!(scope.claim_parameter("target", "address"), "target1");
    }
}
