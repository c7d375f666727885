//! Type descriptor classification.
//!
//! A descriptor is an untyped token (`uint256`, `bytes32[4][]`, `Pool.Position`).
//! It is classified once into a [`TypeShape`] tree; every synthesizer downstream
//! matches on the tree instead of re-probing the string.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(u?)int([0-9]*)$").unwrap());
static FIXED_BYTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^bytes([0-9]+)$").unwrap());
static USER_DEFINED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// Largest `bytesN` the type system knows about.
pub const MAX_FIXED_BYTES: u8 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Address { payable: bool },
    Bool,
    String,
    FixedBytes(u8),
    Bytes,
    /// `bits == None` is the unsized alias (`uint` / `int`).
    Integer { signed: bool, bits: Option<u16> },
    DynamicArray(Box<TypeShape>),
    FixedArray(Box<TypeShape>, usize),
    UserDefined(String),
    Unknown(String),
}

type Classifier = fn(&str) -> Option<TypeShape>;

/// Priority order matters: first match wins.
const CLASSIFIERS: &[(&str, Classifier)] = &[
    ("address", classify_address),
    ("bool", classify_bool),
    ("string", classify_string),
    ("fixed-bytes", classify_fixed_bytes),
    ("bytes", classify_bytes),
    ("integer", classify_integer),
    ("dynamic-array", classify_dynamic_array),
    ("fixed-array", classify_fixed_array),
    ("user-defined", classify_user_defined),
];

impl TypeShape {
    pub fn parse(descriptor: &str) -> Self {
        let descriptor = descriptor.trim();
        CLASSIFIERS
            .iter()
            .find_map(|(_, classify)| classify(descriptor))
            .unwrap_or_else(|| TypeShape::Unknown(descriptor.to_string()))
    }

    /// Name of the classifier that claims `descriptor`, `"unknown"` when none does.
    pub fn classifier_name(descriptor: &str) -> &'static str {
        let descriptor = descriptor.trim();
        CLASSIFIERS
            .iter()
            .find(|(_, classify)| classify(descriptor).is_some())
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Variable-size or composite: needs a data location on local declaration.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            TypeShape::String
                | TypeShape::Bytes
                | TypeShape::DynamicArray(_)
                | TypeShape::FixedArray(..)
                | TypeShape::UserDefined(_)
        )
    }

    /// Bracket nesting count; bounds the recursion of every synthesizer.
    pub fn depth(&self) -> usize {
        match self {
            TypeShape::DynamicArray(inner) | TypeShape::FixedArray(inner, _) => 1 + inner.depth(),
            _ => 0,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Address { payable: false } => f.write_str("address"),
            TypeShape::Address { payable: true } => f.write_str("address payable"),
            TypeShape::Bool => f.write_str("bool"),
            TypeShape::String => f.write_str("string"),
            TypeShape::FixedBytes(n) => write!(f, "bytes{n}"),
            TypeShape::Bytes => f.write_str("bytes"),
            TypeShape::Integer { signed, bits } => {
                f.write_str(if *signed { "int" } else { "uint" })?;
                match bits {
                    Some(b) => write!(f, "{b}"),
                    None => Ok(()),
                }
            }
            TypeShape::DynamicArray(inner) => write!(f, "{inner}[]"),
            TypeShape::FixedArray(inner, n) => write!(f, "{inner}[{n}]"),
            TypeShape::UserDefined(name) | TypeShape::Unknown(name) => f.write_str(name),
        }
    }
}

// ------------------------------ Classifiers ------------------------------- //

fn classify_address(s: &str) -> Option<TypeShape> {
    if s == "address" {
        return Some(TypeShape::Address { payable: false });
    }
    let mut words = s.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("address"), Some("payable"), None) => Some(TypeShape::Address { payable: true }),
        _ => None,
    }
}

fn classify_bool(s: &str) -> Option<TypeShape> {
    (s == "bool").then_some(TypeShape::Bool)
}

fn classify_string(s: &str) -> Option<TypeShape> {
    (s == "string").then_some(TypeShape::String)
}

fn classify_fixed_bytes(s: &str) -> Option<TypeShape> {
    let caps = FIXED_BYTES.captures(s)?;
    let n: u8 = caps[1].parse().ok()?;
    (1..=MAX_FIXED_BYTES).contains(&n).then_some(TypeShape::FixedBytes(n))
}

fn classify_bytes(s: &str) -> Option<TypeShape> {
    (s == "bytes").then_some(TypeShape::Bytes)
}

fn classify_integer(s: &str) -> Option<TypeShape> {
    let caps = INTEGER.captures(s)?;
    let signed = caps[1].is_empty();
    let bits = match &caps[2] {
        "" => None,
        digits => Some(digits.parse::<u16>().ok()?),
    };
    Some(TypeShape::Integer { signed, bits })
}

/// Split `T[...]` into `(T, ...)` on the outermost (last) bracket pair.
fn split_array_suffix(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let base = body[..open].trim_end();
    if base.is_empty() {
        return None;
    }
    Some((base, body[open + 1..].trim()))
}

fn classify_dynamic_array(s: &str) -> Option<TypeShape> {
    let (base, len) = split_array_suffix(s)?;
    len.is_empty()
        .then(|| TypeShape::DynamicArray(Box::new(TypeShape::parse(base))))
}

fn classify_fixed_array(s: &str) -> Option<TypeShape> {
    let (base, len) = split_array_suffix(s)?;
    let n: usize = len.parse().ok()?;
    Some(TypeShape::FixedArray(Box::new(TypeShape::parse(base)), n))
}

fn classify_user_defined(s: &str) -> Option<TypeShape> {
    USER_DEFINED
        .is_match(s)
        .then(|| TypeShape::UserDefined(s.to_string()))
}

// ------------------------------- Tests ------------------------------------ //
