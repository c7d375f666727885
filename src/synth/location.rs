use crate::shape::TypeShape;

pub const MEMORY: &str = "memory";

/// Type spelling for a local declaration: reference types get `memory`, scalars stay bare.
pub fn declaration_type(descriptor: &str) -> String {
    declaration_for(&TypeShape::parse(descriptor))
}

pub fn declaration_for(shape: &TypeShape) -> String {
    if shape.is_reference() {
        format!("{shape} {MEMORY}")
    } else {
        shape.to_string()
    }
}
