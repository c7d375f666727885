use crate::shape::TypeShape;

use super::NEEDS_VALUE_MARKER;

/// Default-value literal for a raw descriptor. Never empty, never fails.
pub fn default_literal(descriptor: &str) -> String {
    literal_for(&TypeShape::parse(descriptor))
}

pub fn literal_for(shape: &TypeShape) -> String {
    match shape {
        TypeShape::Address { payable: false } => "address(0)".to_string(),
        TypeShape::Address { payable: true } => "payable(address(0))".to_string(),
        TypeShape::Bool => "false".to_string(),
        TypeShape::String => "\"\"".to_string(),
        TypeShape::FixedBytes(n) => format!("bytes{n}(0)"),
        TypeShape::Bytes => "\"\"".to_string(),
        TypeShape::Integer { .. } => "0".to_string(),
        // length is always zero, so the element default is never needed
        TypeShape::DynamicArray(_) => format!("new {shape}(0)"),
        TypeShape::FixedArray(inner, n) => {
            let elems = (0..*n).map(|_| literal_for(inner)).collect::<Vec<_>>();
            format!("[{}]", elems.join(", "))
        }
        TypeShape::UserDefined(name) => format!("{name}(0) {NEEDS_VALUE_MARKER}"),
        TypeShape::Unknown(_) => format!("0 {NEEDS_VALUE_MARKER}"),
    }
}

/// True when the literal carries the manual-correction marker.
pub fn needs_manual_value(literal: &str) -> bool {
    literal.contains(NEEDS_VALUE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_defaults_are_fixed() {
        assert_eq!(default_literal("address"), "address(0)");
        assert_eq!(default_literal("address payable"), "payable(address(0))");
        assert_eq!(default_literal("bool"), "false");
        assert_eq!(default_literal("string"), "\"\"");
        assert_eq!(default_literal("bytes"), "\"\"");
        assert_eq!(default_literal("bytes32"), "bytes32(0)");
        assert_eq!(default_literal("bytes4"), "bytes4(0)");
        for d in ["uint", "uint8", "uint256", "int", "int128"] {
            assert_eq!(default_literal(d), "0", "{d}");
        }
    }

    #[test]
    fn dynamic_arrays_allocate_zero_length() {
        assert_eq!(default_literal("uint256[]"), "new uint256[](0)");
        assert_eq!(default_literal("address[][]"), "new address[][](0)");
        assert_eq!(default_literal("bool[3][]"), "new bool[3][](0)");
        // element default would carry a marker; the allocation does not
        assert_eq!(default_literal("Order[]"), "new Order[](0)");
    }

    #[test]
    fn fixed_arrays_repeat_the_element_default() {
        assert_eq!(default_literal("uint256[3]"), "[0, 0, 0]");
        assert_eq!(default_literal("bool[0]"), "[]");
        assert_eq!(
            default_literal("address[2][2]"),
            "[[address(0), address(0)], [address(0), address(0)]]"
        );
        assert_eq!(default_literal("uint8[][2]"), "[new uint8[](0), new uint8[](0)]");
    }

    #[test]
    fn fixed_array_of_n_has_n_elements() {
        for n in 0..6usize {
            let lit = default_literal(&format!("bytes32[{n}]"));
            let inner = lit.trim_start_matches('[').trim_end_matches(']');
            let count = if inner.is_empty() { 0 } else { inner.split(", ").count() };
            assert_eq!(count, n);
            assert!(inner.split(", ").filter(|s| !s.is_empty()).all(|s| s == "bytes32(0)"));
        }
    }

    #[test]
    fn incomplete_types_are_marked() {
        let lit = default_literal("Order");
        assert!(lit.starts_with("Order(0)"));
        assert!(needs_manual_value(&lit));

        let lit = default_literal("mapping(address => uint256)");
        assert!(lit.starts_with('0'));
        assert!(needs_manual_value(&lit));

        assert!(!needs_manual_value(&default_literal("uint256[2]")));
    }
}
