//! Synthesis core: literals, declarations, identifiers and call-sites.
//!
//! Every function in here is total and pure: same input, same text, no I/O.
//! Leaves first:
//! - `literal`: zero-ish default literal for any type shape
//! - `location`: declaration spelling, `memory` where needed
//! - `ident`: safe local identifiers, scoped per test function
//! - `callsite`: one test function per signature
pub mod literal;
pub mod location;
pub mod ident;
pub mod callsite;

pub use literal::default_literal;
pub use location::declaration_type;
pub use ident::{NameScope, local_identifier};
pub use callsite::{CallSite, test_function_name};

/// Inline marker attached to placeholders that cannot be made meaningful from text alone.
pub const NEEDS_VALUE_MARKER: &str = "/* TODO: provide a real value */";
