use crate::ir::{FunctionSignature, Parameter, StateMutability};

use super::ident::{NameScope, TARGET, declared_identifier};
use super::literal::default_literal;
use super::location::declaration_type;

pub const TEST_PREFIX: &str = "test";
pub const PLACEHOLDER_ASSERTION: &str = "assertTrue(true);";
pub const ZERO_VALUE: &str = "{value: 0}";

const FN_INDENT: &str = "    ";
const BODY_INDENT: &str = "        ";

/// How the call line captures (or drops) what the function returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Plain call, return value (if any) dropped.
    Discard,
    /// One declared variable receives the single output.
    Single,
    /// Outputs declared one by one, then assigned from a tuple.
    Tuple,
    /// Call carries an explicit zero-value transfer; outputs dropped.
    Payable,
}

impl CallShape {
    pub fn of(sig: &FunctionSignature) -> Self {
        match (sig.state_mutability, sig.outputs.len()) {
            (StateMutability::Payable, _) => CallShape::Payable,
            (StateMutability::Pure | StateMutability::View, 0) => CallShape::Discard,
            (StateMutability::Pure | StateMutability::View, 1) => CallShape::Single,
            (StateMutability::Pure | StateMutability::View, _) => CallShape::Tuple,
            // multi-output nonpayable calls are not captured
            (StateMutability::Nonpayable, 1) => CallShape::Single,
            (StateMutability::Nonpayable, _) => CallShape::Discard,
        }
    }
}

/// `transferFrom` → `testTransferFrom`.
pub fn test_function_name(function: &str) -> String {
    let mut chars = function.chars();
    match chars.next() {
        Some(first) => format!("{TEST_PREFIX}{}{}", first.to_uppercase(), chars.as_str()),
        None => TEST_PREFIX.to_string(),
    }
}

/// One generated test function for one signature.
#[derive(Debug, Clone)]
pub struct CallSite<'a> {
    sig: &'a FunctionSignature,
    test_name: String,
}

impl<'a> CallSite<'a> {
    pub fn new(sig: &'a FunctionSignature) -> Self {
        Self { sig, test_name: test_function_name(&sig.name) }
    }

    pub fn with_test_name(mut self, name: impl Into<String>) -> Self {
        self.test_name = name.into();
        self
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn shape(&self) -> CallShape {
        CallShape::of(self.sig)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut scope = NameScope::new();
        let mut out = Vec::new();
        out.push(format!("{FN_INDENT}function {}() public {{", self.test_name));

        let mut args = Vec::with_capacity(self.sig.inputs.len());
        for p in &self.sig.inputs {
            let name = scope.claim_parameter(&p.name, &p.ty);
            out.push(format!(
                "{BODY_INDENT}{} {} = {};",
                declaration_type(&p.ty),
                name,
                default_literal(&p.ty)
            ));
            args.push(name);
        }

        let call = format!("{TARGET}.{}({})", self.sig.name, args.join(", "));
        match self.shape() {
            CallShape::Discard => out.push(format!("{BODY_INDENT}{call};")),
            CallShape::Payable => out.push(format!(
                "{BODY_INDENT}{TARGET}.{}{ZERO_VALUE}({});",
                self.sig.name,
                args.join(", ")
            )),
            CallShape::Single => {
                let output = &self.sig.outputs[0];
                let name = scope.claim(&output_name(output, None));
                out.push(format!(
                    "{BODY_INDENT}{} {} = {call};",
                    declaration_type(&output.ty),
                    name
                ));
            }
            CallShape::Tuple => {
                let mut names = Vec::with_capacity(self.sig.outputs.len());
                for (i, output) in self.sig.outputs.iter().enumerate() {
                    let name = scope.claim(&output_name(output, Some(i)));
                    out.push(format!("{BODY_INDENT}{} {};", declaration_type(&output.ty), name));
                    names.push(name);
                }
                out.push(format!("{BODY_INDENT}({}) = {call};", names.join(", ")));
            }
        }

        out.push(format!("{BODY_INDENT}{PLACEHOLDER_ASSERTION}"));
        out.push(format!("{FN_INDENT}}}"));
        out
    }
}

/// Declared output name, else `result` (single) or `ret{i}` (tuple position).
fn output_name(output: &Parameter, position: Option<usize>) -> String {
    declared_identifier(&output.name).unwrap_or_else(|| match position {
        Some(i) => format!("ret{i}"),
        None => "result".to_string(),
    })
}
