// Structural description of a contract, as handed over by a parser. No source text here.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    External,
    Internal,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    Nonpayable,
    Payable,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,        // may be empty
    #[serde(rename = "type")]
    pub ty: String,          // TypeDescriptor, classified by `shape`
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub state_mutability: StateMutability,
    #[serde(default)]
    pub inputs: Vec<Parameter>,
    #[serde(default)]
    pub outputs: Vec<Parameter>,
    #[serde(default)]
    pub is_modifier: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    pub name: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub functions: Vec<FunctionSignature>, // at most one `constructor`
}

pub const CONSTRUCTOR: &str = "constructor";

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

impl FunctionSignature {
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    /// Externally callable, not the constructor, not a modifier.
    pub fn is_testable(&self) -> bool {
        matches!(self.visibility, Visibility::Public | Visibility::External)
            && !self.is_constructor()
            && !self.is_modifier
    }
}

impl ContractInfo {
    pub fn constructor(&self) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.is_constructor())
    }

    pub fn testable_functions(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.iter().filter(|f| f.is_testable())
    }
}
