//! Forge test scaffolds from structural contract descriptions.
//!
//! `ContractInfo` (hand-written JSON or a compiler ABI) → a `.t.sol` file with
//! one compiling test stub per externally callable function.
pub mod ir;
pub mod shape;
pub mod synth;
pub mod scaffold;
pub mod abi;
pub mod error;
pub mod path_de;
pub mod cli;

pub use ir::{ContractInfo, FunctionSignature, Parameter, StateMutability, Visibility};
pub use scaffold::{Scaffold, ScaffoldOptions, generate};
