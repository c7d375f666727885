//! Contract descriptions from a Solidity JSON ABI or a forge/solc build artifact.
//!
//! The ABI only lists the externally callable surface, so every function becomes
//! `external`. Tuples are spelled by their struct name from `internalType`
//! (`struct Pool.Position[]` → `Pool.Position[]`).
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, Result};
use crate::ir::{ContractInfo, FunctionSignature, Parameter, StateMutability, Visibility, CONSTRUCTOR};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiEntry {
    // pre-0.5 ABIs may leave functions untyped
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    state_mutability: Option<StateMutability>,
    // pre-0.5 ABIs
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
}

fn default_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    internal_type: Option<String>,
}

/// Overrides for what the artifact itself says (or doesn't).
#[derive(Debug, Clone, Default)]
pub struct AbiOverrides {
    pub name: Option<String>,
    pub source_path: Option<String>,
}

pub fn load_abi_file(path: &Path, overrides: &AbiOverrides) -> Result<ContractInfo> {
    let root: Value = crate::path_de::read_json_file(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Contract")
        .to_string();
    let name = overrides.name.clone().unwrap_or(stem);
    contract_from_json(root, name, overrides.source_path.clone()).map_err(|err| match err {
        AbiError::NotAnAbi => LoadError::MissingAbi { path: path.to_path_buf() },
        AbiError::Json(detail) => LoadError::Json { path: path.to_path_buf(), detail },
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("not a JSON ABI array or an artifact with an `abi` key")]
    NotAnAbi,
    #[error("{0}")]
    Json(String),
}

/// Accepts a bare ABI array or an artifact object carrying `abi`.
pub fn contract_from_json(
    root: Value,
    name: String,
    source_path: Option<String>,
) -> std::result::Result<ContractInfo, AbiError> {
    let file_path = source_path
        .or_else(|| {
            root.pointer("/ast/absolutePath")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();

    let abi = match root {
        Value::Array(_) => root,
        Value::Object(mut map) => map.remove("abi").ok_or(AbiError::NotAnAbi)?,
        _ => return Err(AbiError::NotAnAbi),
    };
    let entries: Vec<AbiEntry> = crate::path_de::from_value_with_path(abi).map_err(AbiError::Json)?;

    let functions = entries.iter().filter_map(to_signature).collect();
    Ok(ContractInfo { name, file_path, functions })
}

fn to_signature(entry: &AbiEntry) -> Option<FunctionSignature> {
    let name = match entry.kind.as_str() {
        "function" => entry.name.clone(),
        "constructor" => CONSTRUCTOR.to_string(),
        // fallback, receive, event, error
        _ => return None,
    };
    Some(FunctionSignature {
        name,
        visibility: Visibility::External,
        state_mutability: state_mutability(entry),
        inputs: entry.inputs.iter().map(to_parameter).collect(),
        outputs: entry.outputs.iter().map(to_parameter).collect(),
        is_modifier: false,
    })
}

fn state_mutability(entry: &AbiEntry) -> StateMutability {
    match entry.state_mutability {
        Some(m) => m,
        None if entry.payable => StateMutability::Payable,
        None if entry.constant => StateMutability::View,
        None => StateMutability::Nonpayable,
    }
}

fn to_parameter(param: &AbiParam) -> Parameter {
    Parameter::new(param.name.clone(), descriptor(param))
}

fn descriptor(param: &AbiParam) -> String {
    if param.ty.starts_with("tuple") {
        if let Some(named) = param
            .internal_type
            .as_deref()
            .and_then(|t| t.strip_prefix("struct "))
        {
            return named.trim().to_string();
        }
    }
    param.ty.clone()
}
