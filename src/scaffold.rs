//! Scaffold orchestrator: one contract description in, one test file out.
use std::collections::BTreeSet;

use crate::ir::{ContractInfo, StateMutability};
use crate::synth::callsite::{CallSite, ZERO_VALUE};
use crate::synth::ident::TARGET;
use crate::synth::literal::{default_literal, needs_manual_value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

pub const DEFAULT_PRAGMA: &str = "^0.8.13";
pub const LICENSE_LINE: &str = "// SPDX-License-Identifier: UNLICENSED";
pub const TEST_IMPORT: &str = "import {Test} from \"forge-std/Test.sol\";";

#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Version pragma body, e.g. `^0.8.20`. `None` → [`DEFAULT_PRAGMA`].
    pub pragma: Option<String>,
}

/// Append-only line buffer for one test file.
#[derive(Debug, Default)]
pub struct Scaffold {
    lines: Vec<String>,
    options: ScaffoldOptions,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl ScaffoldOptions {
    pub fn with_pragma(pragma: impl Into<String>) -> Self {
        Self { pragma: Some(pragma.into()) }
    }

    pub fn pragma(&self) -> &str {
        self.pragma.as_deref().unwrap_or(DEFAULT_PRAGMA)
    }
}

impl Scaffold {
    pub fn new(options: ScaffoldOptions) -> Self {
        Self { lines: Vec::new(), options }
    }

    pub fn emit(&mut self, contract: &ContractInfo) {
        let name = &contract.name;
        self.push(LICENSE_LINE);
        self.push(format!("pragma solidity {};", self.options.pragma()));
        self.push("");
        self.push(TEST_IMPORT);
        self.push(format!(
            "import {{{name}}} from \"{}\";",
            import_path(&contract.file_path, name)
        ));
        self.push("");
        self.push(format!("contract {name}Test is Test {{"));
        self.push(format!("    {name} public {TARGET};"));
        self.push("");
        self.push("    function setUp() public {");
        self.push(format!("        {TARGET} = {};", instantiation(contract)));
        self.push("    }");

        let mut emitted = BTreeSet::<String>::new();
        for sig in contract.testable_functions() {
            let mut site = CallSite::new(sig);
            let base = site.test_name().to_string();
            let mut candidate = base.clone();
            let mut n = 1usize;
            while emitted.contains(&candidate) {
                candidate = format!("{base}_{n}");
                n += 1;
            }
            if candidate != base {
                site = site.with_test_name(candidate.clone());
            }
            emitted.insert(candidate);

            self.push("");
            self.lines.extend(site.lines());
        }

        self.push("}");
        self.push("");
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// Generate the whole test file for `contract`.
pub fn generate(contract: &ContractInfo, options: &ScaffoldOptions) -> String {
    let mut sc = Scaffold::new(options.clone());
    sc.emit(contract);
    sc.into_string()
}

/// How many placeholders in a generated file still need a hand-written value.
pub fn count_manual_values(source: &str) -> usize {
    source.lines().filter(|l| needs_manual_value(l)).count()
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `new Name(args)`, with `{value: 0}` for a payable constructor.
fn instantiation(contract: &ContractInfo) -> String {
    let (args, payable) = match contract.constructor() {
        Some(ctor) => (
            ctor.inputs.iter().map(|p| default_literal(&p.ty)).collect::<Vec<_>>(),
            ctor.state_mutability == StateMutability::Payable,
        ),
        None => (Vec::new(), false),
    };
    let value = if payable { ZERO_VALUE } else { "" };
    format!("new {}{value}({})", contract.name, args.join(", "))
}

/// Import path of the contract as seen from the project's `test/` directory.
///
/// Known layouts: `src/...` (forge) and `contracts/...` (hardhat-style).
/// Anything else is assumed to live at `src/<Name>.sol`.
pub fn import_path(file_path: &str, contract_name: &str) -> String {
    let normalized = file_path.replace('\\', "/");
    for root in ["src/", "contracts/"] {
        if let Some(rest) = after_root(&normalized, root) {
            return format!("../{root}{rest}");
        }
    }
    format!("../src/{contract_name}.sol")
}

/// Tail after the last path segment equal to `root` (`root` includes the trailing slash).
fn after_root<'a>(path: &'a str, root: &str) -> Option<&'a str> {
    if let Some(rest) = path.strip_prefix(root) {
        return non_empty(rest);
    }
    let needle = format!("/{root}");
    let idx = path.rfind(&needle)?;
    non_empty(&path[idx + needle.len()..])
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FunctionSignature, Parameter, Visibility};

    fn function(
        name: &str,
        visibility: Visibility,
        state_mutability: StateMutability,
        inputs: Vec<Parameter>,
        outputs: Vec<Parameter>,
    ) -> FunctionSignature {
        FunctionSignature { name: name.into(), visibility, state_mutability, inputs, outputs, is_modifier: false }
    }

    fn token() -> ContractInfo {
        ContractInfo {
            name: "Token".into(),
            file_path: "src/Token.sol".into(),
            functions: vec![function(
                "balanceOf",
                Visibility::External,
                StateMutability::View,
                vec![Parameter::new("who", "address")],
                vec![Parameter::new("", "uint256")],
            )],
        }
    }

    #[test]
    fn token_without_constructor() {
        let src = generate(&token(), &ScaffoldOptions::default());
        let expected = [
            "// SPDX-License-Identifier: UNLICENSED",
            "pragma solidity ^0.8.13;",
            "",
            "import {Test} from \"forge-std/Test.sol\";",
            "import {Token} from \"../src/Token.sol\";",
            "",
            "contract TokenTest is Test {",
            "    Token public target;",
            "",
            "    function setUp() public {",
            "        target = new Token();",
            "    }",
            "",
            "    function testBalanceOf() public {",
            "        address who = address(0);",
            "        uint256 result = target.balanceOf(who);",
            "        assertTrue(true);",
            "    }",
            "}",
            "",
        ]
        .join("\n");
        assert_eq!(src, expected);
        assert!(src.ends_with("}\n"));
    }

    #[test]
    fn generation_is_idempotent() {
        let info = token();
        let opts = ScaffoldOptions::with_pragma("0.8.24");
        assert_eq!(generate(&info, &opts), generate(&info, &opts));
        assert!(generate(&info, &opts).contains("pragma solidity 0.8.24;"));
    }

    #[test]
    fn constructor_arguments_are_synthesized() {
        let mut info = token();
        info.functions.insert(
            0,
            function(
                "constructor",
                Visibility::Public,
                StateMutability::Nonpayable,
                vec![
                    Parameter::new("_name", "string"),
                    Parameter::new("_owner", "address"),
                    Parameter::new("_caps", "uint256[2]"),
                ],
                vec![],
            ),
        );
        let src = generate(&info, &ScaffoldOptions::default());
        assert!(src.contains("        target = new Token(\"\", address(0), [0, 0]);"));
        assert!(!src.contains("testConstructor"));
    }

    #[test]
    fn payable_constructor_sends_zero() {
        let mut info = token();
        info.functions.push(function(
            "constructor",
            Visibility::Public,
            StateMutability::Payable,
            vec![],
            vec![],
        ));
        let src = generate(&info, &ScaffoldOptions::default());
        assert!(src.contains("target = new Token{value: 0}();"));
    }

    #[test]
    fn only_public_and_external_are_tested() {
        let mut info = token();
        info.functions.extend([
            function("_burn", Visibility::Internal, StateMutability::Nonpayable, vec![], vec![]),
            function("_hook", Visibility::Private, StateMutability::Nonpayable, vec![], vec![]),
            function("mint", Visibility::Public, StateMutability::Nonpayable, vec![], vec![]),
        ]);
        let mut modifier = function("onlyOwner", Visibility::Public, StateMutability::Nonpayable, vec![], vec![]);
        modifier.is_modifier = true;
        info.functions.push(modifier);

        let src = generate(&info, &ScaffoldOptions::default());
        assert!(src.contains("function testBalanceOf()"));
        assert!(src.contains("function testMint()"));
        assert!(!src.contains("testBurn") && !src.contains("test_burn"));
        assert!(!src.contains("testOnlyOwner"));
        assert!(!src.contains("_hook"));
    }

    #[test]
    fn overloads_get_distinct_test_names() {
        let mut info = token();
        info.functions.push(function(
            "balanceOf",
            Visibility::External,
            StateMutability::View,
            vec![Parameter::new("who", "address"), Parameter::new("id", "uint256")],
            vec![Parameter::new("", "uint256")],
        ));
        let src = generate(&info, &ScaffoldOptions::default());
        assert!(src.contains("function testBalanceOf() public {"));
        assert!(src.contains("function testBalanceOf_1() public {"));
    }

    #[test]
    fn overload_suffixes_skip_names_already_emitted() {
        let mut info = token();
        info.functions.extend([
            function("mint", Visibility::External, StateMutability::Nonpayable, vec![], vec![]),
            function(
                "mint",
                Visibility::External,
                StateMutability::Nonpayable,
                vec![Parameter::new("amount", "uint256")],
                vec![],
            ),
            function("mint_1", Visibility::External, StateMutability::Nonpayable, vec![], vec![]),
        ]);
        let src = generate(&info, &ScaffoldOptions::default());
        for header in [
            "function testMint() public {",
            "function testMint_1() public {",
            "function testMint_1_1() public {",
        ] {
            assert_eq!(src.matches(header).count(), 1, "{header}");
        }
        assert!(src.contains("    function testMint_1_1() public {\n        target.mint_1();\n"));
    }

    #[test]
    fn reserved_parameter_names_are_replaced() {
        let mut info = token();
        info.functions.push(function(
            "setDelay",
            Visibility::External,
            StateMutability::Nonpayable,
            vec![
                Parameter::new("_seconds", "uint256"),
                Parameter::new("_default", "bool"),
                Parameter::new("_in", "address"),
            ],
            vec![],
        ));
        let src = generate(&info, &ScaffoldOptions::default());
        assert!(!src.contains("uint256 seconds ="));
        assert!(!src.contains("bool default ="));
        assert!(!src.contains("address in ="));
        assert!(src.contains("        target.setDelay(amount, flag, addr);\n"));
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let mut info = token();
        info.functions.push(function("pause", Visibility::External, StateMutability::Nonpayable, vec![], vec![]));
        let src = generate(&info, &ScaffoldOptions::default());
        assert!(src.contains("    }\n\n    function testPause() public {\n"));
    }

    #[test]
    fn import_paths_follow_layout() {
        assert_eq!(import_path("src/Token.sol", "Token"), "../src/Token.sol");
        assert_eq!(import_path("/home/me/proj/src/tokens/Token.sol", "Token"), "../src/tokens/Token.sol");
        assert_eq!(import_path("contracts/Vault.sol", "Vault"), "../contracts/Vault.sol");
        assert_eq!(import_path("C:\\work\\contracts\\Vault.sol", "Vault"), "../contracts/Vault.sol");
        assert_eq!(import_path("Vault.sol", "Vault"), "../src/Vault.sol");
        assert_eq!(import_path("", "Vault"), "../src/Vault.sol");
        assert_eq!(import_path("lib/x/Vault.sol", "Vault"), "../src/Vault.sol");
    }

    #[test]
    fn token_fixture_covers_every_call_shape() {
        let info: ContractInfo =
            crate::path_de::from_str_with_path(include_str!("../fixtures/token.json")).unwrap();
        let src = generate(&info, &ScaffoldOptions::default());

        assert!(src.contains("        uint256 result = target.balanceOf(who);\n        assertTrue(true);"));
        assert!(src.contains(
            "        address to = address(0);\n        uint256 amount = 0;\n        target.transfer(to, amount);\n"
        ));
        assert!(src.contains("    function testDeposit() public {\n        target.deposit{value: 0}();\n"));
        assert!(src.contains("        uint256 a;\n        uint256 b;\n        (a, b) = target.getPair(id);\n"));
        assert!(!src.contains("_mint") && !src.contains("testMint"));
    }

    #[test]
    fn manual_values_are_counted() {
        let mut info = token();
        info.functions.push(function(
            "fill",
            Visibility::External,
            StateMutability::Nonpayable,
            vec![Parameter::new("order", "Order"), Parameter::new("m", "mapping(uint => uint)")],
            vec![],
        ));
        let src = generate(&info, &ScaffoldOptions::default());
        assert_eq!(count_manual_values(&src), 2);
    }
}
