//! Minimal CLI: describe | abi → forge test scaffold
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use crate::abi::{AbiOverrides, load_abi_file};
use crate::error::LoadError;
use crate::ir::ContractInfo;
use crate::scaffold::{ScaffoldOptions, count_manual_values, generate};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate compiling forge test stubs for every public/external function of a contract
#[derive(Parser, Debug)]
#[command(name = "forge-scaffold")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// scaffold from a structural contract description (JSON)
    Describe(DescribeOut),
    /// scaffold from a Solidity JSON ABI or a forge/solc artifact
    Abi(AbiOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// version pragma for the generated file (e.g. `^0.8.20`)
    #[arg(long)]
    pragma: Option<String>,

    /// output .t.sol file, or a directory when several inputs are given (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DescribeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct AbiOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// contract name (defaults to the artifact file stem)
    #[arg(long)]
    name: Option<String>,

    /// contract source path used for the import line (defaults to `ast.absolutePath`)
    #[arg(long)]
    source_path: Option<String>,
}

/// One rendered input.
struct Rendered {
    source: PathBuf,
    contract: String,
    testable: usize,
    text: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_all<F>(&self, load: F) -> Result<Vec<(PathBuf, ContractInfo)>>
    where
        F: Fn(&Path) -> Result<ContractInfo, LoadError> + Sync,
    {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_par_iter()
            .map(|path| {
                let info = load(&path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                Ok((path, info))
            })
            .collect()
    }
}

impl OutputSettings {
    fn options(&self) -> ScaffoldOptions {
        ScaffoldOptions { pragma: self.pragma.clone() }
    }

    fn render(&self, loaded: Vec<(PathBuf, ContractInfo)>) -> Vec<Rendered> {
        let options = self.options();
        loaded
            .into_par_iter()
            .map(|(source, info)| Rendered {
                testable: info.testable_functions().count(),
                text: generate(&info, &options),
                contract: info.name,
                source,
            })
            .collect()
    }

    fn write(&self, rendered: &[Rendered]) -> Result<()> {
        for r in rendered {
            if r.testable == 0 {
                eprintln!(
                    "{} {} ({}): no public/external functions",
                    "warning:".yellow().bold(),
                    r.contract,
                    r.source.display()
                );
            }
            let manual = count_manual_values(&r.text);
            if manual > 0 {
                eprintln!(
                    "{} {}: {manual} placeholder value(s) need a real value",
                    "warning:".yellow().bold(),
                    r.contract
                );
            }
        }

        let Some(out) = self.out.as_ref() else {
            for r in rendered {
                println!("{}", r.text);
            }
            return Ok(());
        };

        if rendered.len() == 1 {
            write_file(out, &rendered[0].text)?;
            eprintln!("{} {}", "wrote".green(), out.display());
            return Ok(());
        }

        for r in rendered {
            let path = out.join(format!("{}.t.sol", r.contract));
            write_file(&path, &r.text)?;
            eprintln!("{} {}", "wrote".green(), path.display());
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Describe(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let loaded = target
                    .input_settings
                    .load_all(crate::path_de::read_json_file::<ContractInfo>)?;
                let rendered = target.output_settings.render(loaded);
                target.output_settings.write(&rendered)
            }
            Command::Abi(target) => {
                if target.output_settings.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let overrides = AbiOverrides {
                    name: target.name.clone(),
                    source_path: target.source_path.clone(),
                };
                let loaded = target
                    .input_settings
                    .load_all(|path| load_abi_file(path, &overrides))?;
                let rendered = target.output_settings.render(loaded);
                target.output_settings.write(&rendered)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                return Err(LoadError::NoMatch { pattern: pattern.to_string() });
            }
            // deterministic order across platforms
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
