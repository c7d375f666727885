//! Render every fixture twice and sanity-check the generated files.
//!
//! `*.abi.json` fixtures go through the ABI loader, everything else is a
//! contract description.
use std::path::{Path, PathBuf};

use clap::Parser;
use forge_scaffold::abi::{AbiOverrides, load_abi_file};
use forge_scaffold::scaffold::{ScaffoldOptions, generate};
use forge_scaffold::ContractInfo;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Parser)]
#[command(about = "Render every fixture twice and sanity-check the output")]
struct Args {
    /// Directory holding `*.json` fixtures.
    #[arg(default_value = "fixtures")]
    dir: PathBuf,
    /// Also print each generated file and a JSON summary.
    #[arg(long)]
    print: bool,
}

static TEST_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^    function test\w+\(\) public \{$").unwrap());

fn load(path: &Path) -> Result<ContractInfo, String> {
    let is_abi = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".abi.json"));
    let loaded = if is_abi {
        load_abi_file(path, &AbiOverrides::default())
    } else {
        forge_scaffold::path_de::read_json_file::<ContractInfo>(path)
    };
    loaded.map_err(|e| e.to_string())
}

fn check(path: &Path) -> Result<String, String> {
    let info = load(path)?;
    let options = ScaffoldOptions::default();
    let first = generate(&info, &options);
    let second = generate(&info, &options);
    if first != second {
        return Err("output is not idempotent".into());
    }
    let expected = info.testable_functions().count();
    let found = TEST_FN.find_iter(&first).count();
    if found != expected {
        return Err(format!("expected {expected} test functions, found {found}"));
    }
    let opens = first.matches('{').count();
    let closes = first.matches('}').count();
    if opens != closes {
        return Err(format!("unbalanced braces ({opens} open, {closes} close)"));
    }
    if !first.ends_with("}\n") {
        return Err("missing trailing newline".into());
    }
    Ok(first)
}

fn fixtures(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern = dir.join("*.json");
    let mut out = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    out.sort();
    Ok(out)
}

fn main() {
    let Args { dir, print: verbose } = Args::parse();

    let paths = match fixtures(&dir) {
        Ok(paths) => paths,
        Err(error) => {
            eprintln!("❌ {}: {error}", dir.display());
            std::process::exit(1);
        }
    };
    if paths.is_empty() {
        eprintln!("❌ no fixtures under {}", dir.display());
        std::process::exit(1);
    }

    let mut failed = 0usize;
    for path in &paths {
        match check(path) {
            Ok(src) => {
                eprintln!("✅ {}", path.display());
                if verbose {
                    println!("{src}");
                }
            }
            Err(error) => {
                failed += 1;
                eprintln!("❌ {}: {error}", path.display());
            }
        }
    }

    if verbose {
        let names: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
        eprintln!("{}", serde_json::json!({ "fixtures": names, "failed": failed }));
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
