//! Prints accessor tests for the model structs of the given Rust sources.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use gw2_snapshot::scaffold::{scaffold_file, Fixtures};

#[derive(Parser)]
#[command(name = "gw2-scaffold", version, about = "Generate accessor tests from model structs")]
struct Cli {
    /// Rust source files to scan
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// External fixture for a struct, as `Struct=path/to/payload.json` (repeatable)
    #[arg(long, value_parser = parse_fixture)]
    fixture: Vec<(String, PathBuf)>,
}

fn parse_fixture(s: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected Struct=path, got {s:?}"))?;
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected Struct=path, got {s:?}"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut overrides = Fixtures::new();
    for (name, path) in &cli.fixture {
        let payload = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        overrides.insert(name.clone(), payload);
    }

    for file in &cli.files {
        print!("{}", scaffold_file(file, &overrides)?);
    }
    Ok(())
}
