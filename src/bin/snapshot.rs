//! Fetches every catalog endpoint, mirrors responding JSON to disk and
//! prints which endpoints respond.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use gw2_snapshot::{snapshot, Catalog, Options, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY};

#[derive(Parser)]
#[command(name = "gw2-snapshot", version, about = "Snapshot the Guild Wars 2 API to disk")]
struct Cli {
    /// Base URL prepended to every route
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// File with one route per line ('#' comments allowed); defaults to the built-in catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Number of concurrent requests
    #[arg(long, short = 'j', default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Directory artifacts are written below
    #[arg(long, short, default_value = ".")]
    out: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Also print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(&cli.base_url, path)?,
        None => Catalog::from_paths(&cli.base_url, gw2_snapshot::catalog::BUILTIN_PATHS)?,
    };
    let options = Options {
        concurrency: cli.concurrency,
        output_dir: cli.out.clone(),
        color: !cli.no_color,
    };

    let mut stdout = io::stdout().lock();
    let report = snapshot(&catalog, &options, &mut stdout)?;
    if cli.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}
