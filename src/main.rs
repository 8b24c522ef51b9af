use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use phpreflect::{compile_patterns, discover, export_files};

/// Export a PHP source tree as JSON for documentation generators.
#[derive(Parser)]
#[command(name = "phpreflect", version, about)]
struct Arguments {
    /// Root directory of the source tree to scan.
    directory: PathBuf,

    /// Write the JSON export here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Case-insensitive regex for paths to skip (repeatable).
    #[arg(long = "ignore", value_name = "REGEX")]
    ignore: Vec<String>,

    /// Case-insensitive regex that paths must match (repeatable).
    #[arg(long = "include", value_name = "REGEX")]
    include: Vec<String>,

    /// Treat the first path segment under the root as a version:
    /// strip it from each file's path and append it to the root.
    #[arg(long)]
    versions: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Arguments) -> Result<()> {
    let ignore = compile_patterns(&args.ignore).context("invalid --ignore pattern")?;
    let include = compile_patterns(&args.include).context("invalid --include pattern")?;

    let files = discover(&args.directory, &ignore, &include)?;
    let records = export_files(&files, &args.directory, args.versions);

    match &args.output {
        Some(path) => {
            let out = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            serde_json::to_writer_pretty(out, &records)?;
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &records)?;
            println!();
        }
    }

    Ok(())
}
