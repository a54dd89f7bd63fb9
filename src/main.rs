use anyhow::Result;
use clap::Parser;
use gzshard::{split, split_into};
use std::path::PathBuf;

/// Split a gzip'd line-oriented file into N independently compressed shards.
#[derive(Parser)]
#[command(name = "gzshard", version)]
struct Cli {
    /// Compressed, newline-delimited input file.
    #[arg(short, long)]
    input: PathBuf,

    /// Number of output shards.
    #[arg(short = 'n', long, default_value_t = 4)]
    shards: usize,

    /// Directory for the shard files (created if missing); defaults to the
    /// current directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match &cli.output_dir {
        Some(dir) => split_into(&cli.input, cli.shards, dir),
        None => split(&cli.input, cli.shards),
    };

    for path in &outcome.outputs {
        println!("{}", path.display());
    }
    if let Some(err) = outcome.error {
        return Err(err.into());
    }
    Ok(())
}
