use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use visualizer_core::{ErrorExt, TreeVariant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Eclat,
    Declat,
}

impl From<Algorithm> for TreeVariant {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Eclat => TreeVariant::Eclat,
            Algorithm::Declat => TreeVariant::Declat,
        }
    }
}

/// Build a frequent itemset tree from a scraped run directory.
#[derive(Debug, Parser)]
#[command(name = "build-tree", version)]
struct Args {
    /// Directory to load the data from
    #[arg(short, long)]
    directory: PathBuf,

    /// Minimum support for frequent itemsets
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    support: u64,

    /// Algorithm to run
    #[arg(short, long, value_enum, default_value_t = Algorithm::Declat)]
    algorithm: Algorithm,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pattern_miner=info,build_tree=info")),
        )
        .init();

    let args = Args::parse();
    if !args.directory.is_dir() {
        anyhow::bail!("{} is not a directory", args.directory.display());
    }

    let path = pattern_miner::build_tree(&args.directory, args.support, args.algorithm.into())
        .map_err(|e| anyhow::anyhow!(e.log_error().user_friendly_message()))?;

    println!("{}", path.display());
    Ok(())
}
