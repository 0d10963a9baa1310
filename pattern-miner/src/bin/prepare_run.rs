use anyhow::Context;
use artifact_parser::{Listing, TimeFilter};
use clap::Parser;
use pattern_miner::{prepare_run, RunRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use visualizer_core::ErrorExt;

fn parse_listing(token: &str) -> Result<Listing, String> {
    Listing::from_token(token).ok_or_else(|| "expected one of hot, new, top, controversial".to_string())
}

fn parse_time_filter(token: &str) -> Result<TimeFilter, String> {
    TimeFilter::from_token(token).ok_or_else(|| "expected one of day, week, month, year, all".to_string())
}

/// Tokenize a file of post titles into a run directory for `build-tree`.
#[derive(Debug, Parser)]
#[command(name = "prepare-run", version)]
struct Args {
    /// Subreddit the titles were scraped from
    #[arg(short, long)]
    subreddit: String,

    /// Number of posts to keep
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    num_posts: u64,

    /// Listing the titles come from
    #[arg(short, long, default_value = "top", value_parser = parse_listing)]
    listing: Listing,

    /// Time filter. Used only for top and controversial
    #[arg(short, long, default_value = "all", value_parser = parse_time_filter)]
    time_filter: TimeFilter,

    /// Directory to save the data
    #[arg(short, long, default_value = "data")]
    directory: PathBuf,

    /// File with one post title per line
    #[arg(long)]
    titles: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pattern_miner=info,prepare_run=info")),
        )
        .init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.titles)
        .with_context(|| format!("Cannot read titles from {}", args.titles.display()))?;
    let titles: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let request = RunRequest {
        subreddit: args.subreddit,
        num_posts: usize::try_from(args.num_posts)?,
        listing: args.listing,
        time_filter: args.time_filter,
    };

    let run_dir = prepare_run(&args.directory, &request, &titles, chrono::Local::now())
        .map_err(|e| anyhow::anyhow!(e.log_error().user_friendly_message()))?;

    println!("{}", run_dir.display());
    Ok(())
}
