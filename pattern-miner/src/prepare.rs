//! Turns a batch of post titles into a run directory: `data.json`,
//! `tokens_map.json` and `metadata.json`, ready for `build_tree`.

use artifact_parser::{data_entries_to_json, metadata_to_json, tokens_map_to_json};
use artifact_parser::{DataEntry, Listing, Metadata, TimeFilter, TokensMapEntry};
use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use visualizer_core::CoreError;

lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^a-zA-Z\s]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// What a run is scraped with. `num_posts` is the number requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub subreddit: String,
    pub num_posts: usize,
    pub listing: Listing,
    pub time_filter: TimeFilter,
}

pub fn remove_non_alpha(title: &str) -> String {
    NON_ALPHA.replace_all(title, "").into_owned()
}

/// Lowercased English stems of the whitespace-separated words of `title`.
pub fn stem(title: &str) -> Vec<String> {
    title
        .split_whitespace()
        .map(|word| STEMMER.stem(&word.to_lowercase()).into_owned())
        .collect()
}

/// Keeps the first occurrence of every token.
pub fn remove_duplicates(tokens: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

/// Numbers tokens in order of first appearance across all rows.
pub fn create_token_ids(rows: &[Vec<String>]) -> (Vec<Vec<i64>>, Vec<TokensMapEntry>) {
    let mut ids: HashMap<&str, i64> = HashMap::new();
    let mut tokens_map = Vec::new();

    let rows = rows
        .iter()
        .map(|tokens| {
            tokens
                .iter()
                .map(|token| {
                    *ids.entry(token.as_str()).or_insert_with(|| {
                        let id = tokens_map.len() as i64;
                        tokens_map.push(TokensMapEntry {
                            id,
                            token: token.clone(),
                        });
                        id
                    })
                })
                .collect()
        })
        .collect();

    (rows, tokens_map)
}

/// Cleans, stems and numbers every title. Entries keep the title as given.
pub fn tokenize_titles(titles: &[String]) -> (Vec<DataEntry>, Vec<TokensMapEntry>) {
    info!("Removing non-alphabetic characters and stemming titles...");
    let stemmed: Vec<Vec<String>> = titles
        .iter()
        .map(|title| remove_duplicates(stem(&remove_non_alpha(title))))
        .collect();

    info!("Creating token ids...");
    let (rows, tokens_map) = create_token_ids(&stemmed);
    let entries = titles
        .iter()
        .zip(rows)
        .map(|(title, tokens)| DataEntry {
            title: title.clone(),
            tokens,
        })
        .collect();

    (entries, tokens_map)
}

/// `{subreddit}_{num_posts}_{listing}[_{time_filter}]_{YYYYmmdd_HHMMSS}`
pub fn run_directory_name(metadata: &Metadata, at: DateTime<Local>) -> String {
    let mut name = format!(
        "{}_{}_{}",
        metadata.subreddit, metadata.num_posts, metadata.listing
    );
    if let Some(filter) = metadata.time_filter {
        name.push('_');
        name.push_str(filter.as_str());
    }
    name.push('_');
    name.push_str(&at.format("%Y%m%d_%H%M%S").to_string());
    name
}

/// Metadata for the titles actually collected. Fewer titles than requested
/// lowers `num_posts` with a warning.
pub fn run_metadata(request: &RunRequest, found: usize) -> Metadata {
    if found < request.num_posts {
        warn!("Only {} posts found", found);
    }
    let num_posts = found.min(request.num_posts);

    Metadata {
        subreddit: request.subreddit.to_lowercase(),
        listing: request.listing,
        num_posts: num_posts as i64,
        time_filter: request
            .listing
            .takes_time_filter()
            .then_some(request.time_filter),
    }
}

fn write_json(path: &Path, value: &Value) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Writes the three run artifacts into `run_dir`, creating it if needed.
pub fn write_run(
    run_dir: &Path,
    metadata: &Metadata,
    entries: &[DataEntry],
    tokens_map: &[TokensMapEntry],
) -> Result<(), CoreError> {
    std::fs::create_dir_all(run_dir)?;
    write_json(&run_dir.join("data.json"), &data_entries_to_json(entries))?;
    write_json(&run_dir.join("tokens_map.json"), &tokens_map_to_json(tokens_map))?;
    write_json(&run_dir.join("metadata.json"), &metadata_to_json(metadata))?;
    Ok(())
}

/// Prepares a run under `directory` from the given titles and returns the
/// run directory written.
pub fn prepare_run(
    directory: &Path,
    request: &RunRequest,
    titles: &[String],
    at: DateTime<Local>,
) -> Result<PathBuf, CoreError> {
    if titles.is_empty() {
        return Err(CoreError::InvalidInput {
            message: format!("No posts to save for r/{}", request.subreddit),
        });
    }

    let metadata = run_metadata(request, titles.len());
    let titles = &titles[..metadata.num_posts as usize];
    let (entries, tokens_map) = tokenize_titles(titles);

    info!("Saving data...");
    let run_dir = directory.join(run_directory_name(&metadata, at));
    write_run(&run_dir, &metadata, &entries, &tokens_map)?;
    info!("All good! Data saved to {}", run_dir.display());
    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn request(listing: Listing, num_posts: usize) -> RunRequest {
        RunRequest {
            subreddit: "Rust".to_string(),
            num_posts,
            listing,
            time_filter: TimeFilter::Week,
        }
    }

    #[test]
    fn test_remove_non_alpha() {
        assert_eq!(remove_non_alpha("Hello, world!"), "Hello world");
        assert_eq!(remove_non_alpha(" Hello,,,   wor234ld!"), " Hello   world");
        assert_eq!(remove_non_alpha(""), "");
    }

    #[test]
    fn test_remove_duplicates() {
        assert_eq!(
            remove_duplicates(strings(&["hello", "world", "hello"])),
            strings(&["hello", "world"])
        );
        assert!(remove_duplicates(Vec::new()).is_empty());
    }

    #[test]
    fn test_stem_lowercases_words() {
        assert_eq!(stem("Running dogs"), strings(&["run", "dog"]));
        assert!(stem("   ").is_empty());
    }

    #[test]
    fn test_create_token_ids() {
        let rows = vec![
            strings(&["hello", "world"]),
            Vec::new(),
            strings(&["hey", "hello", "world"]),
            strings(&["hey", "welcome"]),
        ];

        let (ids, tokens_map) = create_token_ids(&rows);
        assert_eq!(ids, vec![vec![0, 1], vec![], vec![2, 0, 1], vec![2, 3]]);

        let map: Vec<(i64, &str)> = tokens_map.iter().map(|e| (e.id, e.token.as_str())).collect();
        assert_eq!(map, vec![(0, "hello"), (1, "world"), (2, "hey"), (3, "welcome")]);
    }

    #[test]
    fn test_create_token_ids_empty() {
        let (ids, tokens_map) = create_token_ids(&[]);
        assert!(ids.is_empty());
        assert!(tokens_map.is_empty());
    }

    #[test]
    fn test_tokenize_titles_keeps_raw_titles() {
        let titles = strings(&["Rust 2024!", "rust rust"]);
        let (entries, tokens_map) = tokenize_titles(&titles);

        assert_eq!(entries[0].title, "Rust 2024!");
        assert_eq!(entries[0].tokens, vec![0]);
        assert_eq!(entries[1].tokens, vec![0]);
        assert_eq!(tokens_map.len(), 1);
        assert_eq!(tokens_map[0].token, "rust");
    }

    #[test]
    fn test_run_directory_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        let top = run_metadata(&request(Listing::Top, 50), 50);
        assert_eq!(run_directory_name(&top, at), "rust_50_top_week_20240309_140507");

        let new = run_metadata(&request(Listing::New, 50), 50);
        assert_eq!(run_directory_name(&new, at), "rust_50_new_20240309_140507");
    }

    #[test]
    fn test_run_metadata_lowers_num_posts_to_what_was_found() {
        let metadata = run_metadata(&request(Listing::Hot, 100), 12);
        assert_eq!(metadata.num_posts, 12);
        assert_eq!(metadata.subreddit, "rust");
        assert_eq!(metadata.time_filter, None);

        let metadata = run_metadata(&request(Listing::Controversial, 5), 12);
        assert_eq!(metadata.num_posts, 5);
        assert_eq!(metadata.time_filter, Some(TimeFilter::Week));
    }
}
