//! Builds the Eclat / dEclat pattern trees that the visualizer displays,
//! from the `data.json` and `tokens_map.json` of a scraped run. The
//! `prepare` module writes those run files from raw post titles.

pub mod builder;
pub mod dataset;
pub mod prepare;

pub use builder::mine;
pub use dataset::Dataset;
pub use prepare::{prepare_run, RunRequest};

use artifact_parser::{ArtifactParser, DataParser, TokensMapParser, TreeFile};
use std::path::{Path, PathBuf};
use tracing::info;
use visualizer_core::{CoreError, MiningError, TreeVariant};

fn read_artifact<P: ArtifactParser>(parser: P, directory: &Path) -> Result<P::Model, CoreError> {
    let file = parser.kind().file_name();
    let path = directory.join(file);
    let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::Mining(MiningError::MissingFile {
            file: file.to_string(),
            directory: directory.display().to_string(),
        }),
        _ => CoreError::Io(e),
    })?;
    Ok(parser.parse(&text)?)
}

pub fn load_dataset(directory: &Path) -> Result<Dataset, CoreError> {
    info!("Reading data...");
    let tokens_map = read_artifact(TokensMapParser, directory)?;
    let entries = read_artifact(DataParser, directory)?;

    info!("Validating tokens map and data...");
    Ok(Dataset::new(&entries, &tokens_map)?)
}

pub fn build_tree_file(dataset: &Dataset, min_support: u64, variant: TreeVariant) -> Result<TreeFile, CoreError> {
    if min_support < 1 {
        return Err(MiningError::InvalidSupport { value: min_support }.into());
    }
    let threshold = usize::try_from(min_support).map_err(|_| MiningError::InvalidSupport { value: min_support })?;

    info!("Building {} tree...", variant);
    let root = mine(dataset, threshold, variant);
    info!(
        "{} tree has {} nodes over {} levels",
        variant,
        root.node_count(),
        root.depth()
    );

    Ok(TreeFile {
        min_support: min_support as f64,
        variant,
        root,
    })
}

pub fn save_tree(tree: &TreeFile, directory: &Path) -> Result<PathBuf, CoreError> {
    let path = directory.join(tree.variant.file_name());
    let json = serde_json::to_string_pretty(tree)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Loads a run directory, mines it, and writes `<variant>.json` next to the
/// inputs. Returns the path written.
pub fn build_tree(directory: &Path, min_support: u64, variant: TreeVariant) -> Result<PathBuf, CoreError> {
    let dataset = load_dataset(directory)?;
    let tree = build_tree_file(&dataset, min_support, variant)?;

    info!("Saving {} tree...", variant);
    let path = save_tree(&tree, directory)?;
    info!("All good! {} tree saved to {}", variant, path.display());
    Ok(path)
}
