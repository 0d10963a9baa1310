use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use visualizer_core::{ArtifactKind, ReadError, TreeVariant};

/// The artifact slots the visualizer can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileSlot {
    Metadata,
    Data,
    TokensMap,
    DeclatTree,
    EclatTree,
}

impl FileSlot {
    pub const ALL: [FileSlot; 5] = [
        FileSlot::Metadata,
        FileSlot::Data,
        FileSlot::TokensMap,
        FileSlot::DeclatTree,
        FileSlot::EclatTree,
    ];

    /// File names accepted for this slot, canonical name first.
    pub fn expected_names(&self) -> &'static [&'static str] {
        match self {
            FileSlot::Metadata => &["metadata.json"],
            FileSlot::Data => &["data.json"],
            FileSlot::TokensMap => &["tokens_map.json", "tokens-map.json"],
            FileSlot::DeclatTree => &["declat.json", "declat-tree.json"],
            FileSlot::EclatTree => &["eclat.json"],
        }
    }

    /// Exact, case-sensitive match on the file name.
    pub fn classify(file_name: &str) -> Option<FileSlot> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.expected_names().contains(&file_name))
    }

    pub fn classify_path(path: &Path) -> Option<FileSlot> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::classify)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FileSlot::Metadata => "Metadata",
            FileSlot::Data => "Data",
            FileSlot::TokensMap => "Tokens map",
            FileSlot::DeclatTree => "dEclat tree",
            FileSlot::EclatTree => "Eclat tree",
        }
    }

    pub fn artifact(&self) -> ArtifactKind {
        match self {
            FileSlot::Metadata => ArtifactKind::Metadata,
            FileSlot::Data => ArtifactKind::Data,
            FileSlot::TokensMap => ArtifactKind::TokensMap,
            FileSlot::DeclatTree => ArtifactKind::Tree(TreeVariant::Declat),
            FileSlot::EclatTree => ArtifactKind::Tree(TreeVariant::Eclat),
        }
    }
}

/// Which file currently fills each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    slots: BTreeMap<FileSlot, PathBuf>,
}

impl FileSelection {
    /// Classifies a batch of files. Unknown names are ignored and the first
    /// file seen for a slot wins.
    pub fn from_batch(paths: &[PathBuf]) -> Self {
        let mut slots = BTreeMap::new();
        for path in paths {
            match FileSlot::classify_path(path) {
                Some(slot) => {
                    slots.entry(slot).or_insert_with(|| path.clone());
                }
                None => debug!("Ignoring unrecognised file {}", path.display()),
            }
        }
        Self { slots }
    }

    pub fn get(&self, slot: FileSlot) -> Option<&Path> {
        self.slots.get(&slot).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileSlot, &Path)> {
        self.slots.iter().map(|(slot, path)| (*slot, path.as_path()))
    }
}

/// Turns user supplied paths into a flat file list. Directories contribute
/// their direct entries in name order; anything else is passed through and
/// left for the reader to reject.
pub async fn expand_selection(paths: Vec<PathBuf>) -> Result<Vec<PathBuf>, ReadError> {
    let mut files = Vec::new();

    for path in paths {
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);

        if !is_dir {
            files.push(path);
            continue;
        }

        let io_error = |e: std::io::Error| ReadError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        let mut entries = tokio::fs::read_dir(&path).await.map_err(io_error)?;
        let mut listed = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            listed.push(entry.path());
        }
        listed.sort();
        info!("Expanded {} into {} entries", path.display(), listed.len());
        files.extend(listed);
    }

    Ok(files)
}
