use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which mining algorithm produced a tree file.
///
/// Both variants share the same node shape; the variant only decides how the
/// id set of each node is labelled when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeVariant {
    Eclat,
    Declat,
}

impl TreeVariant {
    pub const ALL: [TreeVariant; 2] = [TreeVariant::Declat, TreeVariant::Eclat];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreeVariant::Eclat => "eclat",
            TreeVariant::Declat => "declat",
        }
    }

    pub fn id_set_label(&self) -> &'static str {
        match self {
            TreeVariant::Eclat => "Transaction ids",
            TreeVariant::Declat => "Diffset ids",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            TreeVariant::Eclat => "eclat.json",
            TreeVariant::Declat => "declat.json",
        }
    }
}

impl fmt::Display for TreeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of JSON artifact a mining run leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Metadata,
    Data,
    TokensMap,
    Tree(TreeVariant),
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Metadata => "metadata.json",
            ArtifactKind::Data => "data.json",
            ArtifactKind::TokensMap => "tokens_map.json",
            ArtifactKind::Tree(variant) => variant.file_name(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Metadata => "metadata",
            ArtifactKind::Data => "data",
            ArtifactKind::TokensMap => "tokens map",
            ArtifactKind::Tree(_) => "tree",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long an error toast stays on screen.
    pub toast_duration_ms: u64,
    /// Mirror error toasts as desktop notifications.
    pub desktop_notifications: bool,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Files or directories loaded at startup, before any command line paths.
    pub initial_paths: Vec<PathBuf>,
    /// Horizontal indentation per tree level.
    pub tree_indent_px: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 5000,
            desktop_notifications: false,
            log_filter: "pattern_visualizer=info,gui=info,file_ingest=info".to_string(),
            initial_paths: Vec::new(),
            tree_indent_px: 24.0,
        }
    }
}
