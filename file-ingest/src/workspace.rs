use crate::panel::{Panel, PanelOutcome, ReadTicket};
use crate::picker::{FileSelection, FileSlot};
use artifact_parser::{
    DataEntry, DataParser, Metadata, MetadataParser, TokensMapEntry, TokensMapParser, TreeFile,
    TreeParser,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use visualizer_core::{Notifier, ReadError, TreeVariant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTicket {
    pub slot: FileSlot,
    pub ticket: ReadTicket,
}

/// The application shell state: one panel per slot plus the selection that
/// feeds them.
///
/// A new batch replaces the whole selection. Slots whose file is missing
/// from the batch are cleared and their panels reset.
pub struct Workspace {
    selection: FileSelection,
    metadata: Panel<MetadataParser>,
    data: Panel<DataParser>,
    tokens_map: Panel<TokensMapParser>,
    declat: Panel<TreeParser>,
    eclat: Panel<TreeParser>,
}

impl Workspace {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            selection: FileSelection::default(),
            metadata: Panel::new(MetadataParser, notifier.clone()),
            data: Panel::new(DataParser, notifier.clone()),
            tokens_map: Panel::new(TokensMapParser, notifier.clone()),
            declat: Panel::new(TreeParser::new(TreeVariant::Declat), notifier.clone()),
            eclat: Panel::new(TreeParser::new(TreeVariant::Eclat), notifier),
        }
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    /// Applies a new batch of files and returns the reads to perform.
    pub fn apply_batch(&mut self, files: &[PathBuf]) -> Vec<SlotTicket> {
        self.selection = FileSelection::from_batch(files);
        info!(
            "Selected {} of {} files: {:?}",
            self.selection.len(),
            files.len(),
            self.selection.iter().map(|(slot, _)| slot).collect::<Vec<_>>()
        );

        FileSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                let file = self.selection.get(slot).map(PathBuf::from);
                self.select(slot, file)
                    .map(|ticket| SlotTicket { slot, ticket })
            })
            .collect()
    }

    fn select(&mut self, slot: FileSlot, file: Option<PathBuf>) -> Option<ReadTicket> {
        match slot {
            FileSlot::Metadata => self.metadata.select_file(file),
            FileSlot::Data => self.data.select_file(file),
            FileSlot::TokensMap => self.tokens_map.select_file(file),
            FileSlot::DeclatTree => self.declat.select_file(file),
            FileSlot::EclatTree => self.eclat.select_file(file),
        }
    }

    pub fn complete_read(
        &mut self,
        slot: FileSlot,
        generation: u64,
        result: Result<String, ReadError>,
    ) -> PanelOutcome {
        match slot {
            FileSlot::Metadata => self.metadata.complete_read(generation, result),
            FileSlot::Data => self.data.complete_read(generation, result),
            FileSlot::TokensMap => self.tokens_map.complete_read(generation, result),
            FileSlot::DeclatTree => self.declat.complete_read(generation, result),
            FileSlot::EclatTree => self.eclat.complete_read(generation, result),
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.model()
    }

    pub fn data(&self) -> Option<&Vec<DataEntry>> {
        self.data.model()
    }

    pub fn tokens_map(&self) -> Option<&Vec<TokensMapEntry>> {
        self.tokens_map.model()
    }

    pub fn tree(&self, variant: TreeVariant) -> Option<&TreeFile> {
        match variant {
            TreeVariant::Declat => self.declat.model(),
            TreeVariant::Eclat => self.eclat.model(),
        }
    }

    pub fn is_loaded(&self, slot: FileSlot) -> bool {
        match slot {
            FileSlot::Metadata => self.metadata.is_loaded(),
            FileSlot::Data => self.data.is_loaded(),
            FileSlot::TokensMap => self.tokens_map.is_loaded(),
            FileSlot::DeclatTree => self.declat.is_loaded(),
            FileSlot::EclatTree => self.eclat.is_loaded(),
        }
    }
}
