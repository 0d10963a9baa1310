use artifact_parser::ArtifactParser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use visualizer_core::{ArtifactKind, CoreError, ErrorExt, ErrorReporter, Notifier, ReadError};

/// A read the panel wants performed. The generation must be handed back with
/// the result so that late completions can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    pub generation: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Loaded,
    Rejected,
    ReadFailed,
    /// The completion belonged to an older selection and was ignored.
    Stale,
}

/// Owns one artifact slot: the selected file and the model parsed from it.
pub struct Panel<P: ArtifactParser> {
    parser: P,
    notifier: Arc<dyn Notifier>,
    reporter: ErrorReporter,
    file: Option<PathBuf>,
    generation: u64,
    model: Option<P::Model>,
}

impl<P: ArtifactParser> Panel<P> {
    pub fn new(parser: P, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            parser,
            notifier,
            reporter: ErrorReporter::new().with_warning_reporting(false),
            file: None,
            generation: 0,
            model: None,
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.parser.kind()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn model(&self) -> Option<&P::Model> {
        self.model.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches the panel to a new file. Any read still in flight becomes
    /// stale. Clearing the file also clears the model.
    pub fn select_file(&mut self, file: Option<PathBuf>) -> Option<ReadTicket> {
        self.generation += 1;
        self.file = file;

        match &self.file {
            Some(path) => {
                debug!(
                    "{} panel requesting read of {} (generation {})",
                    self.kind(),
                    path.display(),
                    self.generation
                );
                Some(ReadTicket {
                    generation: self.generation,
                    path: path.clone(),
                })
            }
            None => {
                self.model = None;
                None
            }
        }
    }

    pub fn complete_read(
        &mut self,
        generation: u64,
        result: Result<String, ReadError>,
    ) -> PanelOutcome {
        if generation != self.generation {
            debug!(
                "{} panel discarding stale read (generation {} < {})",
                self.kind(),
                generation,
                self.generation
            );
            return PanelOutcome::Stale;
        }

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                self.fail(CoreError::Read(e));
                return PanelOutcome::ReadFailed;
            }
        };

        match self.parser.parse(&text) {
            Ok(model) => {
                info!("{} panel loaded {}", self.kind(), self.display_name());
                self.model = Some(model);
                PanelOutcome::Loaded
            }
            Err(e) => {
                self.fail(CoreError::Artifact(e));
                PanelOutcome::Rejected
            }
        }
    }

    fn display_name(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.kind().file_name().to_string())
    }

    fn fail(&mut self, error: CoreError) {
        self.reporter.report_error(&error);
        let message = format!(
            "Cannot read file {}: {}",
            self.display_name(),
            error.user_friendly_message()
        );
        self.notifier.report_error(&message);
        self.model = None;
    }
}
