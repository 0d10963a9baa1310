//! File ingestion for the display panels: reading selected files, routing them
//! to the right parser, and keeping each panel's model in step with the most
//! recent selection.

pub mod desktop;
pub mod panel;
pub mod picker;
pub mod reader;
pub mod workspace;

pub use desktop::DesktopNotifier;
pub use panel::{Panel, PanelOutcome, ReadTicket};
pub use picker::{expand_selection, FileSelection, FileSlot};
pub use reader::{read_text, spawn_read};
pub use workspace::{SlotTicket, Workspace};

#[cfg(test)]
mod tests;
