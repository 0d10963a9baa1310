pub mod grid;
pub mod toast;
pub mod tree_view;

pub use grid::{GridKind, GridRow, GridState, SortDirection};
pub use toast::{Toast, ToastStore};
pub use tree_view::{join_or_empty, NodeCard, TreeViewState};

use artifact_parser::{Metadata, TreeFile};
use chrono::Utc;
use file_ingest::{expand_selection, read_text, FileSlot, PanelOutcome, SlotTicket, Workspace};
use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{theme, Alignment, Color, Command, Element, Length, Subscription};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use visualizer_core::{
    AppConfig, CoreError, ErrorExt, FanoutNotifier, Notifier, ReadError, TreeVariant,
};

const ERROR_COLOR: Color = Color {
    r: 0.75,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};
const MUTED_COLOR: Color = Color {
    r: 0.45,
    g: 0.45,
    b: 0.45,
    a: 1.0,
};

#[derive(Debug, Clone)]
pub enum Message {
    PathInputChanged(String),
    LoadRequested,
    SelectionExpanded(Result<Vec<PathBuf>, ReadError>),
    FileRead {
        slot: FileSlot,
        generation: u64,
        result: Result<String, ReadError>,
    },
    SortBy(GridKind, usize),
    FilterChanged(GridKind, String),
    ToggleNode(TreeVariant, Vec<usize>),
    TogglePanel(FileSlot),
    OpenSubreddit,
    DismissToast(u64),
    Tick,
}

/// Splits the path field on `;` and newlines.
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub struct App {
    config: AppConfig,
    workspace: Workspace,
    toasts: ToastStore,
    notifier: Arc<dyn Notifier>,
    path_input: String,
    data_grid: GridState,
    tokens_grid: GridState,
    declat_view: TreeViewState,
    eclat_view: TreeViewState,
    collapsed: BTreeSet<FileSlot>,
}

impl App {
    /// Panels report to the toast store first, then to each of `notifiers`.
    pub fn new(config: AppConfig, notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        let toasts = ToastStore::new(Duration::from_millis(config.toast_duration_ms));
        let fanout = notifiers.into_iter().fold(
            FanoutNotifier::new().with(Arc::new(toasts.clone())),
            FanoutNotifier::with,
        );
        let notifier: Arc<dyn Notifier> = Arc::new(fanout);

        Self {
            config,
            workspace: Workspace::new(notifier.clone()),
            toasts,
            notifier,
            path_input: String::new(),
            data_grid: GridState::default(),
            tokens_grid: GridState::default(),
            declat_view: TreeViewState::default(),
            eclat_view: TreeViewState::default(),
            collapsed: BTreeSet::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    /// Logs `error` and shows it to the user.
    pub fn report(&self, error: &CoreError) {
        error.log_error();
        self.notifier.report_error(&error.user_friendly_message());
    }

    /// Starts loading a selection of files and directories.
    pub fn load_paths(&mut self, paths: Vec<PathBuf>) -> Command<Message> {
        if paths.is_empty() {
            return Command::none();
        }
        self.path_input = paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("; ");
        info!("Loading {} selected paths", paths.len());
        Command::perform(expand_selection(paths), Message::SelectionExpanded)
    }

    fn apply_selection(&mut self, files: Vec<PathBuf>) -> Command<Message> {
        let tickets = self.workspace.apply_batch(&files);
        if self.workspace.selection().is_empty() {
            warn!("None of the {} selected files is a known artifact", files.len());
        }

        Command::batch(tickets.into_iter().map(|SlotTicket { slot, ticket }| {
            let generation = ticket.generation;
            Command::perform(read_text(ticket.path), move |result| Message::FileRead {
                slot,
                generation,
                result,
            })
        }))
    }

    fn reset_view(&mut self, slot: FileSlot) {
        match slot {
            FileSlot::Metadata => {}
            FileSlot::Data => self.data_grid = GridState::default(),
            FileSlot::TokensMap => self.tokens_grid = GridState::default(),
            FileSlot::DeclatTree => self.declat_view = TreeViewState::default(),
            FileSlot::EclatTree => self.eclat_view = TreeViewState::default(),
        }
    }

    fn grid_mut(&mut self, kind: GridKind) -> &mut GridState {
        match kind {
            GridKind::Data => &mut self.data_grid,
            GridKind::TokensMap => &mut self.tokens_grid,
        }
    }

    fn tree_view_mut(&mut self, variant: TreeVariant) -> &mut TreeViewState {
        match variant {
            TreeVariant::Declat => &mut self.declat_view,
            TreeVariant::Eclat => &mut self.eclat_view,
        }
    }

    pub fn update(&mut self, message: Message) -> Result<Command<Message>, CoreError> {
        match message {
            Message::PathInputChanged(value) => {
                self.path_input = value;
                Ok(Command::none())
            }
            Message::LoadRequested => {
                let paths = parse_paths(&self.path_input);
                if paths.is_empty() {
                    return Err(CoreError::InvalidInput {
                        message: "Enter at least one file or directory".to_string(),
                    });
                }
                Ok(self.load_paths(paths))
            }
            Message::SelectionExpanded(result) => {
                let files = result?;
                Ok(self.apply_selection(files))
            }
            Message::FileRead {
                slot,
                generation,
                result,
            } => {
                let outcome = self.workspace.complete_read(slot, generation, result);
                debug!("{:?} read completed: {:?}", slot, outcome);
                if outcome != PanelOutcome::Stale {
                    self.reset_view(slot);
                }
                Ok(Command::none())
            }
            Message::SortBy(kind, column) => {
                self.grid_mut(kind).toggle_sort(column);
                Ok(Command::none())
            }
            Message::FilterChanged(kind, filter) => {
                self.grid_mut(kind).set_filter(filter);
                Ok(Command::none())
            }
            Message::ToggleNode(variant, path) => {
                self.tree_view_mut(variant).toggle(path);
                Ok(Command::none())
            }
            Message::TogglePanel(slot) => {
                if !self.collapsed.remove(&slot) {
                    self.collapsed.insert(slot);
                }
                Ok(Command::none())
            }
            Message::OpenSubreddit => {
                let metadata = self.workspace.metadata().ok_or_else(|| CoreError::NotFound {
                    resource: "metadata".to_string(),
                })?;
                let url = metadata
                    .subreddit_url()
                    .map_err(|e| CoreError::InvalidInput {
                        message: format!("Cannot build subreddit URL: {e}"),
                    })?;
                info!("Opening {}", url);
                open::that(url.as_str())?;
                Ok(Command::none())
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Ok(Command::none())
            }
            Message::Tick => {
                let expired = self.toasts.expire(Utc::now());
                if expired > 0 {
                    debug!("Expired {} toasts", expired);
                }
                Ok(Command::none())
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.toasts.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(Duration::from_millis(250)).map(|_| Message::Tick)
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Pattern Visualizer").size(24),
            text_input("Files or directories, separated by ;", &self.path_input)
                .on_input(Message::PathInputChanged)
                .on_submit(Message::LoadRequested)
                .padding(8),
            button("Load").on_press(Message::LoadRequested),
        ]
        .spacing(16)
        .align_items(Alignment::Center);

        let panels = Column::with_children(
            FileSlot::ALL
                .into_iter()
                .map(|slot| self.panel_frame(slot))
                .collect::<Vec<_>>(),
        )
        .spacing(16);

        container(
            column![
                header,
                self.toast_column(),
                scrollable(panels).height(Length::Fill)
            ]
            .spacing(16),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .into()
    }

    fn toast_column(&self) -> Element<'_, Message> {
        let toasts = self.toasts.active();
        if toasts.is_empty() {
            return Space::with_height(Length::Fixed(0.0)).into();
        }

        let cards = Column::with_children(
            toasts
                .into_iter()
                .map(|toast| {
                    container(
                        row![
                            column![
                                text("Invalid file format!").size(14).style(ERROR_COLOR),
                                text(toast.message).size(13),
                            ]
                            .spacing(4)
                            .width(Length::Fill),
                            button("x").on_press(Message::DismissToast(toast.id)),
                        ]
                        .spacing(8),
                    )
                    .padding(10)
                    .width(Length::Fixed(360.0))
                    .style(theme::Container::Box)
                    .into()
                })
                .collect::<Vec<_>>(),
        )
        .spacing(8);

        row![Space::with_width(Length::Fill), cards].into()
    }

    fn panel_frame(&self, slot: FileSlot) -> Element<'_, Message> {
        let collapsed = self.collapsed.contains(&slot);
        let marker = if collapsed { "+" } else { "-" };
        let file = self
            .workspace
            .selection()
            .get(slot)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("expects {}", slot.expected_names()[0]));

        let heading = row![
            button(text(format!("{marker} {}", slot.title()))).on_press(Message::TogglePanel(slot)),
            text(file).size(13).style(MUTED_COLOR),
        ]
        .spacing(12)
        .align_items(Alignment::Center);

        let mut frame = Column::new().push(heading).spacing(8);
        if !collapsed {
            frame = frame.push(self.panel_body(slot));
        }

        container(frame)
            .padding(12)
            .width(Length::Fill)
            .style(theme::Container::Box)
            .into()
    }

    fn panel_body(&self, slot: FileSlot) -> Element<'_, Message> {
        let body = match slot {
            FileSlot::Metadata => self.workspace.metadata().map(metadata_view),
            FileSlot::Data => self
                .workspace
                .data()
                .map(|rows| grid_view(GridKind::Data, &self.data_grid, rows)),
            FileSlot::TokensMap => self
                .workspace
                .tokens_map()
                .map(|rows| grid_view(GridKind::TokensMap, &self.tokens_grid, rows)),
            FileSlot::DeclatTree => self
                .workspace
                .tree(TreeVariant::Declat)
                .map(|tree| self.tree_view(tree, &self.declat_view)),
            FileSlot::EclatTree => self
                .workspace
                .tree(TreeVariant::Eclat)
                .map(|tree| self.tree_view(tree, &self.eclat_view)),
        };

        body.unwrap_or_else(|| text("No file loaded").size(14).style(MUTED_COLOR).into())
    }

    fn tree_view<'a>(&'a self, tree: &'a TreeFile, state: &'a TreeViewState) -> Element<'a, Message> {
        let variant = tree.variant;
        let label = tree.id_set_label();
        let indent = self.config.tree_indent_px;

        let nodes = state.visible_nodes(&tree.root).into_iter().map(|(path, node)| {
            let toggle: Element<'_, Message> = if node.children.is_empty() {
                Space::with_width(Length::Fixed(28.0)).into()
            } else {
                let marker = if state.is_expanded(&path) { "-" } else { "+" };
                button(text(marker))
                    .width(Length::Fixed(28.0))
                    .on_press(Message::ToggleNode(variant, path.clone()))
                    .into()
            };

            let lines = NodeCard::new(node, label);
            let card = container(
                column![
                    text(lines.title).size(16),
                    text(lines.support).size(13),
                    text(lines.id_set_len).size(13),
                    text(lines.tokens_ids).size(12).style(MUTED_COLOR),
                    text(lines.id_set).size(12).style(MUTED_COLOR),
                ]
                .spacing(2),
            )
            .padding(8)
            .style(theme::Container::Box);

            row![
                Space::with_width(Length::Fixed(path.len() as f32 * indent)),
                toggle,
                card
            ]
            .spacing(6)
            .align_items(Alignment::Start)
            .into()
        });

        column![
            text(format!("Minimum support: {}", tree.min_support)).size(14),
            Column::with_children(nodes.collect::<Vec<_>>()).spacing(6),
        ]
        .spacing(8)
        .into()
    }
}

fn metadata_view(metadata: &Metadata) -> Element<'_, Message> {
    let mut summary = format!(
        "r/{} | {} | {} posts",
        metadata.subreddit, metadata.listing, metadata.num_posts
    );
    if let Some(filter) = metadata.time_filter {
        summary.push_str(&format!(" | {filter}"));
    }

    row![
        text(summary).size(16),
        button("Go to subreddit").on_press(Message::OpenSubreddit),
    ]
    .spacing(16)
    .align_items(Alignment::Center)
    .into()
}

fn grid_view<'a, R: GridRow>(
    kind: GridKind,
    state: &'a GridState,
    rows: &'a [R],
) -> Element<'a, Message> {
    let filter = text_input("Filter", state.filter())
        .on_input(move |value| Message::FilterChanged(kind, value))
        .padding(6);

    let mut header: Vec<Element<'a, Message>> =
        vec![text("#").width(Length::Fixed(60.0)).into()];
    for (column, name) in R::COLUMNS.iter().enumerate() {
        let arrow = match state.sort() {
            Some((sorted, SortDirection::Ascending)) if sorted == column => " ^",
            Some((sorted, SortDirection::Descending)) if sorted == column => " v",
            _ => "",
        };
        header.push(
            button(text(format!("{name}{arrow}")))
                .on_press(Message::SortBy(kind, column))
                .width(Length::FillPortion(1))
                .into(),
        );
    }

    let visible = state.visible_rows(rows);
    let count = text(format!("{} of {} rows", visible.len(), rows.len()))
        .size(12)
        .style(MUTED_COLOR);

    let body = visible.into_iter().map(|(index, row)| {
        let mut cells: Vec<Element<'a, Message>> =
            vec![text(index).width(Length::Fixed(60.0)).into()];
        cells.extend((0..R::COLUMNS.len()).map(|column| {
            text(row.cell(column))
                .size(14)
                .width(Length::FillPortion(1))
                .into()
        }));
        Row::with_children(cells).spacing(8).into()
    });

    column![
        filter,
        count,
        Row::with_children(header).spacing(8),
        Column::with_children(body.collect::<Vec<_>>()).spacing(4),
    ]
    .spacing(8)
    .into()
}
