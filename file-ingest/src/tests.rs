use crate::{expand_selection, read_text, spawn_read, FileSelection, FileSlot, Panel, PanelOutcome, Workspace};
use artifact_parser::{MetadataParser, TreeParser};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use visualizer_core::{Notifier, ReadError, TreeVariant};

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

const METADATA: &str = r#"{"subreddit": "rust", "listing": "top", "num_posts": 50, "time_filter": "month"}"#;
const OTHER_METADATA: &str = r#"{"subreddit": "golang", "listing": "hot", "num_posts": 10}"#;

fn temp_run_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("file_ingest_test_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

fn metadata_panel() -> (Panel<MetadataParser>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (Panel::new(MetadataParser, notifier.clone()), notifier)
}

#[test]
fn test_classify_exact_names_only() {
    assert_eq!(FileSlot::classify("metadata.json"), Some(FileSlot::Metadata));
    assert_eq!(FileSlot::classify("data.json"), Some(FileSlot::Data));
    assert_eq!(FileSlot::classify("tokens_map.json"), Some(FileSlot::TokensMap));
    assert_eq!(FileSlot::classify("tokens-map.json"), Some(FileSlot::TokensMap));
    assert_eq!(FileSlot::classify("declat.json"), Some(FileSlot::DeclatTree));
    assert_eq!(FileSlot::classify("declat-tree.json"), Some(FileSlot::DeclatTree));
    assert_eq!(FileSlot::classify("eclat.json"), Some(FileSlot::EclatTree));
    assert_eq!(FileSlot::classify("Metadata.json"), None);
    assert_eq!(FileSlot::classify("metadata.json.bak"), None);
    assert_eq!(FileSlot::classify("notes.txt"), None);
}

#[test]
fn test_first_file_for_a_slot_wins() {
    let batch = vec![
        PathBuf::from("/runs/a/data.json"),
        PathBuf::from("/runs/a/readme.md"),
        PathBuf::from("/runs/b/data.json"),
        PathBuf::from("/runs/a/eclat.json"),
    ];
    let selection = FileSelection::from_batch(&batch);
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.get(FileSlot::Data), Some(Path::new("/runs/a/data.json")));
    assert_eq!(selection.get(FileSlot::EclatTree), Some(Path::new("/runs/a/eclat.json")));
    assert_eq!(selection.get(FileSlot::Metadata), None);
}

#[tokio::test]
async fn test_panel_loads_valid_file() {
    let dir = temp_run_dir();
    let path = write(&dir, "metadata.json", METADATA);
    let (mut panel, notifier) = metadata_panel();

    let ticket = panel.select_file(Some(path.clone())).unwrap();
    assert_eq!(ticket.path, path);

    let outcome = panel.complete_read(ticket.generation, read_text(&ticket.path).await);
    assert_eq!(outcome, PanelOutcome::Loaded);

    let metadata = panel.model().unwrap();
    assert_eq!(metadata.subreddit, "rust");
    assert_eq!(metadata.num_posts, 50);
    assert!(notifier.messages().is_empty());

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_malformed_json_notifies_and_resets() {
    let dir = temp_run_dir();
    let good = write(&dir, "metadata.json", METADATA);
    let (mut panel, notifier) = metadata_panel();

    let ticket = panel.select_file(Some(good)).unwrap();
    panel.complete_read(ticket.generation, read_text(&ticket.path).await);
    assert!(panel.is_loaded());

    let broken_dir = dir.join("broken");
    std::fs::create_dir_all(&broken_dir).unwrap();
    let broken = write(&broken_dir, "metadata.json", "{\"subreddit\":");
    let ticket = panel.select_file(Some(broken)).unwrap();
    let outcome = panel.complete_read(ticket.generation, read_text(&ticket.path).await);

    assert_eq!(outcome, PanelOutcome::Rejected);
    assert!(!panel.is_loaded());
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("metadata.json"));
    assert!(messages[0].contains("Could not parse"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_validation_error_message_reaches_notifier() {
    let (mut panel, notifier) = metadata_panel();
    let ticket = panel.select_file(Some(PathBuf::from("metadata.json"))).unwrap();

    let outcome = panel.complete_read(
        ticket.generation,
        Ok(r#"{"subreddit": 3, "listing": "hot", "num_posts": 1}"#.to_string()),
    );

    assert_eq!(outcome, PanelOutcome::Rejected);
    assert_eq!(
        notifier.messages(),
        vec!["Cannot read file metadata.json: Invalid metadata file format: subreddit is missing or is not a string"]
    );
}

#[test]
fn test_stale_completion_is_discarded() {
    let (mut panel, notifier) = metadata_panel();

    let first = panel.select_file(Some(PathBuf::from("a/metadata.json"))).unwrap();
    let second = panel.select_file(Some(PathBuf::from("b/metadata.json"))).unwrap();
    assert!(second.generation > first.generation);

    assert_eq!(
        panel.complete_read(second.generation, Ok(OTHER_METADATA.to_string())),
        PanelOutcome::Loaded
    );

    // The older read finishing late must not overwrite the newer model, and
    // its failure must not be reported either.
    assert_eq!(
        panel.complete_read(first.generation, Ok(METADATA.to_string())),
        PanelOutcome::Stale
    );
    assert_eq!(
        panel.complete_read(first.generation, Ok("not json".to_string())),
        PanelOutcome::Stale
    );

    assert_eq!(panel.model().unwrap().subreddit, "golang");
    assert!(notifier.messages().is_empty());
}

#[test]
fn test_read_failure_is_surfaced() {
    let (mut panel, notifier) = metadata_panel();
    let ticket = panel.select_file(Some(PathBuf::from("gone/metadata.json"))).unwrap();

    let outcome = panel.complete_read(
        ticket.generation,
        Err(ReadError::Io {
            path: "gone/metadata.json".to_string(),
            reason: "No such file or directory".to_string(),
        }),
    );

    assert_eq!(outcome, PanelOutcome::ReadFailed);
    assert!(!panel.is_loaded());
    assert_eq!(notifier.messages().len(), 1);
}

#[test]
fn test_clearing_the_file_clears_the_model() {
    let (mut panel, _notifier) = metadata_panel();
    let ticket = panel.select_file(Some(PathBuf::from("metadata.json"))).unwrap();
    panel.complete_read(ticket.generation, Ok(METADATA.to_string()));
    assert!(panel.is_loaded());

    assert!(panel.select_file(None).is_none());
    assert!(!panel.is_loaded());
    assert!(panel.file().is_none());
}

#[test]
fn test_tree_panel_uses_its_variant() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut panel = Panel::new(TreeParser::new(TreeVariant::Declat), notifier.clone());
    let ticket = panel.select_file(Some(PathBuf::from("declat.json"))).unwrap();

    let text = serde_json::json!({
        "min_support": 2,
        "tree": {"tokens_ids": [], "tokens": [], "support": 5, "id_set": [], "children": []}
    })
    .to_string();
    assert_eq!(panel.complete_read(ticket.generation, Ok(text)), PanelOutcome::Loaded);

    let tree = panel.model().unwrap();
    assert_eq!(tree.variant, TreeVariant::Declat);
    assert_eq!(tree.id_set_label(), "Diffset ids");
}

#[test]
fn test_workspace_clears_absent_slots() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut workspace = Workspace::new(notifier.clone());

    let tickets = workspace.apply_batch(&[
        PathBuf::from("run/metadata.json"),
        PathBuf::from("run/tokens_map.json"),
        PathBuf::from("run/unrelated.csv"),
    ]);
    let slots: Vec<FileSlot> = tickets.iter().map(|t| t.slot).collect();
    assert_eq!(slots, vec![FileSlot::Metadata, FileSlot::TokensMap]);

    for slot_ticket in &tickets {
        let text = match slot_ticket.slot {
            FileSlot::Metadata => METADATA.to_string(),
            _ => r#"{"token": {"0": "rust"}}"#.to_string(),
        };
        let outcome = workspace.complete_read(slot_ticket.slot, slot_ticket.ticket.generation, Ok(text));
        assert_eq!(outcome, PanelOutcome::Loaded);
    }
    assert!(workspace.is_loaded(FileSlot::Metadata));
    assert!(workspace.is_loaded(FileSlot::TokensMap));

    // Second batch only carries the tokens map; metadata is cleared.
    let tickets = workspace.apply_batch(&[PathBuf::from("run2/tokens-map.json")]);
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].slot, FileSlot::TokensMap);
    assert!(!workspace.is_loaded(FileSlot::Metadata));
    assert!(workspace.metadata().is_none());
    assert!(workspace.selection().get(FileSlot::Metadata).is_none());
    assert!(notifier.messages().is_empty());
}

#[test]
fn test_failure_in_one_panel_leaves_others_alone() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut workspace = Workspace::new(notifier.clone());
    let tickets = workspace.apply_batch(&[
        PathBuf::from("run/metadata.json"),
        PathBuf::from("run/eclat.json"),
    ]);

    for slot_ticket in &tickets {
        let text = match slot_ticket.slot {
            FileSlot::Metadata => METADATA.to_string(),
            _ => "{\"min_support\": \"two\"}".to_string(),
        };
        workspace.complete_read(slot_ticket.slot, slot_ticket.ticket.generation, Ok(text));
    }

    assert!(workspace.metadata().is_some());
    assert!(workspace.tree(TreeVariant::Eclat).is_none());
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("eclat.json"));
    assert!(messages[0].contains("min_support"));
}

#[tokio::test]
async fn test_spawn_read_calls_back_once_on_success() {
    let dir = temp_run_dir();
    let path = write(&dir, "data.json", "{\"title\": {}}");
    let (tx, rx) = tokio::sync::oneshot::channel();

    spawn_read(path, move |text| {
        tx.send(text).ok();
    })
    .await
    .unwrap();

    assert_eq!(rx.await.unwrap(), "{\"title\": {}}");
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_spawn_read_skips_callback_on_failure() {
    let missing = std::env::temp_dir().join(format!("missing_{}.json", uuid::Uuid::new_v4()));
    let called = Arc::new(Mutex::new(false));
    let flag = called.clone();

    spawn_read(missing, move |_| {
        *flag.lock().unwrap() = true;
    })
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!*called.lock().unwrap());
}

#[tokio::test]
async fn test_read_text_strips_bom_and_rejects_binary() {
    let dir = temp_run_dir();
    let with_bom = write(&dir, "metadata.json", "\u{feff}{}");
    assert_eq!(read_text(&with_bom).await.unwrap(), "{}");

    let binary = dir.join("data.json");
    std::fs::write(&binary, [0xffu8, 0xfe, 0x00, 0xc3]).unwrap();
    assert!(matches!(read_text(&binary).await, Err(ReadError::NotUtf8 { .. })));

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_expand_selection_lists_directories() {
    let dir = temp_run_dir();
    write(&dir, "metadata.json", METADATA);
    write(&dir, "data.json", "{}");
    let loose = PathBuf::from("/elsewhere/eclat.json");

    let files = expand_selection(vec![dir.clone(), loose.clone()]).await.unwrap();
    assert_eq!(files, vec![dir.join("data.json"), dir.join("metadata.json"), loose]);

    std::fs::remove_dir_all(dir).ok();
}
