use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use visualizer_core::ReadError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a whole file as UTF-8 text, dropping a leading byte order mark.
pub async fn read_text(path: impl AsRef<Path>) -> Result<String, ReadError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| ReadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut text = String::from_utf8(bytes).map_err(|_| ReadError::NotUtf8 {
        path: path.display().to_string(),
    })?;
    if text.starts_with(BYTE_ORDER_MARK) {
        text.drain(..BYTE_ORDER_MARK.len_utf8());
    }

    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Reads `path` in the background and hands the text to `on_read`.
///
/// `on_read` runs at most once, and only when the read succeeds. A failed
/// read is logged and otherwise dropped.
pub fn spawn_read<F>(path: PathBuf, on_read: F) -> JoinHandle<()>
where
    F: FnOnce(String) + Send + 'static,
{
    tokio::spawn(async move {
        match read_text(&path).await {
            Ok(text) => on_read(text),
            Err(e) => warn!("Dropping failed read: {}", e),
        }
    })
}
