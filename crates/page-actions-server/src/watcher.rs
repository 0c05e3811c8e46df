//! Content directory watching.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Debounce window for bursts of filesystem events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A mirrored document was modified
    DocumentModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::DocumentModified(p)
            | WatchEvent::Created(p)
            | WatchEvent::Deleted(p)
            | WatchEvent::Modified(p) => p,
        }
    }
}

/// File watcher for detecting content changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `paths` recursively, classifying files with one of `extensions`
    /// as documents.
    ///
    /// Returns the watcher and a channel to receive events. Dropping the
    /// watcher stops the stream.
    pub fn new(
        paths: &[PathBuf],
        extensions: &[String],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::warn!("Not watching missing path {}", path.display());
            }
        }

        let extensions = extensions.to_vec();
        std::thread::spawn(move || {
            let mut pending: Vec<WatchEvent> = Vec::new();

            loop {
                // Block while idle, then keep collecting until the burst goes quiet.
                let next = if pending.is_empty() {
                    sync_rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
                } else {
                    sync_rx.recv_timeout(DEBOUNCE)
                };

                match next {
                    Ok(event) => {
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind, &extensions) {
                                coalesce(&mut pending, e);
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        for e in pending.drain(..) {
                            if async_tx.blocking_send(e).is_err() {
                                return;
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        for e in pending.drain(..) {
                            let _ = async_tx.blocking_send(e);
                        }
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Queue `event`, replacing any earlier pending event for the same path.
fn coalesce(pending: &mut Vec<WatchEvent>, event: WatchEvent) {
    pending.retain(|p| p.path() != event.path());
    pending.push(event);
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    extensions: &[String],
) -> Option<WatchEvent> {
    use notify::EventKind;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) if extensions.iter().any(|e| e == ext) => {
            Some(WatchEvent::DocumentModified(path.to_path_buf()))
        }
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind};
    use notify::EventKind;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_document_changes() {
        let extensions = vec!["md".to_string(), "mdx".to_string()];
        let modify = EventKind::Modify(ModifyKind::Data(DataChange::Content));

        assert_eq!(
            classify_event(Path::new("docs/a.mdx"), &modify, &extensions),
            Some(WatchEvent::DocumentModified(PathBuf::from("docs/a.mdx")))
        );
        assert_eq!(
            classify_event(Path::new("docs/logo.png"), &modify, &extensions),
            Some(WatchEvent::Modified(PathBuf::from("docs/logo.png")))
        );
        assert_eq!(
            classify_event(
                Path::new("docs/b.md"),
                &EventKind::Create(CreateKind::File),
                &extensions
            ),
            Some(WatchEvent::Created(PathBuf::from("docs/b.md")))
        );
    }

    #[test]
    fn coalesce_keeps_latest_event_per_path() {
        let mut pending = Vec::new();

        coalesce(&mut pending, WatchEvent::Created(PathBuf::from("a.md")));
        coalesce(&mut pending, WatchEvent::Modified(PathBuf::from("b.md")));
        coalesce(&mut pending, WatchEvent::DocumentModified(PathBuf::from("a.md")));

        assert_eq!(
            pending,
            vec![
                WatchEvent::Modified(PathBuf::from("b.md")),
                WatchEvent::DocumentModified(PathBuf::from("a.md")),
            ]
        );
    }

    #[tokio::test]
    async fn delivers_every_file_in_a_burst() {
        let temp = tempdir().unwrap();

        let (watcher, mut rx) =
            FileWatcher::new(&[temp.path().to_path_buf()], &["md".to_string()]).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("a.md"), "# A").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        fs::write(temp.path().join("b.md"), "# B").unwrap();

        let mut seen = HashSet::new();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        while seen.len() < 2 {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(event)) => {
                    if let Some(name) = event.path().file_name().and_then(|n| n.to_str()) {
                        seen.insert(name.to_string());
                    }
                }
                _ => break,
            }
        }

        drop(watcher);

        assert!(seen.contains("a.md"), "missing a.md in {seen:?}");
        assert!(seen.contains("b.md"), "missing b.md in {seen:?}");
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("test.md");

        let (watcher, mut rx) =
            FileWatcher::new(&[temp.path().to_path_buf()], &["md".to_string()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "# Created").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
