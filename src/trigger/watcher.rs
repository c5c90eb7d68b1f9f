//! Declarative document watcher.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// The declarative document was created or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
}

/// Whether `event` is a create or write of a file named `document_name`.
/// Metadata-only changes and reads are ignored.
pub fn is_document_event(event: &Event, document_name: &str) -> bool {
    let relevant_kind = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    relevant_kind && document_path(event, document_name).is_some()
}

fn document_path<'e>(event: &'e Event, document_name: &str) -> Option<&'e PathBuf> {
    event
        .paths
        .iter()
        .find(|p| p.file_name().is_some_and(|name| name == document_name))
}

/// Watches the content root and forwards document changes. Dropping it ends
/// the subscription and closes the channel.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl DocumentWatcher {
    /// Start watching `content_root` (non-recursively).
    ///
    /// Returns the watcher and a receiver for change events.
    pub fn start(
        content_root: &Path,
        document_name: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ChangeEvent>), notify::Error> {
        let (tx, rx) = mpsc::unbounded_channel();
        let document_name = document_name.to_string();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !is_document_event(&event, &document_name) {
                    return;
                }
                if let Some(path) = document_path(&event, &document_name) {
                    tracing::debug!(kind = ?event.kind, path = %path.display(), "Document change detected");
                    let _ = tx.send(ChangeEvent { path: path.clone() });
                }
            }
            Err(e) => tracing::error!(error = %e, "Watch error"),
        })?;

        watcher.watch(content_root, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %content_root.display(), "Document watcher started");

        Ok((
            Self {
                _watcher: watcher,
                root: content_root.to_path_buf(),
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for DocumentWatcher {
    fn drop(&mut self) {
        tracing::debug!(path = %self.root.display(), "Document watcher stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind};
    use std::time::Duration;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_filters_by_name_and_kind() {
        let doc = "permissions.yaml";
        assert!(is_document_event(
            &event(EventKind::Create(CreateKind::File), "/content/permissions.yaml"),
            doc
        ));
        assert!(is_document_event(
            &event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                "/content/permissions.yaml"
            ),
            doc
        ));
        assert!(!is_document_event(
            &event(EventKind::Modify(ModifyKind::Data(DataChange::Any)), "/content/notes.md"),
            doc
        ));
        assert!(!is_document_event(
            &event(
                EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
                "/content/permissions.yaml"
            ),
            doc
        ));
        assert!(!is_document_event(
            &event(EventKind::Access(AccessKind::Any), "/content/permissions.yaml"),
            doc
        ));
    }

    #[tokio::test]
    async fn test_watcher_reports_document_writes() {
        let dir = tempfile::tempdir().unwrap();
        let (watcher, mut rx) = DocumentWatcher::start(dir.path(), "permissions.yaml").unwrap();
        assert_eq!(watcher.root(), dir.path());

        std::fs::write(dir.path().join("unrelated.md"), "x").unwrap();
        std::fs::write(dir.path().join("permissions.yaml"), "spaces: {}\n").unwrap();

        let change = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("no change event")
            .expect("channel closed");
        assert_eq!(change.path.file_name().unwrap(), "permissions.yaml");

        drop(watcher);
    }
}
