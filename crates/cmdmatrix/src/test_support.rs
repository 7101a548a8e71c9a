use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{
    Catalogue, CatalogueError, CatalogueSource, ClipboardError, ClipboardWriter, ExportError,
    ProviderError, ReportExporter, Snapshot, SystemInfoProvider,
};

/// In-memory catalogue source for testing.
pub struct InMemoryCatalogue {
    label: String,
    catalogue: Catalogue,
}

impl InMemoryCatalogue {
    pub fn new(label: impl Into<String>, catalogue: Catalogue) -> Self {
        Self {
            label: label.into(),
            catalogue,
        }
    }
}

#[async_trait::async_trait]
impl CatalogueSource for InMemoryCatalogue {
    fn label(&self) -> &str {
        &self.label
    }

    async fn load(&self) -> Result<Catalogue, CatalogueError> {
        if self.catalogue.groups.is_empty() {
            return Err(CatalogueError::Empty);
        }
        Ok(self.catalogue.clone())
    }
}

/// Provider returning a fixed snapshot, or a fixed failure.
pub struct StaticProvider {
    snapshot: Option<Snapshot>,
    calls: Mutex<usize>,
}

impl StaticProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            snapshot: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl SystemInfoProvider for StaticProvider {
    fn collect(&self) -> Result<Snapshot, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        self.snapshot
            .clone()
            .ok_or_else(|| ProviderError::Other("static failure".into()))
    }
}

/// Clipboard that remembers everything written to it.
#[derive(Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

/// Clipboard that always fails.
#[derive(Default)]
pub struct FailingClipboard;

impl ClipboardWriter for FailingClipboard {
    fn write(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no clipboard in tests".into()))
    }
}

/// Exporter that records destinations instead of touching the disk.
#[derive(Default)]
pub struct MemoryExporter {
    exports: Mutex<Vec<PathBuf>>,
}

impl MemoryExporter {
    pub fn exports(&self) -> Vec<PathBuf> {
        self.exports.lock().unwrap().clone()
    }
}

impl ReportExporter for MemoryExporter {
    fn export(&self, _snapshot: &Snapshot, destination: &Path) -> Result<(), ExportError> {
        self.exports.lock().unwrap().push(destination.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Group, Record};

    use super::*;

    #[tokio::test]
    async fn in_memory_catalogue_round_trips() {
        let catalogue = Catalogue::new(vec![
            Group::new("g", "G", "#000000").with_records(vec![Record::new("ls", "list")]),
        ]);
        let source = InMemoryCatalogue::new("test", catalogue.clone());
        assert_eq!(source.load().await.unwrap(), catalogue);
        assert_eq!(source.label(), "test");
    }

    #[tokio::test]
    async fn in_memory_catalogue_rejects_empty() {
        let source = InMemoryCatalogue::new("test", Catalogue::default());
        assert!(matches!(source.load().await, Err(CatalogueError::Empty)));
    }

    #[test]
    fn static_provider_counts_calls() {
        let provider = StaticProvider::new(Snapshot::default());
        provider.collect().unwrap();
        provider.collect().unwrap();
        assert_eq!(provider.calls(), 2);
        assert!(StaticProvider::failing().collect().is_err());
    }

    #[test]
    fn recording_clipboard_keeps_writes() {
        let clipboard = RecordingClipboard::default();
        clipboard.write("gs").unwrap();
        assert_eq!(clipboard.writes(), vec!["gs".to_owned()]);
        assert!(FailingClipboard.write("gs").is_err());
    }

    #[test]
    fn memory_exporter_keeps_destinations() {
        let exporter = MemoryExporter::default();
        exporter
            .export(&Snapshot::default(), Path::new("/tmp/report.txt"))
            .unwrap();
        assert_eq!(exporter.exports(), vec![PathBuf::from("/tmp/report.txt")]);
    }
}
