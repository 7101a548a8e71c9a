use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalogue::{self, CatalogueError};
use crate::record::Catalogue;

/// A place catalogues are loaded from.
///
/// The interactive view loads once at startup; the `list` and `search`
/// subcommands load and exit.
#[async_trait::async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Human-readable label identifying this source.
    fn label(&self) -> &str;

    /// Load and validate the full catalogue.
    async fn load(&self) -> Result<Catalogue, CatalogueError>;
}

#[async_trait::async_trait]
impl<T: CatalogueSource + ?Sized> CatalogueSource for Arc<T> {
    fn label(&self) -> &str {
        (**self).label()
    }

    async fn load(&self) -> Result<Catalogue, CatalogueError> {
        (**self).load().await
    }
}

/// The catalogue compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalogue;

#[async_trait::async_trait]
impl CatalogueSource for BuiltinCatalogue {
    fn label(&self) -> &str {
        "builtin"
    }

    async fn load(&self) -> Result<Catalogue, CatalogueError> {
        catalogue::builtin()
    }
}

/// A user-supplied TOML catalogue on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogue {
    path: PathBuf,
    label: String,
}

impl FileCatalogue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogueSource for FileCatalogue {
    fn label(&self) -> &str {
        &self.label
    }

    async fn load(&self) -> Result<Catalogue, CatalogueError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| CatalogueError::Io {
            path: self.path.clone(),
            source,
        })?;
        catalogue::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn builtin_source_loads_all_groups() {
        let catalogue = BuiltinCatalogue.load().await.unwrap();
        assert_eq!(catalogue.groups.len(), 8);
        assert_eq!(BuiltinCatalogue.label(), "builtin");
    }

    #[tokio::test]
    async fn file_source_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[group]]\nid = \"ops\"\nname = \"Ops\"\naccent = \"#F97316\"\n\n[[group.record]]\nid = \"deploy\"\ndescription = \"Ship it\"\ntags = [\"release\"]"
        )
        .unwrap();

        let source = FileCatalogue::new(file.path());
        let catalogue = source.load().await.unwrap();
        assert_eq!(catalogue.groups[0].records[0].id, "deploy");
        assert_eq!(source.label(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogue::new(dir.path().join("missing.toml"));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogueError::Io { .. }));
    }

    #[tokio::test]
    async fn arc_source_delegates() {
        let source: Arc<dyn CatalogueSource> = Arc::new(BuiltinCatalogue);
        let catalogue = source.load().await.unwrap();
        assert_eq!(catalogue.total_records(), 71);
    }
}
