pub mod catalogue;
pub mod clipboard;
pub mod format;
pub mod provider;
pub mod record;
pub mod report;
pub mod severity;
pub mod snapshot;
pub mod source;

pub use catalogue::CatalogueError;
pub use clipboard::{ClipboardError, ClipboardWriter, Osc52Clipboard};
pub use format::{NOT_AVAILABLE, format_bytes, format_duration};
pub use provider::{HostProvider, ProviderError, SystemInfoProvider};
pub use record::{Catalogue, Group, Record};
pub use report::{ExportError, PlainTextExporter, ReportExporter};
pub use severity::Severity;
pub use snapshot::{Health, HealthStatus, History, Snapshot};
pub use source::{BuiltinCatalogue, CatalogueSource, FileCatalogue};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
