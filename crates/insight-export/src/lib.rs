//! Panel Insight Export
//!
//! Boundary between a strategy report and a downloadable document:
//! - [`ReportExporter`] turns a [`ReportDocument`] into bytes
//! - [`DocumentSink`] stores those bytes under a file name
//!
//! [`DocxExporter`] is the production exporter; [`TextExporter`] renders
//! the same sections as plain text.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod docx;
pub mod error;
pub mod text;

pub use docx::DocxExporter;
pub use error::ExportError;
pub use text::{render_text, TextExporter};

use insight_core::ReportDocument;
use std::path::{Path, PathBuf};

/// File name offered for downloaded proposals
pub const DEFAULT_FILE_NAME: &str = "AI_전략_제안서_초안.docx";

/// Converts a report into a document byte stream
pub trait ReportExporter: Send + Sync {
    /// Render the report
    ///
    /// # Errors
    /// Returns [`ExportError`] when the document cannot be built.
    fn export(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError>;

    /// File extension of the produced format, without the dot
    fn extension(&self) -> &'static str;
}

/// Destination for exported documents
pub trait DocumentSink: Send + Sync {
    /// Store `bytes` as `file_name`, returning where it went
    ///
    /// # Errors
    /// Returns [`ExportError`] when the bytes cannot be stored.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Sink writing into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Save {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| ExportError::Save {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved document");
        Ok(path)
    }
}

/// Swap the extension of `file_name` for the exporter's own
#[must_use]
pub fn file_name_for(file_name: &str, exporter: &dyn ReportExporter) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{stem}.{}", exporter.extension())
}

/// Render and store in one step
///
/// # Errors
/// Propagates the exporter's or the sink's [`ExportError`].
pub fn export_to(
    exporter: &dyn ReportExporter,
    sink: &dyn DocumentSink,
    report: &ReportDocument,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let bytes = exporter.export(report)?;
    tracing::debug!(extension = exporter.extension(), bytes = bytes.len(), "Document rendered");
    sink.save(file_name, &bytes)
}
