//! Configuration document loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::document::{ConfigDocument, DocumentFormat};
use crate::domain::AppError;

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vmprep.toml";

/// Where the run's document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Parsed from the file.
    File(PathBuf),
    /// No file at the path; defaults only.
    Missing(PathBuf),
    /// File present but unusable; defaults only.
    Malformed { path: PathBuf, details: String },
}

/// A document together with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: ConfigDocument,
    pub source: DocumentSource,
}

impl LoadedDocument {
    /// Emit the load outcome through `tracing`.
    ///
    /// Loading happens before the logger exists, so the outcome is reported
    /// after the fact.
    pub fn log_outcome(&self) {
        match &self.source {
            DocumentSource::File(path) => {
                tracing::info!(path = %path.display(), "Loaded configuration document");
                for entry in self.document.rejected() {
                    tracing::warn!(path = %path.display(), "Ignoring setting {}", entry);
                }
            }
            DocumentSource::Missing(path) => {
                tracing::info!(
                    path = %path.display(),
                    "No configuration document found; using feature defaults"
                );
            }
            DocumentSource::Malformed { path, details } => {
                tracing::warn!(
                    path = %path.display(),
                    "Configuration document is malformed, continuing with defaults: {}",
                    details
                );
            }
        }
    }
}

/// Strictly load a configuration document.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_document(path: &Path) -> Result<Option<ConfigDocument>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(AppError::Io(err)),
    };

    ConfigDocument::parse(&content, DocumentFormat::from_path(path))
        .map(Some)
        .map_err(|details| AppError::ConfigParse { path: path.to_path_buf(), details })
}

/// Load a configuration document, degrading every failure to an empty document.
pub fn load_document_or_default(path: &Path) -> LoadedDocument {
    match load_document(path) {
        Ok(Some(document)) => {
            LoadedDocument { document, source: DocumentSource::File(path.to_path_buf()) }
        }
        Ok(None) => LoadedDocument {
            document: ConfigDocument::empty(),
            source: DocumentSource::Missing(path.to_path_buf()),
        },
        Err(AppError::ConfigParse { path, details }) => LoadedDocument {
            document: ConfigDocument::empty(),
            source: DocumentSource::Malformed { path, details },
        },
        Err(err) => LoadedDocument {
            document: ConfigDocument::empty(),
            source: DocumentSource::Malformed { path: path.to_path_buf(), details: err.to_string() },
        },
    }
}
