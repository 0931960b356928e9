use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for vmprep operations.
///
/// Only structural problems surface as `AppError`. Anything that goes wrong
/// inside a single feature is recorded in that feature's result instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The features directory does not exist.
    #[error("Features directory not found: {}", .0.display())]
    FeaturesDirectoryMissing(PathBuf),

    /// A run was requested but discovery found nothing to run.
    #[error("No features discovered in {}", .0.display())]
    NoFeaturesDiscovered(PathBuf),

    /// Feature identifier is invalid.
    #[error(
        "Invalid feature identifier '{0}': must be alphanumeric with hyphens, underscores, or periods"
    )]
    InvalidFeatureId(String),

    /// Feature not found in the discovered catalog.
    #[error("Feature '{name}' not found. Available: {available}")]
    FeatureNotFound { name: String, available: String },

    /// Configuration document exists but could not be parsed.
    #[error("Malformed configuration document {}: {details}", .path.display())]
    ConfigParse { path: PathBuf, details: String },

    /// Logger could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Scaffold target already contains vmprep files.
    #[error("Refusing to overwrite existing file: {}", .0.display())]
    ScaffoldExists(PathBuf),
}
