use std::path::PathBuf;

use thiserror::Error;

/// Abrupt fault raised by feature code.
///
/// The engine converts every fault into a `Failure` result for that feature.
#[derive(Debug, Error)]
pub enum FeatureFault {
    #[error("failed to launch '{program}': {details}")]
    Launch { program: String, details: String },

    #[error("cannot load feature manifest {}: {details}", .path.display())]
    Manifest { path: PathBuf, details: String },

    #[error("feature does not declare an install command")]
    MissingInstall,

    #[error("feature code panicked: {0}")]
    Panic(String),

    #[error("{0}")]
    Other(String),
}
