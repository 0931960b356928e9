use std::path::{Path, PathBuf};

use crate::adapters::scaffold;
use crate::domain::AppError;

/// Execute the init command.
///
/// Writes the stock feature manifests and settings template under `target`.
pub fn execute(target: &Path) -> Result<Vec<PathBuf>, AppError> {
    let written = scaffold::write_scaffold(target)?;
    tracing::info!(target = %target.display(), "Wrote {} scaffold file(s)", written.len());
    Ok(written)
}
