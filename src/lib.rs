//! vmprep: discover and run self-describing feature units that prepare a
//! freshly provisioned Windows VM.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use adapters::ManifestUnitProvider;
use app::commands::{init as init_cmd, list as list_cmd, run as run_cmd, show as show_cmd};

pub use adapters::logging::{Logger, LoggerConfig};
pub use app::commands::{Catalog, FeatureDetail, RunRequest};
pub use domain::configuration::{
    ConfigDocument, DEFAULT_CONFIG_FILE, DocumentSource, LoadedDocument, load_document_or_default,
};
pub use domain::{
    AppError, ExecutionResult, FeatureDescriptor, FeatureId, Outcome, ReportEntry, RunOptions,
    RunReport,
};
pub use ports::{FeatureUnit, UnitProvider};

/// Discover feature descriptors in `features_dir`, in execution order.
pub fn discover(features_dir: &Path) -> Result<Vec<FeatureDescriptor>, AppError> {
    adapters::feature_directory::discover(features_dir)
}

/// Discovered catalog with ordering diagnostics.
pub fn list(features_dir: &Path) -> Result<Catalog, AppError> {
    list_cmd::execute(features_dir)
}

/// Descriptor and effective configuration of one feature.
pub fn show(
    features_dir: &Path,
    document: &ConfigDocument,
    id: &str,
) -> Result<FeatureDetail, AppError> {
    show_cmd::execute(features_dir, document, id, &ManifestUnitProvider)
}

/// Run the selected features using manifest-declared commands.
pub fn run(request: &RunRequest, document: &ConfigDocument) -> Result<RunReport, AppError> {
    run_cmd::execute(request, document, &ManifestUnitProvider)
}

/// Run the selected features with units from a custom provider.
pub fn run_with<P>(
    request: &RunRequest,
    document: &ConfigDocument,
    provider: &P,
) -> Result<RunReport, AppError>
where
    P: UnitProvider + ?Sized,
{
    run_cmd::execute(request, document, provider)
}

/// Write the stock scaffold under `target`.
pub fn init(target: &Path) -> Result<Vec<PathBuf>, AppError> {
    init_cmd::execute(target)
}
