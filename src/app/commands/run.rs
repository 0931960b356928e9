//! Run command - discover, select, execute, summarize.

use std::path::PathBuf;

use crate::adapters::feature_directory;
use crate::domain::configuration::ConfigDocument;
use crate::domain::execution::engine;
use crate::domain::{AppError, RunOptions, RunReport, check_ordering, select, summarize};
use crate::ports::UnitProvider;

/// What to run and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub features_dir: PathBuf,
    /// Feature ids to run. Empty runs the whole catalog.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub options: RunOptions,
}

impl RunRequest {
    pub fn new(features_dir: impl Into<PathBuf>) -> Self {
        Self {
            features_dir: features_dir.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            options: RunOptions::default(),
        }
    }
}

/// Execute a run.
///
/// Structural problems (missing directory, nothing discovered, unknown
/// include) are errors. Everything that goes wrong inside a feature ends up
/// in the report instead.
pub fn execute<P>(
    request: &RunRequest,
    document: &ConfigDocument,
    provider: &P,
) -> Result<RunReport, AppError>
where
    P: UnitProvider + ?Sized,
{
    let catalog = feature_directory::discover(&request.features_dir)?;
    if catalog.is_empty() {
        return Err(AppError::NoFeaturesDiscovered(request.features_dir.clone()));
    }

    let selection = select(&catalog, &request.include, &request.exclude)?;
    for name in &selection.unmatched_excludes {
        tracing::warn!("Excluded feature '{}' is not in the catalog", name);
    }

    for issue in check_ordering(&catalog) {
        if selection.features.iter().any(|d| &d.id == issue.feature()) {
            tracing::warn!("{}", issue);
        }
    }

    tracing::info!(
        dry_run = request.options.dry_run,
        continue_on_error = request.options.continue_on_error,
        "Running {} of {} feature(s)",
        selection.features.len(),
        catalog.len()
    );

    let results = engine::run(&selection.features, document, &request.options, provider);
    let report = summarize(&results, &selection.features);

    tracing::info!(
        "Completed: {} succeeded, {} failed, {} skipped",
        report.success_count,
        report.failure_count,
        report.skipped_count
    );
    Ok(report)
}
