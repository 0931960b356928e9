//! List command - the discovered catalog with ordering diagnostics.

use std::path::Path;

use serde::Serialize;

use crate::adapters::feature_directory;
use crate::domain::{AppError, FeatureDescriptor, OrderingIssue, check_ordering};

/// Discovered features in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub features: Vec<FeatureDescriptor>,
    pub ordering_issues: Vec<OrderingIssue>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Execute the list command.
///
/// An empty directory yields an empty catalog; only a missing directory fails.
pub fn execute(features_dir: &Path) -> Result<Catalog, AppError> {
    let features = feature_directory::discover(features_dir)?;
    let ordering_issues = check_ordering(&features);
    Ok(Catalog { features, ordering_issues })
}
