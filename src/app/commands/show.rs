//! Show command - one feature's descriptor and effective configuration.

use std::path::Path;

use serde::Serialize;

use crate::adapters::feature_directory;
use crate::domain::configuration::{ConfigDocument, FeatureConfig, resolve};
use crate::domain::{AppError, FeatureDescriptor, OrderingIssue, check_ordering};
use crate::ports::UnitProvider;

#[derive(Debug, Clone, Serialize)]
pub struct FeatureDetail {
    pub descriptor: FeatureDescriptor,
    /// `None` when the unit could not be loaded.
    pub effective_config: Option<FeatureConfig>,
    pub load_error: Option<String>,
    /// Whether the configuration document has a section for this feature.
    pub section_present: bool,
    pub ordering_issues: Vec<OrderingIssue>,
}

/// Execute the show command for `name` (matched case-insensitively).
pub fn execute<P>(
    features_dir: &Path,
    document: &ConfigDocument,
    name: &str,
    provider: &P,
) -> Result<FeatureDetail, AppError>
where
    P: UnitProvider + ?Sized,
{
    let catalog = feature_directory::discover(features_dir)?;

    let descriptor = catalog.iter().find(|d| d.id.matches(name)).cloned().ok_or_else(|| {
        AppError::FeatureNotFound {
            name: name.to_string(),
            available: catalog.iter().map(|d| d.id.to_string()).collect::<Vec<_>>().join(", "),
        }
    })?;

    let ordering_issues =
        check_ordering(&catalog).into_iter().filter(|i| i.feature() == &descriptor.id).collect();

    let (effective_config, load_error) = match provider.load(&descriptor) {
        Ok(unit) => (Some(resolve(&descriptor, unit.defaults(), document)), None),
        Err(fault) => (None, Some(fault.to_string())),
    };

    Ok(FeatureDetail {
        section_present: document.section(&descriptor.config_section).is_some(),
        descriptor,
        effective_config,
        load_error,
        ordering_issues,
    })
}
