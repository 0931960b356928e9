//! Feature descriptor domain model.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::feature_id::FeatureId;
use super::manifest::{FeatureManifest, ManifestError};
use crate::domain::configuration::default_section_name;

pub const DEFAULT_DESCRIPTION: &str = "No description provided";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Identity and metadata of one discoverable feature unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDescriptor {
    pub id: FeatureId,
    pub name: String,
    pub description: String,
    pub version: String,
    pub requires_reboot: bool,
    /// Informational only; never enforced.
    pub declared_prerequisites: Vec<String>,
    /// Advisory unless dependency enforcement is enabled for the run.
    pub depends_on: Vec<FeatureId>,
    /// Document section this feature reads its overrides from.
    pub config_section: String,
    /// Manifest the unit provider loads the feature from.
    pub source_location: PathBuf,
    /// Why the descriptor fell back to filename-derived defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_error: Option<String>,
}

impl FeatureDescriptor {
    /// Build a descriptor from parsed manifest metadata.
    ///
    /// A `depends_on` entry that is not a valid id is dropped with a warning;
    /// the rest of the metadata is kept.
    pub fn from_manifest(
        id: FeatureId,
        stem: &str,
        source_location: &Path,
        manifest: &FeatureManifest,
    ) -> Self {
        let depends_on = manifest
            .depends_on
            .iter()
            .filter_map(|dep| match FeatureId::new(dep.trim()) {
                Ok(dep) => Some(dep),
                Err(_) => {
                    tracing::warn!(
                        feature = %id,
                        "Ignoring invalid dependency identifier '{}'",
                        dep
                    );
                    None
                }
            })
            .collect();

        let config_section =
            non_blank(&manifest.config_section).unwrap_or_else(|| default_section_name(&id));

        Self {
            name: non_blank(&manifest.name).unwrap_or_else(|| stem.to_string()),
            description: non_blank(&manifest.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            version: non_blank(&manifest.version).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            requires_reboot: manifest.requires_reboot,
            declared_prerequisites: manifest.prerequisites.clone(),
            depends_on,
            config_section,
            source_location: source_location.to_path_buf(),
            metadata_error: None,
            id,
        }
    }

    /// Build a descriptor purely from the filename after metadata extraction failed.
    pub fn degraded(
        id: FeatureId,
        stem: &str,
        source_location: &Path,
        error: &ManifestError,
    ) -> Self {
        Self {
            name: stem.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            requires_reboot: false,
            declared_prerequisites: Vec::new(),
            depends_on: Vec::new(),
            config_section: default_section_name(&id),
            source_location: source_location.to_path_buf(),
            metadata_error: Some(error.to_string()),
            id,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.metadata_error.is_some()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
