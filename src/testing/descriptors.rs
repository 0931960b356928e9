use std::path::PathBuf;

use crate::domain::configuration::default_section_name;
use crate::domain::{DEFAULT_DESCRIPTION, DEFAULT_VERSION, FeatureDescriptor, FeatureId};

/// Minimal descriptor for `id` with conventional defaults.
pub fn descriptor(id: &str) -> FeatureDescriptor {
    FeatureDescriptor {
        id: FeatureId::new(id).unwrap(),
        name: id.to_string(),
        description: DEFAULT_DESCRIPTION.to_string(),
        version: DEFAULT_VERSION.to_string(),
        requires_reboot: false,
        declared_prerequisites: Vec::new(),
        depends_on: Vec::new(),
        config_section: default_section_name(id),
        source_location: PathBuf::from(format!("{}.toml", id)),
        metadata_error: None,
    }
}

/// Descriptor for `id` declaring `deps`.
pub fn descriptor_with_deps(id: &str, deps: &[&str]) -> FeatureDescriptor {
    let mut d = descriptor(id);
    d.depends_on = deps.iter().map(|dep| FeatureId::new(dep).unwrap()).collect();
    d
}
