//! Per-feature configuration resolution.
//!
//! A feature's effective configuration is its own defaults overlaid with the
//! matching document section. The overlay is a whitelist merge: only keys the
//! feature already declares in its defaults can be overridden, and unknown
//! keys in the section are dropped. A typo in the settings file therefore
//! never injects state a feature does not read.

use serde::Serialize;

use super::document::ConfigDocument;
use super::value::{SettingValue, Settings};
use crate::domain::FeatureDescriptor;

/// Effective configuration of one feature for one run. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureConfig(Settings);

impl FeatureConfig {
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_settings(&self) -> &Settings {
        &self.0
    }
}

/// Overlay `section` onto `defaults` with whitelist semantics.
///
/// Values are passed through without coercion.
pub fn overlay(defaults: &Settings, section: Option<&Settings>) -> FeatureConfig {
    let mut effective = defaults.clone();
    if let Some(section) = section {
        for (key, value) in section {
            if let Some(slot) = effective.get_mut(key) {
                *slot = value.clone();
            }
        }
    }
    FeatureConfig(effective)
}

/// Resolve the effective configuration for `descriptor`.
pub fn resolve(
    descriptor: &FeatureDescriptor,
    defaults: &Settings,
    document: &ConfigDocument,
) -> FeatureConfig {
    overlay(defaults, document.section(section_name_for(descriptor)))
}

/// Name of the document section a feature reads.
pub fn section_name_for(descriptor: &FeatureDescriptor) -> &str {
    &descriptor.config_section
}

/// Conventional section name for a feature id: `windows-updates` → `WindowsUpdates`.
pub fn default_section_name(feature_id: &str) -> String {
    feature_id
        .split(['-', '_', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
