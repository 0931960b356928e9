//! Feature unit port definitions.

use crate::domain::{FeatureConfig, FeatureDescriptor, FeatureFault, InstallReport, Settings};

/// Contract every installable feature satisfies.
pub trait FeatureUnit {
    /// The feature's own default configuration.
    ///
    /// Its key set is the whitelist of settings a configuration document may override.
    fn defaults(&self) -> &Settings;

    /// Report why the feature cannot run. An empty list means all clear.
    fn check_prerequisites(&self) -> Result<Vec<String>, FeatureFault>;

    /// Perform the installation with the resolved configuration.
    fn install(&self, config: &FeatureConfig) -> Result<InstallReport, FeatureFault>;
}

/// Trait for obtaining the unit behind a discovered descriptor.
pub trait UnitProvider {
    /// Load the unit at `descriptor.source_location`. Must not run feature logic.
    fn load(&self, descriptor: &FeatureDescriptor) -> Result<Box<dyn FeatureUnit>, FeatureFault>;
}
