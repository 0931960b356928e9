//! Feature unit metadata: identifiers, manifests, descriptors.

pub mod descriptor;
pub mod feature_id;
pub mod manifest;

pub use descriptor::{DEFAULT_DESCRIPTION, DEFAULT_VERSION, FeatureDescriptor};
pub use feature_id::FeatureId;
pub use manifest::{CommandSpec, FeatureManifest, ManifestError};
