//! Feature manifest format.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::configuration::Settings;

/// Metadata and command declarations parsed from a feature manifest.
///
/// Every field is optional; defaults are applied when a descriptor is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureManifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub requires_reboot: bool,
    /// Informational prerequisite labels.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    pub config_section: Option<String>,
    /// The feature's own default configuration.
    #[serde(default)]
    pub defaults: Settings,
    pub check: Option<CommandSpec>,
    pub install: Option<CommandSpec>,
}

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Metadata extraction failure. Degrades one descriptor; never fatal.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("unreadable manifest: {0}")]
    Unreadable(String),

    #[error("malformed manifest: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("file name '{0}' does not form a valid feature id")]
    InvalidFileName(String),
}

impl FeatureManifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }
}

impl CommandSpec {
    /// Command line for log output.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}
