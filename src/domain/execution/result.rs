//! Per-feature execution outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::FeatureId;

/// Feature-specific output such as an assigned drive letter or installed version.
pub type FeatureData = BTreeMap<String, serde_json::Value>;

/// Results of one run keyed by feature id.
pub type ExecutionResults = BTreeMap<FeatureId, ExecutionResult>;

/// Terminal state of one feature in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
    /// Dry run; nothing was invoked.
    DryRunSkipped,
    /// Never attempted.
    NotRun,
}

impl Outcome {
    /// Both dry-run and never-attempted outcomes count as skipped in summaries.
    pub fn is_skipped(self) -> bool {
        matches!(self, Outcome::DryRunSkipped | Outcome::NotRun)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::DryRunSkipped => "dry-run",
            Outcome::NotRun => "not-run",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured result a feature's install step reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallReport {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: FeatureData,
    #[serde(default)]
    pub reboot_required: bool,
}

impl InstallReport {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), ..Self::default() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), ..Self::default() }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn requiring_reboot(mut self) -> Self {
        self.reboot_required = true;
        self
    }
}

/// Outcome of running one feature. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub feature_id: FeatureId,
    pub outcome: Outcome,
    pub message: String,
    pub data: FeatureData,
    pub reboot_required: bool,
}

impl ExecutionResult {
    pub fn success(
        feature_id: FeatureId,
        message: impl Into<String>,
        data: FeatureData,
        reboot_required: bool,
    ) -> Self {
        Self { feature_id, outcome: Outcome::Success, message: message.into(), data, reboot_required }
    }

    pub fn failure(feature_id: FeatureId, message: impl Into<String>) -> Self {
        Self {
            feature_id,
            outcome: Outcome::Failure,
            message: message.into(),
            data: FeatureData::new(),
            reboot_required: false,
        }
    }

    /// Failure reported by the install step itself; keeps its data and reboot signal.
    pub fn install_failure(
        feature_id: FeatureId,
        message: impl Into<String>,
        data: FeatureData,
        reboot_required: bool,
    ) -> Self {
        Self { feature_id, outcome: Outcome::Failure, message: message.into(), data, reboot_required }
    }

    pub fn dry_run(feature_id: FeatureId, message: impl Into<String>) -> Self {
        Self {
            feature_id,
            outcome: Outcome::DryRunSkipped,
            message: message.into(),
            data: FeatureData::new(),
            reboot_required: false,
        }
    }

    pub fn not_run(feature_id: FeatureId, message: impl Into<String>) -> Self {
        Self {
            feature_id,
            outcome: Outcome::NotRun,
            message: message.into(),
            data: FeatureData::new(),
            reboot_required: false,
        }
    }
}
