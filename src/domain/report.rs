//! Run report aggregation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::execution::{ExecutionResults, FeatureData, Outcome};
use crate::domain::{FeatureDescriptor, FeatureId};

/// One feature's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub feature_id: FeatureId,
    pub name: String,
    pub outcome: Outcome,
    pub message: String,
    pub reboot_required: bool,
    pub data: FeatureData,
}

/// Aggregate outcome of a run. The only artifact handed to the CLI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub success_count: usize,
    pub failure_count: usize,
    /// Dry-run and never-attempted features together.
    pub skipped_count: usize,
    pub reboot_required: bool,
    /// Same order as the descriptors the run was given.
    pub entries: Vec<ReportEntry>,
    pub completed_at: DateTime<Utc>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// Build the report for `descriptors`, stamped with the current time.
pub fn summarize(results: &ExecutionResults, descriptors: &[FeatureDescriptor]) -> RunReport {
    summarize_at(results, descriptors, Utc::now())
}

/// Build the report for `descriptors` with an explicit completion time.
///
/// A descriptor without a recorded result is listed as `NotRun`.
pub fn summarize_at(
    results: &ExecutionResults,
    descriptors: &[FeatureDescriptor],
    completed_at: DateTime<Utc>,
) -> RunReport {
    let entries: Vec<ReportEntry> = descriptors
        .iter()
        .map(|descriptor| match results.get(&descriptor.id) {
            Some(result) => ReportEntry {
                feature_id: descriptor.id.clone(),
                name: descriptor.name.clone(),
                outcome: result.outcome,
                message: result.message.clone(),
                reboot_required: result.outcome == Outcome::Success
                    && (result.reboot_required || descriptor.requires_reboot),
                data: result.data.clone(),
            },
            None => ReportEntry {
                feature_id: descriptor.id.clone(),
                name: descriptor.name.clone(),
                outcome: Outcome::NotRun,
                message: "No result recorded".to_string(),
                reboot_required: false,
                data: FeatureData::new(),
            },
        })
        .collect();

    let count = |outcome: Outcome| entries.iter().filter(|e| e.outcome == outcome).count();

    RunReport {
        success_count: count(Outcome::Success),
        failure_count: count(Outcome::Failure),
        skipped_count: entries.iter().filter(|e| e.outcome.is_skipped()).count(),
        reboot_required: entries.iter().any(|e| e.reboot_required),
        completed_at,
        entries,
    }
}
