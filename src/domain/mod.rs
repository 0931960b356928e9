pub mod configuration;
pub mod error;
pub mod execution;
pub mod feature;
pub mod identifiers;
pub mod ordering;
pub mod report;
pub mod selection;

pub use configuration::{ConfigDocument, FeatureConfig, SettingValue, Settings};
pub use error::AppError;
pub use execution::{
    ExecutionResult, ExecutionResults, FeatureData, FeatureFault, InstallReport, Outcome,
    RunOptions,
};
pub use feature::{
    CommandSpec, DEFAULT_DESCRIPTION, DEFAULT_VERSION, FeatureDescriptor, FeatureId,
    FeatureManifest, ManifestError,
};
pub use ordering::{OrderingIssue, check_ordering};
pub use report::{ReportEntry, RunReport, summarize};
pub use selection::{Selection, select};
