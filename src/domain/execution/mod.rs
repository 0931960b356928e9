//! Feature execution: options, outcomes, and the sequential engine.

pub mod engine;
pub mod fault;
pub mod options;
pub mod result;

pub use engine::run;
pub use fault::FeatureFault;
pub use options::RunOptions;
pub use result::{ExecutionResult, ExecutionResults, FeatureData, InstallReport, Outcome};
