//! Sequential feature execution.
//!
//! Features run one at a time in discovery order. They mutate shared host
//! state without isolation, so there is no parallelism and no timeout around
//! feature code. Every per-feature problem, including a panic inside a unit,
//! is contained in that feature's result.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::fault::FeatureFault;
use super::options::RunOptions;
use super::result::{ExecutionResult, ExecutionResults, Outcome};
use crate::domain::configuration::{ConfigDocument, FeatureConfig, resolve};
use crate::domain::{FeatureDescriptor, FeatureId};
use crate::ports::{FeatureUnit, UnitProvider};

/// Run `features` in order and collect one result per feature.
///
/// With `continue_on_error` disabled the loop stops at the first failure and
/// every remaining feature is recorded as `NotRun`.
pub fn run<P>(
    features: &[FeatureDescriptor],
    document: &ConfigDocument,
    options: &RunOptions,
    provider: &P,
) -> ExecutionResults
where
    P: UnitProvider + ?Sized,
{
    let mut results = ExecutionResults::new();
    let mut pending = features.iter();

    for (position, descriptor) in pending.by_ref().enumerate() {
        tracing::info!(
            feature = %descriptor.id,
            "[{}/{}] {} v{}",
            position + 1,
            features.len(),
            descriptor.name,
            descriptor.version
        );

        let result = execute_feature(descriptor, document, options, provider, &results);
        log_result(&result);

        let halt = result.outcome == Outcome::Failure && !options.continue_on_error;
        results.insert(descriptor.id.clone(), result);

        if halt {
            tracing::warn!(
                feature = %descriptor.id,
                "Stopping run: feature failed and continue-on-error is disabled"
            );
            break;
        }
    }

    for descriptor in pending {
        results.insert(
            descriptor.id.clone(),
            ExecutionResult::not_run(
                descriptor.id.clone(),
                "Not attempted: an earlier feature failed and continue-on-error is disabled",
            ),
        );
    }

    results
}

fn execute_feature<P>(
    descriptor: &FeatureDescriptor,
    document: &ConfigDocument,
    options: &RunOptions,
    provider: &P,
    completed: &ExecutionResults,
) -> ExecutionResult
where
    P: UnitProvider + ?Sized,
{
    let id = &descriptor.id;

    let loaded = guarded(|| provider.load(descriptor)).map(|unit| {
        let config = resolve(descriptor, unit.defaults(), document);
        (unit, config)
    });

    if options.dry_run {
        return match loaded {
            Ok((_, config)) => {
                for (key, value) in config.iter() {
                    tracing::debug!(feature = %id, "  {} = {}", key, value);
                }
                ExecutionResult::dry_run(
                    id.clone(),
                    format!("Would install {} ({} setting(s))", descriptor.name, config.len()),
                )
            }
            Err(fault) => ExecutionResult::dry_run(
                id.clone(),
                format!("Would install {} (unit failed to load: {})", descriptor.name, fault),
            ),
        };
    }

    let (unit, config) = match loaded {
        Ok(loaded) => loaded,
        Err(fault) => {
            return ExecutionResult::failure(id.clone(), format!("Failed to load feature: {}", fault));
        }
    };

    if options.enforce_dependencies {
        if let Some(dependency) = unsatisfied_dependency(descriptor, completed) {
            return ExecutionResult::not_run(
                id.clone(),
                format!("Dependency '{}' has not completed successfully in this run", dependency),
            );
        }
    }

    check_and_install(descriptor, unit.as_ref(), &config)
}

fn check_and_install(
    descriptor: &FeatureDescriptor,
    unit: &dyn FeatureUnit,
    config: &FeatureConfig,
) -> ExecutionResult {
    let id = &descriptor.id;

    let issues = match guarded(|| unit.check_prerequisites()) {
        Ok(issues) => issues,
        Err(fault) => {
            return ExecutionResult::failure(
                id.clone(),
                format!("Prerequisite check faulted: {}", fault),
            );
        }
    };

    if !issues.is_empty() {
        for issue in &issues {
            tracing::warn!(feature = %id, "Prerequisite not met: {}", issue);
        }
        return ExecutionResult::failure(
            id.clone(),
            format!("Prerequisites not met: {}", issues.join("; ")),
        );
    }

    tracing::debug!(feature = %id, "Prerequisites passed; installing with {} setting(s)", config.len());

    match guarded(|| unit.install(config)) {
        Ok(report) => {
            let reboot_required = report.reboot_required || descriptor.requires_reboot;
            if report.success {
                let message = if report.message.is_empty() {
                    "Installed successfully".to_string()
                } else {
                    report.message
                };
                ExecutionResult::success(id.clone(), message, report.data, reboot_required)
            } else {
                let message = if report.message.is_empty() {
                    "Install reported failure".to_string()
                } else {
                    report.message
                };
                ExecutionResult::install_failure(id.clone(), message, report.data, reboot_required)
            }
        }
        Err(fault) => ExecutionResult::failure(id.clone(), format!("Install faulted: {}", fault)),
    }
}

fn unsatisfied_dependency<'a>(
    descriptor: &'a FeatureDescriptor,
    completed: &ExecutionResults,
) -> Option<&'a FeatureId> {
    descriptor.depends_on.iter().find(|dependency| {
        completed.get(*dependency).map(|r| r.outcome) != Some(Outcome::Success)
    })
}

/// Invoke feature code, converting a panic into a fault.
fn guarded<T>(op: impl FnOnce() -> Result<T, FeatureFault>) -> Result<T, FeatureFault> {
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(result) => result,
        Err(payload) => Err(FeatureFault::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn log_result(result: &ExecutionResult) {
    match result.outcome {
        Outcome::Success => {
            tracing::info!(feature = %result.feature_id, "Succeeded: {}", result.message);
        }
        Outcome::Failure => {
            tracing::error!(feature = %result.feature_id, "Failed: {}", result.message);
        }
        Outcome::DryRunSkipped | Outcome::NotRun => {
            tracing::info!(feature = %result.feature_id, "Skipped: {}", result.message);
        }
    }
}
