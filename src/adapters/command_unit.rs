//! Feature units backed by manifest-declared external programs.
//!
//! Protocol:
//! - Programs run with the manifest's directory as working directory.
//! - `VMPREP_FEATURE_ID` is always set. Install additionally receives the
//!   effective configuration as `VMPREP_CONFIG` (JSON) and one
//!   `VMPREP_CFG_<KEY>` variable per setting.
//! - Check: every non-empty stdout line is an unmet prerequisite.
//! - Install: a JSON install report on the last stdout line wins; otherwise
//!   the exit status decides.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use crate::domain::{
    CommandSpec, FeatureConfig, FeatureDescriptor, FeatureFault, FeatureId, FeatureManifest,
    InstallReport, Settings,
};
use crate::ports::{FeatureUnit, UnitProvider};

pub const FEATURE_ID_ENV: &str = "VMPREP_FEATURE_ID";
pub const CONFIG_ENV: &str = "VMPREP_CONFIG";
pub const SETTING_ENV_PREFIX: &str = "VMPREP_CFG_";

#[derive(Debug, Clone)]
pub struct CommandUnit {
    feature_id: FeatureId,
    working_dir: PathBuf,
    defaults: Settings,
    check: Option<CommandSpec>,
    install: CommandSpec,
}

impl CommandUnit {
    pub fn new(
        feature_id: FeatureId,
        working_dir: PathBuf,
        defaults: Settings,
        check: Option<CommandSpec>,
        install: CommandSpec,
    ) -> Self {
        Self { feature_id, working_dir, defaults, check, install }
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut command = Command::new(self.resolve_program(&spec.program));
        command.args(&spec.args);
        command.current_dir(&self.working_dir);
        command.env(FEATURE_ID_ENV, self.feature_id.as_str());
        command
    }

    /// Relative paths with a separator are taken relative to the manifest
    /// directory; bare names go through `PATH`.
    fn resolve_program(&self, program: &str) -> PathBuf {
        let path = Path::new(program);
        if path.is_relative() && path.components().count() > 1 {
            self.working_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }

    fn execute(&self, spec: &CommandSpec, command: &mut Command) -> Result<Output, FeatureFault> {
        tracing::debug!(feature = %self.feature_id, "Running {}", spec.display());
        let output = command.output().map_err(|e| FeatureFault::Launch {
            program: spec.program.clone(),
            details: e.to_string(),
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!(feature = %self.feature_id, "stderr: {}", line);
        }
        Ok(output)
    }
}

impl FeatureUnit for CommandUnit {
    fn defaults(&self) -> &Settings {
        &self.defaults
    }

    fn check_prerequisites(&self) -> Result<Vec<String>, FeatureFault> {
        let Some(spec) = &self.check else {
            return Ok(Vec::new());
        };
        let output = self.execute(spec, &mut self.command(spec))?;
        Ok(prerequisite_issues(&output))
    }

    fn install(&self, config: &FeatureConfig) -> Result<InstallReport, FeatureFault> {
        let mut command = self.command(&self.install);

        let json = serde_json::to_string(config)
            .map_err(|e| FeatureFault::Other(format!("cannot encode configuration: {}", e)))?;
        command.env(CONFIG_ENV, json);
        for (key, value) in config.iter() {
            command.env(setting_env_name(key), value.to_env_string());
        }

        let output = self.execute(&self.install, &mut command)?;
        Ok(install_report(&output))
    }
}

/// Loads command units by re-reading each descriptor's manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestUnitProvider;

impl UnitProvider for ManifestUnitProvider {
    fn load(&self, descriptor: &FeatureDescriptor) -> Result<Box<dyn FeatureUnit>, FeatureFault> {
        let path = &descriptor.source_location;
        let manifest_fault =
            |details: String| FeatureFault::Manifest { path: path.clone(), details };

        let content = fs::read_to_string(path).map_err(|e| manifest_fault(e.to_string()))?;
        let manifest = FeatureManifest::parse(&content).map_err(|e| manifest_fault(e.to_string()))?;
        let install = manifest.install.ok_or(FeatureFault::MissingInstall)?;

        let working_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Box::new(CommandUnit::new(
            descriptor.id.clone(),
            working_dir,
            manifest.defaults,
            manifest.check,
            install,
        )))
    }
}

/// `VMPREP_CFG_` followed by the key uppercased, non-alphanumerics as `_`.
pub fn setting_env_name(key: &str) -> String {
    let suffix: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{}{}", SETTING_ENV_PREFIX, suffix)
}

fn non_empty_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "termination by signal".to_string(),
    }
}

fn prerequisite_issues(output: &Output) -> Vec<String> {
    let mut issues = non_empty_lines(&output.stdout);
    if issues.is_empty() && !output.status.success() {
        let detail = non_empty_lines(&output.stderr).pop();
        issues.push(match detail {
            Some(detail) => {
                format!("prerequisite check ended with {}: {}", describe_status(output.status), detail)
            }
            None => format!("prerequisite check ended with {}", describe_status(output.status)),
        });
    }
    issues
}

fn install_report(output: &Output) -> InstallReport {
    let mut stdout = non_empty_lines(&output.stdout);
    let last = stdout.pop();

    if let Some(line) = last.as_deref().filter(|l| l.starts_with('{'))
        && let Ok(mut report) = serde_json::from_str::<InstallReport>(line)
    {
        if !output.status.success() {
            report.success = false;
            if report.message.is_empty() {
                report.message = format!("install ended with {}", describe_status(output.status));
            }
        }
        return report;
    }

    if output.status.success() {
        return InstallReport::succeeded(last.unwrap_or_default());
    }

    let detail = non_empty_lines(&output.stderr).pop().or(last);
    InstallReport::failed(match detail {
        Some(detail) => format!("install ended with {}: {}", describe_status(output.status), detail),
        None => format!("install ended with {}", describe_status(output.status)),
    })
}
