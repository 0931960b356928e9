use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::{FeatureConfig, FeatureDescriptor, FeatureFault, InstallReport, Settings};
use crate::ports::{FeatureUnit, UnitProvider};

/// Scripted behavior of a test unit.
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed,
    PrerequisiteIssues(Vec<String>),
    PrerequisiteFault(String),
    InstallFails(String),
    InstallFaults(String),
    InstallPanics(String),
    Report(InstallReport),
}

#[derive(Debug, Default)]
struct CallLog {
    checks: BTreeMap<String, usize>,
    installs: BTreeMap<String, usize>,
    configs: BTreeMap<String, FeatureConfig>,
}

#[derive(Debug, Clone)]
struct ScriptedUnit {
    id: String,
    behavior: Behavior,
    defaults: Settings,
    log: Arc<Mutex<CallLog>>,
}

impl FeatureUnit for ScriptedUnit {
    fn defaults(&self) -> &Settings {
        &self.defaults
    }

    fn check_prerequisites(&self) -> Result<Vec<String>, FeatureFault> {
        *self.log.lock().unwrap().checks.entry(self.id.clone()).or_default() += 1;

        match &self.behavior {
            Behavior::PrerequisiteIssues(issues) => Ok(issues.clone()),
            Behavior::PrerequisiteFault(message) => Err(FeatureFault::Other(message.clone())),
            _ => Ok(Vec::new()),
        }
    }

    fn install(&self, config: &FeatureConfig) -> Result<InstallReport, FeatureFault> {
        {
            let mut log = self.log.lock().unwrap();
            *log.installs.entry(self.id.clone()).or_default() += 1;
            log.configs.insert(self.id.clone(), config.clone());
        }

        match &self.behavior {
            Behavior::InstallFails(message) => Ok(InstallReport::failed(message.clone())),
            Behavior::InstallFaults(message) => Err(FeatureFault::Other(message.clone())),
            Behavior::InstallPanics(message) => panic!("{}", message),
            Behavior::Report(report) => Ok(report.clone()),
            _ => Ok(InstallReport::succeeded(format!("{} installed", self.id))),
        }
    }
}

/// Unit provider backed by scripted in-memory units with call counting.
#[derive(Debug, Default)]
pub struct StaticUnitProvider {
    units: BTreeMap<String, ScriptedUnit>,
    log: Arc<Mutex<CallLog>>,
}

impl StaticUnitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(self, id: &str, behavior: Behavior) -> Self {
        self.with_unit_defaults(id, behavior, Settings::new())
    }

    pub fn with_unit_defaults(mut self, id: &str, behavior: Behavior, defaults: Settings) -> Self {
        let unit =
            ScriptedUnit { id: id.to_string(), behavior, defaults, log: Arc::clone(&self.log) };
        self.units.insert(id.to_string(), unit);
        self
    }

    pub fn check_calls(&self, id: &str) -> usize {
        self.log.lock().unwrap().checks.get(id).copied().unwrap_or(0)
    }

    pub fn install_calls(&self, id: &str) -> usize {
        self.log.lock().unwrap().installs.get(id).copied().unwrap_or(0)
    }

    pub fn last_config(&self, id: &str) -> Option<FeatureConfig> {
        self.log.lock().unwrap().configs.get(id).cloned()
    }
}

impl UnitProvider for StaticUnitProvider {
    fn load(&self, descriptor: &FeatureDescriptor) -> Result<Box<dyn FeatureUnit>, FeatureFault> {
        self.units
            .get(descriptor.id.as_str())
            .cloned()
            .map(|unit| Box::new(unit) as Box<dyn FeatureUnit>)
            .ok_or_else(|| {
                FeatureFault::Other(format!("no unit registered for '{}'", descriptor.id))
            })
    }
}
