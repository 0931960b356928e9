//! Configuration document model.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::value::{SettingValue, Settings};

/// Section name → settings mapping loaded once per run.
///
/// Immutable after load. Sections that are not present read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    sections: BTreeMap<String, Settings>,
    /// Entries dropped at parse time because they have no setting form.
    #[serde(skip)]
    rejected: Vec<String>,
}

/// On-disk syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Anything that is not YAML is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Toml,
        }
    }
}

impl ConfigDocument {
    /// Document with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from already-typed sections.
    pub fn from_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = (S, Settings)>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(|(name, s)| (name.into(), s)).collect(),
            rejected: Vec::new(),
        }
    }

    /// Parse document content in the given format.
    ///
    /// Returns the parser's message when the content is not valid syntax or
    /// the top level is not a mapping. Entries with unsupported value types
    /// are dropped individually and listed by [`ConfigDocument::rejected`].
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, String> {
        match format {
            DocumentFormat::Toml => {
                let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
                Ok(Self::from_toml(&table))
            }
            DocumentFormat::Yaml => {
                // An empty YAML file is `null`, not an empty mapping.
                if content.trim().is_empty() {
                    return Ok(Self::empty());
                }
                let root: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| e.to_string())?;
                match root {
                    serde_yaml::Value::Null => Ok(Self::empty()),
                    serde_yaml::Value::Mapping(mapping) => Ok(Self::from_yaml(&mapping)),
                    _ => Err("top level must be a mapping of sections".to_string()),
                }
            }
        }
    }

    fn from_toml(table: &toml::Table) -> Self {
        let mut document = Self::empty();
        for (name, section) in table {
            let toml::Value::Table(entries) = section else {
                document.reject(name, None, section.type_str());
                continue;
            };
            let mut settings = Settings::new();
            for (key, value) in entries {
                match SettingValue::from_toml(value) {
                    Ok(value) => {
                        settings.insert(key.clone(), value);
                    }
                    Err(kind) => document.reject(name, Some(key.as_str()), kind),
                }
            }
            document.sections.insert(name.clone(), settings);
        }
        document
    }

    fn from_yaml(mapping: &serde_yaml::Mapping) -> Self {
        let mut document = Self::empty();
        for (name, section) in mapping {
            let Some(name) = name.as_str() else {
                document.rejected.push("section with a non-string name".to_string());
                continue;
            };
            let entries = match section {
                serde_yaml::Value::Mapping(entries) => entries,
                serde_yaml::Value::Null => {
                    document.sections.insert(name.to_string(), Settings::new());
                    continue;
                }
                other => {
                    document.reject(name, None, yaml_kind(other));
                    continue;
                }
            };
            let mut settings = Settings::new();
            for (key, value) in entries {
                let Some(key) = key.as_str() else {
                    document.rejected.push(format!("[{}] key with a non-string name", name));
                    continue;
                };
                match SettingValue::from_yaml(value) {
                    Ok(value) => {
                        settings.insert(key.to_string(), value);
                    }
                    Err(kind) => document.reject(name, Some(key), kind),
                }
            }
            document.sections.insert(name.to_string(), settings);
        }
        document
    }

    fn reject(&mut self, section: &str, key: Option<&str>, kind: &str) {
        self.rejected.push(match key {
            Some(key) => format!("[{}] {}: {} values are not supported", section, key, kind),
            None => format!("'{}': top-level {} is not a section", section, kind),
        });
    }

    /// Entries dropped while parsing, one message per entry.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Look up a section by exact name.
    pub fn section(&self, name: &str) -> Option<&Settings> {
        self.sections.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
        _ => "scalar",
    }
}
