//! Typed configuration values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single configuration value.
///
/// Settings are strings, booleans, integers, and lists of those. Document
/// entries of any other type (floats, nested tables, dates) are dropped
/// one key at a time when the document is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<SettingValue>),
}

/// Key → value mapping used for feature defaults and document sections.
pub type Settings = BTreeMap<String, SettingValue>;

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SettingValue]> {
        match self {
            SettingValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a parsed TOML value, or name its type when it has no setting form.
    pub fn from_toml(value: &toml::Value) -> Result<Self, &'static str> {
        match value {
            toml::Value::String(s) => Ok(SettingValue::String(s.clone())),
            toml::Value::Integer(i) => Ok(SettingValue::Integer(*i)),
            toml::Value::Boolean(b) => Ok(SettingValue::Bool(*b)),
            toml::Value::Array(items) => {
                items.iter().map(Self::from_toml).collect::<Result<_, _>>().map(SettingValue::List)
            }
            other => Err(other.type_str()),
        }
    }

    /// Convert a parsed YAML value, or name its type when it has no setting form.
    pub fn from_yaml(value: &serde_yaml::Value) -> Result<Self, &'static str> {
        use serde_yaml::Value;

        match value {
            Value::String(s) => Ok(SettingValue::String(s.clone())),
            Value::Bool(b) => Ok(SettingValue::Bool(*b)),
            Value::Number(n) => n.as_i64().map(SettingValue::Integer).ok_or("float"),
            Value::Sequence(items) => {
                items.iter().map(Self::from_yaml).collect::<Result<_, _>>().map(SettingValue::List)
            }
            Value::Null => Err("null"),
            Value::Mapping(_) => Err("mapping"),
            Value::Tagged(_) => Err("tagged value"),
        }
    }

    /// Flat string form handed to external programs. Lists are comma-joined.
    pub fn to_env_string(&self) -> String {
        match self {
            SettingValue::List(items) => {
                items.iter().map(SettingValue::to_env_string).collect::<Vec<_>>().join(",")
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::String(s) => write!(f, "{}", s),
            SettingValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}
