//! Console and flat-file logging.
//!
//! One `LoggerConfig` value is built at startup from the configuration
//! document and CLI flags, then installed as the global `tracing` subscriber.
//! `RUST_LOG` can refine the filter further.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::domain::configuration::{ConfigDocument, Settings, overlay};
use crate::domain::{AppError, SettingValue};

/// Document section holding logger settings.
pub const LOGGING_SECTION: &str = "Logging";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Append-only log file. `None` logs to the console only.
    pub path: Option<PathBuf>,
    pub level: LevelFilter,
    pub timestamps: bool,
    pub console: bool,
    /// Problems found while building the config, logged once the subscriber exists.
    pub deferred_warnings: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            path: None,
            level: LevelFilter::INFO,
            timestamps: true,
            console: true,
            deferred_warnings: Vec::new(),
        }
    }
}

impl LoggerConfig {
    /// Read the `[Logging]` section with the same whitelist merge features use.
    pub fn from_document(document: &ConfigDocument) -> Self {
        let defaults: Settings = [
            ("path".to_string(), SettingValue::from("")),
            ("level".to_string(), SettingValue::from("info")),
            ("timestamps".to_string(), SettingValue::from(true)),
        ]
        .into_iter()
        .collect();
        let settings = overlay(&defaults, document.section(LOGGING_SECTION));

        let mut config = Self::default();

        match settings.get("path").and_then(SettingValue::as_str) {
            Some(path) if !path.trim().is_empty() => config.path = Some(PathBuf::from(path.trim())),
            Some(_) => {}
            None => config.warn("[Logging] path must be a string; logging to console only"),
        }

        match settings.get("level").and_then(SettingValue::as_str).map(parse_level) {
            Some(Ok(level)) => config.level = level,
            Some(Err(err)) => config.warn(&format!("{}; using info", err)),
            None => config.warn("[Logging] level must be a string; using info"),
        }

        match settings.get("timestamps").and_then(SettingValue::as_bool) {
            Some(timestamps) => config.timestamps = timestamps,
            None => config.warn("[Logging] timestamps must be a boolean; timestamps stay on"),
        }

        config
    }

    /// Apply command-line overrides on top of document settings.
    pub fn with_overrides(
        mut self,
        path: Option<PathBuf>,
        level: Option<LevelFilter>,
        no_timestamps: bool,
    ) -> Self {
        if path.is_some() {
            self.path = path;
        }
        if let Some(level) = level {
            self.level = level;
        }
        if no_timestamps {
            self.timestamps = false;
        }
        self
    }

    fn warn(&mut self, message: &str) {
        self.deferred_warnings.push(message.to_string());
    }
}

pub fn parse_level(value: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(value.trim()).map_err(|_| {
        format!("Invalid log level '{}': expected off, error, warn, info, debug, or trace", value)
    })
}

/// Handle to the installed subscriber. Keep it alive until shutdown so the
/// file writer flushes.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggerConfig) -> Result<Logger, AppError> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console {
        layers.push(fmt_layer(io::stderr, io::stderr().is_terminal(), config.timestamps));
    }

    let guard = match &config.path {
        Some(path) => {
            let appender = open_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt_layer(writer, false, config.timestamps));
            Some(guard)
        }
        None => None,
    };

    let filter = EnvFilter::builder().with_default_directive(config.level.into()).from_env_lossy();

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    for warning in &config.deferred_warnings {
        tracing::warn!("{}", warning);
    }

    Ok(Logger { guard })
}

fn fmt_layer<W>(writer: W, ansi: bool, timestamps: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi).with_target(false);
    if timestamps { layer.boxed() } else { layer.without_time().boxed() }
}

/// Never-rotating appender; existing content is kept.
fn open_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender, AppError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Logging(format!("Log path has no file name: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|e| {
        AppError::Logging(format!("Failed to create log directory {}: {}", directory.display(), e))
    })?;

    Ok(tracing_appender::rolling::never(directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::DocumentFormat;

    fn document(toml: &str) -> ConfigDocument {
        ConfigDocument::parse(toml, DocumentFormat::Toml).unwrap()
    }

    #[test]
    fn defaults_without_section() {
        let config = LoggerConfig::from_document(&ConfigDocument::empty());
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn reads_logging_section() {
        let config = LoggerConfig::from_document(&document(
            "[Logging]\npath = \"logs/vmprep.log\"\nlevel = \"debug\"\ntimestamps = false\nrotate = true\n",
        ));

        assert_eq!(config.path, Some(PathBuf::from("logs/vmprep.log")));
        assert_eq!(config.level, LevelFilter::DEBUG);
        assert!(!config.timestamps);
        assert!(config.deferred_warnings.is_empty());
    }

    #[test]
    fn bad_values_fall_back_with_warnings() {
        let config = LoggerConfig::from_document(&document(
            "[Logging]\nlevel = \"loud\"\ntimestamps = \"yes\"\n",
        ));

        assert_eq!(config.level, LevelFilter::INFO);
        assert!(config.timestamps);
        assert_eq!(config.deferred_warnings.len(), 2);
    }

    #[test]
    fn cli_overrides_document() {
        let config = LoggerConfig::from_document(&document(
            "[Logging]\npath = \"a.log\"\nlevel = \"warn\"\n",
        ))
        .with_overrides(Some(PathBuf::from("b.log")), Some(LevelFilter::TRACE), true);

        assert_eq!(config.path, Some(PathBuf::from("b.log")));
        assert_eq!(config.level, LevelFilter::TRACE);
        assert!(!config.timestamps);
    }

    #[test]
    fn absent_overrides_keep_document_values() {
        let config = LoggerConfig::from_document(&document("[Logging]\npath = \"a.log\"\n"))
            .with_overrides(None, None, false);
        assert_eq!(config.path, Some(PathBuf::from("a.log")));
        assert!(config.timestamps);
    }

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::WARN);
        assert!(parse_level("verbose").is_err());
    }
}
