use crate::git::controller::GitController;
use crate::git::executor::SystemExecutor;
use crate::trace::{DEFAULT_PREFIX, HistoryFileSink, TraceConfig, TracingSink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub trace: TraceSettings,
    pub git: GitSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TraceSettings {
    pub enabled: bool,
    pub prefix: String,
    pub sink: SinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            prefix: DEFAULT_PREFIX.to_string(),
            sink: SinkKind::Stderr,
            history_path: None,
        }
    }
}

/// Where traced command lines go
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stderr,
    Tracing,
    File,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GitSettings {
    /// Directory git runs in; the process working directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        // Validate before saving
        self.validate()?;

        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace.sink == SinkKind::File && self.trace.history_path.is_none() {
            return Err(ConfigError::InvalidValue(
                "trace.history_path is required when trace.sink = \"file\"".to_string(),
            ));
        }

        if let Some(dir) = &self.git.working_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git.working_dir must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Build the trace configuration these settings describe
    pub fn trace_config(&self) -> Result<TraceConfig, ConfigError> {
        self.validate()?;

        let config = TraceConfig::new()
            .with_prefix(self.trace.prefix.clone())
            .enabled(self.trace.enabled);

        Ok(match self.trace.sink {
            SinkKind::Stderr => config,
            SinkKind::Tracing => config.with_sink(TracingSink),
            SinkKind::File => {
                let path = self.trace.history_path.as_ref().ok_or_else(|| {
                    ConfigError::InvalidValue("trace.history_path is not set".to_string())
                })?;
                config.with_sink(HistoryFileSink::with_path(path)?)
            }
        })
    }

    /// Build a controller running the system `git`
    pub fn build_controller(&self) -> Result<GitController<SystemExecutor>, ConfigError> {
        let executor = match &self.git.working_dir {
            Some(dir) => SystemExecutor::in_dir(dir),
            None => SystemExecutor::new(),
        };
        Ok(GitController::with_executor(executor).with_trace(self.trace_config()?))
    }
}
