//! crates/logging/src/config.rs
//! Startup configuration for the process-wide logger and log level.

use std::env;
use std::sync::Arc;

use crate::level::{LogLevel, ParseLogLevelError};
use crate::line_mode::LineMode;
use crate::logger::{Logger, null_logger};
use crate::state::{DEFAULT_LOG_LEVEL, set_log_level, set_logger};
use crate::stream::{StdLogger, std_logger};

/// Environment variable consulted by [`LogConfig::from_env`].
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Destination selected by a [`LogConfig`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogTarget {
    /// Standard output and standard error, split by severity.
    #[default]
    Std,
    /// Discard all output.
    Null,
}

/// Errors raised while building a [`LogConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The log level variable held an unrecognised value.
    #[error("invalid LOG_LEVEL: {0}")]
    InvalidLevel(#[from] ParseLogLevelError),
    /// The log level variable was not valid unicode.
    #[error("LOG_LEVEL is not valid unicode")]
    NotUnicode,
}

/// Log level, destination and line termination applied at startup.
///
/// # Examples
///
/// ```
/// use logging::{LogConfig, LogLevel, LogTarget};
///
/// let config = LogConfig::default().with_level(LogLevel::Warning);
/// assert_eq!(config.level, LogLevel::Warning);
/// assert_eq!(config.target, LogTarget::Std);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Threshold passed to [`set_log_level`].
    pub level: LogLevel,
    /// Logger passed to [`set_logger`].
    pub target: LogTarget,
    /// Line termination for [`LogTarget::Std`].
    pub line_mode: LineMode,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            target: LogTarget::Std,
            line_mode: LineMode::WithNewline,
        }
    }
}

impl LogConfig {
    /// Replaces the level.
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Replaces the target.
    pub const fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Replaces the line mode.
    pub const fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Reads [`LOG_LEVEL_ENV`], falling back to the default level when it is
    /// unset or invalid.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_default()
    }

    /// Reads [`LOG_LEVEL_ENV`], reporting malformed values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_level_var(env::var(LOG_LEVEL_ENV))
    }

    fn from_level_var(var: Result<String, env::VarError>) -> Result<Self, ConfigError> {
        match var {
            Ok(value) => Ok(Self::default().with_level(value.parse()?)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }

    /// Builds the logger described by this configuration.
    ///
    /// The default standard-stream configuration reuses the shared
    /// [`std_logger`] instance.
    pub fn logger(&self) -> Arc<dyn Logger> {
        match (self.target, self.line_mode) {
            (LogTarget::Null, _) => null_logger(),
            (LogTarget::Std, LineMode::WithNewline) => std_logger(),
            (LogTarget::Std, line_mode) => Arc::new(StdLogger::stdio().with_line_mode(line_mode)),
        }
    }

    /// Installs the level and logger, returning the previous pair.
    pub fn apply(&self) -> (LogLevel, Arc<dyn Logger>) {
        let level = set_log_level(self.level);
        let logger = set_logger(self.logger());
        (level, logger)
    }
}
