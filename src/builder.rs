//! Builder pattern for assembling a logging configuration.
//!
//! This module provides a convenient builder API for configuring and
//! activating logging in a single chain of method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use logkit::Level;
//!
//! // Console-only logging for the root logger.
//! logkit::builder()
//!     .with_app("myapp")
//!     .with_file(false)
//!     .setup();
//!
//! // Named logger with a rotating file.
//! logkit::builder()
//!     .with_app("myapp")
//!     .with_logger_name("myapp.worker")
//!     .with_file_level(Level::Debug)
//!     .with_rotation("100 MB")
//!     .setup();
//! ```

use std::path::PathBuf;

use crate::registry::{Logger, LoggerRegistry};
use crate::{Level, LogConfig, RotationSpec};

/// A builder for configuring and activating logging.
///
/// This provides a fluent interface over [`LogConfig`] ending in
/// [`setup`](Self::setup), which applies the configuration to the global
/// registry.
#[derive(Debug, Clone)]
pub struct LogBuilder {
    config: LogConfig,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self {
            config: LogConfig::new(),
        }
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self { config }
    }

    /// Set the application name.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.config = self.config.with_app(app);
        self
    }

    /// Set the script path used to derive the file identity.
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_script(script);
        self
    }

    /// Configure a named logger instead of the root logger.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_logger_name(name);
        self
    }

    /// Enable or disable console logging.
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config = self.config.with_console(enabled);
        self
    }

    /// Enable or disable file logging.
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.config = self.config.with_file(enabled);
        self
    }

    /// Set the console handler level.
    pub fn with_console_level(mut self, level: Level) -> Self {
        self.config = self.config.with_console_level(level);
        self
    }

    /// Set the file handler level.
    pub fn with_file_level(mut self, level: Level) -> Self {
        self.config = self.config.with_file_level(level);
        self
    }

    /// Set the console line template.
    pub fn with_console_format(mut self, format: impl Into<String>) -> Self {
        self.config = self.config.with_console_format(format);
        self
    }

    /// Set the file line template.
    pub fn with_file_format(mut self, format: impl Into<String>) -> Self {
        self.config = self.config.with_file_format(format);
        self
    }

    /// Set the rotation spec (a byte count or a string such as `"100 MB"`,
    /// `"2 weeks"` or `"12:00"`).
    pub fn with_rotation(mut self, rotation: impl Into<RotationSpec>) -> Self {
        self.config = self.config.with_rotation(rotation);
        self
    }

    /// Route records through a background queue thread.
    pub fn with_queue(mut self, use_queue: bool) -> Self {
        self.config = self.config.with_queue(use_queue);
        self
    }

    /// Write to a fixed `testing.log` instead of a timestamped file.
    pub fn with_testing(mut self, testing: bool) -> Self {
        self.config = self.config.with_testing(testing);
        self
    }

    /// Set the directory for log files.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_log_dir(dir);
        self
    }

    /// Get the assembled configuration without applying it.
    pub fn build(self) -> LogConfig {
        self.config
    }

    /// Apply the configuration to the global registry.
    ///
    /// Returns the named logger's handle when `logger_name` is set, `None`
    /// in root mode. See [`setup`](crate::setup) for the full semantics.
    pub fn setup(self) -> Option<Logger> {
        crate::setup(&self.config)
    }

    /// Apply the configuration to a specific registry instead of the
    /// global one. Does not touch the `log` facade.
    pub fn setup_with(self, registry: &LoggerRegistry) -> Option<Logger> {
        crate::setup_with(registry, &self.config)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
