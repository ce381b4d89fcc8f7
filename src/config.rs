use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Level, RotationSpec};

/// Configuration for one [`setup`](crate::setup) call.
///
/// Every field has a default, so `LogConfig::new()` (or deserializing an
/// empty map) yields a working console-plus-file configuration for the
/// root logger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Application name; first choice for the log file identity.
    #[serde(default)]
    pub app: Option<String>,
    /// Script path whose file stem names the log file when `app` is unset.
    #[serde(default)]
    pub script: Option<PathBuf>,
    /// Configure this named logger instead of the root logger.
    #[serde(default)]
    pub logger_name: Option<String>,
    /// Enable console logging.
    #[serde(default = "default_enabled")]
    pub console: bool,
    /// Enable file logging.
    #[serde(default = "default_enabled")]
    pub file: bool,
    /// Minimum level for the console handler.
    #[serde(default)]
    pub console_level: Level,
    /// Minimum level for the file handler.
    #[serde(default)]
    pub file_level: Level,
    /// Console line template; `None` uses the built-in console format.
    #[serde(default)]
    pub console_format: Option<String>,
    /// File line template; `None` uses the built-in file format.
    #[serde(default)]
    pub file_format: Option<String>,
    /// When to rotate the log file; `None` uses size rotation at 1 MB.
    #[serde(default)]
    pub rotation: Option<RotationSpec>,
    /// Route records through a background queue thread.
    #[serde(default)]
    pub use_queue: bool,
    /// Write to a fixed `testing.log` instead of a timestamped file.
    #[serde(default)]
    pub testing: bool,
    /// Directory for log files; `None` resolves the default location.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Create a LogConfig with defaults: console and file logging enabled,
    /// Debug on both handlers, root logger.
    pub fn new() -> Self {
        Self {
            app: None,
            script: None,
            logger_name: None,
            console: default_enabled(),
            file: default_enabled(),
            console_level: Level::default(),
            file_level: Level::default(),
            console_format: None,
            file_format: None,
            rotation: None,
            use_queue: false,
            testing: false,
            log_dir: None,
        }
    }

    /// Set the application name.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Set the script path used to derive the file identity.
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Configure a named logger instead of the root logger.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    /// Enable or disable console logging.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Enable or disable file logging.
    pub fn with_file(mut self, file: bool) -> Self {
        self.file = file;
        self
    }

    /// Set the console handler level.
    pub fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Set the file handler level.
    pub fn with_file_level(mut self, level: Level) -> Self {
        self.file_level = level;
        self
    }

    /// Set the console line template.
    pub fn with_console_format(mut self, format: impl Into<String>) -> Self {
        self.console_format = Some(format.into());
        self
    }

    /// Set the file line template.
    pub fn with_file_format(mut self, format: impl Into<String>) -> Self {
        self.file_format = Some(format.into());
        self
    }

    /// Set the rotation spec (a byte count or a string such as `"100 MB"`).
    pub fn with_rotation(mut self, rotation: impl Into<RotationSpec>) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    /// Route records through a background queue thread.
    pub fn with_queue(mut self, use_queue: bool) -> Self {
        self.use_queue = use_queue;
        self
    }

    /// Write to a fixed `testing.log` instead of a timestamped file.
    pub fn with_testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    /// Set the directory for log files.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Identity used in the log file name: the app name, else the script's
    /// file stem, else `"app"`.
    pub fn identity(&self) -> String {
        if let Some(app) = &self.app
            && !app.is_empty()
        {
            return app.clone();
        }
        if let Some(script) = &self.script
            && let Some(stem) = script.file_stem()
        {
            return stem.to_string_lossy().into_owned();
        }
        "app".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_enabled() -> bool {
    true
}
