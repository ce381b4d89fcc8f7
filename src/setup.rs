//! One-call logging setup.
//!
//! [`setup`] turns a [`LogConfig`] into handlers on the global registry:
//! a colored console handler, a rotating file handler, or both, optionally
//! behind a background queue. Calling it again with the same name replaces
//! what the previous call installed, so re-running initialization code is
//! harmless.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::file::{FileHandler, timestamped_filename};
use crate::queue::QueueListener;
use crate::registry::{Logger, LoggerRegistry, ROOT_LOGGER, registry};
use crate::{
    ConsoleHandler, DEFAULT_CONSOLE_FORMAT, DEFAULT_FILE_FORMAT, Formatter, Handler, Level,
    LogConfig, Record, Result, RotationPolicy, bridge,
};

/// Environment variable overriding the default log directory.
pub const LOG_DIR_ENV: &str = "LOGKIT_LOG_DIR";

/// Configure logging on the global registry.
///
/// Builds the handlers `config` asks for and installs them on the root
/// logger, or on `config.logger_name` when set, in which case the named
/// logger's handle is returned. The `log` facade macros are bridged to the
/// registry on first call.
///
/// This function does not fail. A file that cannot be opened degrades to
/// console-only with a warning; a facade already claimed by another logger
/// is reported once and direct [`Logger`] handles keep working.
pub fn setup(config: &LogConfig) -> Option<Logger> {
    let logger = setup_with(registry(), config);
    bridge::install_once(registry());
    bridge::sync_max_level(registry());
    logger
}

/// [`setup`] against a specific registry, leaving the `log` facade alone.
pub fn setup_with(registry: &LoggerRegistry, config: &LogConfig) -> Option<Logger> {
    let name = config.logger_name.as_deref().unwrap_or(ROOT_LOGGER);

    let console = config.console.then(|| {
        let template = config
            .console_format
            .as_deref()
            .unwrap_or(DEFAULT_CONSOLE_FORMAT);
        Arc::new(ConsoleHandler::new(
            config.console_level,
            Formatter::new(template),
        ))
    });

    let mut handlers: Vec<Arc<dyn Handler>> = Vec::new();
    if let Some(console) = &console {
        handlers.push(console.clone());
    }

    if config.file {
        match build_file_handler(config) {
            Ok(handler) => handlers.push(Arc::new(handler)),
            Err(err) => {
                // Degrade to console-only; the failure is reported, never
                // raised.
                let warning = Record::new(
                    name,
                    Level::Warning,
                    format!("file logging disabled: {}", err),
                );
                match &console {
                    Some(console) if warning.level >= console.level() => {
                        let _ = console.emit(&warning);
                    }
                    _ => eprintln!("logkit: file logging disabled: {}", err),
                }
            }
        }
    }

    // The entry gate is the most verbose level any handler accepts; with no
    // handlers there is nothing to gate for and the entry passes nothing.
    let level = handlers.iter().map(|handler| handler.level()).min();

    let (handlers, listener) = if config.use_queue && !handlers.is_empty() {
        match QueueListener::start(handlers.clone()) {
            Ok((queue_handler, listener)) => {
                let queued: Vec<Arc<dyn Handler>> = vec![Arc::new(queue_handler)];
                (queued, Some(listener))
            }
            Err(err) => {
                eprintln!("logkit: queue delivery unavailable: {}", err);
                (handlers, None)
            }
        }
    } else {
        (handlers, None)
    };

    registry.apply_setup(name, handlers, level, listener);

    config.logger_name.as_deref().map(|name| registry.logger(name))
}

fn build_file_handler(config: &LogConfig) -> Result<FileHandler> {
    let identity = config.identity();
    let path = resolve_log_dir(config)
        .join(&identity)
        .join(timestamped_filename(&identity, config.testing));
    let template = config.file_format.as_deref().unwrap_or(DEFAULT_FILE_FORMAT);
    FileHandler::new(
        &path,
        RotationPolicy::parse(config.rotation.as_ref()),
        config.file_level,
        Formatter::new(template),
    )
}

/// Base directory for log files: the configured directory, else the
/// `LOGKIT_LOG_DIR` environment variable, else `~/.logkit/logs`. The
/// application identity is appended as a subdirectory.
fn resolve_log_dir(config: &LogConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }
    if let Some(dir) = env::var_os(LOG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".logkit")
        .join("logs")
}
