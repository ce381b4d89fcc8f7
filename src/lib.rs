//! # Logkit
//!
//! A convenience layer over logging: one call configures colored console
//! output and rotating log files, repeated calls replace instead of
//! duplicate, and failures degrade instead of aborting the program.
//!
//! ## Features
//!
//! - Console and file logging with independent levels and line templates
//! - Size- and time-based rotation from human-readable specs (`"100 MB"`,
//!   `"2 weeks"`, `"12:00"`)
//! - Idempotent setup for the root logger or any named logger
//! - `log` facade macros routed by target, with root fallback
//! - Optional background queue keeping slow sinks off the calling thread
//!
//! ## Example
//!
//! ```rust
//! use logkit::LogConfig;
//!
//! let config = LogConfig::new().with_app("demo").with_file(false);
//! logkit::setup(&config);
//!
//! log::info!("this is an info message");
//! ```

pub mod bridge;
pub mod builder;
pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod handler;
pub mod level;
pub mod queue;
pub mod record;
pub mod registry;
pub mod rotation;
mod setup;
pub mod writer;

pub use builder::LogBuilder;
pub use config::LogConfig;
pub use error::{Error, Result};
pub use file::FileHandler;
pub use format::{DEFAULT_CONSOLE_FORMAT, DEFAULT_FILE_FORMAT, Formatter};
pub use handler::{ConsoleHandler, Handler, MemoryHandler};
pub use level::Level;
pub use queue::{QueueHandler, QueueListener};
pub use record::Record;
pub use registry::{Logger, LoggerRegistry, ROOT_LOGGER, registry};
pub use rotation::{RotationPolicy, RotationSpec, TimeUnit};
pub use setup::{LOG_DIR_ENV, setup, setup_with};
pub use writer::RotatingWriter;

/// Start assembling a configuration fluently; finish with
/// [`LogBuilder::setup`].
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
