use std::sync::Mutex;

use colored::Colorize;

use crate::{Formatter, Level, Record, Result};

/// A sink that receives log records and writes them somewhere.
///
/// Handlers are attached to loggers through the registry; dispatch compares
/// `record.level` against [`Handler::level`] before calling [`Handler::emit`],
/// so implementations do not filter again. This trait is also the interception
/// point for embedders and tests: attach your own implementation instead of
/// replacing any global function.
pub trait Handler: Send + Sync {
    /// Minimum severity this handler accepts.
    fn level(&self) -> Level;

    /// Write one record to the destination.
    fn emit(&self, record: &Record) -> Result<()>;

    /// Flush buffered output. The default does nothing.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Writes colorized lines to stderr.
///
/// The whole line is colored by severity: Debug cyan, Info green, Warning
/// yellow, Error red, Critical bold red. The `colored` crate drops the escape
/// codes itself when stderr is not a terminal or `NO_COLOR` is set.
pub struct ConsoleHandler {
    level: Level,
    formatter: Formatter,
}

impl ConsoleHandler {
    /// Create a console handler with the given threshold and template.
    pub fn new(level: Level, formatter: Formatter) -> Self {
        Self { level, formatter }
    }
}

impl Handler for ConsoleHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = self.formatter.format(record);
        let colored = match record.level {
            Level::Debug => line.cyan(),
            Level::Info => line.green(),
            Level::Warning => line.yellow(),
            Level::Error => line.red(),
            Level::Critical => line.red().bold(),
        };
        eprintln!("{}", colored);
        Ok(())
    }
}

/// Collects records in memory.
///
/// Useful in tests and for embedders that want to inspect what was logged:
/// keep a clone of the `Arc` you attach and read the records back later.
pub struct MemoryHandler {
    level: Level,
    records: Mutex<Vec<Record>>,
}

impl MemoryHandler {
    /// Create an empty capture handler with the given threshold.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every record captured so far.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// Remove and return every captured record.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// True if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Handler for MemoryHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &Record) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
