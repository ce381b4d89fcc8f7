use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::writer::RotatingWriter;
use crate::{Formatter, Handler, Level, Record, Result, RotationPolicy};

/// Rotating file sink.
///
/// Formats records through the plain template and appends them to a
/// [`RotatingWriter`]; all rotation state lives behind the writer's mutex,
/// so one handler can be shared across threads.
pub struct FileHandler {
    level: Level,
    formatter: Formatter,
    writer: Mutex<RotatingWriter>,
}

impl FileHandler {
    /// Open a file handler at `path` with the given rotation policy.
    ///
    /// The file is opened eagerly; a path that cannot be created surfaces
    /// here rather than on the first emit.
    pub fn new(
        path: &Path,
        policy: RotationPolicy,
        level: Level,
        formatter: Formatter,
    ) -> Result<Self> {
        Ok(Self {
            level,
            formatter,
            writer: Mutex::new(RotatingWriter::new(path, policy)?),
        })
    }
}

impl Handler for FileHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = self.formatter.format(record);
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().unwrap().flush()?;
        Ok(())
    }
}

/// File name for a logging session started now: `<ident>-<YYYYMMDD-HHMM>.log`,
/// or the fixed `testing.log` when `testing` is set so test runs do not
/// accumulate timestamped files.
pub fn timestamped_filename(ident: &str, testing: bool) -> String {
    if testing {
        return "testing.log".to_string();
    }
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = now
        .format(format_description!("[year][month][day]-[hour][minute]"))
        .unwrap_or_default();
    format!("{}-{}.log", ident, stamp)
}
