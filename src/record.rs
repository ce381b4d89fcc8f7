use std::thread;

use time::OffsetDateTime;

use crate::Level;

/// A single emitted log event.
///
/// Records are self-contained values: the timestamp and the emitting thread
/// name are captured at emission, so a record forwarded through the queue
/// keeps its original attribution.
#[derive(Debug, Clone)]
pub struct Record {
    /// When the record was emitted.
    pub timestamp: OffsetDateTime,
    /// Name of the logger the record was emitted through (`"root"` for the
    /// root logger).
    pub name: String,
    /// Severity of the record.
    pub level: Level,
    /// The message text.
    pub message: String,
    /// Name of the emitting thread.
    pub thread: String,
}

impl Record {
    /// Create a record stamped with the current time and thread.
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        let current = thread::current();
        let thread = current
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{:?}", current.id()));

        Self {
            timestamp: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            name: name.into(),
            level,
            message: message.into(),
            thread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = Record::new("root", Level::Info, "hello");
        assert_eq!(record.name, "root");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "hello");
        assert!(!record.thread.is_empty());
    }

    #[test]
    fn thread_name_captured_at_emission() {
        let record = thread::Builder::new()
            .name("emitter".to_string())
            .spawn(|| Record::new("root", Level::Debug, "from thread"))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(record.thread, "emitter");
    }
}
