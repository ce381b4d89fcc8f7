use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use crate::{Handler, Level, Record, Result};

/// Cap on direct stderr reports for handler failures inside the listener
/// thread; after this many the listener keeps forwarding silently.
const MAX_FAILURE_REPORTS: usize = 5;

enum QueueMessage {
    Record(Record),
    Shutdown,
}

/// Handler that enqueues records instead of writing them.
///
/// Emission never blocks on I/O: the record goes into an unbounded channel
/// and the listener thread performs the real write. Once the listener is
/// gone, sends are dropped silently; the worst outcome is missing output,
/// never an error on the emitting thread.
pub struct QueueHandler {
    sender: Sender<QueueMessage>,
    level: Level,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Handler for QueueHandler {
    /// The most verbose level any wrapped handler accepts, so level
    /// arithmetic over the attached set is unchanged by the wrapping.
    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let _ = self.sender.send(QueueMessage::Record(record.clone()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        for handler in &self.handlers {
            handler.flush()?;
        }
        Ok(())
    }
}

/// Background consumer draining the queue in arrival order.
///
/// Exactly one listener exists per queued setup; the registry keeps it next
/// to the handlers it feeds and stops it on reconfiguration or teardown.
pub struct QueueListener {
    sender: Sender<QueueMessage>,
    handle: Option<JoinHandle<()>>,
}

impl QueueListener {
    /// Start a listener forwarding to `handlers`.
    ///
    /// Returns the [`QueueHandler`] to attach in place of the real set plus
    /// the listener to keep for shutdown. Each dequeued record is offered to
    /// every handler whose level admits it, in arrival order.
    pub fn start(handlers: Vec<Arc<dyn Handler>>) -> Result<(QueueHandler, QueueListener)> {
        let (sender, receiver) = mpsc::channel::<QueueMessage>();
        let level = handlers
            .iter()
            .map(|handler| handler.level())
            .min()
            .unwrap_or(Level::Debug);

        let worker_handlers = handlers.clone();
        let handle = thread::Builder::new()
            .name("logkit-queue".to_string())
            .spawn(move || {
                let mut reported = 0usize;
                while let Ok(message) = receiver.recv() {
                    let record = match message {
                        QueueMessage::Record(record) => record,
                        QueueMessage::Shutdown => break,
                    };
                    for handler in &worker_handlers {
                        if record.level < handler.level() {
                            continue;
                        }
                        if let Err(err) = handler.emit(&record)
                            && reported < MAX_FAILURE_REPORTS
                        {
                            reported += 1;
                            eprintln!("logkit: queued record dropped by handler: {}", err);
                        }
                    }
                }
            })?;

        let queue_handler = QueueHandler {
            sender: sender.clone(),
            level,
            handlers,
        };
        let listener = QueueListener {
            sender,
            handle: Some(handle),
        };
        Ok((queue_handler, listener))
    }

    /// Stop the listener.
    ///
    /// Everything enqueued before this call is still delivered; the shutdown
    /// marker travels the same channel, so the thread drains in order, exits,
    /// and is joined. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(QueueMessage::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for QueueListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryHandler;

    #[test]
    fn test_records_forwarded_in_order() {
        let memory = Arc::new(MemoryHandler::new(Level::Debug));
        let (queue_handler, mut listener) =
            QueueListener::start(vec![memory.clone() as Arc<dyn Handler>]).unwrap();

        for i in 0..20 {
            queue_handler
                .emit(&Record::new("root", Level::Info, format!("message {}", i)))
                .unwrap();
        }
        listener.stop();

        let records = memory.records();
        assert_eq!(records.len(), 20);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.message, format!("message {}", i));
        }
    }

    #[test]
    fn test_listener_respects_handler_levels() {
        let memory = Arc::new(MemoryHandler::new(Level::Warning));
        let (queue_handler, mut listener) =
            QueueListener::start(vec![memory.clone() as Arc<dyn Handler>]).unwrap();

        queue_handler
            .emit(&Record::new("root", Level::Debug, "quiet"))
            .unwrap();
        queue_handler
            .emit(&Record::new("root", Level::Error, "loud"))
            .unwrap();
        listener.stop();

        let records = memory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "loud");
    }

    #[test]
    fn test_queue_handler_reports_most_verbose_level() {
        let debug = Arc::new(MemoryHandler::new(Level::Debug));
        let error = Arc::new(MemoryHandler::new(Level::Error));
        let (queue_handler, mut listener) =
            QueueListener::start(vec![debug as Arc<dyn Handler>, error as Arc<dyn Handler>])
                .unwrap();

        assert_eq!(queue_handler.level(), Level::Debug);
        listener.stop();
    }

    #[test]
    fn test_handler_failure_does_not_kill_listener() {
        struct FailingHandler;

        impl Handler for FailingHandler {
            fn level(&self) -> Level {
                Level::Debug
            }
            fn emit(&self, _record: &Record) -> Result<()> {
                Err(crate::Error::Config("refused".to_string()))
            }
        }

        let memory = Arc::new(MemoryHandler::new(Level::Debug));
        let (queue_handler, mut listener) = QueueListener::start(vec![
            Arc::new(FailingHandler) as Arc<dyn Handler>,
            memory.clone() as Arc<dyn Handler>,
        ])
        .unwrap();

        for i in 0..10 {
            queue_handler
                .emit(&Record::new("root", Level::Info, format!("still alive {}", i)))
                .unwrap();
        }
        listener.stop();

        // Every record survived the failing sibling.
        assert_eq!(memory.len(), 10);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let memory = Arc::new(MemoryHandler::new(Level::Debug));
        let (queue_handler, mut listener) =
            QueueListener::start(vec![memory.clone() as Arc<dyn Handler>]).unwrap();

        queue_handler
            .emit(&Record::new("root", Level::Info, "once"))
            .unwrap();
        listener.stop();
        listener.stop();

        assert_eq!(memory.len(), 1);
        // Emitting after shutdown is a quiet no-op.
        assert!(
            queue_handler
                .emit(&Record::new("root", Level::Info, "late"))
                .is_ok()
        );
        assert_eq!(memory.len(), 1);
    }
}
