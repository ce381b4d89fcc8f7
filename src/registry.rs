use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::queue::QueueListener;
use crate::{Handler, Level, Record};

/// Name under which the process-wide default logger is registered. Passing
/// it to any per-name method addresses the root entry.
pub const ROOT_LOGGER: &str = "root";

static GLOBAL: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// The process-wide registry.
///
/// [`setup`](crate::setup) and the `log` facade bridge both go through this
/// instance; isolated [`LoggerRegistry`] values exist for tests and
/// embedders that must not touch global state.
pub fn registry() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Where an attached handler came from. Setup-owned handlers are swapped
/// out when the same name is reconfigured; externally attached ones stay.
enum HandlerOrigin {
    Setup,
    External,
}

struct AttachedHandler {
    handler: Arc<dyn Handler>,
    origin: HandlerOrigin,
}

/// Per-name state: the handler ownership records, the severity gate, and
/// the queue listener when delivery goes through a queue.
#[derive(Default)]
struct LoggerState {
    handlers: Vec<AttachedHandler>,
    level: Option<Level>,
    configured: bool,
    listener: Option<QueueListener>,
}

impl LoggerState {
    /// True while nothing has ever touched this entry. Only such entries
    /// defer to the root entry during dispatch.
    fn is_untouched(&self) -> bool {
        !self.configured && self.handlers.is_empty() && self.level.is_none()
    }
}

#[derive(Default)]
struct Inner {
    root: LoggerState,
    named: HashMap<String, LoggerState>,
}

impl Inner {
    fn entry(&self, name: &str) -> Option<&LoggerState> {
        if name == ROOT_LOGGER {
            Some(&self.root)
        } else {
            self.named.get(name)
        }
    }

    fn entry_mut(&mut self, name: &str) -> &mut LoggerState {
        if name == ROOT_LOGGER {
            &mut self.root
        } else {
            self.named.entry(name.to_string()).or_default()
        }
    }

    fn existing_mut(&mut self, name: &str) -> Option<&mut LoggerState> {
        if name == ROOT_LOGGER {
            Some(&mut self.root)
        } else {
            self.named.get_mut(name)
        }
    }

    /// Entry that gates records carrying `name`: the name's own entry when
    /// anything has configured it, the root entry otherwise.
    fn dispatch_entry(&self, name: &str) -> &LoggerState {
        match self.entry(name) {
            Some(entry) if !entry.is_untouched() => entry,
            _ => &self.root,
        }
    }
}

/// Registry of loggers keyed by name, with a distinguished root entry.
///
/// This is the single access point for all logger state (handler ownership,
/// levels, listeners); nothing in the crate mutates logger state outside it.
/// Entries appear on first use of a name and survive until
/// [`clear`](LoggerRegistry::clear) or process exit. All methods lock one
/// internal mutex, so setup calls racing on the same name serialize; record
/// delivery itself happens after the lock is released.
///
/// Cloning is cheap and shares the same state.
#[derive(Clone, Default)]
pub struct LoggerRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl LoggerRegistry {
    /// Create an empty, isolated registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the named logger, registering the name if it is new.
    pub fn logger(&self, name: &str) -> Logger {
        self.inner.lock().unwrap().entry_mut(name);
        Logger {
            name: name.to_string(),
            registry: self.clone(),
        }
    }

    /// Handle to the root logger.
    pub fn root(&self) -> Logger {
        self.logger(ROOT_LOGGER)
    }

    /// Attach an externally owned handler to a logger.
    ///
    /// External handlers survive reconfiguration of the name. Attaching
    /// never changes the entry's severity gate: an entry without a gate
    /// passes nothing, so pair this with [`set_level`](Self::set_level)
    /// on names that `setup` does not manage.
    pub fn attach_handler(&self, name: &str, handler: Arc<dyn Handler>) {
        self.inner
            .lock()
            .unwrap()
            .entry_mut(name)
            .handlers
            .push(AttachedHandler {
                handler,
                origin: HandlerOrigin::External,
            });
    }

    /// Set or remove the severity gate of a logger. `None` means nothing
    /// passes.
    pub fn set_level(&self, name: &str, level: Option<Level>) {
        self.inner.lock().unwrap().entry_mut(name).level = level;
    }

    /// Severity gate of a logger; `None` for an unknown name, a gate never
    /// set, or the zero-handler end state.
    pub fn level(&self, name: &str) -> Option<Level> {
        self.inner.lock().unwrap().entry(name)?.level
    }

    /// Number of handlers currently attached to a logger.
    pub fn handler_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .entry(name)
            .map_or(0, |entry| entry.handlers.len())
    }

    /// Names of all registered loggers, sorted; the root entry is implicit
    /// and not listed.
    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().unwrap().named.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detach every handler from a logger, stopping its queue listener
    /// first so queued records drain into the handlers before they are
    /// flushed and released. The entry itself (and its gate) remains.
    pub fn clear_handlers(&self, name: &str) {
        let (handlers, listener) = {
            let mut inner = self.inner.lock().unwrap();
            let Some(entry) = inner.existing_mut(name) else {
                return;
            };
            let handlers: Vec<Arc<dyn Handler>> = entry
                .handlers
                .drain(..)
                .map(|attached| attached.handler)
                .collect();
            (handlers, entry.listener.take())
        };
        shutdown(handlers, listener);
    }

    /// Remove a logger entirely. For the root entry this resets it to the
    /// unconfigured state.
    pub fn clear(&self, name: &str) {
        let state = {
            let mut inner = self.inner.lock().unwrap();
            if name == ROOT_LOGGER {
                Some(std::mem::take(&mut inner.root))
            } else {
                inner.named.remove(name)
            }
        };
        if let Some(mut state) = state {
            let handlers = state
                .handlers
                .drain(..)
                .map(|attached| attached.handler)
                .collect();
            shutdown(handlers, state.listener.take());
        }
    }

    /// Deliver a record to the handlers of the entry gating its name.
    ///
    /// The gate and the matching handlers are resolved under the lock; the
    /// actual emits happen outside it, so a slow sink never serializes
    /// unrelated loggers (and a handler that logs cannot deadlock).
    pub fn dispatch(&self, record: &Record) {
        let targets: Vec<Arc<dyn Handler>> = {
            let inner = self.inner.lock().unwrap();
            let entry = inner.dispatch_entry(&record.name);
            let Some(threshold) = entry.level else {
                return;
            };
            if record.level < threshold {
                return;
            }
            entry
                .handlers
                .iter()
                .filter(|attached| record.level >= attached.handler.level())
                .map(|attached| Arc::clone(&attached.handler))
                .collect()
        };
        for handler in targets {
            let _ = handler.emit(record);
        }
    }

    /// Whether a record at `level` through `name` would pass the entry gate.
    pub fn enabled(&self, name: &str, level: Level) -> bool {
        let inner = self.inner.lock().unwrap();
        inner
            .dispatch_entry(name)
            .level
            .is_some_and(|threshold| level >= threshold)
    }

    /// Flush every handler of every entry.
    pub fn flush(&self) {
        let handlers: Vec<Arc<dyn Handler>> = {
            let inner = self.inner.lock().unwrap();
            std::iter::once(&inner.root)
                .chain(inner.named.values())
                .flat_map(|entry| entry.handlers.iter())
                .map(|attached| Arc::clone(&attached.handler))
                .collect()
        };
        for handler in handlers {
            let _ = handler.flush();
        }
    }

    /// The most verbose gate any entry with attached handlers accepts;
    /// `None` when no entry can deliver anything.
    pub(crate) fn most_verbose_gate(&self) -> Option<Level> {
        let inner = self.inner.lock().unwrap();
        std::iter::once(&inner.root)
            .chain(inner.named.values())
            .filter(|entry| !entry.handlers.is_empty())
            .filter_map(|entry| entry.level)
            .min()
    }

    /// Swap a name's setup-owned handler set, gate, and listener in one
    /// step. Records dispatched concurrently see either the old set or the
    /// new one, never an empty intermediate. The displaced listener is
    /// stopped (draining its queue) and the displaced handlers flushed
    /// after the swap, outside the lock.
    pub(crate) fn apply_setup(
        &self,
        name: &str,
        handlers: Vec<Arc<dyn Handler>>,
        level: Option<Level>,
        listener: Option<QueueListener>,
    ) {
        let (displaced, old_listener) = {
            let mut inner = self.inner.lock().unwrap();
            let entry = inner.entry_mut(name);
            let old_listener = entry.listener.take();

            let mut kept = Vec::new();
            let mut displaced = Vec::new();
            for attached in entry.handlers.drain(..) {
                match attached.origin {
                    HandlerOrigin::Setup => displaced.push(attached.handler),
                    HandlerOrigin::External => kept.push(attached),
                }
            }
            kept.extend(handlers.into_iter().map(|handler| AttachedHandler {
                handler,
                origin: HandlerOrigin::Setup,
            }));

            entry.handlers = kept;
            entry.level = level;
            entry.configured = true;
            entry.listener = listener;
            (displaced, old_listener)
        };
        shutdown(displaced, old_listener);
    }
}

/// Stop the listener first so the queue drains into the handlers, then
/// flush and release them.
fn shutdown(handlers: Vec<Arc<dyn Handler>>, listener: Option<QueueListener>) {
    if let Some(mut listener) = listener {
        listener.stop();
    }
    for handler in handlers {
        let _ = handler.flush();
    }
}

/// Handle to one logger in a registry.
///
/// Handles are cheap to clone and share; they carry the name and a
/// reference to the registry, not the handler state itself.
#[derive(Clone)]
pub struct Logger {
    name: String,
    registry: LoggerRegistry,
}

impl Logger {
    /// The logger's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Severity gate currently in effect for this logger.
    pub fn level(&self) -> Option<Level> {
        self.registry.level(&self.name)
    }

    /// Number of handlers currently attached.
    pub fn handler_count(&self) -> usize {
        self.registry.handler_count(&self.name)
    }

    /// Emit a record at `level`.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.registry.enabled(&self.name, level) {
            return;
        }
        self.registry
            .dispatch(&Record::new(self.name.clone(), level, message));
    }

    /// Emit at Debug.
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    /// Emit at Info.
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    /// Emit at Warning.
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    /// Emit at Error.
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Emit at Critical.
    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }
}
