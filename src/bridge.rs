//! Adapter between the `log` facade and the registry.
//!
//! Once installed, `log::info!` and friends flow into the registry and are
//! routed by the macro's `target` (module path unless overridden), so
//! library code logging through the facade lands on whichever logger name
//! matches its target, with root fallback for everything else.

use log::LevelFilter;
use once_cell::sync::OnceCell;

use crate::registry::LoggerRegistry;
use crate::{Error, Level, Record, Result};

static INSTALLED: OnceCell<bool> = OnceCell::new();

struct Bridge {
    registry: LoggerRegistry,
}

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.registry
            .enabled(metadata.target(), Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !self.registry.enabled(record.target(), level) {
            return;
        }
        self.registry.dispatch(&Record::new(
            record.target().to_string(),
            level,
            record.args().to_string(),
        ));
    }

    fn flush(&self) {
        self.registry.flush();
    }
}

/// Install the bridge as the `log` crate's global logger.
///
/// Fails with [`Error::Init`] when another logger is already installed.
/// [`setup`](crate::setup) calls this implicitly; call it directly only
/// when wiring the facade to a non-global registry.
pub fn install(registry: &LoggerRegistry) -> Result<()> {
    log::set_boxed_logger(Box::new(Bridge {
        registry: registry.clone(),
    }))
    .map_err(|err| Error::Init(err.to_string()))?;
    INSTALLED.set(true).ok();
    sync_max_level(registry);
    Ok(())
}

/// Install once per process. A foreign logger already holding the facade is
/// reported once on stderr and tolerated; direct [`Logger`](crate::Logger)
/// handles keep working either way.
pub(crate) fn install_once(registry: &LoggerRegistry) {
    if INSTALLED.get().is_some() {
        return;
    }
    if let Err(err) = install(registry)
        && INSTALLED.set(false).is_ok()
    {
        eprintln!("logkit: log facade not bridged: {err}");
    }
}

/// Recompute `log::max_level` from the registry so the facade's early-out
/// matches the most verbose gate any logger accepts.
pub(crate) fn sync_max_level(registry: &LoggerRegistry) {
    if INSTALLED.get() != Some(&true) {
        return;
    }
    log::set_max_level(level_filter(registry.most_verbose_gate()));
}

fn level_filter(gate: Option<Level>) -> LevelFilter {
    match gate {
        // Trace has no counterpart of its own; it folds into Debug.
        Some(Level::Debug) => LevelFilter::Trace,
        Some(Level::Info) => LevelFilter::Info,
        Some(Level::Warning) => LevelFilter::Warn,
        Some(Level::Error) => LevelFilter::Error,
        // The facade cannot express a Critical-only gate.
        Some(Level::Critical) => LevelFilter::Off,
        None => LevelFilter::Off,
    }
}
