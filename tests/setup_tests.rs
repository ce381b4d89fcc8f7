//! End-to-end tests for `setup_with` against isolated registries.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use logkit::{Level, LogConfig, LoggerRegistry, MemoryHandler, ROOT_LOGGER, setup_with};

fn testing_config(dir: &Path) -> LogConfig {
    LogConfig::new()
        .with_app("itest")
        .with_console(false)
        .with_testing(true)
        .with_log_dir(dir)
}

fn log_file(dir: &Path) -> PathBuf {
    dir.join("itest").join("testing.log")
}

fn read_log(dir: &Path) -> String {
    fs::read_to_string(log_file(dir)).expect("log file readable")
}

#[test]
fn test_setup_twice_does_not_duplicate_handlers() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path());

    setup_with(&registry, &config);
    setup_with(&registry, &config);

    assert_eq!(registry.handler_count(ROOT_LOGGER), 1);
}

#[test]
fn test_both_outputs_disabled_yields_silent_logger() {
    let registry = LoggerRegistry::new();
    let config = LogConfig::new().with_console(false).with_file(false);

    setup_with(&registry, &config);

    assert_eq!(registry.handler_count(ROOT_LOGGER), 0);
    assert_eq!(registry.level(ROOT_LOGGER), None);
    // Logging into the void must be a quiet no-op.
    registry.root().critical("nobody hears this");
}

#[test]
fn test_entry_level_is_most_verbose_handler_level() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path())
        .with_console(true)
        .with_console_level(Level::Warning)
        .with_file_level(Level::Debug);

    setup_with(&registry, &config);
    assert_eq!(registry.level(ROOT_LOGGER), Some(Level::Debug));

    let config = testing_config(dir.path()).with_file_level(Level::Error);
    setup_with(&registry, &config);
    assert_eq!(registry.level(ROOT_LOGGER), Some(Level::Error));

    let config = LogConfig::new()
        .with_file(false)
        .with_console_level(Level::Critical);
    setup_with(&registry, &config);
    assert_eq!(registry.level(ROOT_LOGGER), Some(Level::Critical));
}

#[test]
fn test_unwritable_file_degrades_to_console_only() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the path needs a directory.
    let obstacle = dir.path().join("blocked");
    fs::write(&obstacle, b"").unwrap();

    let registry = LoggerRegistry::new();
    let config = LogConfig::new()
        .with_app("itest")
        .with_console_level(Level::Info)
        .with_testing(true)
        .with_log_dir(&obstacle);
    setup_with(&registry, &config);

    assert_eq!(registry.handler_count(ROOT_LOGGER), 1);
    // The failed file handler must not contribute to the level arithmetic.
    assert_eq!(registry.level(ROOT_LOGGER), Some(Level::Info));

    // Without a console handler the failure leaves nothing attached.
    let registry = LoggerRegistry::new();
    let config = config.with_console(false);
    setup_with(&registry, &config);
    assert_eq!(registry.handler_count(ROOT_LOGGER), 0);
    assert_eq!(registry.level(ROOT_LOGGER), None);
}

#[test]
fn test_named_logger_gates_below_file_level() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path())
        .with_logger_name("svc")
        .with_file_level(Level::Warning)
        .with_file_format("{level} {message}");

    let logger = setup_with(&registry, &config).unwrap();
    assert_eq!(logger.name(), "svc");

    logger.debug("too quiet");
    logger.info("still too quiet");
    logger.warning("loud enough");
    registry.flush();

    assert_eq!(read_log(dir.path()), "WARNING loud enough\n");
}

#[test]
fn test_testing_log_lands_under_identity_directory() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    setup_with(&registry, &testing_config(dir.path()));

    registry.root().info("hello");
    registry.flush();

    assert!(log_file(dir.path()).is_file());
    assert!(read_log(dir.path()).contains("hello"));
}

#[test]
fn test_timestamped_file_name_shape() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path()).with_testing(false);
    setup_with(&registry, &config);

    let entries: Vec<String> = fs::read_dir(dir.path().join("itest"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1);

    // itest-YYYYMMDD-HHMM.log
    let name = &entries[0];
    let stamp = name
        .strip_prefix("itest-")
        .and_then(|rest| rest.strip_suffix(".log"))
        .unwrap_or_else(|| panic!("unexpected file name {:?}", name));
    let (date, clock) = stamp.split_once('-').unwrap();
    assert_eq!(date.len(), 8);
    assert_eq!(clock.len(), 4);
    assert!(date.chars().all(|c| c.is_ascii_digit()));
    assert!(clock.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_size_rotation_produces_numbered_backup() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path())
        .with_rotation(256u64)
        .with_file_format("{message}");
    setup_with(&registry, &config);

    let root = registry.root();
    for i in 0..32 {
        root.info(format!("padding line number {:04}", i));
    }
    registry.flush();

    let base = log_file(dir.path());
    assert!(base.is_file());
    assert!(base.with_extension("log.1").is_file());
}

#[test]
fn test_records_fall_back_to_root_keeping_their_name() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path()).with_file_format("{name}: {message}");
    setup_with(&registry, &config);

    registry.logger("web.api").info("fell through");
    registry.flush();

    assert_eq!(read_log(dir.path()), "web.api: fell through\n");
}

#[test]
fn test_configured_silent_logger_does_not_fall_back() {
    let registry = LoggerRegistry::new();
    let root_memory = Arc::new(MemoryHandler::new(Level::Debug));
    registry.attach_handler(ROOT_LOGGER, root_memory.clone());
    registry.set_level(ROOT_LOGGER, Some(Level::Debug));

    let silent = LogConfig::new()
        .with_logger_name("svc")
        .with_console(false)
        .with_file(false);
    let logger = setup_with(&registry, &silent).unwrap();

    logger.error("configured silence");
    assert!(root_memory.is_empty());
}

#[test]
fn test_external_handlers_survive_reconfiguration() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let memory = Arc::new(MemoryHandler::new(Level::Debug));
    registry.attach_handler("svc", memory.clone());

    let config = testing_config(dir.path()).with_logger_name("svc");
    setup_with(&registry, &config);
    setup_with(&registry, &config);

    // One file handler from setup plus the external one.
    assert_eq!(registry.handler_count("svc"), 2);

    registry.logger("svc").info("seen by both");
    assert_eq!(memory.len(), 1);
    registry.flush();
    assert!(read_log(dir.path()).contains("seen by both"));
}

#[test]
fn test_registered_names_lists_configured_loggers() {
    let registry = LoggerRegistry::new();
    let silent = LogConfig::new().with_console(false).with_file(false);

    setup_with(&registry, &silent.clone().with_logger_name("beta"));
    setup_with(&registry, &silent.clone().with_logger_name("alpha"));
    setup_with(&registry, &silent);

    assert_eq!(
        registry.registered_names(),
        vec!["alpha".to_string(), "beta".to_string()]
    );
}

#[test]
fn test_queue_preserves_per_thread_order() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path())
        .with_logger_name("svc")
        .with_file_format("{message}")
        .with_queue(true);
    let logger = setup_with(&registry, &config).unwrap();

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("t{}-{}", t, i));
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    // Stopping the listener drains whatever is still queued.
    registry.clear_handlers("svc");

    let lines: Vec<String> = read_log(dir.path()).lines().map(str::to_owned).collect();
    assert_eq!(lines.len(), 100);
    for t in 0..4 {
        let prefix = format!("t{}-", t);
        let indices: Vec<usize> = lines
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix))
            .map(|rest| rest.parse().unwrap())
            .collect();
        assert_eq!(indices, (0..25).collect::<Vec<usize>>(), "thread {}", t);
    }
}

#[test]
fn test_queue_reconfiguration_drains_old_listener() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LoggerRegistry::new();
    let config = testing_config(dir.path())
        .with_file_format("{message}")
        .with_queue(true);
    setup_with(&registry, &config);

    let root = registry.root();
    for i in 0..50 {
        root.info(format!("first wave {}", i));
    }
    // Replacing the setup stops the old listener after its queue drains.
    setup_with(&registry, &config.clone().with_queue(false));
    root.info("direct after swap");
    registry.flush();

    let content = read_log(dir.path());
    assert_eq!(content.matches("first wave").count(), 50);
    assert!(content.contains("direct after swap"));
}
