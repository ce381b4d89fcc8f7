//! Facade routing through the global registry.
//!
//! The `log` facade's logger and max-level filter belong to the whole
//! process, so everything here lives in one test function.

use std::fs;
use std::path::Path;

use logkit::{Level, LogConfig, ROOT_LOGGER, registry, setup};

fn read_log(dir: &Path, ident: &str) -> String {
    fs::read_to_string(dir.join(ident).join("testing.log")).expect("log file readable")
}

#[test]
fn facade_records_route_by_target() {
    let dir = tempfile::tempdir().unwrap();

    let root_config = LogConfig::new()
        .with_app("facade_root")
        .with_console(false)
        .with_testing(true)
        .with_log_dir(dir.path())
        .with_file_format("{name}: {message}");
    assert!(setup(&root_config).is_none());

    let svc_config = root_config
        .clone()
        .with_app("facade_svc")
        .with_logger_name("svc");
    let svc = setup(&svc_config).expect("named setup returns a handle");

    // The root gate is Debug, the facade's most verbose filter.
    assert_eq!(log::max_level(), log::LevelFilter::Trace);

    log::info!(target: "svc", "routed to the service logger");
    svc.warning("direct handle");
    log::info!("untargeted goes to root");
    log::trace!("trace folds into debug");
    registry().flush();

    assert_eq!(
        read_log(dir.path(), "facade_svc"),
        "svc: routed to the service logger\nsvc: direct handle\n"
    );

    let module = module_path!();
    let expected_root = format!(
        "{}: untargeted goes to root\n{}: trace folds into debug\n",
        module, module
    );
    assert_eq!(read_log(dir.path(), "facade_root"), expected_root);

    // Reconfiguring to a quieter gate filters facade records out.
    setup(&root_config.clone().with_file_level(Level::Error));
    log::info!("filtered out");
    registry().flush();
    assert_eq!(read_log(dir.path(), "facade_root"), expected_root);

    registry().clear_handlers(ROOT_LOGGER);
    registry().clear_handlers("svc");
}
