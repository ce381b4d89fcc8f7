//! Named logger example.
//!
//! This example configures a dedicated logger for one subsystem and shows
//! how records from unconfigured names fall back to the root logger.

use logkit::Level;

fn main() {
    // Root logger: console only, info and up
    logkit::builder()
        .with_app("named")
        .with_console_level(Level::Info)
        .with_file(false)
        .setup();

    // Subsystem logger with its own verbosity
    let worker = logkit::builder()
        .with_app("named")
        .with_logger_name("named.worker")
        .with_console_level(Level::Debug)
        .with_console_format("{timestamp} [{level}] {name}: {message}")
        .with_file(false)
        .setup()
        .expect("named setup returns a handle");

    worker.debug("visible because the worker logger allows debug");
    worker.info("worker processing item 1");

    log::info!(target: "named.worker", "facade records route to the worker too");
    log::debug!("this one is dropped by the root logger's info gate");
    log::info!("unconfigured targets land on the root logger");
}
