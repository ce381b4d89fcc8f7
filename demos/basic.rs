//! Basic console logging example.
//!
//! This example demonstrates the simplest way to set up logging with
//! logkit using the builder API.

fn main() {
    // Console-only setup for the root logger
    logkit::builder().with_app("basic").with_file(false).setup();

    log::debug!("This is a debug message");
    log::info!("This is an info message");
    log::warn!("This is a warning message");
    log::error!("This is an error message");
}
