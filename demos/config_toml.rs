//! Example of loading logging configuration from a TOML file.
//!
//! This example demonstrates how to load logging configuration from
//! a TOML file and apply it.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;
use std::fs;

#[derive(Deserialize)]
struct Config {
    log: logkit::LogConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read the TOML configuration file
    let config_path = "demos/config.toml";
    let config_content = fs::read_to_string(config_path)
        .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));

    // Parse the TOML configuration
    let root: Config = toml::from_str(&config_content)?;
    let config = root.log;

    // Apply the loaded configuration
    logkit::setup(&config);

    log::debug!("This is a debug message (visible because the console level is debug)");
    log::info!("This is an info message");
    log::warn!("This is a warning message");
    log::error!("This is an error message");

    Ok(())
}
