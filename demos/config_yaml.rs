//! Example of loading logging configuration from a YAML file.
//!
//! This example demonstrates how to load logging configuration from
//! a YAML file and apply it.
//!
//! Run with:
//! ```bash
//! cargo run --example config_yaml
//! ```

use std::collections::HashMap;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read the YAML configuration file
    let config_path = "demos/config.yaml";
    let config_content = fs::read_to_string(config_path)
        .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));

    // Parse the YAML configuration
    let root: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(&config_content)?;
    let config: logkit::LogConfig = serde_yaml::from_value(root["log"].clone())?;

    // Apply the loaded configuration
    logkit::setup(&config);

    log::debug!("This is a debug message (file only, the console starts at info)");
    log::info!("This is an info message");
    log::warn!("This is a warning message");
    log::error!("This is an error message");

    Ok(())
}
