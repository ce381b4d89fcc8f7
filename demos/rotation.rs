//! File rotation example.
//!
//! Writes enough records through a small size limit to produce a chain of
//! numbered backups, then lists what ended up on disk.

use logkit::LogConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;

    let config = LogConfig::new()
        .with_app("rotation")
        .with_log_dir(temp_dir.path())
        .with_testing(true)
        .with_rotation(1024u64) // 1 KB
        .with_console(false);
    logkit::setup(&config);

    for i in 0..100 {
        log::info!("Log message number {}", i);
    }
    logkit::registry().flush();

    let log_dir = temp_dir.path().join("rotation");
    println!("Files in {}:", log_dir.display());
    for entry in std::fs::read_dir(&log_dir)? {
        let entry = entry?;
        println!(
            "  {} ({} bytes)",
            entry.file_name().to_string_lossy(),
            entry.metadata()?.len()
        );
    }

    Ok(())
}
