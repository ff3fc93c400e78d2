//! File logging example
//!
//! Demonstrates a file sink configured from JSON, and bridging the `log` facade.
//!
//! Run with: cargo run --example file_logging

use rust_queue_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "level": "debug",
            "features": "date,time,millis,utc,prefix,debug-origin",
            "prefix": "[svc]"
        }"#,
    )?;

    let path = "application.log";
    let logger = LoggerBuilder::from_config(&config)
        .sink(FileSink::new(path)?)
        .build()?;

    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    let db = logger.sub_logger("[db]");
    db.info("Database connection established");

    logger.close()?;

    println!("Contents of {}:\n", path);
    print!("{}", fs::read_to_string(path)?);

    fs::remove_file(path)?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
