//! Basic logger usage example
//!
//! Demonstrates levels, feature flags and the gated macros on a console logger.
//!
//! Run with: cargo run --example basic_usage

use rust_queue_logger::prelude::*;
use rust_queue_logger::{debug, info, timer, warn};

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .features(Features::DEFAULT | Features::MILLISECONDS)
        .sink(ConsoleSink::stdout())
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.sync()?;

    println!("\n2. Raising the level to warn - debug and info won't show:");
    logger.set_level(LogLevel::Warn);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible), attempt {}", 3);
    logger.sync()?;

    println!("\n3. Timing a block:");
    logger.set_level(LogLevel::Info);
    {
        let _t = timer!(logger, "sum of {} squares", 1_000_000u64);
        let sum: u64 = (0..1_000_000u64).map(|n| n * n).sum();
        logger.info(format_args!("sum = {}", sum));
    }
    logger.sync()?;

    println!("\n4. Writing errors inline, bypassing the queue:");
    logger.enable_features(Features::SYNC_ERROR);
    logger.error("written before error() returns");

    logger.close()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
