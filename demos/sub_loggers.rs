//! Sub-logger example
//!
//! Demonstrates derived loggers sharing one queue from several threads.
//!
//! Run with: cargo run --example sub_loggers

use rust_queue_logger::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Queue Logger - Sub-logger Example ===\n");

    let root = Logger::new(
        ConsoleSink::stdout(),
        "[app]",
        LogLevel::Info,
        Features::DEFAULT,
    );

    let workers: Vec<Logger> = (0..3)
        .map(|id| root.sub_logger(&format!("[worker-{}]", id)))
        .collect();

    // Quiet one worker without touching the others
    workers[2].set_level(LogLevel::Warn);

    thread::scope(|s| {
        for (id, worker) in workers.iter().enumerate() {
            s.spawn(move || {
                for job in 0..3 {
                    worker.info(format_args!("job {} started", job));
                    thread::sleep(Duration::from_millis(5 * id as u64));
                    if job == 2 {
                        worker.warn(format_args!("job {} retried", job));
                    }
                }
            });
        }
    });

    root.info("all workers finished");
    root.sync()?;

    println!("\nClosing worker-0; the rest keep logging:");
    workers[0].close()?;
    workers[0].info("dropped");
    workers[1].info("still here");
    root.close()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
