//! The process-wide default logger
//!
//! Kept in its own test binary: the default logger lives for the whole
//! process and writes to stdout.

use rust_queue_logger::prelude::*;

#[test]
fn test_default_logger_lifecycle() {
    let logger = rust_queue_logger::default_logger();
    assert!(std::ptr::eq(logger, rust_queue_logger::default_logger()));
    assert!(logger.is_root());
    assert_eq!(logger.level(), LogLevel::Info);
    assert_eq!(logger.sink_name(), "stdout");
    assert!(logger.features().contains(Features::TIME | Features::PREFIX_INFO));
    assert!(!logger.features().contains(Features::PREFIX_TIME));

    rust_queue_logger::info("default logger: info");
    rust_queue_logger::warn(format_args!("default logger: {}", "warn"));
    rust_queue_logger::error("default logger: error");
    rust_queue_logger::printf("default logger: printf");
    rust_queue_logger::debug("default logger: filtered");
    rust_queue_logger::timer("default logger: timer").finish();

    let worker = rust_queue_logger::sub_logger("[worker]");
    assert!(!worker.is_root());
    assert_eq!(worker.prefix(), "[worker]");
    worker.info("from a derived logger");

    rust_queue_logger::sync().expect("sync failed");
    assert_eq!(logger.pending(), 0);
}
