//! Integration tests for the queue logger
//!
//! These tests verify:
//! - Ordering across producers sharing one queue
//! - Sub-logger prefixes and lifecycles
//! - The sync protocol and write failure reporting
//! - Backpressure with a slow sink
//! - File output and configuration

use rust_queue_logger::prelude::*;
use crossbeam_channel::{bounded, Receiver, Sender};
use rust_queue_logger::{debug, info, timer};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Fails every write whose line contains `poison`
struct FailingSink {
    inner: MemorySink,
}

impl Sink for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        if buf.windows(6).any(|w| w == b"poison") {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink rejected line"));
        }
        self.inner.write(buf)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Sleeps before each write and counts them
struct SlowSink {
    inner: MemorySink,
    writes: Arc<AtomicUsize>,
}

impl Sink for SlowSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        thread::sleep(Duration::from_millis(2));
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(buf)
    }

    fn name(&self) -> &str {
        "slow"
    }
}

/// Holds its first write until released, then writes like a memory sink
struct GatedSink {
    inner: MemorySink,
    entered: Sender<()>,
    release: Receiver<()>,
    held: bool,
}

impl Sink for GatedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        if !self.held {
            self.held = true;
            let _ = self.entered.send(());
            let _ = self.release.recv();
        }
        self.inner.write(buf)
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Drop the `HH:MM:SS.ffffff ` clock in front of a line
fn strip_clock(line: &str) -> &str {
    let (clock, rest) = line.split_at(16);
    assert!(
        clock.as_bytes()[2] == b':' && clock.as_bytes()[8] == b'.' && clock.ends_with(' '),
        "no microsecond clock in {:?}",
        line
    );
    rest
}

#[test]
fn test_timer_debug_and_info_lines() {
    let sink = MemorySink::new();
    let logger = Logger::new(
        sink.clone(),
        "",
        LogLevel::Debug,
        Features::TIME | Features::MICROSECONDS | Features::PREFIX | Features::DEBUG_ORIGIN,
    );

    let t = logger.timer("work");
    logger.debug(format_args!("x={}", 7));
    let line = line!() - 1;
    logger.info("done");
    t.finish();
    logger.sync().expect("sync failed");

    let lines = sink.lines();
    assert_eq!(lines.len(), 3, "unexpected output: {:?}", lines);
    assert_eq!(
        strip_clock(&lines[0]),
        format!("[debug] x=7 (tests/integration_tests.rs:{})", line)
    );
    assert_eq!(strip_clock(&lines[1]), "[info] done");
    let timing = strip_clock(&lines[2]);
    assert!(timing.starts_with("[time] work: "), "got {:?}", timing);
}

#[test]
fn test_producers_keep_their_own_order() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone(), "", LogLevel::Info, Features::empty());

    thread::scope(|s| {
        for producer in 0..3 {
            let logger = &logger;
            s.spawn(move || {
                for seq in 0..10 {
                    logger.info(format_args!("p{} {}", producer, seq));
                }
            });
        }
    });
    logger.sync().expect("sync failed");

    let lines = sink.lines();
    assert_eq!(lines.len(), 30);

    let mut next: HashMap<String, usize> = HashMap::new();
    for line in &lines {
        let (producer, seq) = line.split_once(' ').expect("malformed line");
        let seq: usize = seq.parse().expect("malformed sequence");
        let expected = next.entry(producer.to_string()).or_insert(0);
        assert_eq!(seq, *expected, "out of order for {}", producer);
        *expected += 1;
    }
    assert!(next.values().all(|&n| n == 10));
}

#[test]
fn test_sub_loggers_share_queue_and_sink() {
    let sink = MemorySink::new();
    let root = Logger::new(sink.clone(), "[app]", LogLevel::Info, Features::PREFIX);
    let db = root.sub_logger("[db]");
    let pool = db.sub_logger("[pool]");

    assert!(root.is_root());
    assert!(!db.is_root());
    assert!(pool.has_parent());
    assert_eq!(pool.prefix(), "[app][db][pool]");

    db.set_level(LogLevel::Warn);
    root.info("up");
    db.info("hidden");
    db.warn("slow");
    pool.info("checked out");

    // sync on any member drains the shared queue
    pool.sync().expect("sync failed");
    assert_eq!(
        sink.lines(),
        vec![
            "[info] [app] up",
            "[warn] [app][db] slow",
            "[info] [app][db][pool] checked out",
        ]
    );
}

#[test]
fn test_closing_sub_logger_leaves_siblings_running() {
    let sink = MemorySink::new();
    let root = Logger::new(sink.clone(), "", LogLevel::Info, Features::empty());
    let a = root.sub_logger("a:");
    let b = root.sub_logger("b:");

    a.close().expect("close failed");
    assert_eq!(a.level(), LogLevel::Disabled);
    a.info("dropped");
    assert!(matches!(a.sync(), Err(LoggerError::LoggerClosed)));

    b.info("kept");
    root.info("root");
    root.sync().expect("sync failed");
    assert_eq!(sink.lines(), vec!["b: kept", "root"]);
}

#[test]
fn test_write_failure_is_reported_by_sync() {
    let sink = MemorySink::new();
    let logger = Logger::new(
        FailingSink {
            inner: sink.clone(),
        },
        "",
        LogLevel::Info,
        Features::empty(),
    );

    logger.info("fine");
    logger.info("poison pill");
    let err = logger.sync().expect_err("failure was not reported");
    assert!(err.is_sink_write());
    assert!(err.to_string().contains("failing"));

    // A later successful write clears the failure
    logger.info("recovered");
    logger.sync().expect("sync after recovery failed");
    assert_eq!(sink.lines(), vec!["fine", "recovered"]);
}

#[test]
fn test_slow_sink_applies_backpressure() {
    let sink = MemorySink::new();
    let writes = Arc::new(AtomicUsize::new(0));
    let logger = Logger::builder()
        .sink(SlowSink {
            inner: sink.clone(),
            writes: Arc::clone(&writes),
        })
        .features(Features::empty())
        .queue_capacity(2)
        .build()
        .expect("build failed");

    for i in 0..20 {
        logger.info(i);
        assert!(logger.pending() <= logger.queue_capacity());
    }
    logger.sync().expect("sync failed");

    assert_eq!(writes.load(Ordering::SeqCst), 20);
    let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
    assert_eq!(sink.lines(), expected);
}

#[test]
fn test_sync_severity_bypasses_queue() {
    let sink = MemorySink::new();
    let writes = Arc::new(AtomicUsize::new(0));
    let logger = Logger::new(
        SlowSink {
            inner: sink.clone(),
            writes: Arc::clone(&writes),
        },
        "",
        LogLevel::Info,
        Features::PREFIX | Features::SYNC_ERROR,
    );

    logger.error("written before returning");
    assert_eq!(writes.load(Ordering::SeqCst), 1);
    assert_eq!(sink.contents(), "[error] written before returning\n");
}

#[test]
fn test_close_root_flushes_pending_lines() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone(), "", LogLevel::Info, Features::empty());
    for i in 0..50 {
        logger.info(i);
    }
    logger.close().expect("close failed");
    assert_eq!(sink.lines().len(), 50);

    // Closing twice is harmless
    logger.close().expect("second close failed");
    assert!(matches!(logger.sync(), Err(LoggerError::LoggerClosed)));
}

#[test]
fn test_file_sink_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .sink(FileSink::new(&log_file).expect("Failed to open log file"))
        .level(LogLevel::Debug)
        .features(Features::PREFIX)
        .prefix("[svc]")
        .build()
        .expect("build failed");
    assert_eq!(logger.sink_name(), "file");

    logger.warn("disk almost full");
    logger.info("multi\nline");
    logger.sync().expect("sync failed");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        "[warn] [svc] disk almost full\n[info] [svc] multi\nline\n"
    );
}

#[test]
fn test_set_sink_redirects_sub_loggers() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let root = Logger::new(first.clone(), "", LogLevel::Info, Features::empty());
    let sub = root.sub_logger("sub:");

    sub.info("one");
    root.sync().expect("sync failed");
    let previous = root.set_sink(second.clone()).expect("sink idle after sync");
    assert_eq!(previous.name(), "memory");
    sub.info("two");
    root.sync().expect("sync failed");

    assert_eq!(first.lines(), vec!["sub: one"]);
    assert_eq!(second.lines(), vec!["sub: two"]);
}

#[test]
fn test_builder_from_json_config() {
    let config = LoggerConfig::from_json(
        r#"{"level":"warn","features":"prefix,sync-error","prefix":"[cfg]"}"#,
    )
    .expect("invalid config");

    let sink = MemorySink::new();
    let logger = LoggerBuilder::from_config(&config)
        .sink(sink.clone())
        .build()
        .expect("build failed");

    assert_eq!(logger.level(), LogLevel::Warn);
    assert!(logger.features().contains(Features::SYNC_ERROR));
    logger.info("filtered");
    logger.error("boom");
    assert_eq!(sink.contents(), "[error] [cfg] boom\n");
}

#[test]
fn test_macros_and_line_logger() {
    use std::io::Write;

    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone(), "", LogLevel::Info, Features::PREFIX);

    debug!(logger, "not evaluated {}", unreachable_value());
    info!(logger, "user {} logged in", "ada");
    timer!(logger, "noop {}", 1).finish();

    let mut out = logger.line_logger(LogLevel::Warn);
    writeln!(out, "from a writer").expect("write failed");
    write!(out, "partial").expect("write failed");
    drop(out);

    logger.sync().expect("sync failed");
    let lines = sink.lines();
    assert_eq!(lines[0], "[info] user ada logged in");
    assert!(lines[1].starts_with("[time] noop 1: "));
    assert_eq!(&lines[2..], ["[warn] from a writer", "[warn] partial"]);
}

fn unreachable_value() -> u32 {
    panic!("argument of a filtered message was evaluated")
}

#[test]
fn test_set_sink_redirects_queued_records() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let (entered_tx, entered_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);
    let logger = Logger::new(
        GatedSink {
            inner: first.clone(),
            entered: entered_tx,
            release: release_rx,
            held: false,
        },
        "",
        LogLevel::Info,
        Features::empty(),
    );

    for i in 0..5 {
        logger.info(i);
    }
    // Record 0 is being written; 1..=4 are still queued
    entered_rx.recv().expect("first write never started");
    assert!(logger.set_sink(second.clone()).is_none());
    assert_eq!(logger.sink_name(), "memory");

    release_tx.send(()).expect("gate dropped");
    logger.sync().expect("sync failed");

    assert_eq!(first.lines(), vec!["0"]);
    assert_eq!(second.lines(), vec!["1", "2", "3", "4"]);
}
