//! The write queue and its single draining thread
//!
//! Each root logger owns one [`Queue`] and one drain thread. Derived loggers
//! push into the same queue. The drain thread is the only receiver, so lines
//! reach the sink in exactly the order they were enqueued.

use super::error::{LoggerError, Result};
use super::pool::BufferPool;
use super::record::Record;
use super::sink::WriteFailure;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Default number of records that may wait in a queue before producers block
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Initial capacity of the drain thread's line buffer
const LINE_BUFFER_CAPACITY: usize = 256;

pub(crate) enum Command {
    /// Render and write one record
    Write(Record),
    /// Reply with the outcome of the latest write once everything ahead is written
    Sync(Sender<Option<WriteFailure>>),
    /// Exit the drain loop
    Stop,
}

/// Producer side of a root logger's queue
pub(crate) struct Queue {
    sender: Sender<Command>,
    pool: Arc<BufferPool>,
    capacity: usize,
}

impl Queue {
    /// Create a queue and start its drain thread
    pub(crate) fn start(capacity: usize) -> (Arc<Queue>, thread::JoinHandle<()>) {
        let (sender, receiver) = bounded(capacity);
        let pool = Arc::new(BufferPool::new());
        let drain_pool = Arc::clone(&pool);

        let handle = thread::spawn(move || drain(receiver, drain_pool));

        let queue = Arc::new(Queue {
            sender,
            pool,
            capacity,
        });
        (queue, handle)
    }

    pub(crate) fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.sender.len()
    }

    /// Enqueue a record, blocking while the queue is full.
    ///
    /// Fails only when the drain thread is gone; the record is dropped then.
    pub(crate) fn push(&self, record: Record) -> Result<()> {
        self.sender
            .send(Command::Write(record))
            .map_err(|_| LoggerError::LoggerClosed)
    }

    /// Block until every record enqueued before this call has been written
    pub(crate) fn sync(&self) -> Result<()> {
        let (reply_tx, reply_rx) = bounded(1);
        self.sender
            .send(Command::Sync(reply_tx))
            .map_err(|_| LoggerError::LoggerClosed)?;
        match reply_rx.recv() {
            Ok(None) => Ok(()),
            Ok(Some(failure)) => Err(failure.into()),
            Err(_) => Err(LoggerError::ChannelReceiveError),
        }
    }

    /// Ask the drain thread to exit after the commands already queued
    pub(crate) fn stop(&self) -> Result<()> {
        self.sender
            .send(Command::Stop)
            .map_err(|_| LoggerError::ChannelSendError)
    }
}

fn drain(receiver: Receiver<Command>, pool: Arc<BufferPool>) {
    let mut line = Vec::with_capacity(LINE_BUFFER_CAPACITY);
    let mut last_write: Option<WriteFailure> = None;

    while let Ok(command) = receiver.recv() {
        match command {
            Command::Write(record) => {
                last_write = write_isolated(&record, &mut line);
                pool.release(record.into_message());
            }
            Command::Sync(reply) => {
                // The requester may have given up; nothing to do then.
                let _ = reply.send(last_write.clone());
            }
            Command::Stop => break,
        }
    }
}

/// Write one record, turning a panicking sink into a write failure so the
/// drain thread keeps serving later records and sync requests.
fn write_isolated(record: &Record, line: &mut Vec<u8>) -> Option<WriteFailure> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| record.write(line)));

    match result {
        Ok(Ok(())) => None,
        Ok(Err(failure)) => Some(failure),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER CRITICAL] Sink '{}' panicked: {}. Later records are still written.",
                record.owner.sink.name(),
                panic_msg
            );
            Some(WriteFailure {
                sink: record.owner.sink.name(),
                source: Arc::new(std::io::Error::other(format!("sink panicked: {}", panic_msg))),
            })
        }
    }
}
