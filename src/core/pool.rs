//! Free list of message buffers

use parking_lot::Mutex;

/// Buffers that grew beyond this are dropped instead of pooled
pub const MAX_POOLED_CAPACITY: usize = 4 << 10;

/// Upper bound on idle buffers kept by one pool
pub const MAX_POOLED_BUFFERS: usize = 64;

/// Reuses message buffers between records to avoid an allocation per message.
///
/// Oversized buffers are discarded on release so one huge message does not
/// pin its memory in the pool for the life of the logger.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an empty buffer, reusing a pooled one when available
    pub fn acquire(&self) -> Vec<u8> {
        self.free.lock().pop().unwrap_or_default()
    }

    /// Return a buffer to the pool
    pub fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > MAX_POOLED_CAPACITY {
            return;
        }
        buf.clear();
        let mut free = self.free.lock();
        if free.len() < MAX_POOLED_BUFFERS {
            free.push(buf);
        }
    }

    /// Number of idle buffers
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}
