use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::BytesMut;
use h2_headers_gen::{BufferPool, HeapBufferPool};

/// Pool that counts every acquire and release it sees.
#[derive(Default)]
pub struct CountingPool {
    inner: HeapBufferPool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl CountingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl BufferPool for CountingPool {
    fn acquire(&self, capacity: usize, clear: bool) -> BytesMut {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.inner.acquire(capacity, clear)
    }

    fn release(&self, buffer: BytesMut) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.inner.release(buffer);
    }
}
