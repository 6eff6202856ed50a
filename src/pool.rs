//! Buffer pooling and the output lease.
//!
//! Generators never write to a socket. They acquire buffers from a
//! [`BufferPool`] through a [`Lease`] and append them to the lease in wire
//! order. The caller flushes the lease and then recycles it, which hands the
//! reclaimable buffers back to the pool.
//!
//! Buffers that alias memory owned by another buffer in the same lease (the
//! slices of a fragmented header block) are appended as non-reclaimable so
//! the pool only ever receives each allocation once.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::{BufMut, Bytes, BytesMut};

/// Source of reusable byte buffers.
pub trait BufferPool: Send + Sync {
    /// Get an empty buffer with at least `capacity` bytes of room.
    ///
    /// With `clear` set, the buffer's spare capacity is zeroed before it is
    /// returned so no bytes from a previous user are left behind.
    fn acquire(&self, capacity: usize, clear: bool) -> BytesMut;

    /// Return a buffer for reuse.
    fn release(&self, buffer: BytesMut);
}

/// Default number of buffers [`HeapBufferPool`] keeps around.
const DEFAULT_MAX_RETAINED: usize = 64;

/// Heap-backed pool that retains a bounded number of released buffers.
#[derive(Debug)]
pub struct HeapBufferPool {
    free: Mutex<Vec<BytesMut>>,
    max_retained: usize,
}

impl HeapBufferPool {
    /// Create a pool that keeps up to 64 released buffers.
    pub fn new() -> Self {
        Self::with_max_retained(DEFAULT_MAX_RETAINED)
    }

    /// Create a pool that keeps up to `max_retained` released buffers.
    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
        }
    }

    /// Number of buffers currently waiting for reuse.
    pub fn retained(&self) -> usize {
        self.free().len()
    }

    // The free list holds plain buffers, so a panic while it was locked
    // cannot leave it inconsistent.
    fn free(&self) -> MutexGuard<'_, Vec<BytesMut>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HeapBufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferPool for HeapBufferPool {
    fn acquire(&self, capacity: usize, clear: bool) -> BytesMut {
        let reused = {
            let mut free = self.free();
            // Smallest buffer that already fits. Failing that, a buffer that
            // was split off a larger allocation may grow back into it once
            // the other halves are gone.
            let fits = free
                .iter()
                .enumerate()
                .filter(|(_, buf)| buf.capacity() >= capacity)
                .min_by_key(|(_, buf)| buf.capacity())
                .map(|(idx, _)| idx);
            fits.or_else(|| free.iter_mut().position(|buf| buf.try_reclaim(capacity)))
                .map(|idx| free.swap_remove(idx))
        };

        match reused {
            Some(mut buf) => {
                if clear {
                    let cap = buf.capacity();
                    buf.resize(cap, 0);
                    buf.clear();
                }
                buf
            }
            None => BytesMut::with_capacity(capacity),
        }
    }

    fn release(&self, mut buffer: BytesMut) {
        buffer.clear();
        if buffer.capacity() == 0 {
            return;
        }
        let mut free = self.free();
        if free.len() < self.max_retained {
            free.push(buffer);
        }
    }
}

struct Entry {
    buffer: BytesMut,
    recycle: bool,
}

/// Ordered list of buffers to be written to the wire.
///
/// Dropping a lease returns any reclaimable buffers it still holds to the
/// pool, so an abandoned lease never leaks pooled memory.
pub struct Lease<'p> {
    pool: &'p dyn BufferPool,
    entries: Vec<Entry>,
}

impl<'p> Lease<'p> {
    /// Create an empty lease drawing from `pool`.
    pub fn new(pool: &'p dyn BufferPool) -> Self {
        Self {
            pool,
            entries: Vec::new(),
        }
    }

    /// Acquire a buffer from the underlying pool.
    pub fn acquire(&self, capacity: usize, clear: bool) -> BytesMut {
        self.pool.acquire(capacity, clear)
    }

    /// Hand an acquired buffer straight back to the pool without writing it.
    pub fn release(&self, buffer: BytesMut) {
        self.pool.release(buffer);
    }

    /// Append a buffer. `recycle` marks it for return to the pool once the
    /// lease is recycled.
    pub fn append(&mut self, buffer: BytesMut, recycle: bool) {
        self.entries.push(Entry { buffer, recycle });
    }

    /// Number of buffers in the lease.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of bytes across all buffers.
    pub fn total_length(&self) -> usize {
        self.entries.iter().map(|e| e.buffer.len()).sum()
    }

    /// Buffers in wire order.
    pub fn buffers(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.entries.iter().map(|e| &e.buffer[..])
    }

    /// Buffers in wire order along with their reclaimable flag.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], bool)> + '_ {
        self.entries.iter().map(|e| (&e.buffer[..], e.recycle))
    }

    /// Copy every buffer into `dst`, in order.
    pub fn write_to<B: BufMut>(&self, dst: &mut B) {
        for entry in &self.entries {
            dst.put_slice(&entry.buffer);
        }
    }

    /// Concatenate every buffer into one contiguous `Bytes`.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.total_length());
        self.write_to(&mut out);
        out.freeze()
    }

    /// Release reclaimable buffers to the pool and empty the lease.
    pub fn recycle(&mut self) {
        for entry in self.entries.drain(..) {
            if entry.recycle {
                self.pool.release(entry.buffer);
            }
        }
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.recycle();
    }
}

impl std::fmt::Debug for Lease<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease")
            .field("buffers", &self.entries.len())
            .field("total_length", &self.total_length())
            .finish()
    }
}
