//! Byte-addressable ring buffer: storage, cursors and state queries.
//!
//! The storage is one byte larger than the usable capacity. That spare
//! byte lets `head == tail` mean "empty" and `head + 1 == tail` mean
//! "full" without a separate length counter.

use crate::error::{Error, Result};
use crate::storage::Storage;
use log::debug;
use std::fmt;

/// Byte FIFO over an owned or borrowed contiguous region.
///
/// `head` is the next position to write, `tail` the next position to
/// read. Both are offsets into the region and stay in `[0, buffer_size())`.
pub struct RingBuffer<'a> {
    storage: Storage<'a>,
    head: usize,
    tail: usize,
}

impl RingBuffer<'static> {
    /// Allocate a ring buffer with `capacity` usable bytes.
    ///
    /// The allocation is `capacity + 1` bytes. Returns
    /// `Error::Allocation` if that much memory cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        let size = capacity
            .checked_add(1)
            .ok_or(Error::Allocation { requested: capacity })?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { requested: capacity })?;
        buffer.resize(size, 0);

        Ok(Self::from_storage(Storage::Owned(buffer.into_boxed_slice())))
    }
}

impl<'a> RingBuffer<'a> {
    /// Bind a ring buffer over caller-owned memory, e.g. a DMA region.
    ///
    /// The whole region is the physical storage, so the usable capacity is
    /// `region.len() - 1`. The region is assumed to be empty: both cursors
    /// start at its base. The memory is never freed by the ring buffer.
    pub fn bind(region: &'a mut [u8]) -> Result<Self> {
        if region.is_empty() {
            return Err(Error::InvalidRegion { len: 0 });
        }
        Ok(Self::from_storage(Storage::Borrowed(region)))
    }

    /// Bind a ring buffer over `len` bytes at `addr`.
    ///
    /// # Safety
    ///
    /// `addr` must be valid for reads and writes of `len` bytes for `'a`,
    /// and nothing else may access that memory through another path while
    /// the ring buffer lives, except hardware transfers the caller has
    /// cleared with [`RingBuffer::dma_allowed`]. Two ring buffers must not
    /// be bound over overlapping memory.
    pub unsafe fn bind_raw(addr: *mut u8, len: usize) -> Result<Self> {
        if addr.is_null() || len == 0 {
            return Err(Error::InvalidRegion { len });
        }
        let region = std::slice::from_raw_parts_mut(addr, len);
        Ok(Self::from_storage(Storage::Borrowed(region)))
    }

    fn from_storage(storage: Storage<'a>) -> Self {
        Self {
            storage,
            head: 0,
            tail: 0,
        }
    }

    /// Size of the physical storage in bytes (capacity + 1).
    pub fn buffer_size(&self) -> usize {
        self.storage.len()
    }

    /// Usable capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer_size() - 1
    }

    pub fn bytes_used(&self) -> usize {
        if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.buffer_size() - (self.tail - self.head)
        }
    }

    pub fn bytes_free(&self) -> usize {
        self.capacity() - self.bytes_used()
    }

    pub fn is_full(&self) -> bool {
        self.bytes_free() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// True if the storage was allocated by [`RingBuffer::new`].
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// Logically empty the buffer. The memory is not cleared.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Offset of the next byte to be written.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Offset of the next byte to be read.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Base address of the storage.
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    /// Address of the head cursor. Only meaningful until the next mutation.
    pub fn head_ptr(&self) -> *const u8 {
        self.as_ptr().wrapping_add(self.head)
    }

    /// Address of the tail cursor. Only meaningful until the next mutation.
    pub fn tail_ptr(&self) -> *const u8 {
        self.as_ptr().wrapping_add(self.tail)
    }

    /// The occupied bytes in FIFO order, as at most two contiguous spans.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.head >= self.tail {
            (&self.storage[self.tail..self.head], &[])
        } else {
            (&self.storage[self.tail..], &self.storage[..self.head])
        }
    }

    pub(crate) fn storage(&self) -> &[u8] {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Move `head` forward past `written` bytes. If more was written than
    /// was free beforehand, push `tail` forward over the evicted bytes.
    pub(crate) fn commit_write(&mut self, written: usize, prior_free: usize) {
        let size = self.buffer_size();
        self.head = (self.head + written % size) % size;
        if written > prior_free {
            let evicted = (written - prior_free) % size;
            self.tail = (self.tail + evicted) % size;
            debug!(
                "ring overflow: {} bytes written with {} free, oldest bytes evicted",
                written, prior_free
            );
        }
    }

    /// Move `tail` forward past `read` bytes that have been consumed.
    pub(crate) fn commit_read(&mut self, read: usize) {
        debug_assert!(read <= self.bytes_used());
        self.tail = (self.tail + read) % self.buffer_size();
    }
}

impl fmt::Debug for RingBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("owned", &self.is_owned())
            .field("buffer_size", &self.buffer_size())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("bytes_used", &self.bytes_used())
            .finish()
    }
}

/// Release an owning ring buffer and clear the handle.
///
/// A borrowing buffer is left untouched and `Error::NotOwner` is returned:
/// its memory belongs to the caller. An empty handle is a no-op.
pub fn destroy(handle: &mut Option<RingBuffer<'_>>) -> Result<()> {
    match handle {
        Some(rb) if !rb.is_owned() => Err(Error::NotOwner),
        _ => {
            handle.take();
            Ok(())
        }
    }
}
