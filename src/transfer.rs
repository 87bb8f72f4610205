//! Bulk transfers into, out of and between ring buffers.
//!
//! Writes never fail: when they exceed the free space, the oldest bytes
//! are evicted and `tail` moves forward. Reads never underflow: asking for
//! more than is stored moves nothing and returns `None` (or 0).

use crate::error::{Error, Result};
use crate::ringbuf::RingBuffer;
use log::trace;

impl RingBuffer<'_> {
    /// Write `len` copies of `value` at `head`, wrapping at the end of the
    /// storage.
    ///
    /// At most `buffer_size()` bytes are written, since that touches every
    /// byte exactly once. Returns the number of bytes written.
    pub fn fill(&mut self, value: u8, len: usize) -> usize {
        let size = self.buffer_size();
        let count = len.min(size);
        let prior_free = self.bytes_free();

        let head = self.head();
        let first = count.min(size - head);
        let storage = self.storage_mut();
        storage[head..head + first].fill(value);
        storage[..count - first].fill(value);

        self.commit_write(count, prior_free);
        count
    }

    /// Copy `src` into the buffer at `head` and return the new `head`.
    ///
    /// If `src` is longer than the storage, earlier bytes would be
    /// overwritten by later ones within the same call, so only the final
    /// `buffer_size()` bytes are actually stored.
    pub fn copy_in(&mut self, src: &[u8]) -> usize {
        let size = self.buffer_size();
        let prior_free = self.bytes_free();

        let skip = src.len().saturating_sub(size);
        let start = (self.head() + skip) % size;
        self.write_span(start, &src[skip..]);

        self.commit_write(src.len(), prior_free);
        self.head()
    }

    /// Move `dst.len()` bytes from the tail of the buffer into `dst`.
    ///
    /// Returns the new `tail`, or `None` without touching anything if fewer
    /// than `dst.len()` bytes are stored.
    pub fn extract_to(&mut self, dst: &mut [u8]) -> Option<usize> {
        let used = self.bytes_used();
        if dst.len() > used {
            trace!("extract of {} bytes refused, {} stored", dst.len(), used);
            return None;
        }
        self.read_span(0, dst);
        self.commit_read(dst.len());
        Some(self.tail())
    }

    /// Move `count` bytes from the tail of `src` to the head of `self`.
    ///
    /// Underflow of `src` is refused (returns `None`, neither buffer
    /// changes). Overflow of `self` evicts its oldest bytes. Returns the new
    /// `head` of `self`. The two buffers may differ in capacity.
    ///
    /// The buffers must not share storage. Safe code cannot build such a
    /// pair; for [`RingBuffer::bind_raw`] it is part of the safety contract.
    pub fn copy_from(&mut self, src: &mut RingBuffer<'_>, count: usize) -> Option<usize> {
        let available = src.bytes_used();
        if count > available {
            trace!("copy of {} bytes refused, source holds {}", count, available);
            return None;
        }
        debug_assert!(!shares_storage(self, src), "copy between aliased ring buffers");

        let dst_size = self.buffer_size();
        let src_size = src.buffer_size();
        let prior_free = self.bytes_free();

        let mut head = self.head();
        let mut tail = src.tail();
        let mut remaining = count;
        while remaining > 0 {
            // Bounded by the source's contiguous run, then the destination's.
            let n = remaining.min(src_size - tail).min(dst_size - head);
            self.storage_mut()[head..head + n].copy_from_slice(&src.storage()[tail..tail + n]);
            head = (head + n) % dst_size;
            tail = (tail + n) % src_size;
            remaining -= n;
        }

        src.commit_read(count);
        self.commit_write(count, prior_free);
        Some(self.head())
    }

    /// Append one byte, evicting the oldest byte if the buffer is full.
    /// Returns the new `head`.
    pub fn put_byte(&mut self, value: u8) -> usize {
        self.copy_in(&[value])
    }

    /// Remove and return the oldest byte.
    pub fn get_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.extract_to(&mut byte).ok_or(Error::Empty)?;
        Ok(byte[0])
    }

    /// Copy `dst.len()` stored bytes, starting `offset` bytes after the
    /// tail, without consuming them.
    ///
    /// Returns the number of bytes copied: `dst.len()`, or 0 if the range
    /// reaches past the stored bytes.
    pub fn peek(&self, offset: usize, dst: &mut [u8]) -> usize {
        if !self.in_occupied(offset, dst.len()) {
            trace!("peek of {} bytes at offset {} refused", dst.len(), offset);
            return 0;
        }
        self.read_span(offset, dst);
        dst.len()
    }

    /// Overwrite stored bytes in place, starting `offset` bytes after the
    /// tail. Cursors do not move.
    ///
    /// Returns the number of bytes written: `src.len()`, or 0 if the range
    /// reaches past the stored bytes.
    pub fn poke(&mut self, offset: usize, src: &[u8]) -> usize {
        if !self.in_occupied(offset, src.len()) {
            trace!("poke of {} bytes at offset {} refused", src.len(), offset);
            return 0;
        }
        let start = (self.tail() + offset) % self.buffer_size();
        self.write_span(start, src);
        src.len()
    }

    fn in_occupied(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .map_or(false, |end| end <= self.bytes_used())
    }

    /// Copy out `dst.len()` bytes starting at logical `offset` from tail.
    fn read_span(&self, offset: usize, dst: &mut [u8]) {
        let size = self.buffer_size();
        let start = (self.tail() + offset) % size;
        let first = dst.len().min(size - start);
        let storage = self.storage();

        dst[..first].copy_from_slice(&storage[start..start + first]);
        let rest = dst.len() - first;
        dst[first..].copy_from_slice(&storage[..rest]);
    }

    /// Copy `data` into storage at physical `start`, wrapping once.
    /// `data` must not be longer than the storage.
    fn write_span(&mut self, start: usize, data: &[u8]) {
        let size = self.buffer_size();
        let first = data.len().min(size - start);
        let storage = self.storage_mut();

        storage[start..start + first].copy_from_slice(&data[..first]);
        let rest = data.len() - first;
        storage[..rest].copy_from_slice(&data[first..]);
    }
}

fn shares_storage(a: &RingBuffer<'_>, b: &RingBuffer<'_>) -> bool {
    let a_start = a.as_ptr() as usize;
    let b_start = b.as_ptr() as usize;
    a_start < b_start + b.buffer_size() && b_start < a_start + a.buffer_size()
}
