//! Address-range checks used before letting a DMA engine write into the
//! storage of a ring buffer.
//!
//! A range `[lo, hi)` is safe to overwrite when neither cursor lies inside
//! it. The checks are plain predicates: the caller must keep the buffer
//! from being mutated between the check and the transfer it guards (mask
//! interrupts or hold a critical section around both). Ranges must satisfy
//! `lo < hi`; ranges wrapping around the address space are not supported
//! and give unspecified answers.

use crate::ringbuf::RingBuffer;

/// True if `cursor` lies in `[lo, hi)`.
#[inline]
pub fn cursor_in_range(cursor: *const u8, lo: *const u8, hi: *const u8) -> bool {
    cursor >= lo && cursor < hi
}

impl RingBuffer<'_> {
    /// True if the head cursor lies in `[lo, hi)`.
    pub fn head_in_range(&self, lo: *const u8, hi: *const u8) -> bool {
        cursor_in_range(self.head_ptr(), lo, hi)
    }

    /// True if the tail cursor lies in `[lo, hi)`.
    pub fn tail_in_range(&self, lo: *const u8, hi: *const u8) -> bool {
        cursor_in_range(self.tail_ptr(), lo, hi)
    }

    /// True if a DMA transfer may overwrite `[lo, hi)` without touching
    /// either cursor.
    pub fn dma_allowed(&self, lo: *const u8, hi: *const u8) -> bool {
        !self.head_in_range(lo, hi) && !self.tail_in_range(lo, hi)
    }

    /// Negation of [`RingBuffer::dma_allowed`], evaluated without branches.
    #[inline]
    pub fn dma_forbidden(&self, lo: *const u8, hi: *const u8) -> bool {
        let (head, tail) = (self.head_ptr(), self.tail_ptr());
        ((head >= lo) & (head < hi)) | ((tail >= lo) & (tail < hi))
    }
}
