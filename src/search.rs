use crate::ringbuf::RingBuffer;

impl RingBuffer<'_> {
    /// Find the first `value` at or after logical `offset` from the tail.
    ///
    /// Only the occupied bytes are scanned. Returns the logical offset of
    /// the match, or `bytes_used()` if there is none (or `offset` is already
    /// past the stored bytes).
    pub fn find_byte(&self, value: u8, offset: usize) -> usize {
        let used = self.bytes_used();
        if offset >= used {
            return used;
        }

        let size = self.buffer_size();
        let start = (self.tail() + offset) % size;
        let remaining = used - offset;
        let first = remaining.min(size - start);
        let storage = self.storage();

        if let Some(pos) = storage[start..start + first].iter().position(|&b| b == value) {
            return offset + pos;
        }
        match storage[..remaining - first].iter().position(|&b| b == value) {
            Some(pos) => offset + first + pos,
            None => used,
        }
    }
}
