//! Single-attempt transfers between a ring buffer and a byte stream.
//!
//! Any `io::Read` / `io::Write` works as the stream. Each call performs
//! exactly one `read` or `write` on it and never wraps inside the buffer,
//! so a short count is normal: it can come from the stream, or from the
//! cursor reaching the physical end of the storage. Retrying is up to the
//! caller.

use crate::ringbuf::RingBuffer;
use log::trace;
use std::io::{self, Read, Write};

impl RingBuffer<'_> {
    /// Read at most `count` bytes from `stream` into the buffer at `head`.
    ///
    /// The request is further limited to the contiguous run from `head` to
    /// the end of the storage. Writing past the free space evicts the
    /// oldest bytes. Errors from the stream are returned unchanged and leave
    /// the buffer untouched.
    pub fn stream_read<R: Read + ?Sized>(&mut self, stream: &mut R, count: usize) -> io::Result<usize> {
        let head = self.head();
        let count = count.min(self.buffer_size() - head);
        let prior_free = self.bytes_free();

        let n = stream.read(&mut self.storage_mut()[head..head + count])?;
        if n > 0 {
            self.commit_write(n, prior_free);
        }
        Ok(n)
    }

    /// Write at most `count` bytes from the tail of the buffer to `stream`.
    ///
    /// If fewer than `count` bytes are stored nothing is sent and 0 is
    /// returned. Otherwise the request is limited to the contiguous run from
    /// `tail` to the end of the storage, and `tail` advances by the number
    /// of bytes the stream accepted.
    pub fn stream_write<W: Write + ?Sized>(&mut self, stream: &mut W, count: usize) -> io::Result<usize> {
        let used = self.bytes_used();
        if count > used {
            trace!("stream write of {} bytes refused, {} stored", count, used);
            return Ok(0);
        }
        let tail = self.tail();
        let count = count.min(self.buffer_size() - tail);

        let n = stream.write(&self.storage()[tail..tail + count])?;
        self.commit_read(n);
        Ok(n)
    }
}

/// Drains up to `buf.len()` stored bytes. Returns `Ok(0)` when empty.
impl Read for RingBuffer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.bytes_used());
        let extracted = self.extract_to(&mut buf[..n]);
        debug_assert!(extracted.is_some(), "{} bytes were stored", n);
        Ok(n)
    }
}

/// Stores all of `buf`, evicting the oldest bytes when it does not fit.
impl Write for RingBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.copy_in(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Stream that fails every call with the given kind.
    struct Broken(io::ErrorKind);

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "broken stream"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "broken stream"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Sink that accepts at most `limit` bytes per call and counts calls.
    struct Trickle {
        limit: usize,
        calls: usize,
        data: Vec<u8>,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_read_zero() {
        let mut rb = RingBuffer::new(16).unwrap();
        let mut input = Cursor::new(b"abc".to_vec());
        assert_eq!(rb.stream_read(&mut input, 0).unwrap(), 0);
        assert!(rb.is_empty());
    }

    #[test]
    fn test_stream_read_stops_at_physical_end() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.fill(b'.', 6);
        let mut skip = [0u8; 6];
        rb.extract_to(&mut skip).unwrap();

        let mut input = Cursor::new(b"abcdefgh".to_vec());
        assert_eq!(rb.stream_read(&mut input, 8).unwrap(), 3);
        assert_eq!(rb.head(), 0);
        assert_eq!(rb.stream_read(&mut input, 5).unwrap(), 5);
        assert_eq!(rb.bytes_used(), 8);

        let mut out = [0u8; 8];
        rb.extract_to(&mut out).unwrap();
        assert_eq!(&out, b"abcdefgh");
    }

    #[test]
    fn test_stream_read_overflow() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.copy_in(b"wxy");
        let mut input = Cursor::new(b"12".to_vec());
        assert_eq!(rb.stream_read(&mut input, 2).unwrap(), 2);
        assert!(rb.is_full());
        assert_eq!(rb.head(), 0);
        assert_eq!(rb.tail(), 1);
        let (a, b) = rb.as_slices();
        assert_eq!([a, b].concat(), b"xy12");
    }

    #[test]
    fn test_stream_read_error_leaves_state() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.copy_in(b"ab");
        let err = rb
            .stream_read(&mut Broken(io::ErrorKind::WouldBlock), 2)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert_eq!((rb.head(), rb.tail()), (2, 0));
    }

    #[test]
    fn test_stream_write_underflow_makes_no_call() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.copy_in(b"abc");
        let mut sink = Trickle { limit: 100, calls: 0, data: Vec::new() };
        assert_eq!(rb.stream_write(&mut sink, 4).unwrap(), 0);
        assert_eq!(sink.calls, 0);
        assert_eq!(rb.bytes_used(), 3);
    }

    #[test]
    fn test_stream_write_short_count() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.copy_in(b"abcdef");
        let mut sink = Trickle { limit: 4, calls: 0, data: Vec::new() };
        assert_eq!(rb.stream_write(&mut sink, 6).unwrap(), 4);
        assert_eq!(sink.calls, 1);
        assert_eq!(sink.data, b"abcd");
        assert_eq!(rb.bytes_used(), 2);
    }

    #[test]
    fn test_stream_write_stops_at_physical_end() {
        let mut rb = RingBuffer::new(5).unwrap();
        rb.copy_in(b"abcd");
        let mut skip = [0u8; 3];
        rb.extract_to(&mut skip).unwrap();
        rb.copy_in(b"efg");

        let mut sink = Vec::new();
        assert_eq!(rb.stream_write(&mut sink, 4).unwrap(), 3);
        assert_eq!(rb.tail(), 0);
        assert_eq!(rb.stream_write(&mut sink, 1).unwrap(), 1);
        assert_eq!(sink, b"defg");
        assert!(rb.is_empty());
    }

    #[test]
    fn test_stream_write_error_leaves_state() {
        let mut rb = RingBuffer::new(4).unwrap();
        rb.copy_in(b"ab");
        let err = rb
            .stream_write(&mut Broken(io::ErrorKind::BrokenPipe), 2)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(rb.bytes_used(), 2);
    }

    #[test]
    fn test_read_trait_takes_what_is_stored() {
        let mut rb = RingBuffer::new(6).unwrap();
        rb.copy_in(b"abcde");
        let mut skip = [0u8; 4];
        rb.extract_to(&mut skip).unwrap();
        rb.copy_in(b"fgh");

        let mut buf = [0u8; 10];
        assert_eq!(rb.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"efgh");
        assert!(rb.is_empty());
        assert_eq!(rb.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_io_traits() {
        let mut rb = RingBuffer::new(8).unwrap();
        write!(rb, "hi {}", 42).unwrap();
        let mut text = String::new();
        rb.read_to_string(&mut text).unwrap();
        assert_eq!(text, "hi 42");
        assert!(rb.is_empty());

        let copied = io::copy(&mut Cursor::new(b"0123456789".to_vec()), &mut rb).unwrap();
        assert_eq!(copied, 10);
        let mut out = Vec::new();
        rb.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"23456789");
    }
}
