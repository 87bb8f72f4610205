//! # byte-ring
//!
//! A byte FIFO over a fixed, contiguous region, for moving raw bytes
//! between streams, memory and DMA windows without allocating once set up.
//!
//! - Storage is either allocated ([`RingBuffer::new`]) or borrowed from the
//!   caller ([`RingBuffer::bind`]), e.g. a DMA region. Borrowed memory is
//!   never freed.
//! - Writes that exceed the free space evict the oldest bytes; the buffer
//!   is always left consistent.
//! - Reads that ask for more than is stored are refused and change nothing.
//! - Stream transfers make exactly one `read`/`write` call on the stream.
//!
//! The buffer is single-producer, single-consumer and does no locking.
//!
//! ```
//! use byte_ring::RingBuffer;
//!
//! let mut rb = RingBuffer::new(24).unwrap();
//! rb.copy_in(b"abcdefghijk");
//! assert_eq!(rb.find_byte(b'd', 0), 3);
//!
//! let mut out = [0u8; 4];
//! rb.extract_to(&mut out).unwrap();
//! assert_eq!(&out, b"abcd");
//! assert_eq!(rb.bytes_used(), 7);
//! ```

pub mod config;
mod dma;
pub mod error;
#[cfg(unix)]
pub mod fd;
pub mod pump;
mod ringbuf;
mod search;
mod storage;
mod stream;
mod transfer;

pub use dma::cursor_in_range;
pub use error::{Error, Result};
pub use ringbuf::{destroy, RingBuffer};
