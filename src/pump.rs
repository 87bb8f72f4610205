use crate::error::{Error, Result};
use crate::ringbuf::RingBuffer;
use log::{debug, trace};
use std::io::{self, ErrorKind, Read, Write};

/// Counters from one pump run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub reads: u64,
    pub writes: u64,
}

/// Move everything from `input` to `output` through `rb`.
///
/// Reads are capped at the free space so nothing is evicted, and writes go
/// out in `chunk`-sized pieces once that much is buffered (or at end of
/// input). Interrupted calls are retried; any other stream error ends the
/// run. Returns once `input` hits EOF and the buffer is drained.
///
/// A zero-capacity buffer can never hold a byte and is rejected with
/// `Error::Config`.
pub fn pump<R, W>(rb: &mut RingBuffer<'_>, input: &mut R, output: &mut W, chunk: usize) -> Result<PumpStats>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    if rb.capacity() == 0 {
        return Err(Error::Config("pump needs a ring buffer with non-zero capacity".into()));
    }
    let chunk = chunk.max(1);
    let mut stats = PumpStats::default();
    let mut eof = false;

    loop {
        if !eof && !rb.is_full() {
            let want = chunk.min(rb.bytes_free());
            match rb.stream_read(input, want) {
                Ok(0) => {
                    debug!("input reached EOF after {} bytes", stats.bytes_in);
                    eof = true;
                }
                Ok(n) => {
                    trace!("read {} of {} bytes", n, want);
                    stats.bytes_in += n as u64;
                    stats.reads += 1;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let pending = rb.bytes_used();
        if pending > 0 && (eof || rb.is_full() || pending >= chunk) {
            let want = chunk.min(pending);
            match rb.stream_write(output, want) {
                Ok(0) => return Err(io::Error::from(ErrorKind::WriteZero).into()),
                Ok(n) => {
                    trace!("wrote {} of {} bytes", n, want);
                    stats.bytes_out += n as u64;
                    stats.writes += 1;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if eof && rb.is_empty() {
            break;
        }
    }

    output.flush()?;
    Ok(stats)
}
