use byte_ring::config::{parse_config, Overrides};
use byte_ring::fd::FdStream;
use byte_ring::pump::pump;
use byte_ring::{cursor_in_range, destroy, Error, RingBuffer};
use std::io::{Read, Seek, SeekFrom, Write};

fn contents(rb: &RingBuffer<'_>) -> Vec<u8> {
    let (a, b) = rb.as_slices();
    [a, b].concat()
}

#[test]
fn create_24() {
    let rb = RingBuffer::new(24).unwrap();
    assert_eq!(rb.buffer_size(), 25);
    assert_eq!(rb.capacity(), 24);
    assert!(rb.is_empty());
}

#[test]
fn fill_seven() {
    let mut rb = RingBuffer::new(24).unwrap();
    rb.fill(b'A', 7);
    assert_eq!(rb.bytes_used(), 7);
    assert_eq!(rb.bytes_free(), 17);
    assert_eq!(contents(&rb), b"AAAAAAA");
}

#[test]
fn fill_to_capacity_then_one_more() {
    let mut rb = RingBuffer::new(24).unwrap();
    let tail = rb.tail_ptr();
    rb.fill(b'A', 24);
    rb.fill(b'A', 1);
    assert!(rb.is_full());
    assert_eq!(rb.bytes_used(), 24);
    assert_eq!(rb.tail_ptr(), tail.wrapping_add(1));
}

#[test]
fn find_in_alphabet() {
    let mut rb = RingBuffer::new(24).unwrap();
    rb.copy_in(b"abcdefghijk");
    assert_eq!(rb.find_byte(b'd', 0), 3);
}

#[test]
fn copy_two_bytes_between_buffers() {
    let mut dst = RingBuffer::new(24).unwrap();
    let mut src = RingBuffer::new(24).unwrap();
    src.copy_in(b"XY");
    dst.copy_from(&mut src, 2).unwrap();
    assert!(src.is_empty());
    assert_eq!(dst.bytes_used(), 2);
    assert_eq!(contents(&dst), b"XY");
}

#[test]
fn overflow_moves_tail_by_excess_from_any_start() {
    for start in 0..9 {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.fill(b'.', start);
        let mut skip = vec![0u8; start];
        rb.extract_to(&mut skip).unwrap();

        let tail = rb.tail();
        rb.copy_in(b"12345678");
        rb.put_byte(b'9');
        assert!(rb.is_full());
        assert_eq!(rb.tail(), (tail + 1) % rb.buffer_size());
        assert_eq!(contents(&rb), b"23456789");
    }
}

#[test]
fn underflow_changes_nothing() {
    let mut rb = RingBuffer::new(8).unwrap();
    rb.copy_in(b"abc");
    let before = (rb.head(), rb.tail(), rb.bytes_used());

    let mut out = [0u8; 4];
    assert_eq!(rb.extract_to(&mut out), None);
    let mut sink = Vec::new();
    assert_eq!(rb.stream_write(&mut sink, 4).unwrap(), 0);
    let mut other = RingBuffer::new(8).unwrap();
    assert_eq!(other.copy_from(&mut rb, 4), None);

    assert_eq!((rb.head(), rb.tail(), rb.bytes_used()), before);
    assert!(sink.is_empty());
    assert!(other.is_empty());
}

#[test]
fn dma_window_over_bound_region() {
    let mut region = vec![0u8; 64];
    let base = region.as_ptr();
    let (lower, upper) = ((base, base.wrapping_add(32)), (base.wrapping_add(32), base.wrapping_add(64)));

    let mut rb = RingBuffer::bind(&mut region).unwrap();
    assert!(rb.dma_allowed(upper.0, upper.1));
    assert!(!rb.dma_allowed(lower.0, lower.1));
    assert!(cursor_in_range(rb.head_ptr(), lower.0, lower.1));

    rb.copy_in(&[7u8; 40]);
    let mut out = [0u8; 36];
    rb.extract_to(&mut out).unwrap();
    assert!(rb.dma_allowed(lower.0, lower.1));
    assert!(rb.dma_forbidden(upper.0, upper.1));

    let mut handle = Some(rb);
    assert!(matches!(destroy(&mut handle), Err(Error::NotOwner)));
    drop(handle);
    assert_eq!(&region[..4], &[7u8; 4]);
}

#[test]
fn pump_file_to_file() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 253) as u8).collect();
    let mut input = tempfile::tempfile().unwrap();
    input.write_all(&data).unwrap();
    input.seek(SeekFrom::Start(0)).unwrap();
    let mut output = tempfile::tempfile().unwrap();

    let cfg = parse_config("[buffer]\ncapacity = 1000\nchunk = 300\n")
        .unwrap()
        .resolve(Overrides::default())
        .unwrap();
    let mut rb = RingBuffer::new(cfg.capacity).unwrap();
    let stats = pump(
        &mut rb,
        &mut FdStream::new(&input),
        &mut FdStream::new(&output),
        cfg.chunk,
    )
    .unwrap();
    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, data.len() as u64);

    output.seek(SeekFrom::Start(0)).unwrap();
    let mut copied = Vec::new();
    output.read_to_end(&mut copied).unwrap();
    assert_eq!(copied, data);
}
