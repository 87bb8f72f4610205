use cfg_if::cfg_if;
use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        fn errno() -> libc::c_int {
            unsafe { *libc::__errno_location() }
        }
    } else if #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))] {
        fn errno() -> libc::c_int {
            unsafe { *libc::__error() }
        }
    } else {
        fn errno() -> libc::c_int {
            io::Error::last_os_error().raw_os_error().unwrap_or(0)
        }
    }
}

/// Retrieves the last OS error.
fn last_os_error() -> io::Error {
    io::Error::from_raw_os_error(errno())
}

/// Convert a `read(2)`/`write(2)` style return value.
///
/// The call returns -1 and sets errno on failure, or the number of bytes
/// transferred on success.
fn check(res: libc::ssize_t) -> io::Result<usize> {
    if res < 0 {
        return Err(last_os_error());
    }
    usize::try_from(res).map_err(|_| io::Error::from(io::ErrorKind::InvalidData))
}

/// A borrowed file descriptor used as a ring buffer stream.
///
/// Every `read` and `write` is exactly one system call; `EINTR` and short
/// counts are handed back to the caller. The descriptor is not closed on
/// drop, and the stream cannot outlive the file it borrows:
///
/// ```compile_fail
/// use byte_ring::fd::FdStream;
/// use std::fs::File;
///
/// let stream = {
///     let file = File::open("/dev/null").unwrap();
///     FdStream::new(&file)
/// };
/// drop(stream);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FdStream<'a> {
    fd: BorrowedFd<'a>,
}

impl<'a> FdStream<'a> {
    pub fn new<F: AsFd + ?Sized>(file: &'a F) -> Self {
        Self { fd: file.as_fd() }
    }

    /// # Safety
    ///
    /// `fd` must be an open descriptor (not -1) and stay open for `'a`.
    pub unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self {
            fd: BorrowedFd::borrow_raw(fd),
        }
    }
}

impl AsFd for FdStream<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd
    }
}

impl AsRawFd for FdStream<'_> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl io::Read for FdStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let fd = self.fd.as_raw_fd();
        check(unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) })
    }
}

impl io::Write for FdStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let fd = self.fd.as_raw_fd();
        check(unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
