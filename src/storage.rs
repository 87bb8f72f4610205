use std::ops::{Deref, DerefMut};

/// Backing memory of a ring buffer.
///
/// An owned region is released when the storage is dropped. A borrowed
/// region (a DMA window, a static array) is never freed here; the buffer
/// only keeps its cursors over it.
pub enum Storage<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a mut [u8]),
}

impl Storage<'_> {
    pub fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }
}

impl Deref for Storage<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Owned(buf) => buf,
            Storage::Borrowed(buf) => buf,
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(buf) => buf,
            Storage::Borrowed(buf) => buf,
        }
    }
}
