//! Seekable, endian-aware byte streams over memory or file backing
//!
//! Every container decoder in this crate consumes a [`ByteStream`]: a
//! bounded, randomly-seekable byte source with an explicit end-of-stream
//! flag. Multi-byte integer and float reads go through
//! [`byteorder::ReadBytesExt`], which is available on every stream because
//! they all implement [`std::io::Read`].

mod buffered;
mod file;
mod memory;
mod sub;

pub use buffered::BufferedStream;
pub use file::FileStream;
pub use memory::MemoryStream;
pub use sub::SubStream;

use std::io::Read;

use crate::error::{Error, Result};

/// Reference point for a seek operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Relative to the start of the stream.
    Start,
    /// Relative to the current cursor position.
    Current,
    /// Relative to the end of the stream.
    End,
}

/// A bounded, seekable byte source.
///
/// `read` follows [`std::io::Read`] semantics: it copies up to `buf.len()`
/// bytes and returns the number actually copied, setting the end-of-stream
/// flag when fewer bytes were available than requested. It never fails just
/// because the stream ran out; callers that need an exact count use
/// [`ByteStream::read_exact_vec`] or [`std::io::Read::read_exact`].
pub trait ByteStream: Read {
    /// Current cursor position.
    fn pos(&self) -> u64;

    /// Total logical size of the stream in bytes.
    fn size(&self) -> u64;

    /// Whether a read has hit the end of the stream.
    ///
    /// Cleared by a successful seek.
    fn eos(&self) -> bool;

    /// Reposition the cursor.
    ///
    /// Seeking outside `[0, size]` fails with [`Error::SeekOutOfBounds`]
    /// and leaves the cursor where it was.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()>;

    /// Seek to an absolute position, returning the previous position.
    ///
    /// Handy for save/restore around a look-ahead scan.
    fn seek_to(&mut self, offset: u64) -> Result<u64> {
        let prev = self.pos();
        self.seek(offset as i64, Whence::Start)?;
        Ok(prev)
    }

    /// Skip `n` bytes forward.
    fn skip(&mut self, n: i64) -> Result<()> {
        self.seek(n, Whence::Current)
    }

    /// Bytes left between the cursor and the end of the stream.
    fn remaining(&self) -> u64 {
        self.size() - self.pos()
    }

    /// Read a single byte, or `None` at end of stream.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut b = [0u8; 1];
        let n = self.read(&mut b)?;
        Ok((n == 1).then_some(b[0]))
    }

    /// Read exactly `n` bytes into a new owned buffer.
    ///
    /// Unlike `read`, a short read here is an error.
    fn read_exact_vec(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let mut got = 0;
        while got < n {
            let r = self.read(&mut buf[got..])?;
            if r == 0 {
                return Err(Error::ShortRead { wanted: n, got });
            }
            got += r;
        }
        Ok(buf)
    }
}

impl<T: ByteStream + ?Sized> ByteStream for &mut T {
    fn pos(&self) -> u64 {
        (**self).pos()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn eos(&self) -> bool {
        (**self).eos()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        (**self).seek(offset, whence)
    }
}

impl<T: ByteStream + ?Sized> ByteStream for Box<T> {
    fn pos(&self) -> u64 {
        (**self).pos()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn eos(&self) -> bool {
        (**self).eos()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        (**self).seek(offset, whence)
    }
}

/// Resolve a `(offset, whence)` pair against a stream size.
///
/// Shared bounds check for the concrete stream types: the resolved
/// position must stay within `[0, size]`.
pub(crate) fn resolve_seek(pos: u64, size: u64, offset: i64, whence: Whence) -> Result<u64> {
    let base = match whence {
        Whence::Start => 0,
        Whence::Current => pos as i64,
        Whence::End => size as i64,
    };
    let target = base + offset;
    if target < 0 || target as u64 > size {
        return Err(Error::SeekOutOfBounds {
            offset: target,
            size,
        });
    }
    Ok(target as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_seek_bounds() {
        assert_eq!(resolve_seek(0, 10, 10, Whence::Start).unwrap(), 10);
        assert_eq!(resolve_seek(4, 10, -4, Whence::Current).unwrap(), 0);
        assert_eq!(resolve_seek(0, 10, -1, Whence::End).unwrap(), 9);
        assert!(resolve_seek(0, 10, 11, Whence::Start).is_err());
        assert!(resolve_seek(0, 10, -1, Whence::Current).is_err());
    }
}
