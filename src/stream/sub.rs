//! Bounded window over a parent stream

use std::io::Read;

use super::{ByteStream, Whence, resolve_seek};
use crate::error::Result;

/// A [`ByteStream`] restricted to a `[begin, end)` window of a parent.
///
/// All positions reported by the sub-stream are relative to the window;
/// reads and seeks are translated into the parent's coordinate space. The
/// sub-stream owns its parent; [`SubStream::into_inner`] hands it back.
#[derive(Debug)]
pub struct SubStream<S: ByteStream> {
    parent: S,
    begin: u64,
    end: u64,
    eos: bool,
}

impl<S: ByteStream> SubStream<S> {
    /// Take ownership of `parent` and restrict it to `[begin, end)`.
    ///
    /// The parent cursor is moved to `begin`.
    pub fn new(mut parent: S, begin: u64, end: u64) -> Result<Self> {
        debug_assert!(begin <= end);
        parent.seek(begin as i64, Whence::Start)?;
        Ok(Self {
            parent,
            begin,
            end,
            eos: false,
        })
    }

    /// Release the parent stream, leaving its cursor wherever it is.
    pub fn into_inner(self) -> S {
        self.parent
    }
}

impl<S: ByteStream> Read for SubStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = (self.end - self.parent.pos()) as usize;
        let want = buf.len().min(remaining);
        if buf.len() > remaining {
            self.eos = true;
        }
        self.parent.read(&mut buf[..want])
    }
}

impl<S: ByteStream> ByteStream for SubStream<S> {
    fn pos(&self) -> u64 {
        self.parent.pos() - self.begin
    }

    fn size(&self) -> u64 {
        self.end - self.begin
    }

    fn eos(&self) -> bool {
        self.eos
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        let target = resolve_seek(self.pos(), self.size(), offset, whence)?;
        self.parent.seek((self.begin + target) as i64, Whence::Start)?;
        self.eos = false;
        Ok(())
    }
}
