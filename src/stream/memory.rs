//! In-memory byte stream

use std::io::Read;

use super::{ByteStream, Whence, resolve_seek};
use crate::error::Result;

/// A [`ByteStream`] over an owned byte buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
    eos: bool,
}

impl MemoryStream {
    /// Wrap an owned buffer.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            eos: false,
        }
    }

    /// An empty stream, for zero-size resources.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The full backing buffer, regardless of cursor position.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Release the backing buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for MemoryStream {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemoryStream {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = self.data.len() - self.pos;
        let n = buf.len().min(remaining);
        if buf.len() > remaining {
            self.eos = true;
        }
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl ByteStream for MemoryStream {
    fn pos(&self) -> u64 {
        self.pos as u64
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn eos(&self) -> bool {
        self.eos
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        let target = resolve_seek(self.pos as u64, self.data.len() as u64, offset, whence)?;
        self.pos = target as usize;
        self.eos = false;
        Ok(())
    }
}
