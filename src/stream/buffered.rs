//! Buffered wrapper coalescing small reads

use std::io::Read;

use super::{ByteStream, Whence};
use crate::error::Result;

/// Default buffer size for [`BufferedStream::new`].
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// A [`ByteStream`] wrapper with a fixed-size read buffer.
///
/// Small reads are served out of the buffer; a request the buffer cannot
/// satisfy flushes it and refills from the parent (requests larger than
/// the whole buffer bypass it entirely). Relative seeks that stay inside
/// the buffered region never touch the parent stream, which matters for
/// the tokenizer's one-byte-back peeks.
#[derive(Debug)]
pub struct BufferedStream<S: ByteStream> {
    parent: S,
    buf: Vec<u8>,
    /// Valid bytes in `buf`.
    filled: usize,
    /// Read cursor within `buf`.
    cursor: usize,
    eos: bool,
}

impl<S: ByteStream> BufferedStream<S> {
    /// Wrap `parent` with the default buffer size.
    pub fn new(parent: S) -> Self {
        Self::with_capacity(parent, DEFAULT_BUFFER_SIZE)
    }

    /// Wrap `parent` with an explicit buffer size.
    pub fn with_capacity(parent: S, capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            parent,
            buf: vec![0u8; capacity],
            filled: 0,
            cursor: 0,
            eos: false,
        }
    }

    /// Release the parent stream.
    ///
    /// The parent cursor may sit ahead of this stream's logical position
    /// by up to one buffer's worth of read-ahead.
    pub fn into_inner(self) -> S {
        self.parent
    }

    fn refill(&mut self) -> std::io::Result<()> {
        let mut filled = 0;
        while filled < self.buf.len() {
            let n = self.parent.read(&mut self.buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.filled = filled;
        self.cursor = 0;
        Ok(())
    }
}

impl<S: ByteStream> Read for BufferedStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut already = 0;
        let buffered = self.filled - self.cursor;

        if buf.len() > buffered {
            // Drain what the buffer still holds
            if buffered > 0 {
                buf[..buffered].copy_from_slice(&self.buf[self.cursor..self.filled]);
                self.cursor = self.filled;
                already = buffered;
            }

            // A request exceeding the buffer size goes straight through.
            // The buffer no longer matches the parent cursor afterwards,
            // so it is invalidated.
            if buf.len() - already > self.buf.len() {
                let n = self.parent.read(&mut buf[already..])?;
                self.filled = 0;
                self.cursor = 0;
                let total = already + n;
                if total < buf.len() {
                    self.eos = true;
                }
                return Ok(total);
            }

            self.refill()?;
        }

        let n = (buf.len() - already).min(self.filled - self.cursor);
        buf[already..already + n].copy_from_slice(&self.buf[self.cursor..self.cursor + n]);
        self.cursor += n;

        let total = already + n;
        if total < buf.len() {
            self.eos = true;
        }
        Ok(total)
    }
}

impl<S: ByteStream> ByteStream for BufferedStream<S> {
    fn pos(&self) -> u64 {
        // The parent cursor is ahead by however much of the buffer is unread
        self.parent.pos() - (self.filled - self.cursor) as u64
    }

    fn size(&self) -> u64 {
        self.parent.size()
    }

    fn eos(&self) -> bool {
        self.eos
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        if whence == Whence::Current {
            // Local seeks stay inside the buffered region
            let target = self.cursor as i64 + offset;
            if target >= 0 && target as usize <= self.filled {
                self.cursor = target as usize;
                self.eos = false;
                return Ok(());
            }
        }

        let offset = if whence == Whence::Current {
            offset - (self.filled - self.cursor) as i64
        } else {
            offset
        };

        self.parent.seek(offset, whence)?;
        self.filled = 0;
        self.cursor = 0;
        self.eos = false;
        Ok(())
    }
}
