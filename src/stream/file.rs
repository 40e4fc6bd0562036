//! File-backed byte stream

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::{ByteStream, Whence, resolve_seek};
use crate::error::Result;

/// A [`ByteStream`] over a file on disk.
///
/// The file size is captured once at open time; the file must not grow or
/// shrink underneath the stream.
#[derive(Debug)]
pub struct FileStream {
    file: File,
    size: u64,
    pos: u64,
    eos: bool,
}

impl FileStream {
    /// Open a file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            file,
            size,
            pos: 0,
            eos: false,
        })
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let remaining = (self.size - self.pos) as usize;
        let want = buf.len().min(remaining);
        if buf.len() > remaining {
            self.eos = true;
        }

        let mut got = 0;
        while got < want {
            let n = self.file.read(&mut buf[got..want])?;
            if n == 0 {
                break;
            }
            got += n;
        }

        self.pos += got as u64;
        Ok(got)
    }
}

impl ByteStream for FileStream {
    fn pos(&self) -> u64 {
        self.pos
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn eos(&self) -> bool {
        self.eos
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        let target = resolve_seek(self.pos, self.size, offset, whence)?;
        self.file.seek(SeekFrom::Start(target))?;
        self.pos = target;
        self.eos = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_stream_read_and_seek() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0, 1, 2, 3, 4, 5, 6, 7])
            .unwrap();

        let mut s = FileStream::open(&path).unwrap();
        assert_eq!(s.size(), 8);

        s.seek(6, Whence::Start).unwrap();
        assert_eq!(s.read_exact_vec(2).unwrap(), vec![6, 7]);
        assert!(!s.eos());

        assert!(s.seek(1, Whence::Current).is_err());
        assert_eq!(s.pos(), 8);

        s.seek(-8, Whence::End).unwrap();
        assert_eq!(s.read_byte().unwrap(), Some(0));
    }
}
