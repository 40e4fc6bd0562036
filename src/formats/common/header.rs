//! Tag/version container header codec
//!
//! Every Aurora container opens with a 4-byte tag and a 4-byte version
//! code. Some toolchains wrote these as UTF-16LE text, doubling every
//! byte with a zero; that wide form is detected here and folded back into
//! the plain codes, so format decoders only ever compare against the
//! narrow constants.

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::Result;
use crate::stream::ByteStream;

/// Build a tag/version constant from its four ASCII bytes.
///
/// Tags compare against the big-endian word read from the stream, so
/// `make_tag(*b"2DA ")` matches a file starting with the bytes `2DA `.
#[must_use]
pub const fn make_tag(tag: [u8; 4]) -> u32 {
    u32::from_be_bytes(tag)
}

/// A container's identifying (tag, version) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// The 4-byte format tag.
    pub id: u32,
    /// The 4-byte layout version.
    pub version: u32,
    /// Whether the header was stored in the wide (UTF-16LE) form.
    pub utf16_le: bool,
}

impl FileHeader {
    /// Read and normalize a container header.
    ///
    /// Must be the first read on a fresh container stream: the wide-form
    /// detection consumes either 8 or 16 bytes depending on what it finds.
    pub fn read(stream: &mut dyn ByteStream) -> Result<Self> {
        let id = stream.read_u32::<BigEndian>()?;
        let version = stream.read_u32::<BigEndian>()?;

        if (id & 0x00FF_00FF) == 0 && (version & 0x00FF_00FF) == 0 {
            // Zero bytes interleave the ID and version: UTF-16LE header.
            // Two more words complete it; each pair folds into one code.
            let id = fold_utf16le(id, version);

            let version1 = stream.read_u32::<BigEndian>()?;
            let version2 = stream.read_u32::<BigEndian>()?;
            let version = fold_utf16le(version1, version2);

            return Ok(Self {
                id,
                version,
                utf16_le: true,
            });
        }

        Ok(Self {
            id,
            version,
            utf16_le: false,
        })
    }
}

/// Fold eight wide-form bytes into one code, dropping every second byte.
const fn fold_utf16le(x1: u32, x2: u32) -> u32 {
    (x1 & 0xFF00_0000)
        | ((x1 & 0x0000_FF00) << 8)
        | ((x2 & 0xFF00_0000) >> 16)
        | ((x2 & 0x0000_FF00) >> 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    #[test]
    fn narrow_header_passes_through() {
        let mut s = MemoryStream::from(&b"2DA V2.0"[..]);
        let header = FileHeader::read(&mut s).unwrap();

        assert_eq!(header.id, make_tag(*b"2DA "));
        assert_eq!(header.version, make_tag(*b"V2.0"));
        assert!(!header.utf16_le);
        assert_eq!(s.pos(), 8);
    }

    #[test]
    fn wide_header_folds() {
        // "2DA V2.0" as UTF-16LE text
        let mut wide = Vec::new();
        for b in b"2DA V2.0" {
            wide.push(*b);
            wide.push(0);
        }

        let mut s = MemoryStream::new(wide);
        let header = FileHeader::read(&mut s).unwrap();

        assert_eq!(header.id, make_tag(*b"2DA "));
        assert_eq!(header.version, make_tag(*b"V2.0"));
        assert!(header.utf16_le);
        assert_eq!(s.pos(), 16);
    }

    #[test]
    fn nonzero_mask_is_narrow() {
        // Masking with 0x00FF00FF must be zero in BOTH words for the wide
        // path to trigger
        let mut data = Vec::new();
        data.extend_from_slice(&[0x32, 0x00, 0x44, 0x00]); // masked zero
        data.extend_from_slice(b"V2.0"); // masked nonzero
        let mut s = MemoryStream::new(data);

        let header = FileHeader::read(&mut s).unwrap();
        assert!(!header.utf16_le);
        assert_eq!(header.id, 0x3200_4400);
        assert_eq!(s.pos(), 8);
    }
}
