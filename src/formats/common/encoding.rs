//! String readers and code-page decoding
//!
//! Container metadata (resource names, sound references, header lines) is
//! plain ASCII and read with the helpers below. Talk-table entry text is
//! stored in a game- and language-dependent code page and goes through
//! [`decode_string`] with an [`encoding_rs::Encoding`] chosen by the
//! caller.

pub use encoding_rs::Encoding;

use crate::error::Result;
use crate::stream::ByteStream;

/// Read a fixed-width string field, cut at the first NUL byte.
///
/// Non-ASCII bytes are replaced rather than failing; name fields in real
/// archives occasionally carry garbage past the terminator.
pub fn read_string_fixed(stream: &mut dyn ByteStream, width: usize) -> Result<String> {
    let bytes = stream.read_exact_vec(width)?;
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(width);
    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

/// Read up to the next `\n` (or end of stream), dropping `\r`.
///
/// The newline itself is consumed and not part of the result.
pub fn read_string_line(stream: &mut dyn ByteStream) -> Result<String> {
    let mut line = Vec::new();

    loop {
        match stream.read_byte()? {
            None | Some(b'\n') => break,
            Some(b'\r') => {}
            Some(c) => line.push(c),
        }
    }

    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Decode raw bytes through a code page, trimming trailing NULs.
#[must_use]
pub fn decode_string(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.trim_end_matches('\0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    #[test]
    fn fixed_string_cuts_at_nul() {
        let mut s = MemoryStream::from(&b"sound01\0junkjunk"[..]);
        assert_eq!(read_string_fixed(&mut s, 16).unwrap(), "sound01");
        assert_eq!(s.pos(), 16);
    }

    #[test]
    fn fixed_string_short_stream_fails() {
        let mut s = MemoryStream::from(&b"abc"[..]);
        assert!(read_string_fixed(&mut s, 16).is_err());
    }

    #[test]
    fn line_reader_strips_cr() {
        let mut s = MemoryStream::from(&b"first line\r\nsecond"[..]);
        assert_eq!(read_string_line(&mut s).unwrap(), "first line");
        assert_eq!(read_string_line(&mut s).unwrap(), "second");
    }

    #[test]
    fn decode_cp1252() {
        let encoding = Encoding::for_label(b"windows-1252").unwrap();
        // 0xE9 is 'é' in CP-1252
        assert_eq!(decode_string(&[b'n', 0xE9, b'e'], encoding), "née");
        assert_eq!(decode_string(&[0xE9, 0, 0], encoding), "é");
    }
}
