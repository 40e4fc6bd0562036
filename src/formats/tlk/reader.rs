//! TLK talk table reading and lazy string decoding

use byteorder::{LittleEndian, ReadBytesExt};
use std::path::Path;

use super::{FLAG_TEXT_PRESENT, TlkEntry, TlkFile};
use crate::error::{DebugTag, Error, Result};
use crate::formats::common::{
    Encoding, FileHeader, decode_string, make_tag, read_string_fixed,
};
use crate::stream::{BufferedStream, ByteStream, FileStream};

const TAG_TLK: u32 = make_tag(*b"TLK ");
const VERSION_3: u32 = make_tag(*b"V3.0");
const VERSION_4: u32 = make_tag(*b"V4.0");

/// Placeholder for text whose encoding is unknown.
const UNDECODABLE: &str = "[???]";

impl TlkFile {
    /// Open a talk table from a file on disk.
    ///
    /// `encoding` is the text encoding strings were stored in; `None`
    /// keeps the table readable but renders every string as `"[???]"`.
    pub fn open<P: AsRef<Path>>(path: P, encoding: Option<&'static Encoding>) -> Result<Self> {
        let stream = BufferedStream::new(FileStream::open(path)?);
        Self::read(Box::new(stream), encoding)
    }

    /// Read a talk table from a stream, taking ownership of it.
    ///
    /// The stream stays open for the table's lifetime; string text is
    /// fetched from it on demand.
    pub fn read(
        stream: Box<dyn ByteStream>,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self> {
        Self::load(stream, encoding).map_err(|e| e.while_reading("TLK"))
    }

    fn load(
        mut stream: Box<dyn ByteStream>,
        encoding: Option<&'static Encoding>,
    ) -> Result<Self> {
        let header = FileHeader::read(&mut stream)?;

        if header.id != TAG_TLK {
            return Err(Error::InvalidTlkTag(DebugTag(header.id)));
        }
        if header.version != VERSION_3 && header.version != VERSION_4 {
            return Err(Error::UnsupportedTlkVersion(DebugTag(header.version)));
        }

        let language_id = stream.read_u32::<LittleEndian>()?;
        let string_count = stream.read_u32::<LittleEndian>()?;

        // V4 stores the table offset; in V3 the table follows the header
        let table_offset = if header.version == VERSION_4 {
            stream.read_u32::<LittleEndian>()?
        } else {
            20
        };

        let strings_offset = stream.read_u32::<LittleEndian>()?;

        stream.seek_to(u64::from(table_offset))?;

        let entries = if header.version == VERSION_3 {
            read_entry_table_v3(&mut stream, string_count, strings_offset)?
        } else {
            read_entry_table_v4(&mut stream, string_count)?
        };

        tracing::debug!(
            language_id,
            string_count,
            v4 = header.version == VERSION_4,
            "loaded TLK table"
        );

        Ok(TlkFile {
            stream,
            encoding,
            language_id,
            entries,
        })
    }

    /// Text for a string reference.
    ///
    /// Out-of-range references resolve to the empty string. The first
    /// successful lookup decodes and caches the text; later lookups are
    /// free.
    pub fn string(&mut self, str_ref: u32) -> Result<&str> {
        let index = str_ref as usize;
        if index >= self.entries.len() {
            return Ok("");
        }

        self.fetch_string(index)?;

        Ok(self.entries[index].text.as_deref().unwrap_or(""))
    }

    fn fetch_string(&mut self, index: usize) -> Result<()> {
        let entry = &self.entries[index];
        if entry.text.is_some() || entry.length == 0 || entry.flags & FLAG_TEXT_PRESENT == 0 {
            return Ok(());
        }

        self.stream.seek_to(u64::from(entry.offset))?;

        // A length that runs past the stream is clamped, not fatal
        let length = u64::from(entry.length).min(self.stream.remaining()) as usize;
        if length == 0 {
            return Ok(());
        }

        let raw = self.stream.read_exact_vec(length)?;
        let parsed = pre_parse_color_codes(&raw);

        let text = match self.encoding {
            Some(encoding) => decode_string(&parsed, encoding),
            None => UNDECODABLE.to_string(),
        };

        self.entries[index].text = Some(text);
        Ok(())
    }
}

fn read_entry_table_v3(
    stream: &mut dyn ByteStream,
    count: u32,
    strings_offset: u32,
) -> Result<Vec<TlkEntry>> {
    let mut entries = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let flags = stream.read_u32::<LittleEndian>()?;
        let sound_res_ref = read_string_fixed(stream, 16)?;
        let volume_variance = stream.read_u32::<LittleEndian>()?;
        let pitch_variance = stream.read_u32::<LittleEndian>()?;
        let offset = stream.read_u32::<LittleEndian>()?.wrapping_add(strings_offset);
        let length = stream.read_u32::<LittleEndian>()?;
        let sound_length = stream.read_f32::<LittleEndian>()?;

        entries.push(TlkEntry {
            flags,
            sound_res_ref,
            volume_variance,
            pitch_variance,
            offset,
            length,
            sound_length,
            ..TlkEntry::default()
        });
    }

    Ok(entries)
}

fn read_entry_table_v4(stream: &mut dyn ByteStream, count: u32) -> Result<Vec<TlkEntry>> {
    let mut entries = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let sound_id = stream.read_u32::<LittleEndian>()?;
        let offset = stream.read_u32::<LittleEndian>()?;
        let length = u32::from(stream.read_u16::<LittleEndian>()?);

        entries.push(TlkEntry {
            flags: FLAG_TEXT_PRESENT,
            sound_id,
            offset,
            length,
            ..TlkEntry::default()
        });
    }

    Ok(entries)
}

/// Rewrite raw-byte color escapes into their textual form.
///
/// Strings may embed `<c`, three raw color bytes, and `>`; the engine's
/// text layer expects those as `<cRRGGBBFF>` hex instead. Sequences that
/// do not complete the pattern pass through untouched, as does the
/// closing `</c>`.
#[must_use]
pub fn pre_parse_color_codes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] == b'<'
            && input.get(i + 1) == Some(&b'c')
            && input.get(i + 5) == Some(&b'>')
        {
            let (r, g, b) = (input[i + 2], input[i + 3], input[i + 4]);
            out.extend_from_slice(format!("<c{r:02X}{g:02X}{b:02X}FF>").as_bytes());
            i += 6;
        } else {
            out.push(input[i]);
            i += 1;
        }
    }

    out
}

/// Peek at a stream's header and pull out the language ID.
///
/// Returns `None` when the stream is not a supported talk table.
pub fn read_language_id(stream: &mut dyn ByteStream) -> Option<u32> {
    let header = FileHeader::read(stream).ok()?;

    if header.id != TAG_TLK || (header.version != VERSION_3 && header.version != VERSION_4) {
        return None;
    }

    stream.read_u32::<LittleEndian>().ok()
}

/// [`read_language_id`] for a file on disk.
#[must_use]
pub fn read_language_id_from_path<P: AsRef<Path>>(path: P) -> Option<u32> {
    let mut stream = FileStream::open(path).ok()?;
    read_language_id(&mut stream)
}
