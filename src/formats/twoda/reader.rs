//! 2DA file reading and parsing

use byteorder::{LittleEndian, ReadBytesExt};
use std::path::Path;

use super::{SENTINEL, TwoDaFile, TwoDaRow, parse_float, parse_int};
use crate::error::{DebugTag, Error, Result};
use crate::formats::common::{FileHeader, make_tag, read_string_line};
use crate::stream::{BufferedStream, ByteStream, FileStream, Whence};
use crate::tokenizer::{SeparatorRule, Tokenizer};

const TAG_2DA: u32 = make_tag(*b"2DA ");
const TAG_2DA_TAB: u32 = make_tag(*b"2DA\t");
const VERSION_TEXT: u32 = make_tag(*b"V2.0");
const VERSION_BINARY: u32 = make_tag(*b"V2.b");

impl TwoDaFile {
    /// Read a 2DA table from a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut stream = BufferedStream::new(FileStream::open(path)?);
        Self::read(&mut stream)
    }

    /// Read a 2DA table from a stream positioned at its header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid2daTag`] or [`Error::Unsupported2daVersion`]
    /// for foreign input, with every failure annotated as a 2DA read; no
    /// partially-loaded table ever escapes.
    pub fn read(stream: &mut dyn ByteStream) -> Result<Self> {
        Self::load(stream).map_err(|e| e.while_reading("2DA"))
    }

    fn load(stream: &mut dyn ByteStream) -> Result<Self> {
        let header = FileHeader::read(stream)?;

        if header.id != TAG_2DA && header.id != TAG_2DA_TAB {
            return Err(Error::Invalid2daTag(DebugTag(header.id)));
        }
        if header.version != VERSION_TEXT && header.version != VERSION_BINARY {
            return Err(Error::Unsupported2daVersion(DebugTag(header.version)));
        }

        // Discard whatever follows the version tag on the header line
        let _ = read_string_line(stream)?;

        let mut table = TwoDaFile::default();

        if header.version == VERSION_TEXT {
            table.read_text(stream)?;
        } else {
            table.read_binary(stream)?;
        }

        table.create_header_map();

        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            binary = header.version == VERSION_BINARY,
            "loaded 2DA table"
        );

        Ok(table)
    }

    // ==================== Text variant (V2.0) ====================

    fn read_text(&mut self, stream: &mut dyn ByteStream) -> Result<()> {
        let tokenize = Tokenizer::new(SeparatorRule::IgnoreAll)
            .with_separator(b' ')
            .with_separator(b'\t')
            .with_quote(b'"')
            .with_chunk_end(b'\n')
            .with_ignore(b'\r');

        self.read_default_text(stream, &tokenize)?;
        self.read_headers_text(stream, &tokenize)?;
        self.read_rows_text(stream, &tokenize)?;

        Ok(())
    }

    fn read_default_text(
        &mut self,
        stream: &mut dyn ByteStream,
        tokenize: &Tokenizer,
    ) -> Result<()> {
        let (tokens, _) = tokenize.get_tokens(stream, 2, Some(2))?;

        // Only a literal "Default:" directive sets a default; anything
        // else on this line is silently ignored
        if tokens[0] == "Default:" {
            self.default_string = tokens[1].clone();
        }

        self.default_int = parse_int(&self.default_string);
        self.default_float = parse_float(&self.default_string);

        tokenize.next_chunk(stream)
    }

    fn read_headers_text(
        &mut self,
        stream: &mut dyn ByteStream,
        tokenize: &Tokenizer,
    ) -> Result<()> {
        let (headers, _) = tokenize.get_tokens(stream, 0, None)?;
        self.headers = headers;

        tokenize.next_chunk(stream)
    }

    fn read_rows_text(&mut self, stream: &mut dyn ByteStream, tokenize: &Tokenizer) -> Result<()> {
        let column_count = self.headers.len();

        while !stream.eos() {
            // The leading row-index token is positional noise
            tokenize.skip_token(stream, 1)?;

            let (cells, count) = tokenize.get_tokens(stream, column_count, Some(column_count))?;

            tokenize.next_chunk(stream)?;

            if count == 0 {
                // Blank line
                continue;
            }

            self.rows.push(Some(TwoDaRow { cells }));
        }

        Ok(())
    }

    // ==================== Binary variant (V2.b) ====================

    fn read_binary(&mut self, stream: &mut dyn ByteStream) -> Result<()> {
        self.read_headers_binary(stream)?;
        self.skip_row_names_binary(stream)?;
        self.read_rows_binary(stream)?;

        Ok(())
    }

    fn read_headers_binary(&mut self, stream: &mut dyn ByteStream) -> Result<()> {
        let tokenize = Tokenizer::new(SeparatorRule::Heed)
            .with_separator(b'\t')
            .with_separator(b'\0');

        // Headers are one run of delimited tokens, ended by an empty one
        loop {
            let header = tokenize.get_token(stream)?;
            if header.is_empty() {
                break;
            }
            self.headers.push(header);
        }

        Ok(())
    }

    fn skip_row_names_binary(&mut self, stream: &mut dyn ByteStream) -> Result<()> {
        let row_count = stream.read_u32::<LittleEndian>()? as usize;

        self.rows = vec![None; row_count];

        // Row names are stored but positional; only their count matters
        let tokenize = Tokenizer::new(SeparatorRule::Heed)
            .with_separator(b'\t')
            .with_separator(b'\0');

        tokenize.skip_token(stream, row_count)
    }

    fn read_rows_binary(&mut self, stream: &mut dyn ByteStream) -> Result<()> {
        let column_count = self.headers.len();
        let row_count = self.rows.len();
        let cell_count = column_count * row_count;

        let mut offsets = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            offsets.push(stream.read_u16::<LittleEndian>()?);
        }

        stream.skip(2)?; // Reserved

        let data_offset = stream.pos();

        let tokenize = Tokenizer::new(SeparatorRule::Heed).with_separator(b'\0');

        for i in 0..row_count {
            let mut cells = Vec::with_capacity(column_count);

            for j in 0..column_count {
                let offset = data_offset + u64::from(offsets[i * column_count + j]);
                stream.seek(offset as i64, Whence::Start)?;

                let mut cell = tokenize.get_token(stream)?;
                if cell.is_empty() {
                    // The binary form cannot tell "empty" from "missing";
                    // normalize to the sentinel like the text form
                    cell = SENTINEL.to_string();
                }

                cells.push(cell);
            }

            self.rows[i] = Some(TwoDaRow { cells });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    fn text_2da() -> &'static [u8] {
        b"2DA V2.0\n\
          Default: 5\n\
          Name       Value\n\
          0 sword    3\n\
          1 ****     \"\"\n\
          \n\
          2 \"long sword\" 12\n"
    }

    #[test]
    fn parses_text_variant() {
        let mut stream = MemoryStream::from(text_2da());
        let table = TwoDaFile::read(&mut stream).unwrap();

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3); // blank line dropped
        assert_eq!(table.get_row(0).string("Name"), "sword");
        assert_eq!(table.get_row(0).int("Value"), 3);
        assert_eq!(table.get_row(2).string("Name"), "long sword");
        assert_eq!(table.get_row(2).int("Value"), 12);
    }

    #[test]
    fn text_defaults_apply() {
        let mut stream = MemoryStream::from(text_2da());
        let table = TwoDaFile::read(&mut stream).unwrap();

        assert_eq!(table.default_string(), "5");
        // Sentinel cell and quoted-empty cell both fall back
        assert_eq!(table.get_row(1).string("Name"), "5");
        assert_eq!(table.get_row(1).int("Value"), 5);
        // Unknown column falls back too
        assert_eq!(table.get_row(0).int("Nonexistent"), 5);
    }

    #[test]
    fn missing_default_directive_is_not_an_error() {
        let mut stream = MemoryStream::from(
            &b"2DA V2.0\n\
               \n\
               Value\n\
               0 7\n"[..],
        );
        let table = TwoDaFile::read(&mut stream).unwrap();

        assert_eq!(table.default_string(), "");
        assert_eq!(table.get_row(0).int("Value"), 7);
        assert_eq!(table.get_row(5).int("Value"), 0);
    }

    #[test]
    fn wrong_tag_fails_with_context() {
        let mut stream = MemoryStream::from(&b"GFF V2.0\n720 more bytes"[..]);
        let err = TwoDaFile::read(&mut stream).unwrap_err();
        assert!(err.to_string().starts_with("failed reading 2DA file"));
    }

    #[test]
    fn wrong_version_fails() {
        let mut stream = MemoryStream::from(&b"2DA V9.9\n"[..]);
        assert!(TwoDaFile::read(&mut stream).is_err());
    }

    /// Build a small binary (V2.b) table: headers A, B; 2 rows.
    fn binary_2da() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"2DA V2.b\n");
        data.extend_from_slice(b"A\tB\t\0"); // headers, ended by empty token
        data.extend_from_slice(&2u32.to_le_bytes()); // row count
        data.extend_from_slice(b"0\t1\t"); // row names, parsed and discarded

        // Cell heap: "one", "", "2"
        let heap: &[u8] = b"one\0\x002\0";
        // Offsets into the heap, row-major: (one, "") / ("2", one)
        for offset in [0u16, 4, 5, 0] {
            data.extend_from_slice(&offset.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]); // reserved
        data.extend_from_slice(heap);
        data
    }

    #[test]
    fn parses_binary_variant() {
        let mut stream = MemoryStream::new(binary_2da());
        let table = TwoDaFile::read(&mut stream).unwrap();

        assert_eq!(table.headers(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.row_count(), 2);

        assert_eq!(table.get_row(0).string("A"), "one");
        assert_eq!(table.get_row(1).string("A"), "2");
        assert_eq!(table.get_row(1).int(0usize), 2);

        // The empty heap cell was normalized to the sentinel
        assert_eq!(table.get_row(0).cell("B"), Some(SENTINEL));
        assert!(table.get_row(0).is_empty("B"));

        // Row 1 column B points back at "one"
        assert_eq!(table.get_row(1).string("B"), "one");
    }

    #[test]
    fn binary_table_round_trips_through_text_dump() {
        let mut stream = MemoryStream::new(binary_2da());
        let table = TwoDaFile::read(&mut stream).unwrap();

        let mut out = Vec::new();
        table.dump_ascii(&mut out).unwrap();

        let mut round = MemoryStream::new(out);
        let reparsed = TwoDaFile::read(&mut round).unwrap();

        assert_eq!(reparsed.headers(), table.headers());
        for row in 0..table.row_count() {
            for col in 0..table.column_count() {
                assert_eq!(reparsed.get_row(row).cell(col), table.get_row(row).cell(col));
            }
        }
    }
}
