//! HERF archive reading

use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DataRecord, HERF_MAGIC, HerfFile, HerfResource};
use crate::error::{Error, Result};
use crate::formats::common::{FileType, read_string_fixed};
use crate::stream::{BufferedStream, ByteStream, FileStream, MemoryStream};

/// DJB2 hash of `"erf.dict"`, the reserved name of the embedded
/// name dictionary.
const DICTIONARY_HASH: u32 = 0xEA82_8DD4;

/// Bytes per dictionary entry: a hash plus a fixed-size name field.
const DICTIONARY_ENTRY_SIZE: u64 = 4 + 128;

impl HerfFile {
    /// Open an archive and read its resource table.
    ///
    /// # Errors
    ///
    /// Fails on a wrong magic value, a corrupt embedded dictionary, or
    /// any resource record whose data range exceeds the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut stream = BufferedStream::new(FileStream::open(&path)?);
        Self::load(&mut stream, path).map_err(|e| e.while_reading("HERF"))
    }

    fn load(stream: &mut dyn ByteStream, path: PathBuf) -> Result<Self> {
        let magic = stream.read_u32::<LittleEndian>()?;
        if magic != HERF_MAGIC {
            return Err(Error::InvalidHerfMagic(magic));
        }

        let count = stream.read_u32::<LittleEndian>()?;

        let names = match find_dictionary(stream, count)? {
            Some((offset, size)) => read_dictionary(stream, offset, size)?,
            None => HashMap::new(),
        };

        let archive_size = stream.size();
        let mut resources = Vec::with_capacity(count as usize);
        let mut records = Vec::with_capacity(count as usize);

        for index in 0..count {
            let hash = stream.read_u32::<LittleEndian>()?;
            let size = stream.read_u32::<LittleEndian>()?;
            let offset = stream.read_u32::<LittleEndian>()?;

            if u64::from(offset) + u64::from(size) > archive_size {
                return Err(Error::HerfResourceBounds {
                    index,
                    offset,
                    size,
                    archive_size,
                });
            }

            let name = names.get(&hash).cloned().unwrap_or_default();
            let file_type = FileType::from_name(&name);

            resources.push(HerfResource {
                index,
                hash,
                name,
                file_type,
            });
            records.push(DataRecord { offset, size });
        }

        tracing::debug!(
            resources = count,
            named = names.len(),
            "loaded HERF archive"
        );

        Ok(HerfFile {
            path,
            resources,
            records,
        })
    }

    /// Fetch a resource's data as an in-memory stream.
    ///
    /// The archive file is reopened per fetch, so a [`HerfFile`] holds no
    /// file handle between calls. A zero-size resource yields a valid
    /// empty stream.
    pub fn resource(&self, index: u32) -> Result<MemoryStream> {
        let record = self.record(index)?;

        if record.size == 0 {
            return Ok(MemoryStream::empty());
        }

        let mut stream = FileStream::open(&self.path)?;
        stream.seek_to(u64::from(record.offset))?;
        let data = stream.read_exact_vec(record.size as usize)?;

        Ok(MemoryStream::new(data))
    }
}

/// Scan the record table for the dictionary's reserved hash, leaving the
/// stream back where it started.
fn find_dictionary(stream: &mut dyn ByteStream, count: u32) -> Result<Option<(u32, u32)>> {
    let table_pos = stream.pos();
    let mut found = None;

    for _ in 0..count {
        let hash = stream.read_u32::<LittleEndian>()?;
        let size = stream.read_u32::<LittleEndian>()?;
        let offset = stream.read_u32::<LittleEndian>()?;

        if hash == DICTIONARY_HASH {
            found = Some((offset, size));
        }
    }

    stream.seek_to(table_pos)?;
    Ok(found)
}

/// Read the embedded name dictionary into a hash-to-name map.
///
/// An unreachable dictionary offset means no names, not a broken archive;
/// a reachable one with a wrong magic is fatal.
fn read_dictionary(stream: &mut dyn ByteStream, offset: u32, size: u32) -> Result<HashMap<u32, String>> {
    let mut names = HashMap::new();
    let table_pos = stream.pos();

    if stream.seek_to(u64::from(offset)).is_err() {
        return Ok(names);
    }

    let magic = stream.read_u32::<LittleEndian>()?;
    if magic != HERF_MAGIC {
        return Err(Error::InvalidHerfDictionary(magic));
    }

    let entry_count = stream.read_u32::<LittleEndian>()?;
    let end = u64::from(offset) + u64::from(size);

    for _ in 0..entry_count {
        if stream.pos() + DICTIONARY_ENTRY_SIZE > end {
            break;
        }

        let hash = stream.read_u32::<LittleEndian>()?;
        let name = read_string_fixed(stream, 128)?.to_lowercase();

        names.insert(hash, name);
    }

    stream.seek_to(table_pos)?;
    Ok(names)
}
