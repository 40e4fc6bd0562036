//! HERF resource archives
//!
//! HERF is a bare-bones packfile: a magic value, a record count, and a
//! table of `(hash, size, offset)` records, with the raw resource data
//! following. File names are not stored per record; instead an optional
//! embedded `erf.dict` resource maps name hashes back to names. Archives
//! without a dictionary still load, their resources just stay nameless.

mod reader;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::common::FileType;
use crate::utils::hash_string_djb2;

/// Magic value identifying a HERF archive (and its embedded dictionary).
pub const HERF_MAGIC: u32 = 0x00F1_A5C0;

/// One resource as seen from the outside: what it is, not where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HerfResource {
    /// Position of the record in the archive's table.
    pub index: u32,
    /// DJB2 hash of the resource's full lowercase file name.
    pub hash: u32,
    /// File name recovered from the dictionary, empty if unknown.
    pub name: String,
    /// Type inferred from the name's extension.
    pub file_type: FileType,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DataRecord {
    pub(crate) offset: u32,
    pub(crate) size: u32,
}

/// An opened HERF archive.
///
/// Opening reads and validates the full record table up front; resource
/// data stays on disk until fetched through [`HerfFile::resource`].
#[derive(Debug)]
pub struct HerfFile {
    pub(crate) path: PathBuf,
    pub(crate) resources: Vec<HerfResource>,
    pub(crate) records: Vec<DataRecord>,
}

impl HerfFile {
    /// List of all resources in the archive, in table order.
    #[must_use]
    pub fn resources(&self) -> &[HerfResource] {
        &self.resources
    }

    /// Number of resources in the archive.
    #[must_use]
    pub fn resource_count(&self) -> u32 {
        self.resources.len() as u32
    }

    /// Path the archive was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes of a resource's data.
    pub fn resource_size(&self, index: u32) -> Result<u32> {
        self.record(index).map(|r| r.size)
    }

    /// Look up a resource by file name, case-insensitively.
    ///
    /// Works on dictionary-less archives too, by hashing the wanted name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<u32> {
        let hash = hash_string_djb2(&name.to_lowercase());
        self.resources.iter().find(|r| r.hash == hash).map(|r| r.index)
    }

    fn record(&self, index: u32) -> Result<DataRecord> {
        self.records
            .get(index as usize)
            .copied()
            .ok_or(Error::ResourceIndexOutOfRange {
                index,
                count: self.resource_count(),
            })
    }
}

/// Stable display name for a resource, for listings and extraction.
#[must_use]
pub fn resource_display_name(resource: &HerfResource) -> String {
    if resource.name.is_empty() {
        format!("{:08x}.bin", resource.hash)
    } else {
        resource.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_hash() {
        let resource = HerfResource {
            index: 0,
            hash: 0x00AB_CDEF,
            name: String::new(),
            file_type: FileType::Unknown,
        };
        assert_eq!(resource_display_name(&resource), "00abcdef.bin");

        let named = HerfResource {
            name: "creature.nsbmd".to_string(),
            file_type: FileType::Nsbmd,
            ..resource
        };
        assert_eq!(resource_display_name(&named), "creature.nsbmd");
    }
}
