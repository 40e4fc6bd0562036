//! Error types for `auroran`

use thiserror::Error;

/// The error type for `auroran` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Stream Errors ====================
    /// A seek target fell outside the stream's valid range.
    #[error("seek out of bounds: offset {offset} (stream size {size})")]
    SeekOutOfBounds {
        /// The absolute position the seek resolved to.
        offset: i64,
        /// The size of the stream (or window) being seeked.
        size: u64,
    },

    /// An exact-length read could not be satisfied.
    #[error("short read: wanted {wanted} bytes, got {got}")]
    ShortRead {
        /// Number of bytes requested.
        wanted: usize,
        /// Number of bytes actually available.
        got: usize,
    },

    // ==================== 2DA Format Errors ====================
    /// The file is not a valid 2DA table.
    #[error("not a 2DA file (tag {0})")]
    Invalid2daTag(DebugTag),

    /// The 2DA version is not supported.
    #[error("unsupported 2DA file version {0}")]
    Unsupported2daVersion(DebugTag),

    // ==================== HERF Archive Errors ====================
    /// The file is not a valid HERF archive (wrong magic).
    #[error("invalid HERF file (0x{0:08X})")]
    InvalidHerfMagic(u32),

    /// The in-archive dictionary carries the wrong magic.
    #[error("invalid HERF dictionary (0x{0:08X})")]
    InvalidHerfDictionary(u32),

    /// A resource's stored data range lies beyond the end of the archive.
    #[error(
        "resource {index} goes beyond end of file (offset {offset} + size {size} > archive size {archive_size})"
    )]
    HerfResourceBounds {
        /// Index of the offending resource record.
        index: u32,
        /// The stored data offset.
        offset: u32,
        /// The stored data size.
        size: u32,
        /// The actual archive size in bytes.
        archive_size: u64,
    },

    /// A resource index beyond the archive's resource count.
    #[error("resource index out of range ({index}/{count})")]
    ResourceIndexOutOfRange {
        /// The requested index.
        index: u32,
        /// The number of resources in the archive.
        count: u32,
    },

    // ==================== TLK Format Errors ====================
    /// The file is not a valid TLK talk table.
    #[error("not a TLK file (tag {0})")]
    InvalidTlkTag(DebugTag),

    /// The TLK version is not supported.
    #[error("unsupported TLK file version {0}")]
    UnsupportedTlkVersion(DebugTag),

    // ==================== Wrapping ====================
    /// A format loader failed partway through; names the failing format.
    #[error("failed reading {format} file: {source}")]
    FormatRead {
        /// Short format name ("2DA", "HERF", "TLK").
        format: &'static str,
        /// The originating error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error with a "failed reading `<format>` file" annotation.
    #[must_use]
    pub fn while_reading(self, format: &'static str) -> Self {
        Error::FormatRead {
            format,
            source: Box::new(self),
        }
    }
}

/// A 4-byte tag/version code rendered for error messages.
///
/// Printable ASCII codes show as text, anything else as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugTag(pub u32);

impl std::fmt::Display for DebugTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.0.to_be_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            let s: String = bytes.iter().map(|b| *b as char).collect();
            write!(f, "'{s}'")
        } else {
            write!(f, "0x{:08X}", self.0)
        }
    }
}

/// A specialized Result type for `auroran` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_tag_printable() {
        assert_eq!(DebugTag(u32::from_be_bytes(*b"2DA ")).to_string(), "'2DA '");
        assert_eq!(DebugTag(0x0001_0203).to_string(), "0x00010203");
    }

    #[test]
    fn format_read_annotation() {
        let err = Error::InvalidHerfMagic(0xDEAD_BEEF).while_reading("HERF");
        assert_eq!(
            err.to_string(),
            "failed reading HERF file: invalid HERF file (0xDEADBEEF)"
        );
    }
}
