//! TLK talk tables
//!
//! A talk table maps numeric string references to localized text, with
//! optional voice-over metadata per entry. Text is stored in an
//! engine-specific 8-bit or UTF-16 encoding and is decoded lazily: the
//! table keeps its stream and only pulls a string's bytes the first time
//! that string is asked for.

mod reader;

pub use reader::{pre_parse_color_codes, read_language_id, read_language_id_from_path};

use crate::formats::common::Encoding;
use crate::stream::ByteStream;

/// The entry carries text.
pub const FLAG_TEXT_PRESENT: u32 = 0x0000_0001;
/// The entry carries a voice-over sound resource.
pub const FLAG_SOUND_PRESENT: u32 = 0x0000_0002;
/// The entry's sound length field is meaningful.
pub const FLAG_SOUND_LENGTH_PRESENT: u32 = 0x0000_0004;

#[derive(Debug, Clone, Default)]
pub(crate) struct TlkEntry {
    pub(crate) flags: u32,
    pub(crate) sound_res_ref: String,
    pub(crate) volume_variance: u32,
    pub(crate) pitch_variance: u32,
    pub(crate) offset: u32,
    pub(crate) length: u32,
    pub(crate) sound_length: f32,
    pub(crate) sound_id: u32,
    pub(crate) text: Option<String>,
}

/// A loaded talk table.
///
/// String lookups take `&mut self` because decoded text is memoized on
/// first access.
pub struct TlkFile {
    pub(crate) stream: Box<dyn ByteStream>,
    pub(crate) encoding: Option<&'static Encoding>,
    pub(crate) language_id: u32,
    pub(crate) entries: Vec<TlkEntry>,
}

impl TlkFile {
    /// Numeric language ID stored in the table header.
    #[must_use]
    pub fn language_id(&self) -> u32 {
        self.language_id
    }

    /// Number of string references in the table.
    #[must_use]
    pub fn string_count(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Whether a string reference is within the table.
    #[must_use]
    pub fn has_entry(&self, str_ref: u32) -> bool {
        (str_ref as usize) < self.entries.len()
    }

    /// Name of the voice-over sound resource for a string reference.
    ///
    /// Empty for out-of-range references and for entries without sound.
    #[must_use]
    pub fn sound_res_ref(&self, str_ref: u32) -> &str {
        self.entries
            .get(str_ref as usize)
            .map_or("", |e| e.sound_res_ref.as_str())
    }
}

impl std::fmt::Debug for TlkFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlkFile")
            .field("language_id", &self.language_id)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
