//! Types and utilities shared across all Aurora formats

pub mod encoding;
pub mod filetype;
pub mod header;

pub use encoding::{Encoding, decode_string, read_string_fixed, read_string_line};
pub use filetype::FileType;
pub use header::{FileHeader, make_tag};
