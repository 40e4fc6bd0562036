//! File format handlers for Aurora engine formats

pub mod common;
pub mod herf;
pub mod tlk;
pub mod twoda;

// Re-export common types for convenience
pub use common::{FileHeader, FileType, make_tag};

// Re-export main format types
pub use herf::{HerfFile, HerfResource};
pub use tlk::TlkFile;
pub use twoda::{Column, TwoDaFile};
