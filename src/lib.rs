//! # Auroran
//!
//! A pure-Rust library for working with BioWare Aurora engine file formats.
//!
//! ## Supported Formats
//!
//! - **2DA tables** - Two-dimensional game data arrays, plain-text and binary
//! - **HERF archives** - Hashed resource packfiles with embedded name dictionaries
//! - **TLK talk tables** - Localized string tables with lazy text decoding
//!
//! ## Quick Start
//!
//! ### Reading a 2DA Table
//!
//! ```no_run
//! use auroran::formats::TwoDaFile;
//!
//! let table = TwoDaFile::open("appearance.2da")?;
//! let name = table.get_row(3).string("Label");
//! let speed = table.get_row(3).float("WalkSpeed");
//! # Ok::<(), auroran::Error>(())
//! ```
//!
//! ### Listing a HERF Archive
//!
//! ```no_run
//! use auroran::formats::HerfFile;
//!
//! let herf = HerfFile::open("client.herf")?;
//! for resource in herf.resources() {
//!     println!("{:08x} {}", resource.hash, resource.name);
//! }
//! let data = herf.resource(0)?;
//! # Ok::<(), auroran::Error>(())
//! ```
//!
//! ### Looking Up Localized Strings
//!
//! ```no_run
//! use auroran::formats::TlkFile;
//! use auroran::formats::common::Encoding;
//!
//! let encoding = Encoding::for_label(b"windows-1252");
//! let mut tlk = TlkFile::open("dialog.tlk", encoding)?;
//! println!("{}", tlk.string(1000)?);
//! # Ok::<(), auroran::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `auroran` command-line binary

pub mod error;
pub mod formats;
pub mod stream;
pub mod tokenizer;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::common::{Encoding, FileHeader, FileType, make_tag};
    pub use crate::formats::herf::{HerfFile, HerfResource};
    pub use crate::formats::tlk::{TlkFile, read_language_id_from_path};
    pub use crate::formats::twoda::{Column, RowRef, TwoDaFile};
    pub use crate::stream::{
        BufferedStream, ByteStream, FileStream, MemoryStream, SubStream, Whence,
    };
    pub use crate::tokenizer::{SeparatorRule, Tokenizer};
    pub use crate::utils::hash_string_djb2;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
