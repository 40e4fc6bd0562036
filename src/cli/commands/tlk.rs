//! CLI commands for TLK talk table operations

use anyhow::bail;
use std::path::Path;

use crate::formats::TlkFile;
use crate::formats::common::Encoding;
use crate::formats::tlk::read_language_id_from_path;

/// Print one string from a talk table.
pub fn get(source: &Path, str_ref: u32, encoding_label: &str) -> anyhow::Result<()> {
    let Some(encoding) = Encoding::for_label(encoding_label.as_bytes()) else {
        bail!("unknown encoding label {encoding_label:?}");
    };

    let mut tlk = TlkFile::open(source, Some(encoding))?;

    if !tlk.has_entry(str_ref) {
        bail!(
            "string reference {str_ref} out of range (table has {} strings)",
            tlk.string_count()
        );
    }

    println!("{}", tlk.string(str_ref)?);

    let sound = tlk.sound_res_ref(str_ref);
    if !sound.is_empty() {
        println!("sound: {sound}");
    }

    Ok(())
}

/// Print a TLK file's language ID.
pub fn language(source: &Path) -> anyhow::Result<()> {
    match read_language_id_from_path(source) {
        Some(id) => println!("{id}"),
        None => bail!("{} is not a supported TLK file", source.display()),
    }

    Ok(())
}
