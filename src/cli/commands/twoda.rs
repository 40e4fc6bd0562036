//! CLI commands for 2DA table operations

use std::io::{self, Write};
use std::path::Path;

use crate::formats::TwoDaFile;

/// Dump a 2DA table as plain text, to a file or to stdout.
pub fn dump(source: &Path, destination: Option<&Path>) -> anyhow::Result<()> {
    let table = TwoDaFile::open(source)?;

    match destination {
        Some(path) => table.dump_to_path(path)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            table.dump_ascii(&mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
