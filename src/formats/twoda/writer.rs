//! 2DA file writing (plain-text V2.0 output)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::TwoDaFile;
use crate::error::Result;

impl TwoDaFile {
    /// Write the table out as a plain-text V2.0 file.
    ///
    /// Binary tables round-trip through this to become editable text;
    /// row indices and column widths are recomputed from the data.
    pub fn dump_ascii<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "2DA V2.0")?;

        if self.default_string.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(writer, "Default: {}", self.default_string)?;
        }

        let column_count = self.headers.len();
        let row_count = self.rows.len();

        // Widest entry per printed column, the row-index column included
        let mut widths = vec![0usize; column_count + 1];
        widths[0] = digit_count(row_count.saturating_sub(1));

        for (i, header) in self.headers.iter().enumerate() {
            widths[i + 1] = header.len();
        }
        for row in self.rows.iter().flatten() {
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i + 1] = widths[i + 1].max(quoted_len(cell));
            }
        }

        write!(writer, "{:width$}", "", width = widths[0])?;
        for (i, header) in self.headers.iter().enumerate() {
            write!(writer, " {:width$}", header, width = widths[i + 1])?;
        }
        writeln!(writer)?;

        for (index, row) in self.rows.iter().enumerate() {
            write!(writer, "{:width$}", index, width = widths[0])?;

            if let Some(row) = row {
                for (i, cell) in row.cells.iter().enumerate() {
                    if cell.contains(' ') {
                        write!(writer, " \"{}\"{:pad$}", cell, "", pad = widths[i + 1] - quoted_len(cell))?;
                    } else {
                        write!(writer, " {:width$}", cell, width = widths[i + 1])?;
                    }
                }
            }

            writeln!(writer)?;
        }

        writer.flush()
    }

    /// Write the table as plain text to a file on disk.
    pub fn dump_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.dump_ascii(&mut writer)?;
        Ok(())
    }
}

/// Printed width of a cell, counting quotes added for embedded spaces.
fn quoted_len(cell: &str) -> usize {
    if cell.contains(' ') { cell.len() + 2 } else { cell.len() }
}

fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
