//! 2DA two-dimensional array tables
//!
//! Game rule data (appearances, portraits, item properties) ships as 2DA
//! tables: named columns, ordered rows, every cell a string. Two on-disk
//! variants exist, a whitespace/quote-delimited text form (`V2.0`) and a
//! binary form with an offset-indexed cell heap (`V2.b`); both decode to
//! the same in-memory table.
//!
//! Cells that are empty or hold the `"****"` sentinel read back as the
//! table's default value, and out-of-range row lookups yield a shared
//! empty row, so consumers can index freely without bounds bookkeeping.

mod reader;
mod writer;

use std::collections::HashMap;

/// The placeholder cell value meaning "use the column default".
pub const SENTINEL: &str = "****";

/// A single table row: one string cell per column.
#[derive(Debug, Clone, Default)]
pub struct TwoDaRow {
    pub(crate) cells: Vec<String>,
}

/// Column selector: by position or by (case-insensitive) header name.
#[derive(Debug, Clone, Copy)]
pub enum Column<'a> {
    /// Zero-based column position.
    Index(usize),
    /// Header name, matched case-insensitively.
    Name(&'a str),
}

impl From<usize> for Column<'_> {
    fn from(index: usize) -> Self {
        Column::Index(index)
    }
}

impl<'a> From<&'a str> for Column<'a> {
    fn from(name: &'a str) -> Self {
        Column::Name(name)
    }
}

/// A decoded 2DA table.
#[derive(Debug, Clone, Default)]
pub struct TwoDaFile {
    pub(crate) headers: Vec<String>,
    /// Lower-cased header name to column index; built once after load,
    /// last wins on duplicate names.
    pub(crate) header_map: HashMap<String, usize>,
    pub(crate) rows: Vec<Option<TwoDaRow>>,
    pub(crate) default_string: String,
    pub(crate) default_int: i32,
    pub(crate) default_float: f32,
}

/// A borrowed view of one row, carrying the table's defaults.
///
/// Out-of-range lookups produce a view over no row at all: every cell
/// read then yields the table default, which is the shared "empty row"
/// behavior consumers rely on.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a TwoDaFile,
    row: Option<&'a TwoDaRow>,
}

impl TwoDaFile {
    /// Number of rows in the table.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// The column headers, in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolve a header name to its column index, case-insensitively.
    #[must_use]
    pub fn header_to_column(&self, header: &str) -> Option<usize> {
        self.header_map.get(&header.to_ascii_lowercase()).copied()
    }

    /// The table's default string value.
    #[must_use]
    pub fn default_string(&self) -> &str {
        &self.default_string
    }

    /// Look up a row by index.
    ///
    /// An index at or beyond [`TwoDaFile::row_count`] yields the empty
    /// row rather than failing.
    #[must_use]
    pub fn get_row(&self, row: usize) -> RowRef<'_> {
        RowRef {
            table: self,
            row: self.rows.get(row).and_then(Option::as_ref),
        }
    }

    fn column_index(&self, column: Column<'_>) -> Option<usize> {
        match column {
            Column::Index(index) => Some(index),
            Column::Name(name) => self.header_to_column(name),
        }
    }

    pub(crate) fn create_header_map(&mut self) {
        for (index, header) in self.headers.iter().enumerate() {
            self.header_map.insert(header.to_ascii_lowercase(), index);
        }
    }
}

impl<'a> RowRef<'a> {
    /// The raw cell content, if the row and column exist.
    #[must_use]
    pub fn cell(&self, column: impl Into<Column<'a>>) -> Option<&'a str> {
        let index = self.table.column_index(column.into())?;
        self.row
            .and_then(|row| row.cells.get(index))
            .map(String::as_str)
    }

    /// The cell as a string, substituting the table default for empty or
    /// sentinel cells.
    #[must_use]
    pub fn string(&self, column: impl Into<Column<'a>>) -> &'a str {
        match self.cell(column) {
            Some(cell) if !cell.is_empty() && cell != SENTINEL => cell,
            _ => &self.table.default_string,
        }
    }

    /// The cell as an integer.
    ///
    /// Empty and sentinel cells yield the table default; unparseable
    /// content yields 0. Malformed numeric cells are common in shipped
    /// game data and must not fail the lookup.
    #[must_use]
    pub fn int(&self, column: impl Into<Column<'a>>) -> i32 {
        match self.cell(column) {
            Some(cell) if !cell.is_empty() && cell != SENTINEL => parse_int(cell),
            _ => self.table.default_int,
        }
    }

    /// The cell as a float, with the same fallback rules as
    /// [`RowRef::int`].
    #[must_use]
    pub fn float(&self, column: impl Into<Column<'a>>) -> f32 {
        match self.cell(column) {
            Some(cell) if !cell.is_empty() && cell != SENTINEL => parse_float(cell),
            _ => self.table.default_float,
        }
    }

    /// Whether the cell is empty or holds the sentinel.
    #[must_use]
    pub fn is_empty(&self, column: impl Into<Column<'a>>) -> bool {
        match self.cell(column) {
            Some(cell) => cell.is_empty() || cell == SENTINEL,
            None => true,
        }
    }
}

/// Permissive integer parse: failure yields 0, never an error.
pub(crate) fn parse_int(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

/// Permissive float parse: failure yields 0.0, never an error.
pub(crate) fn parse_float(s: &str) -> f32 {
    s.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TwoDaFile {
        let mut table = TwoDaFile {
            headers: vec!["Name".to_string(), "Value".to_string()],
            rows: vec![
                Some(TwoDaRow {
                    cells: vec!["sword".to_string(), "3".to_string()],
                }),
                Some(TwoDaRow {
                    cells: vec![SENTINEL.to_string(), String::new()],
                }),
            ],
            default_string: "dflt".to_string(),
            default_int: 7,
            default_float: 7.5,
            ..TwoDaFile::default()
        };
        table.create_header_map();
        table
    }

    #[test]
    fn lookup_by_index_and_name() {
        let table = sample_table();
        let row = table.get_row(0);

        assert_eq!(row.string(0usize), "sword");
        assert_eq!(row.string("Value"), "3");
        assert_eq!(row.int("value"), 3);
        assert_eq!(row.float("VALUE"), 3.0);
    }

    #[test]
    fn sentinel_and_empty_cells_yield_defaults() {
        let table = sample_table();
        let row = table.get_row(1);

        assert_eq!(row.string("Name"), "dflt");
        assert_eq!(row.int("Value"), 7);
        assert_eq!(row.float("Value"), 7.5);
        assert!(row.is_empty("Name"));
        assert!(!table.get_row(0).is_empty("Name"));
    }

    #[test]
    fn out_of_range_row_is_empty_row() {
        let table = sample_table();
        let row = table.get_row(99);

        assert_eq!(row.string("Name"), "dflt");
        assert_eq!(row.int(1usize), 7);
        assert_eq!(row.cell("Name"), None);
    }

    #[test]
    fn unknown_column_yields_default() {
        let table = sample_table();
        assert_eq!(table.get_row(0).int("Nonexistent"), 7);
        assert_eq!(table.get_row(0).string(5usize), "dflt");
    }

    #[test]
    fn permissive_numeric_parse() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  42  "), 42);
        assert_eq!(parse_int("not a number"), 0);
        assert_eq!(parse_int("4.5"), 0);
        assert_eq!(parse_float("4.5"), 4.5);
        assert_eq!(parse_float("junk"), 0.0);
    }
}
