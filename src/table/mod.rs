pub mod cache;
pub mod parse;
pub mod utils;

pub use cache::TableCache;
pub use parse::parse_table;

/// One data record, aligned field-for-field with [`ParsedTable::headers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based source line the record started on.
    pub line: u64,
    /// Normalized field values, one per header column.
    pub fields: Vec<String>,
}

/// A fully parsed table: the header (its schema) plus rows in source order.
///
/// Every row has exactly `headers().len()` fields. Rows are never reordered,
/// so "first match" always means "earliest in the source text".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl ParsedTable {
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.fields.len() == headers.len()));
        Self { headers, rows }
    }

    /// Column names, in header order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column` in the header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Row `row`'s value for `column`, viewing the row as a name → value map.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r.fields[idx].as_str())
    }

    /// Every column except `value_column`, with its header position.
    pub fn key_columns<'a>(&'a self, value_column: &'a str) -> impl Iterator<Item = (usize, &'a str)> {
        self.headers
            .iter()
            .enumerate()
            .filter(move |(_, h)| h.as_str() != value_column)
            .map(|(i, h)| (i, h.as_str()))
    }
}
