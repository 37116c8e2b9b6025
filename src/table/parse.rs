// src/table/parse.rs
use csv::ReaderBuilder;
use std::collections::HashSet;
use tracing::{debug, trace};

use super::{utils::clean_field, ParsedTable, Row};
use crate::error::TableError;

/// Parse comma-separated `text` into a [`ParsedTable`].
///
/// - The first record is the header; names are kept as written (the record
///   reader still unwraps RFC 4180 quoting).
/// - Every later record must have exactly as many fields as the header.
/// - Each field goes through [`clean_field`].
/// - Blank lines are skipped; empty text gives an empty table.
#[tracing::instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn parse_table(text: &str) -> Result<ParsedTable, TableError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // field counts are checked below so the error carries the line
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut seen = HashSet::with_capacity(headers.len());
    for h in &headers {
        if !seen.insert(h.as_str()) {
            return Err(TableError::DuplicateColumn { column: h.clone() });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != headers.len() {
            return Err(TableError::FieldCount {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let fields: Vec<String> = record.iter().map(clean_field).collect();
        trace!(line, ?fields, "row");
        rows.push(Row { line, fields });
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed table");
    Ok(ParsedTable::new(headers, rows))
}
