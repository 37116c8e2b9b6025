// src/lookup/mod.rs
pub mod exact;
pub mod query;
pub mod weighted;

pub use query::{Query, QueryValue};

use std::collections::HashMap;
use tracing::instrument;

use crate::{
    config::Settings,
    error::LookupError,
    table::{ParsedTable, Row, TableCache},
};

/// Returned by an exact lookup when no row matches (or the table is empty).
pub const NOT_FOUND: &str = "-1";

/// Returned by a weighted average when nothing matched.
pub const EMPTY_AVERAGE: &str = "0.0";

/// Both lookup operations over raw table text, sharing one parse cache.
///
/// Construct once and reuse: each distinct table text is parsed on first use
/// and served from the cache afterwards.
#[derive(Debug, Default)]
pub struct TableLookup {
    cache: TableCache,
    settings: Settings,
}

impl TableLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            cache: TableCache::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Exact-match lookup of `query` in the table held by `text`.
    #[instrument(level = "debug", skip_all, fields(keys = query.len()))]
    pub fn lookup(&self, query: &Query, text: &str) -> Result<String, LookupError> {
        let table = self.cache.get_or_parse(text)?;
        exact::lookup(query, &table, &self.settings)
    }

    /// Weighted average of the first match for each of `queries` in `text`.
    #[instrument(level = "debug", skip_all, fields(queries = queries.len()))]
    pub fn weighted_average(&self, queries: &[Query], text: &str) -> Result<String, LookupError> {
        let table = self.cache.get_or_parse(text)?;
        weighted::weighted_average(queries, &table, &self.settings)
    }
}

/// Header position of the value column.
fn value_index(table: &ParsedTable, settings: &Settings) -> Result<usize, LookupError> {
    table
        .column_index(settings.value_column())
        .ok_or_else(|| LookupError::MissingValueColumn {
            column: settings.value_column().to_string(),
        })
}

/// First row, in source order, whose every key column equals the rendered
/// query value. A key the query lacks never matches.
fn first_match<'t>(
    table: &'t ParsedTable,
    keys: &[(usize, &str)],
    rendered: &HashMap<&str, String>,
) -> Option<&'t Row> {
    table.rows().iter().find(|row| {
        keys.iter().all(|(idx, name)| {
            rendered
                .get(name)
                .is_some_and(|want| *want == row.fields[*idx])
        })
    })
}
