// src/loader.rs
//! Reading table text and query files from disk. The table text is handed to
//! the lookup core untouched; it is also the cache key.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::lookup::Query;

/// Read a table file verbatim.
pub fn load_table_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read table file: {:?}", path))?;
    info!(path = %path.display(), bytes = text.len(), "loaded table");
    Ok(text)
}

/// Read a single query: a flat JSON object of scalars.
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<Query> {
    let path = path.as_ref();
    let f = fs::File::open(path)
        .with_context(|| format!("Failed to open query file: {:?}", path))?;
    serde_json::from_reader(f).with_context(|| format!("parsing query object in {:?}", path))
}

/// Read a list of queries: a JSON array of flat objects.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let f = fs::File::open(path)
        .with_context(|| format!("Failed to open query file: {:?}", path))?;
    let queries: Vec<Query> = serde_json::from_reader(f)
        .with_context(|| format!("parsing query array in {:?}", path))?;
    info!(path = %path.display(), queries = queries.len(), "loaded queries");
    Ok(queries)
}
