// src/table/cache.rs
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
};
use tracing::{debug, warn};

use super::{parse::parse_table, ParsedTable};
use crate::error::TableError;

/// Memoizes [`parse_table`] per distinct table text.
///
/// Entries are created on first use and kept for the life of the cache;
/// nothing is evicted. Identical text (byte-for-byte) is parsed at most once.
#[derive(Debug, Default)]
pub struct TableCache {
    /// Map: raw table text → parsed table
    map: RwLock<HashMap<String, Arc<ParsedTable>>>,
    parses: AtomicUsize,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed form of `text`, parsing and storing it on first sight.
    ///
    /// A failed parse is not stored, so the next call with the same text
    /// parses again and reports the same error.
    pub fn get_or_parse(&self, text: &str) -> Result<Arc<ParsedTable>, TableError> {
        // 1) Fast path under the read lock
        if let Some(table) = self.read().get(text) {
            debug!(rows = table.len(), "table cache hit");
            return Ok(Arc::clone(table));
        }

        // 2) Double-check under the write lock so a text is never parsed twice
        let mut map_w = self.write();
        if let Some(table) = map_w.get(text) {
            debug!(rows = table.len(), "table cache hit after lock upgrade");
            return Ok(Arc::clone(table));
        }

        self.parses.fetch_add(1, Ordering::Relaxed);
        let table = Arc::new(parse_table(text)?);
        debug!(
            rows = table.len(),
            cached = map_w.len() + 1,
            "table cache miss; stored"
        );
        map_w.insert(text.to_string(), Arc::clone(&table));
        Ok(table)
    }

    /// How many times the parser has run, including failed attempts.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.read().contains_key(text)
    }

    /// Number of distinct texts cached.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // The map is only ever appended to, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<ParsedTable>>> {
        self.map.read().unwrap_or_else(|e| {
            warn!("table cache lock poisoned; continuing");
            PoisonError::into_inner(e)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<ParsedTable>>> {
        self.map.write().unwrap_or_else(|e| {
            warn!("table cache lock poisoned; continuing");
            PoisonError::into_inner(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_test_logging;
    use anyhow::Result;
    use std::thread;

    const TABLE: &str = "side,currency,value\nIN,PLN,1\nIN,EUR,2\nOUT,ANY,3";

    #[test]
    fn same_text_is_parsed_once() -> Result<()> {
        init_test_logging();
        let cache = TableCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_parse(TABLE)?;
        let second = cache.get_or_parse(TABLE)?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, parse_table(TABLE)?);
        assert_eq!(cache.parse_count(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(TABLE));
        Ok(())
    }

    #[test]
    fn texts_differing_only_in_whitespace_are_distinct() -> Result<()> {
        let cache = TableCache::new();
        let a = cache.get_or_parse("a,value\n1,2")?;
        let b = cache.get_or_parse("a,value\n1,2\n")?;

        assert_eq!(*a, *b);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.parse_count(), 2);
        assert_eq!(cache.len(), 2);
        Ok(())
    }

    #[test]
    fn failed_parse_is_not_cached() {
        let cache = TableCache::new();
        let bad = "a,value\n1\n";

        assert!(cache.get_or_parse(bad).is_err());
        assert!(cache.get_or_parse(bad).is_err());
        assert!(!cache.contains(bad));
        assert!(cache.is_empty());
        assert_eq!(cache.parse_count(), 2);
    }

    #[test]
    fn shared_across_threads_parses_once() -> Result<()> {
        let cache = Arc::new(TableCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_parse(TABLE).map(|t| t.len()))
            })
            .collect();

        for h in handles {
            let rows = h.join().expect("worker panicked")?;
            assert_eq!(rows, 3);
        }
        assert_eq!(cache.parse_count(), 1);
        Ok(())
    }
}
