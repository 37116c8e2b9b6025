// src/lookup/exact.rs
use std::collections::HashSet;
use tracing::debug;

use super::{first_match, value_index, Query, NOT_FOUND};
use crate::{config::Settings, error::LookupError, table::ParsedTable};

/// Value of the first row whose key columns all equal `query`, or
/// [`NOT_FOUND`].
///
/// The query must name exactly the table's key columns (every column but
/// the value column); anything else is a [`LookupError::KeyMismatch`], not a
/// miss. An empty table answers [`NOT_FOUND`] before any validation.
pub fn lookup(
    query: &Query,
    table: &ParsedTable,
    settings: &Settings,
) -> Result<String, LookupError> {
    if table.is_empty() {
        debug!("empty table; not found");
        return Ok(NOT_FOUND.to_string());
    }

    let value_idx = value_index(table, settings)?;
    let keys: Vec<(usize, &str)> = table.key_columns(settings.value_column()).collect();
    check_keys(query, &keys)?;

    let rendered = query.rendered();
    match first_match(table, &keys, &rendered) {
        Some(row) => {
            debug!(line = row.line, "matched");
            Ok(row.fields[value_idx].clone())
        }
        None => {
            debug!("no row matched");
            Ok(NOT_FOUND.to_string())
        }
    }
}

fn check_keys(query: &Query, keys: &[(usize, &str)]) -> Result<(), LookupError> {
    let expected: HashSet<&str> = keys.iter().map(|(_, name)| *name).collect();
    let given: HashSet<&str> = query.keys().collect();
    if expected == given {
        return Ok(());
    }

    // header order for missing, sorted order for unexpected
    let missing = keys
        .iter()
        .filter(|(_, name)| !given.contains(name))
        .map(|(_, name)| name.to_string())
        .collect();
    let unexpected = query
        .keys()
        .filter(|k| !expected.contains(k))
        .map(str::to_string)
        .collect();
    Err(LookupError::KeyMismatch {
        missing,
        unexpected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{init_test_logging, parse_table};
    use anyhow::Result;

    const SIDES: &str = "side,currency,value\nIN,PLN,1\nIN,EUR,2\nOUT,ANY,3";

    fn run(query: Query, text: &str) -> Result<String, LookupError> {
        let table = parse_table(text)?;
        lookup(&query, &table, &Settings::default())
    }

    #[test]
    fn literal_side_currency_scenario() -> Result<()> {
        init_test_logging();
        assert_eq!(run(Query::from([("side", "IN"), ("currency", "GBP")]), SIDES)?, "-1");
        assert_eq!(run(Query::from([("side", "IN"), ("currency", "PLN")]), SIDES)?, "1");
        assert_eq!(run(Query::from([("side", "IN"), ("currency", "EUR")]), SIDES)?, "2");
        assert_eq!(run(Query::from([("side", "OUT"), ("currency", "ANY")]), SIDES)?, "3");
        Ok(())
    }

    #[test]
    fn first_row_wins_on_duplicate_keys() -> Result<()> {
        let text = "k,value\nx,first\ny,other\nx,second\n";
        assert_eq!(run(Query::from([("k", "x")]), text)?, "first");
        Ok(())
    }

    #[test]
    fn value_returned_verbatim() -> Result<()> {
        let text = "k,value\nx, '007' \ny,abc\n";
        assert_eq!(run(Query::from([("k", "x")]), text)?, "007");
        assert_eq!(run(Query::from([("k", "y")]), text)?, "abc");
        Ok(())
    }

    #[test]
    fn numeric_query_values_match_text_cells() -> Result<()> {
        let text = "a,b,value\n1,2,10\n3,4,15\n";
        assert_eq!(run(Query::from([("a", 3), ("b", 4)]), text)?, "15");
        assert_eq!(run(Query::new().with("a", "1").with("b", 2), text)?, "10");
        // 1.0 renders as "1.0", which is not the cell "1"
        assert_eq!(run(Query::new().with("a", 1.0).with("b", 2), text)?, "-1");
        Ok(())
    }

    #[test]
    fn quoted_cells_match_bare_query_values() -> Result<()> {
        let text = "side,currency,value\n \"IN\" , 'PLN' ,1\n";
        assert_eq!(run(Query::from([("side", "IN"), ("currency", "PLN")]), text)?, "1");
        Ok(())
    }

    #[test]
    fn empty_table_is_not_found_for_any_query() -> Result<()> {
        assert_eq!(run(Query::new(), "side,currency,value\n")?, "-1");
        assert_eq!(run(Query::from([("bogus", 1)]), "side,currency,value\n")?, "-1");
        assert_eq!(run(Query::from([("bogus", 1)]), "")?, "-1");
        Ok(())
    }

    #[test]
    fn missing_key_is_a_mismatch() {
        let err = run(Query::from([("side", "IN")]), SIDES).unwrap_err();
        match err {
            LookupError::KeyMismatch {
                missing,
                unexpected,
            } => {
                assert_eq!(missing, vec!["currency"]);
                assert!(unexpected.is_empty());
            }
            other => panic!("expected KeyMismatch, got {other:?}"),
        }
    }

    #[test]
    fn extra_key_is_a_mismatch() {
        let query = Query::from([("side", "IN"), ("currency", "PLN"), ("colour", "red")]);
        let err = run(query, SIDES).unwrap_err();
        match err {
            LookupError::KeyMismatch {
                missing,
                unexpected,
            } => {
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["colour"]);
            }
            other => panic!("expected KeyMismatch, got {other:?}"),
        }
    }

    #[test]
    fn querying_the_value_column_is_a_mismatch() {
        let query = Query::from([("side", "IN"), ("currency", "PLN"), ("value", "1")]);
        assert!(matches!(
            run(query, SIDES),
            Err(LookupError::KeyMismatch { .. })
        ));
    }

    #[test]
    fn value_only_table_matches_empty_query() -> Result<()> {
        assert_eq!(run(Query::new(), "value\n5\n6\n")?, "5");
        Ok(())
    }

    #[test]
    fn table_without_value_column() {
        let err = run(Query::from([("a", 1)]), "a,b\n1,2\n").unwrap_err();
        assert!(matches!(err, LookupError::MissingValueColumn { column } if column == "value"));
    }
}
