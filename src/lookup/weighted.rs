// src/lookup/weighted.rs
use std::collections::HashMap;
use tracing::{debug, trace};

use super::{first_match, value_index, Query, EMPTY_AVERAGE};
use crate::{config::Settings, error::LookupError, table::ParsedTable};

/// Weighted average of the first matching value for each query, formatted
/// with one fractional digit, or [`EMPTY_AVERAGE`] if nothing matched.
///
/// - Matched values must parse as integers ([`LookupError::ValueFormat`]).
/// - Even values weigh `settings.even_weight()`, odd ones `settings.odd_weight()`.
/// - Unmatched queries add nothing.
/// - Query keys are *not* validated against the table: a key column the
///   query lacks means no row matches, and extra keys are ignored.
///
/// The quotient is rounded to nearest with ties to even (`{:.1}` on `f64`).
pub fn weighted_average<'q, I>(
    queries: I,
    table: &ParsedTable,
    settings: &Settings,
) -> Result<String, LookupError>
where
    I: IntoIterator<Item = &'q Query>,
{
    if table.is_empty() {
        debug!("empty table; nothing to average");
        return Ok(EMPTY_AVERAGE.to_string());
    }

    let value_idx = value_index(table, settings)?;
    let keys: Vec<(usize, &str)> = table.key_columns(settings.value_column()).collect();

    // render every query once, up front
    let prepared: Vec<HashMap<&str, String>> =
        queries.into_iter().map(Query::rendered).collect();

    let mut sum: i128 = 0;
    let mut weight_total: i128 = 0;
    let mut matched = 0usize;

    for (qi, rendered) in prepared.iter().enumerate() {
        let Some(row) = first_match(table, &keys, rendered) else {
            trace!(query = qi, "no match");
            continue;
        };

        let raw = &row.fields[value_idx];
        let value: i64 = raw.parse().map_err(|_| LookupError::ValueFormat {
            value: raw.clone(),
            line: row.line,
        })?;
        let weight = settings.weight_for(value);
        trace!(query = qi, line = row.line, value, weight, "matched");

        sum += i128::from(value) * i128::from(weight);
        weight_total += i128::from(weight);
        matched += 1;
    }

    if weight_total == 0 {
        debug!(queries = prepared.len(), "no query matched");
        return Ok(EMPTY_AVERAGE.to_string());
    }

    let avg = sum as f64 / weight_total as f64;
    debug!(
        matched,
        queries = prepared.len(),
        sum = %sum,
        weight_total = %weight_total,
        avg,
        "weighted average"
    );
    Ok(format!("{:.1}", avg))
}
