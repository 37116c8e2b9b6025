// src/lookup/query.rs

use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

/// A scalar a query can match against a table cell.
///
/// Table cells are always strings, so every value is compared through its
/// canonical rendering ([`fmt::Display`]):
/// - strings verbatim,
/// - integers in plain decimal (`1`, `-7`),
/// - booleans as `True` / `False`,
/// - floats in shortest round-trip form, always with a fractional part when
///   finite (`1.0`, `2.5`), and `nan` / `inf` / `-inf` otherwise. Floats are
///   always written positionally, never in exponent form: `1e20` renders as
///   `100000000000000000000.0` and `1e-7` as `0.0000001`, so a table cell
///   spelled `1e+20` or `1e-07` does not match them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(true) => f.write_str("True"),
            QueryValue::Bool(false) => f.write_str("False"),
            QueryValue::Int(v) => write!(f, "{}", v),
            QueryValue::UInt(v) => write!(f, "{}", v),
            QueryValue::Float(v) if v.is_nan() => f.write_str("nan"),
            QueryValue::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "inf" } else { "-inf" })
            }
            QueryValue::Float(v) => {
                let s = v.to_string();
                if s.contains('.') {
                    f.write_str(&s)
                } else {
                    write!(f, "{}.0", s)
                }
            }
            QueryValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Str(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Str(v)
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        QueryValue::Int(v.into())
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::Int(v.into())
    }
}

impl From<u64> for QueryValue {
    fn from(v: u64) -> Self {
        QueryValue::UInt(v)
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Float(v)
    }
}

/// Column name → value to match. Deserializes from a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, QueryValue>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&QueryValue> {
        self.0.get(column)
    }

    /// Column names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every value in its canonical string form, ready for comparison.
    pub fn rendered(&self) -> HashMap<&str, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
