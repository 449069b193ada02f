//! Presence rules for sparse payloads.
//!
//! A population table lists, per record field, the wire key to read, the
//! predicate deciding whether the input value counts as given, and the
//! extractor that stores it. `populate` walks the table once per payload.

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use tracing::debug;

/// When a field in a sparse payload counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present when truthy: not `null`, `false`, `0` or `""`.
    Truthy,
    /// Present when anything other than `null`.
    NotNull,
    /// Present only when the value is an array.
    Sequence,
}

impl Presence {
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::Truthy => is_truthy(value),
            Self::NotNull => !value.is_null(),
            Self::Sequence => value.is_array(),
        }
    }
}

/// Loose truthiness of a JSON value. Arrays and objects are always truthy,
/// even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One row of a population table.
pub struct FieldRule<R> {
    pub key: &'static str,
    pub presence: Presence,
    /// Stores the value into the record. Returns `false` when the value has
    /// the wrong shape and was left out.
    pub apply: fn(&mut R, &Value) -> bool,
}

/// What happened to the table's fields during one `populate` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub applied: usize,
    pub absent: usize,
    pub mismatched: usize,
}

/// Merge the present fields of `source` into `record`, field by field.
///
/// Absent fields and fields whose value fails the extractor's shape check
/// are left untouched.
pub fn populate<R>(
    record: &mut R,
    source: &Map<String, Value>,
    rules: &[FieldRule<R>],
) -> Population {
    let mut population = Population::default();

    for rule in rules {
        match source.get(rule.key) {
            Some(value) if rule.presence.admits(value) => {
                if (rule.apply)(record, value) {
                    population.applied += 1;
                } else {
                    debug!(field = rule.key, value = %value, "skipping field with mismatched type");
                    population.mismatched += 1;
                }
            }
            _ => population.absent += 1,
        }
    }

    population
}

/// Keys of `source` that no rule in the table reads, in map order.
pub fn unrecognized_keys<'a, R>(
    source: &'a Map<String, Value>,
    rules: &[FieldRule<R>],
) -> Vec<&'a str> {
    let known: FxHashSet<&str> = rules.iter().map(|rule| rule.key).collect();
    source
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect()
}

/// Integer view of a JSON number. Floats with no fractional part inside the
/// exactly representable range are accepted.
pub fn as_integer(value: &Value) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT)
            .map(|f| f as i64)
    })
}
