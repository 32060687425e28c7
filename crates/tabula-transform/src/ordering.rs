//! Sorting.
//!
//! Provides [`Dir`] for sort direction and [`sort`] for stable single-field
//! ordering.

use std::cmp::Ordering;
use std::str::FromStr;

use tabula_reflect::{expect_records, Error, Kind, Result, Value};

use crate::item_record;

static NULL: Value = Value::Null;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Maps a template-style reverse flag onto a direction.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = Error;

    /// Accepts `asc`, `dsc` and `desc`, in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Dir::Asc),
            "dsc" | "desc" => Ok(Dir::Desc),
            other => Err(Error::invalid(format!(
                "unknown sort direction '{other}', expected asc or desc"
            ))),
        }
    }
}

/// Compares two non-null scalar values.
///
/// Numbers compare numerically across signed, unsigned and float
/// representations. Returns `None` for NaN and for values of different
/// kinds.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (a, b) if a.kind().is_numeric() && b.kind().is_numeric() => {
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        _ => None,
    }
}

/// A sort key with a total order.
///
/// Integers compare exactly. When any key in the column is a float, every
/// number compares as `f64`. Nulls and NaN sort after everything else.
#[derive(Debug, Clone, Copy)]
enum Key<'a> {
    Last,
    Str(&'a str),
    Bool(bool),
    Int(i128),
    Float(f64),
}

impl Key<'_> {
    fn is_last(&self) -> bool {
        matches!(self, Key::Last)
    }

    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Bool(a), Key::Bool(b)) => a.cmp(b),
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Float(a), Key::Float(b)) => a.total_cmp(b),
            // Keys are checked to share one kind before sorting.
            _ => Ordering::Equal,
        }
    }
}

/// Sorting class of a non-null key: numbers of any representation compare
/// with each other, everything else only with itself.
fn key_class(kind: Kind) -> Kind {
    if kind.is_numeric() {
        Kind::Float
    } else {
        kind
    }
}

fn to_key(value: &Value, floats: bool) -> Key<'_> {
    match value {
        Value::Str(s) => Key::Str(s),
        Value::Bool(b) => Key::Bool(*b),
        Value::Float(n) if n.is_nan() => Key::Last,
        Value::Int(n) if !floats => Key::Int(i128::from(*n)),
        Value::Uint(n) if !floats => Key::Int(i128::from(*n)),
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => {
            value.as_f64().map_or(Key::Last, Key::Float)
        }
        _ => Key::Last,
    }
}

/// Sorts records by one field. The sort is stable in both directions: ties
/// keep their input order. Null and NaN keys sort last in both directions.
///
/// Every non-null key must be of one kind (numbers of any representation
/// count as one); a column mixing, say, numbers and strings is a
/// [`Error::TypeMismatch`].
pub fn sort(value: &Value, field: &str, dir: Dir) -> Result<Value> {
    let (seq, shape) = expect_records(value, "sort")?;
    let declared = shape.resolve(field)?;
    if !declared.kind().is_comparable() && declared.kind() != Kind::Other {
        return Err(Error::TypeMismatch {
            field: field.to_string(),
            kind: declared.kind().as_str(),
        });
    }

    let mut values = Vec::with_capacity(seq.len());
    let mut class: Option<Kind> = None;
    for item in seq {
        let key = match item_record(item)? {
            Some(record) => record.resolve(field)?,
            None => &NULL,
        };
        if !key.is_null() {
            let kind = key.kind();
            let mismatch = match class {
                _ if !kind.is_comparable() => true,
                Some(c) => c != key_class(kind),
                None => false,
            };
            if mismatch {
                return Err(Error::TypeMismatch {
                    field: field.to_string(),
                    kind: kind.as_str(),
                });
            }
            class = Some(key_class(kind));
        }
        values.push((key, item));
    }

    let floats = values.iter().any(|(k, _)| matches!(k, Value::Float(_)));
    let mut keyed: Vec<(Key<'_>, &Value)> = values
        .into_iter()
        .map(|(k, item)| (to_key(k, floats), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a.is_last(), b.is_last()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => dir.apply(a.cmp_present(b)),
    });

    log::trace!("sort: {} records by '{}' {}", keyed.len(), field, dir);
    Ok(Value::Seq(seq.with_items(
        keyed.into_iter().map(|(_, item)| item.clone()).collect(),
    )))
}
