//! Conversion from parsed JSON documents.
//!
//! JSON carries no struct names or declared widths: objects become anonymous
//! records with their keys in document order, integers that fit `i64` become
//! signed, larger ones unsigned, and arrays take their element type from the
//! first non-null item.

use crate::value::{Seq, Value};

impl Value {
    /// Converts a parsed JSON document.
    ///
    /// Fails only when an object repeats a key, which `serde_json` already
    /// rejects unless built by hand.
    pub fn from_json(json: serde_json::Value) -> crate::Result<Value> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number(&n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Seq(Seq::inferred(
                items
                    .into_iter()
                    .map(Value::from_json)
                    .collect::<crate::Result<_>>()?,
            )),
            serde_json::Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    entries.push((key, Value::from_json(value)?));
                }
                crate::ser::record_from(None, entries)?
            }
        })
    }
}

fn number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::Uint(u)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
