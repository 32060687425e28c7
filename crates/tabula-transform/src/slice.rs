//! Positional operators. These never look at fields, so they accept any
//! sequence.

use tabula_reflect::{Error, Result, Seq, Value};

fn expect_seq<'a>(value: &'a Value, op: &str) -> Result<&'a Seq> {
    value.as_seq().ok_or_else(|| {
        log::trace!("{op}: rejected input of kind {}", value.describe_kind());
        Error::unsupported("a sequence", value.describe_kind())
    })
}

fn clamp(index: i64, len: usize) -> usize {
    usize::try_from(index.max(0)).map_or(len, |i| i.min(len))
}

/// The half-open range `[start, end)`. Both bounds clamp to the sequence;
/// an inverted range is empty.
pub fn rows(value: &Value, start: i64, end: i64) -> Result<Value> {
    let seq = expect_seq(value, "rows")?;
    let start = clamp(start, seq.len());
    let end = clamp(end, seq.len());
    let items = if start < end {
        seq.items()[start..end].to_vec()
    } else {
        Vec::new()
    };
    Ok(Value::Seq(seq.with_items(items)))
}

/// The first `n` elements.
pub fn head(value: &Value, n: usize) -> Result<Value> {
    let seq = expect_seq(value, "head")?;
    let n = n.min(seq.len());
    Ok(Value::Seq(seq.with_items(seq.items()[..n].to_vec())))
}

/// The last `n` elements.
pub fn tail(value: &Value, n: usize) -> Result<Value> {
    let seq = expect_seq(value, "tail")?;
    let start = seq.len().saturating_sub(n);
    Ok(Value::Seq(seq.with_items(seq.items()[start..].to_vec())))
}

/// Wraps any value in a one-element sequence.
pub fn sliceof(value: &Value) -> Value {
    Value::Seq(Seq::new(value.type_of(), vec![value.clone()]))
}
