//! Field extraction, one value per line.

use tabula_reflect::{ensure_uniform, Error, Result, Value};

use crate::style::Style;

/// Prints the named fields of one record, or of every record in a
/// sequence, one value per line.
///
/// Field names may be dotted paths. They are checked against the declared
/// shape first, so an unknown name fails even when the sequence is empty.
pub fn select(value: &Value, fields: &[&str], style: Style) -> Result<String> {
    let records: Vec<&Value> = match value {
        Value::Record(r) => {
            for field in fields {
                r.shape().resolve(field)?;
            }
            vec![value]
        }
        Value::Seq(seq) => {
            let shape = seq
                .record_shape()
                .ok_or_else(|| Error::unsupported("a record or a sequence of records", value.describe_kind()))?;
            ensure_uniform(seq, shape)?;
            for field in fields {
                shape.resolve(field)?;
            }
            seq.iter().collect()
        }
        other => {
            return Err(Error::unsupported(
                "a record or a sequence of records",
                other.describe_kind(),
            ))
        }
    };

    let mut out = String::new();
    for item in records {
        for field in fields {
            let text = match item {
                Value::Record(r) => style.format(r.resolve(field)?),
                _ => String::new(),
            };
            out.push_str(&text);
            out.push('\n');
        }
    }
    Ok(out)
}
