//! Shape classification and field enumeration.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{FieldDescriptor, Shape, Type};
use crate::value::{Record, Seq, Value};

/// What a value looks like from the point of view of the table functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// A string, number, bool or null.
    Scalar,
    /// A single record.
    Record,
    /// A sequence whose declared element type is a record.
    SequenceOfRecords,
    /// A sequence of sequences of strings.
    Grid,
    /// Anything else, e.g. a sequence of numbers.
    Unsupported,
}

/// Classifies a value.
///
/// Sequences are classified by their declared element type. An untyped
/// sequence (built inside a template) counts as a grid when every item is a
/// sequence of strings.
pub fn classify(value: &Value) -> Class {
    match value {
        Value::Record(_) => Class::Record,
        Value::Seq(seq) => classify_seq(seq),
        _ => Class::Scalar,
    }
}

fn classify_seq(seq: &Seq) -> Class {
    if seq.record_shape().is_some() {
        return Class::SequenceOfRecords;
    }
    match seq.elem() {
        Type::Seq(inner) if **inner == Type::Str => Class::Grid,
        Type::Seq(inner) if **inner == Type::Any => grid_by_items(seq),
        Type::Any => grid_by_items(seq),
        _ => Class::Unsupported,
    }
}

fn grid_by_items(seq: &Seq) -> Class {
    let all_string_rows = !seq.is_empty()
        && seq.iter().all(|row| match row {
            Value::Seq(cells) => cells.iter().all(|c| matches!(c, Value::Str(_))),
            _ => false,
        });
    if all_string_rows {
        Class::Grid
    } else {
        Class::Unsupported
    }
}

/// The record shape described by a type: a record, or a sequence of records.
pub fn shape_of(ty: &Type) -> Result<&Arc<Shape>> {
    if let Some(shape) = ty.record_shape() {
        return Ok(shape);
    }
    ty.elem()
        .and_then(Type::record_shape)
        .ok_or_else(|| Error::unsupported("a record or a sequence of records", ty.name()))
}

/// The fields of a record type or of a sequence's element record type.
///
/// Fields hidden from reflection (`#[record(skip)]`) never make it into a
/// shape, so everything returned here is visible.
pub fn fields_of(ty: &Type) -> Result<Vec<FieldDescriptor>> {
    Ok(shape_of(ty)?.fields().to_vec())
}

/// Checks that every record in `seq` has the field names of `shape`, in
/// order. Null items are allowed; any other non-record item is not.
pub fn ensure_uniform(seq: &Seq, shape: &Arc<Shape>) -> Result<()> {
    for (i, item) in seq.iter().enumerate() {
        match item {
            Value::Record(r) if Arc::ptr_eq(r.shape(), shape) || r.shape().same_fields(shape) => {}
            Value::Record(r) => {
                return Err(Error::unsupported(
                    "records sharing one shape",
                    format!(
                        "item {i} with fields [{}] where [{}] was expected",
                        field_list(r.shape()),
                        field_list(shape)
                    ),
                ))
            }
            Value::Null => {}
            other => return Err(Error::unsupported("a record", other.describe_kind())),
        }
    }
    Ok(())
}

fn field_list(shape: &Shape) -> String {
    shape.field_names().collect::<Vec<_>>().join(", ")
}

/// Borrows a value as a sequence of records, returning it with its shape.
///
/// Every item must share the declared shape; see [`ensure_uniform`].
pub fn expect_records<'a>(value: &'a Value, op: &str) -> Result<(&'a Seq, &'a Arc<Shape>)> {
    if let Value::Seq(seq) = value {
        if let Some(shape) = seq.record_shape() {
            if let Err(err) = ensure_uniform(seq, shape) {
                log::trace!("{op}: {err}");
                return Err(err);
            }
            return Ok((seq, shape));
        }
    }
    log::trace!("{op}: rejected input of kind {}", value.describe_kind());
    Err(Error::unsupported("a sequence of records", value.describe_kind()))
}

/// Borrows the records of a value that is either a single record or a
/// sequence of records.
pub fn records_of(value: &Value) -> Result<Vec<&Record>> {
    match value {
        Value::Record(r) => Ok(vec![r]),
        Value::Seq(seq) if seq.record_shape().is_some() => {
            let (seq, _) = expect_records(value, "records")?;
            seq.iter()
                .map(|v| match v {
                    Value::Record(r) => Ok(r),
                    other => Err(Error::unsupported("a record", other.describe_kind())),
                })
                .collect()
        }
        other => Err(Error::unsupported(
            "a record or a sequence of records",
            other.describe_kind(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Arc<Shape> {
        Arc::new(Shape::anonymous(vec![
            FieldDescriptor::new("FirstName", Type::Str),
            FieldDescriptor::new("Surname", Type::Str).with_doc(Some("family name")),
        ]))
    }

    fn grid(rows: &[&[&str]]) -> Value {
        let rows = rows
            .iter()
            .map(|r| Value::Seq(Seq::new(Type::Str, r.iter().map(|c| Value::from(*c)).collect())))
            .collect();
        Value::Seq(Seq::new(Type::seq(Type::Str), rows))
    }

    #[test]
    fn classify_scalars_and_records() {
        assert_eq!(classify(&Value::Uint(1)), Class::Scalar);
        assert_eq!(classify(&Value::Null), Class::Scalar);
        let r = Record::new(names(), vec!["Marcus".into(), "Cicero".into()]);
        assert_eq!(classify(&Value::Record(r)), Class::Record);
    }

    #[test]
    fn empty_sequence_of_records_is_still_a_table() {
        let seq = Seq::empty(Type::Record(names()));
        assert_eq!(classify(&Value::Seq(seq)), Class::SequenceOfRecords);
    }

    #[test]
    fn sequence_of_optional_records() {
        let seq = Seq::empty(Type::option(Type::Record(names())));
        assert_eq!(classify(&Value::Seq(seq)), Class::SequenceOfRecords);
    }

    #[test]
    fn grids() {
        assert_eq!(classify(&grid(&[&["a", "b"], &["1", "2"]])), Class::Grid);
        let untyped = Seq::inferred(vec![Value::Seq(Seq::new(Type::Any, vec!["x".into()]))]);
        assert_eq!(classify(&Value::Seq(Seq::new(Type::Any, untyped.items().to_vec()))), Class::Grid);
    }

    #[test]
    fn numbers_are_unsupported() {
        let seq = Seq::new(Type::Int("i32"), vec![Value::Int(1)]);
        assert_eq!(classify(&Value::Seq(seq)), Class::Unsupported);
        assert_eq!(classify(&Value::Seq(Seq::empty(Type::Any))), Class::Unsupported);
    }

    #[test]
    fn fields_of_sequence_type() {
        let fields = fields_of(&Type::seq(Type::Record(names()))).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["FirstName", "Surname"]);
        assert_eq!(fields[1].doc.as_deref(), Some("family name"));
    }

    #[test]
    fn fields_of_scalar_fails() {
        assert!(matches!(
            fields_of(&Type::Uint("u8")),
            Err(Error::UnsupportedInputShape { .. })
        ));
    }

    #[test]
    fn mixed_shapes_are_rejected() {
        let other = Arc::new(Shape::anonymous(vec![FieldDescriptor::new("FirstName", Type::Str)]));
        let seq = Value::Seq(Seq::new(
            Type::Record(names()),
            vec![
                Record::new(names(), vec!["Gaius".into(), "Caesar".into()]).into(),
                Value::Null,
                Record::new(other, vec!["Marcus".into()]).into(),
            ],
        ));
        let err = expect_records(&seq, "cols").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported input: expected records sharing one shape, \
             found item 2 with fields [FirstName] where [FirstName, Surname] was expected"
        );
        assert!(records_of(&seq).is_err());
    }

    #[test]
    fn same_field_names_from_different_shapes_are_accepted() {
        let copy = Arc::new(Shape::anonymous(names().fields().to_vec()));
        let seq = Value::Seq(Seq::new(
            Type::Record(names()),
            vec![
                Record::new(names(), vec!["Gaius".into(), "Caesar".into()]).into(),
                Record::new(copy, vec!["Marcus".into(), "Cicero".into()]).into(),
            ],
        ));
        assert_eq!(records_of(&seq).unwrap().len(), 2);
    }

    #[test]
    fn records_of_accepts_single_record() {
        let r = Record::new(names(), vec!["Gaius".into(), "Caesar".into()]);
        assert_eq!(records_of(&Value::Record(r)).unwrap().len(), 1);
        assert!(records_of(&Value::Int(3)).is_err());
    }
}
