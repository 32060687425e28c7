//! Projection operators: `cols` and `promote`.

use std::sync::Arc;

use tabula_reflect::{expect_records, Error, FieldDescriptor, Record, Result, Seq, Shape, Type, Value};

use crate::item_record;

/// Narrows every record to the named fields, in the given order.
///
/// Names may be dotted paths into nested records; the projected field is
/// named by the path itself, so `cols(v, &["User.Name"])` yields a column
/// headed `User.Name`. The shape is resolved against the declared element
/// type, so unknown names fail even for an empty sequence.
pub fn cols(value: &Value, names: &[&str]) -> Result<Value> {
    let (seq, shape) = expect_records(value, "cols")?;

    let mut fields = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(Error::invalid(format!("column '{name}' listed twice")));
        }
        let field = shape.resolve(name)?;
        fields.push(FieldDescriptor {
            name: name.to_string(),
            ty: field.ty.clone(),
            doc: field.doc.clone(),
        });
    }
    let projected = Arc::new(Shape::anonymous(fields));

    let items = seq
        .iter()
        .map(|item| {
            let values = match item_record(item)? {
                Some(record) => names
                    .iter()
                    .map(|name| record.resolve(name).cloned())
                    .collect::<Result<Vec<_>>>()?,
                None => vec![Value::Null; names.len()],
            };
            Ok(Value::Record(Record::new(projected.clone(), values)))
        })
        .collect::<Result<Vec<_>>>()?;

    log::trace!("cols: {} records narrowed to {:?}", items.len(), names);
    Ok(Value::Seq(Seq::new(Type::Record(projected), items)))
}

/// Replaces every record with its nested record at `path`.
///
/// The path must name a record (or optional record) field. Elements whose
/// nested record is absent become null.
pub fn promote(value: &Value, path: &str) -> Result<Value> {
    let (seq, shape) = expect_records(value, "promote")?;

    let field = shape.resolve(path)?;
    if field.ty.record_shape().is_none() {
        return Err(Error::NotARecord {
            path: path.to_string(),
            segment: field.name.clone(),
        });
    }

    let items = seq
        .iter()
        .map(|item| match item_record(item)? {
            Some(record) => record.resolve(path).cloned(),
            None => Ok(Value::Null),
        })
        .collect::<Result<Vec<_>>>()?;

    log::trace!("promote: {} records promoted from '{}'", items.len(), path);
    Ok(Value::Seq(Seq::new(field.ty.clone(), items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_reflect::{classify, Class};

    fn creds_shape() -> Arc<Shape> {
        Arc::new(Shape::named(
            "Credentials",
            vec![
                FieldDescriptor::new("Name", Type::Str),
                FieldDescriptor::new("Password", Type::Str),
            ],
        ))
    }

    fn users() -> Value {
        let user_shape = Arc::new(Shape::named(
            "User",
            vec![FieldDescriptor::new("Credentials", Type::Record(creds_shape()))],
        ));
        let outer = Arc::new(Shape::anonymous(vec![
            FieldDescriptor::new("Uninteresting", Type::Int("i32")),
            FieldDescriptor::new("User", Type::Record(user_shape.clone())),
        ]));
        let row = |n: i64, name: &str, pw: &str| {
            let creds = Record::new(creds_shape(), vec![name.into(), pw.into()]);
            let user = Record::new(user_shape.clone(), vec![creds.into()]);
            Value::Record(Record::new(outer.clone(), vec![Value::Int(n), user.into()]))
        };
        Value::Seq(Seq::new(
            Type::Record(outer.clone()),
            vec![row(1, "Marcus", "1234"), row(2, "Gaius", "0000")],
        ))
    }

    #[test]
    fn cols_keeps_requested_order() {
        let out = cols(&users(), &["User.Credentials.Password", "Uninteresting"]).unwrap();
        let shape = out.as_seq().unwrap().record_shape().unwrap().clone();
        let names: Vec<_> = shape.field_names().collect();
        assert_eq!(names, ["User.Credentials.Password", "Uninteresting"]);
        assert_eq!(out.to_string(), "[{1234 1} {0000 2}]");
    }

    #[test]
    fn cols_rejects_unknown_and_duplicate_names() {
        assert!(matches!(
            cols(&users(), &["Nope"]),
            Err(Error::FieldNotFound { .. })
        ));
        assert!(matches!(
            cols(&users(), &["Uninteresting", "Uninteresting"]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn cols_on_empty_sequence_checks_the_shape() {
        let Value::Seq(seq) = users() else { unreachable!() };
        let empty = Value::Seq(Seq::empty(seq.elem().clone()));
        let out = cols(&empty, &["Uninteresting"]).unwrap();
        assert_eq!(classify(&out), Class::SequenceOfRecords);
        assert!(cols(&empty, &["Missing"]).is_err());
    }

    #[test]
    fn promote_nested_records() {
        let out = promote(&users(), "User.Credentials").unwrap();
        assert_eq!(out.to_string(), "[{Marcus 1234} {Gaius 0000}]");
        let shape = out.as_seq().unwrap().record_shape().unwrap().clone();
        assert_eq!(shape.name(), Some("Credentials"));
    }

    #[test]
    fn promote_scalar_path_is_not_a_record() {
        assert!(matches!(
            promote(&users(), "Uninteresting"),
            Err(Error::NotARecord { .. })
        ));
    }

    #[test]
    fn projection_requires_records() {
        let numbers = Value::Seq(Seq::inferred(vec![Value::Int(1)]));
        assert!(matches!(
            cols(&numbers, &["x"]),
            Err(Error::UnsupportedInputShape { .. })
        ));
    }
}
