//! Grid to table conversion.

use std::sync::Arc;

use tabula_reflect::{classify, Class, Error, FieldDescriptor, Record, Result, Seq, Shape, Type, Value};

fn string_row(row: &Value) -> Result<Vec<Value>> {
    let cells = row
        .as_seq()
        .ok_or_else(|| Error::unsupported("a row of strings", row.describe_kind()))?;
    cells
        .iter()
        .map(|c| match c {
            Value::Str(_) => Ok(c.clone()),
            other => Err(Error::unsupported("a string cell", other.describe_kind())),
        })
        .collect()
}

/// Turns a grid of strings into a sequence of records.
///
/// Row 0 names the fields, all of which are string-typed. The grid needs at
/// least the header row, every row must have the header's width, and header
/// names must be non-empty and unique.
pub fn totable(value: &Value) -> Result<Value> {
    let grid = value
        .as_seq()
        .ok_or_else(|| Error::unsupported("a grid of strings", value.describe_kind()))?;
    if grid.is_empty() {
        return Err(Error::invalid("grid has no header row"));
    }
    if classify(value) != Class::Grid {
        return Err(Error::unsupported("a grid of strings", value.describe_kind()));
    }

    let header = string_row(&grid.items()[0])?;
    if header.is_empty() {
        return Err(Error::invalid("grid header row is empty"));
    }
    let mut fields = Vec::with_capacity(header.len());
    for cell in &header {
        let name = cell.to_string();
        if name.is_empty() {
            return Err(Error::invalid("grid header contains an empty name"));
        }
        if fields.iter().any(|f: &FieldDescriptor| f.name == name) {
            return Err(Error::invalid(format!("grid header repeats '{name}'")));
        }
        fields.push(FieldDescriptor::new(name, Type::Str));
    }
    let shape = Arc::new(Shape::anonymous(fields));

    let records = grid.items()[1..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = string_row(row)?;
            if cells.len() != shape.len() {
                return Err(Error::invalid(format!(
                    "grid row {} has {} cells, header has {}",
                    i + 1,
                    cells.len(),
                    shape.len()
                )));
            }
            Ok(Value::Record(Record::new(shape.clone(), cells)))
        })
        .collect::<Result<Vec<_>>>()?;

    log::trace!("totable: {} records of {} fields", records.len(), shape.len());
    Ok(Value::Seq(Seq::new(Type::Record(shape), records)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Value {
        Value::Seq(Seq::new(
            Type::seq(Type::Str),
            rows.iter()
                .map(|r| Value::Seq(Seq::new(Type::Str, r.iter().map(|c| Value::from(*c)).collect())))
                .collect(),
        ))
    }

    #[test]
    fn header_names_fields() {
        let out = totable(&grid(&[
            &["Message", "Code", "Occurrence"],
            &["Too many GOSUBs", "37", "0.1"],
            &["Too many REPEATs", "44", "0.15"],
        ]))
        .unwrap();
        let seq = out.as_seq().unwrap();
        let names: Vec<_> = seq.record_shape().unwrap().field_names().collect();
        assert_eq!(names, ["Message", "Code", "Occurrence"]);
        let second = seq.items()[1].as_record().unwrap();
        assert_eq!(second.get("Occurrence"), Some(&Value::from("0.15")));
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let out = totable(&grid(&[&["A", "B"]])).unwrap();
        assert!(out.as_seq().unwrap().is_empty());
        assert_eq!(classify(&out), Class::SequenceOfRecords);
    }

    #[test]
    fn rejects_bad_grids() {
        assert!(matches!(totable(&grid(&[])), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            totable(&grid(&[&["A", "B"], &["1"]])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            totable(&grid(&[&["A", "A"]])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            totable(&grid(&[&["A", ""]])),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(totable(&grid(&[&[]])), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_non_grids() {
        let numbers = Value::Seq(Seq::inferred(vec![Value::Int(1)]));
        assert!(matches!(
            totable(&numbers),
            Err(Error::UnsupportedInputShape { .. })
        ));
    }
}
