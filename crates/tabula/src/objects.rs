//! Carrying typed values through minijinja.
//!
//! Records and sequences are wrapped as minijinja objects so that they keep
//! their declared shape between function calls. Everything else crosses the
//! boundary as a native minijinja value.

use std::fmt;
use std::sync::Arc;

use minijinja::value::{Enumerator, Object, ObjectRepr, ValueKind};
use tabula_reflect::{Error, FieldDescriptor, Record, Result, Seq, Shape, Value};

/// A record exposed to templates as a map of its fields.
#[derive(Debug)]
pub struct RecordObject(pub Record);

/// A sequence exposed to templates as a list.
#[derive(Debug)]
pub struct SeqObject(pub Seq);

impl Object for RecordObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Map
    }

    fn get_value(self: &Arc<Self>, key: &minijinja::Value) -> Option<minijinja::Value> {
        self.0.get(key.as_str()?).cloned().map(to_jinja)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        let names = self
            .0
            .shape()
            .field_names()
            .map(minijinja::Value::from)
            .collect();
        Enumerator::Values(names)
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Record(self.0.clone()), f)
    }
}

impl Object for SeqObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Seq
    }

    fn get_value(self: &Arc<Self>, key: &minijinja::Value) -> Option<minijinja::Value> {
        let idx = key.as_usize()?;
        self.0.items().get(idx).cloned().map(to_jinja)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Seq(self.0.len())
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::Seq(self.0.clone()), f)
    }
}

/// Converts a value for use inside a template.
pub fn to_jinja(value: Value) -> minijinja::Value {
    match value {
        Value::Null => minijinja::Value::from(()),
        Value::Bool(b) => minijinja::Value::from(b),
        Value::Int(n) => minijinja::Value::from(n),
        Value::Uint(n) => minijinja::Value::from(n),
        Value::Float(x) => minijinja::Value::from(x),
        Value::Str(s) => minijinja::Value::from(s),
        Value::Record(r) => minijinja::Value::from_object(RecordObject(r)),
        Value::Seq(s) => minijinja::Value::from_object(SeqObject(s)),
    }
}

/// Converts a template value back into the value model.
///
/// Wrapped records and sequences come back unchanged. Native maps become
/// anonymous records and native lists take the type of their first item.
pub fn to_model(value: &minijinja::Value) -> Result<Value> {
    if let Some(obj) = value.downcast_object_ref::<RecordObject>() {
        return Ok(Value::Record(obj.0.clone()));
    }
    if let Some(obj) = value.downcast_object_ref::<SeqObject>() {
        return Ok(Value::Seq(obj.0.clone()));
    }

    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Ok(Value::Null),
        ValueKind::Bool => Ok(Value::Bool(value.is_true())),
        ValueKind::String => Ok(Value::Str(value.as_str().unwrap_or_default().to_string())),
        ValueKind::Number => number(value),
        ValueKind::Map => map(value),
        ValueKind::Seq | ValueKind::Iterable => {
            let items = iterate(value)?
                .map(|item| to_model(&item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Seq(Seq::inferred(items)))
        }
        ValueKind::Bytes => {
            let bytes = value.as_bytes().unwrap_or_default();
            let items = bytes.iter().map(|b| Value::Uint(u64::from(*b))).collect();
            Ok(Value::Seq(Seq::new(tabula_reflect::Type::Uint("u8"), items)))
        }
        other => Err(Error::unsupported("a template value", format!("{other:?}"))),
    }
}

fn number(value: &minijinja::Value) -> Result<Value> {
    if value.is_integer() {
        if let Ok(n) = i64::try_from(value.clone()) {
            return Ok(Value::Int(n));
        }
        if let Ok(n) = u64::try_from(value.clone()) {
            return Ok(Value::Uint(n));
        }
    }
    f64::try_from(value.clone())
        .map(Value::Float)
        .map_err(|e| Error::invalid(e.to_string()))
}

fn map(value: &minijinja::Value) -> Result<Value> {
    let mut fields = Vec::new();
    let mut values = Vec::new();
    for key in iterate(value)? {
        let item = value
            .get_item(&key)
            .map_err(|e| Error::invalid(e.to_string()))?;
        let item = to_model(&item)?;
        let name = match key.as_str() {
            Some(s) => s.to_string(),
            None => key.to_string(),
        };
        fields.push(FieldDescriptor::new(name, item.type_of()));
        values.push(item);
    }
    let shape = Shape::anonymous(fields);
    shape.validate()?;
    Ok(Value::Record(Record::try_new(Arc::new(shape), values)?))
}

fn iterate(value: &minijinja::Value) -> Result<impl Iterator<Item = minijinja::Value>> {
    value.try_iter().map_err(|e| Error::invalid(e.to_string()))
}
