//! serde support.
//!
//! * [`Value`] implements [`Serialize`], which backs the `tojson` function.
//! * [`to_value`] goes the other way: any `T: Serialize` becomes a [`Value`].
//!   Struct names and field order are kept and unsigned integers stay
//!   unsigned. Types that are only known through serde have no field
//!   documentation, and empty sequences have an unknown element type; use
//!   `#[derive(Recordable)]` when those matter.

use std::fmt::Display;
use std::sync::Arc;

use serde::ser::{self, Serialize, SerializeMap, Serializer};

use crate::error::Error;
use crate::types::{FieldDescriptor, Shape};
use crate::value::{Record, Seq, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Record(r) => {
                let mut map = serializer.serialize_map(Some(r.shape().len()))?;
                for (field, value) in r.fields() {
                    map.serialize_entry(&field.name, value)?;
                }
                map.end()
            }
            Value::Seq(seq) => serializer.collect_seq(seq.iter()),
        }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }
}

/// Converts any serializable value into a [`Value`].
///
/// ```
/// use serde::Serialize;
/// use tabula_reflect::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Flag { name: &'static str, mask: u32 }
///
/// let v = to_value(&vec![Flag { name: "rw", mask: 6 }]).unwrap();
/// let first = &v.as_seq().unwrap().items()[0];
/// assert_eq!(first.as_record().unwrap().get("mask"), Some(&Value::Uint(6)));
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    value.serialize(ValueSerializer)
}

pub(crate) fn record_from(name: Option<&str>, entries: Vec<(String, Value)>) -> Result<Value, Error> {
    let (fields, values): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .map(|(key, value)| (FieldDescriptor::new(key, value.type_of()), value))
        .unzip();
    let shape = match name {
        Some(name) => Shape::named(name, fields),
        None => Shape::anonymous(fields),
    };
    shape.validate()?;
    Ok(Value::Record(Record::new(Arc::new(shape), values)))
}

fn tagged(variant: &str, inner: Value) -> Result<Value, Error> {
    record_from(None, vec![(variant.to_string(), inner)])
}

struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;
    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = VariantCollector<SeqCollector>;
    type SerializeMap = MapCollector;
    type SerializeStruct = StructCollector;
    type SerializeStructVariant = VariantCollector<StructCollector>;

    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::invalid(format!("{v} does not fit in 64 bits")))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::Uint(v.into()))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::Uint(v.into()))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::Uint(v.into()))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::Uint(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        u64::try_from(v)
            .map(Value::Uint)
            .map_err(|_| Error::invalid(format!("{v} does not fit in 64 bits")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        Ok(Value::Float(v.into()))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(Value::Seq(Seq::new(
            crate::types::Type::Uint("u8"),
            v.iter().map(|b| Value::Uint((*b).into())).collect(),
        )))
    }

    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        tagged(variant, value.serialize(ValueSerializer)?)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector, Error> {
        Ok(SeqCollector {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCollector, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        Ok(VariantCollector {
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCollector, Error> {
        Ok(MapCollector {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<StructCollector, Error> {
        Ok(StructCollector {
            name,
            entries: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        Ok(VariantCollector {
            variant,
            inner: self.serialize_struct(name, len)?,
        })
    }
}

struct SeqCollector {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Seq(Seq::inferred(self.items)))
    }
}

impl ser::SerializeTuple for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        ser::SerializeSeq::end(self)
    }
}

struct MapCollector {
    entries: Vec<(String, Value)>,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Error> {
        self.pending_key = Some(key.serialize(ValueSerializer)?.to_string());
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::invalid("map value serialized before its key"))?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        record_from(None, self.entries)
    }
}

struct StructCollector {
    name: &'static str,
    entries: Vec<(String, Value)>,
}

impl ser::SerializeStruct for StructCollector {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.entries
            .push((key.to_string(), value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        record_from(Some(self.name), self.entries)
    }
}

struct VariantCollector<C> {
    variant: &'static str,
    inner: C,
}

impl ser::SerializeTupleVariant for VariantCollector<SeqCollector> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value, Error> {
        tagged(self.variant, ser::SerializeSeq::end(self.inner)?)
    }
}

impl ser::SerializeStructVariant for VariantCollector<StructCollector> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value, Error> {
        tagged(self.variant, ser::SerializeStruct::end(self.inner)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Kind, Type};
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Battle {
        name: String,
        year: i32,
        mask: u16,
        tags: Vec<String>,
        note: Option<String>,
    }

    #[derive(Serialize)]
    enum Outcome {
        Won,
        Lost { by: u8 },
    }

    #[test]
    fn structs_become_named_records() {
        let v = to_value(&Battle {
            name: "Alesia".into(),
            year: -52,
            mask: 255,
            tags: vec!["siege".into()],
            note: None,
        })
        .unwrap();
        let r = v.as_record().unwrap();
        assert_eq!(r.shape().name(), Some("Battle"));
        let names: Vec<_> = r.shape().field_names().collect();
        assert_eq!(names, ["name", "year", "mask", "tags", "note"]);
        assert_eq!(r.get("year"), Some(&Value::Int(-52)));
        assert_eq!(r.get("mask").map(Value::kind), Some(Kind::Uint));
        assert_eq!(r.get("note"), Some(&Value::Null));
    }

    #[test]
    fn sequences_infer_their_element_type() {
        let v = to_value(&vec![1u8, 2, 3]).unwrap();
        assert_eq!(v.as_seq().unwrap().elem(), &Type::Uint("u64"));
    }

    #[test]
    fn maps_become_anonymous_records() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        let v = to_value(&map).unwrap();
        let r = v.as_record().unwrap();
        assert_eq!(r.shape().name(), None);
        assert_eq!(r.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn enum_variants() {
        assert_eq!(to_value(&Outcome::Won).unwrap(), Value::from("Won"));
        let lost = to_value(&Outcome::Lost { by: 3 }).unwrap();
        let inner = lost.as_record().unwrap().resolve("Lost.by").unwrap();
        assert_eq!(inner, &Value::Uint(3));
    }

    #[test]
    fn value_serializes_to_json() {
        let v = to_value(&Battle {
            name: "Issus".into(),
            year: -333,
            mask: 1,
            tags: vec![],
            note: Some("x".into()),
        })
        .unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Issus","year":-333,"mask":1,"tags":[],"note":"x"}"#
        );
    }
}
