//! Runtime values.
//!
//! [`Value`] is the self-describing representation every operator works on.
//! It is built once when data enters the engine and shared afterwards:
//! records and sequences hold their contents behind `Arc`, so cloning is cheap
//! and operators can return new sequences that reuse the original records.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::lookup::{split_path, Lookup};
use crate::types::{FieldDescriptor, Kind, Shape, Type};

static NULL: Value = Value::Null;

/// A runtime value.
///
/// Unsigned integers of every width are stored as `Uint` and signed ones as
/// `Int`, so formatting decisions depend on signedness, never on width.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Record(Record),
    Seq(Seq),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Other,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Record(_) => Kind::Record,
            Value::Seq(_) => Kind::Seq,
        }
    }

    /// The type this value would be declared with, inferred from its contents.
    ///
    /// Sequences and records report their declared types; scalars report the
    /// widest Rust type of their representation.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Any,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int("i64"),
            Value::Uint(_) => Type::Uint("u64"),
            Value::Float(_) => Type::Float("f64"),
            Value::Str(_) => Type::Str,
            Value::Record(r) => Type::Record(r.shape().clone()),
            Value::Seq(s) => Type::seq(s.elem().clone()),
        }
    }

    /// Short description used in error messages, e.g. `sequence of u32`.
    pub fn describe_kind(&self) -> String {
        match self {
            Value::Seq(s) => format!("sequence of {}", s.elem()),
            Value::Record(r) => format!("record {}", Type::Record(r.shape().clone())),
            other => other.kind().as_str().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    /// The value as `f64`, for numeric kinds only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Uint(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

/// Plain rendering: the string form used by filters and plain-style tables.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Record(r) => write_joined(f, '{', r.values(), '}'),
            Value::Seq(s) => write_joined(f, '[', s.items(), ']'),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Seq> for Value {
    fn from(s: Seq) -> Self {
        Value::Seq(s)
    }
}

/// A record instance: a shape plus one value per field, in shape order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: Arc<Shape>,
    values: Arc<[Value]>,
}

impl Record {
    /// Builds a record. `values` must line up with the shape's fields.
    ///
    /// Generated `Recordable` impls use this; hand-built records should prefer
    /// [`Record::try_new`].
    pub fn new(shape: Arc<Shape>, values: Vec<Value>) -> Self {
        debug_assert_eq!(shape.len(), values.len(), "record arity mismatch");
        Record {
            shape,
            values: values.into(),
        }
    }

    /// Builds a record, checking that there is one value per field.
    pub fn try_new(shape: Arc<Shape>, values: Vec<Value>) -> Result<Self> {
        if shape.len() != values.len() {
            return Err(Error::invalid(format!(
                "record has {} fields but {} values were given",
                shape.len(),
                values.len()
            )));
        }
        Ok(Record::new(shape, values))
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// A top-level field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shape.index_of(name).map(|i| &self.values[i])
    }

    /// Field descriptors paired with their values.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
        self.shape.fields().iter().zip(self.values.iter())
    }

    /// Walks a dotted path through nested records.
    ///
    /// A null optional record part-way down the path resolves to null rather
    /// than failing, as long as the declared type says a record belongs there.
    pub fn lookup(&self, path: &str) -> Lookup<&Value> {
        let mut record = self;
        let mut segments = split_path(path).peekable();
        while let Some(segment) = segments.next() {
            let Some(idx) = record.shape.index_of(segment) else {
                return Lookup::NotFound(segment.to_string());
            };
            let value = &record.values[idx];
            if segments.peek().is_none() {
                return Lookup::Found(value);
            }
            match value {
                Value::Record(inner) => record = inner,
                Value::Null if record.shape.fields()[idx].ty.record_shape().is_some() => {
                    return match shape_lookup_rest(&record.shape.fields()[idx].ty, segments) {
                        Some(missing) => missing,
                        None => Lookup::Found(&NULL),
                    };
                }
                _ => return Lookup::NotARecord(segment.to_string()),
            }
        }
        Lookup::NotFound(String::new())
    }

    /// Like [`Record::lookup`], converting failures into errors.
    pub fn resolve(&self, path: &str) -> Result<&Value> {
        self.lookup(path).into_result(path)
    }
}

/// Checks the remaining segments against the declared type of a null record,
/// returning the failure if any segment would not resolve.
fn shape_lookup_rest<'a, 'b>(
    ty: &Type,
    segments: impl Iterator<Item = &'b str>,
) -> Option<Lookup<&'a Value>> {
    let rest: Vec<&str> = segments.collect();
    let shape = ty.record_shape()?;
    match shape.lookup(&rest.join(".")) {
        Lookup::Found(_) => None,
        Lookup::NotFound(s) => Some(Lookup::NotFound(s)),
        Lookup::NotARecord(s) => Some(Lookup::NotARecord(s)),
    }
}

/// An ordered sequence with a declared element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    elem: Type,
    items: Arc<[Value]>,
}

impl Seq {
    pub fn new(elem: Type, items: Vec<Value>) -> Self {
        Seq {
            elem,
            items: items.into(),
        }
    }

    /// An empty sequence of `elem`.
    pub fn empty(elem: Type) -> Self {
        Seq::new(elem, Vec::new())
    }

    /// A sequence whose element type is taken from its first non-null item,
    /// made optional when nulls are present.
    ///
    /// Later items are not checked against that type; operators that need
    /// one record shape call [`ensure_uniform`](crate::ensure_uniform).
    pub fn inferred(items: Vec<Value>) -> Self {
        let elem = match items.iter().find(|v| !v.is_null()) {
            Some(first) if items.iter().any(Value::is_null) => Type::option(first.type_of()),
            Some(first) => first.type_of(),
            None => Type::Any,
        };
        Seq::new(elem, items)
    }

    /// A new sequence with the same element type and different items.
    pub fn with_items(&self, items: Vec<Value>) -> Self {
        Seq::new(self.elem.clone(), items)
    }

    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// The element record shape, if this is a sequence of records.
    pub fn record_shape(&self) -> Option<&Arc<Shape>> {
        self.elem.record_shape()
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred_shape() -> Arc<Shape> {
        Arc::new(Shape::named(
            "Credentials",
            vec![
                FieldDescriptor::new("Name", Type::Str),
                FieldDescriptor::new("Password", Type::Str),
            ],
        ))
    }

    fn user(name: &str, password: &str) -> Record {
        let creds = Record::new(cred_shape(), vec![name.into(), password.into()]);
        let shape = Arc::new(Shape::anonymous(vec![
            FieldDescriptor::new("Id", Type::Uint("u32")),
            FieldDescriptor::new("Credentials", Type::Record(cred_shape())),
        ]));
        Record::new(shape, vec![Value::Uint(7), creds.into()])
    }

    #[test]
    fn plain_display() {
        assert_eq!(Value::Uint(255).to_string(), "255");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(0.15).to_string(), "0.15");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(user("Marcus", "1234")).to_string(), "{7 {Marcus 1234}}");
        let seq = Seq::inferred(vec!["a".into(), "b".into()]);
        assert_eq!(Value::from(seq).to_string(), "[a b]");
    }

    #[test]
    fn record_resolve_nested() {
        let r = user("Gaius", "0000");
        assert_eq!(r.resolve("Credentials.Password").unwrap(), &Value::from("0000"));
        assert_eq!(r.get("Id"), Some(&Value::Uint(7)));
    }

    #[test]
    fn record_resolve_errors() {
        let r = user("Gaius", "0000");
        assert!(matches!(
            r.resolve("Credentials.Email"),
            Err(Error::FieldNotFound { .. })
        ));
        assert!(matches!(r.resolve("Id.Value"), Err(Error::NotARecord { .. })));
    }

    #[test]
    fn null_optional_record_resolves_to_null() {
        let shape = Arc::new(Shape::anonymous(vec![FieldDescriptor::new(
            "Credentials",
            Type::option(Type::Record(cred_shape())),
        )]));
        let r = Record::new(shape, vec![Value::Null]);
        assert_eq!(r.resolve("Credentials.Name").unwrap(), &Value::Null);
        assert!(matches!(
            r.resolve("Credentials.Email"),
            Err(Error::FieldNotFound { .. })
        ));
    }

    #[test]
    fn try_new_checks_arity() {
        assert!(Record::try_new(cred_shape(), vec!["only one".into()]).is_err());
        assert!(Record::try_new(cred_shape(), vec!["a".into(), "b".into()]).is_ok());
    }

    #[test]
    fn inferred_seq_takes_first_item_type() {
        let seq = Seq::inferred(vec![Value::Uint(1), Value::Uint(2)]);
        assert_eq!(seq.elem(), &Type::Uint("u64"));
        assert_eq!(Seq::inferred(vec![]).elem(), &Type::Any);
        assert_eq!(Seq::inferred(vec![Value::Null]).elem(), &Type::Any);
        let seq = Seq::inferred(vec![Value::Null, Value::Int(1)]);
        assert_eq!(seq.elem(), &Type::option(Type::Int("i64")));
    }

    #[test]
    fn type_of_record_and_seq() {
        let r = user("a", "b");
        let seq = Seq::new(Type::Record(r.shape().clone()), vec![r.clone().into()]);
        assert_eq!(seq.record_shape(), Some(r.shape()));
        assert_eq!(Value::from(seq).kind(), Kind::Seq);
    }
}
