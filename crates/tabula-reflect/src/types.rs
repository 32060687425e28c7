//! Declared types: what a value looks like, independent of any instance.
//!
//! A [`Type`] is carried by every sequence, so the element shape of an empty
//! sequence can still be inspected. Records point at a shared [`Shape`].

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::lookup::{split_path, Lookup};

/// Coarse classification of a field, used to pick formatting and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Str,
    Int,
    Uint,
    Float,
    Bool,
    Record,
    Seq,
    Other,
}

impl Kind {
    /// Lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Str => "string",
            Kind::Int => "integer",
            Kind::Uint => "unsigned integer",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Record => "record",
            Kind::Seq => "sequence",
            Kind::Other => "other",
        }
    }

    /// Returns `true` for the signed, unsigned and float kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }

    /// Returns `true` if values of this kind have a total order for sorting.
    pub fn is_comparable(self) -> bool {
        matches!(
            self,
            Kind::Str | Kind::Int | Kind::Uint | Kind::Float | Kind::Bool
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a field or sequence element.
///
/// Numeric variants keep the Rust name they were declared with (`u8`, `i64`,
/// `f32`...) so `describe` can print it, while values of every width share the
/// same runtime representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Str,
    Bool,
    Int(&'static str),
    Uint(&'static str),
    Float(&'static str),
    Record(Arc<Shape>),
    Seq(Box<Type>),
    Option(Box<Type>),
    /// Unknown element type, e.g. an empty list built inside a template.
    Any,
}

impl Type {
    /// Shorthand for a sequence of `elem`.
    pub fn seq(elem: Type) -> Type {
        Type::Seq(Box::new(elem))
    }

    /// Shorthand for an optional `inner`.
    pub fn option(inner: Type) -> Type {
        Type::Option(Box::new(inner))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Type::Str => Kind::Str,
            Type::Bool => Kind::Bool,
            Type::Int(_) => Kind::Int,
            Type::Uint(_) => Kind::Uint,
            Type::Float(_) => Kind::Float,
            Type::Record(_) => Kind::Record,
            Type::Seq(_) => Kind::Seq,
            Type::Option(inner) => inner.kind(),
            Type::Any => Kind::Other,
        }
    }

    /// The record shape behind this type, looking through `Option`.
    pub fn record_shape(&self) -> Option<&Arc<Shape>> {
        match self {
            Type::Record(shape) => Some(shape),
            Type::Option(inner) => inner.record_shape(),
            _ => None,
        }
    }

    /// The element type if this is a sequence.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Seq(elem) => Some(elem),
            _ => None,
        }
    }

    /// Single-line type name, e.g. `u32`, `Vec<String>`, `Option<Person>`.
    ///
    /// Anonymous records print as `struct {..}`; use the `describe` renderer
    /// for the expanded form.
    pub fn name(&self) -> String {
        match self {
            Type::Str => "String".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Int(name) | Type::Uint(name) | Type::Float(name) => name.to_string(),
            Type::Record(shape) => match shape.name() {
                Some(name) => name.to_string(),
                None => "struct {..}".to_string(),
            },
            Type::Seq(elem) => format!("Vec<{}>", elem.name()),
            Type::Option(inner) => format!("Option<{}>", inner.name()),
            Type::Any => "any".to_string(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A single field of a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: Type,
    pub doc: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        FieldDescriptor {
            name: name.into(),
            ty,
            doc: None,
        }
    }

    /// Attaches documentation; `None` leaves the field undocumented.
    pub fn with_doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string).filter(|d| !d.is_empty());
        self
    }

    pub fn kind(&self) -> Kind {
        self.ty.kind()
    }
}

/// The ordered field layout of a record type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    name: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl Shape {
    /// An anonymous shape, as built by `totable` or `cols`.
    pub fn anonymous(fields: Vec<FieldDescriptor>) -> Self {
        Shape { name: None, fields }
    }

    /// A shape for a named record type.
    pub fn named(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Shape {
            name: Some(name.into()),
            fields,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a top-level field.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// True when both shapes have the same field names in the same order.
    pub fn same_fields(&self, other: &Shape) -> bool {
        self.fields.len() == other.fields.len() && self.field_names().eq(other.field_names())
    }

    /// Walks a dotted path through nested record types.
    pub fn lookup(&self, path: &str) -> Lookup<&FieldDescriptor> {
        let mut shape = self;
        let mut segments = split_path(path).peekable();
        while let Some(segment) = segments.next() {
            let Some(field) = shape.fields.iter().find(|f| f.name == segment) else {
                return Lookup::NotFound(segment.to_string());
            };
            if segments.peek().is_none() {
                return Lookup::Found(field);
            }
            match field.ty.record_shape() {
                Some(inner) => shape = inner,
                None => return Lookup::NotARecord(segment.to_string()),
            }
        }
        Lookup::NotFound(String::new())
    }

    /// Like [`Shape::lookup`], converting failures into errors.
    pub fn resolve(&self, path: &str) -> Result<&FieldDescriptor> {
        self.lookup(path).into_result(path)
    }

    /// Checks that field names are unique.
    pub fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::invalid(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Shape {
        Shape::named(
            "Credentials",
            vec![
                FieldDescriptor::new("Name", Type::Str),
                FieldDescriptor::new("Password", Type::Str),
            ],
        )
    }

    fn outer() -> Shape {
        let user = Shape::named(
            "User",
            vec![FieldDescriptor::new(
                "Credentials",
                Type::Record(Arc::new(creds())),
            )],
        );
        Shape::anonymous(vec![
            FieldDescriptor::new("Uninteresting", Type::Int("i64")),
            FieldDescriptor::new("User", Type::Record(Arc::new(user))),
        ])
    }

    #[test]
    fn kind_of_option_is_inner_kind() {
        assert_eq!(Type::option(Type::Uint("u16")).kind(), Kind::Uint);
        assert_eq!(Type::seq(Type::Str).kind(), Kind::Seq);
        assert_eq!(Type::Any.kind(), Kind::Other);
    }

    #[test]
    fn type_names() {
        assert_eq!(Type::seq(Type::Str).name(), "Vec<String>");
        assert_eq!(Type::option(Type::Int("i32")).name(), "Option<i32>");
        assert_eq!(Type::Record(Arc::new(creds())).name(), "Credentials");
        assert_eq!(Type::Record(Arc::new(Shape::default())).name(), "struct {..}");
    }

    #[test]
    fn resolve_nested_path() {
        let shape = outer();
        let field = shape.resolve("User.Credentials.Password").unwrap();
        assert_eq!(field.name, "Password");
        assert_eq!(field.kind(), Kind::Str);
    }

    #[test]
    fn resolve_missing_segment() {
        let err = outer().resolve("User.Nope").unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { ref segment, .. } if segment == "Nope"));
    }

    #[test]
    fn resolve_through_scalar() {
        let err = outer().resolve("Uninteresting.X").unwrap_err();
        assert!(
            matches!(err, Error::NotARecord { ref segment, .. } if segment == "Uninteresting")
        );
    }

    #[test]
    fn validate_rejects_duplicates() {
        let shape = Shape::anonymous(vec![
            FieldDescriptor::new("A", Type::Str),
            FieldDescriptor::new("A", Type::Str),
        ]);
        assert!(shape.validate().is_err());
        assert!(outer().validate().is_ok());
    }

    #[test]
    fn empty_doc_is_dropped() {
        let f = FieldDescriptor::new("X", Type::Bool).with_doc(Some(""));
        assert_eq!(f.doc, None);
    }
}
