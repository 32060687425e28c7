//! Traits that turn Rust data into [`Value`]s.
//!
//! [`Reflect`] is implemented here for primitives and containers, and by
//! `#[derive(Recordable)]` for structs with named fields.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::types::{Shape, Type};
use crate::value::{Seq, Value};

/// Types that can describe themselves and convert into a [`Value`].
///
/// # Manual Implementation
///
/// ```
/// use std::sync::Arc;
/// use tabula_reflect::{FieldDescriptor, Record, Recordable, Reflect, Shape, Type, Value};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Recordable for Point {
///     fn shape() -> Arc<Shape> {
///         Arc::new(Shape::named("Point", vec![
///             FieldDescriptor::new("x", <i32 as Reflect>::reflect_type()),
///             FieldDescriptor::new("y", <i32 as Reflect>::reflect_type()),
///         ]))
///     }
/// }
///
/// impl Reflect for Point {
///     fn reflect_type() -> Type {
///         Type::Record(<Self as Recordable>::shape())
///     }
///     fn reflect(&self) -> Value {
///         Value::Record(Record::new(
///             <Self as Recordable>::shape(),
///             vec![self.x.reflect(), self.y.reflect()],
///         ))
///     }
/// }
///
/// let v = Point { x: 1, y: -2 }.reflect();
/// assert_eq!(v.as_record().unwrap().get("y"), Some(&Value::Int(-2)));
/// ```
pub trait Reflect {
    /// The declared type, available without an instance.
    fn reflect_type() -> Type;

    /// Converts this instance into a value.
    fn reflect(&self) -> Value;
}

/// Record types: structs whose fields become table columns.
///
/// Usually derived with `#[derive(Recordable)]` from `tabula-macros`.
pub trait Recordable: Reflect {
    /// The record shape: field names, types and documentation.
    fn shape() -> Arc<Shape>;
}

macro_rules! reflect_int {
    ($variant:ident, $conv:ty; $($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn reflect_type() -> Type {
                    Type::$variant(stringify!($t))
                }

                fn reflect(&self) -> Value {
                    Value::$variant(*self as $conv)
                }
            }
        )*
    };
}

reflect_int!(Int, i64; i8, i16, i32, i64, isize);
reflect_int!(Uint, u64; u8, u16, u32, u64, usize);

impl Reflect for f32 {
    fn reflect_type() -> Type {
        Type::Float("f32")
    }

    fn reflect(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Reflect for f64 {
    fn reflect_type() -> Type {
        Type::Float("f64")
    }

    fn reflect(&self) -> Value {
        Value::Float(*self)
    }
}

impl Reflect for bool {
    fn reflect_type() -> Type {
        Type::Bool
    }

    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for str {
    fn reflect_type() -> Type {
        Type::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl Reflect for String {
    fn reflect_type() -> Type {
        Type::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Reflect for char {
    fn reflect_type() -> Type {
        Type::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.to_string())
    }
}

/// Already-reflected data passes through unchanged.
impl Reflect for Value {
    fn reflect_type() -> Type {
        Type::Any
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_type() -> Type {
        Type::option(T::reflect_type())
    }

    fn reflect(&self) -> Value {
        self.as_ref().map_or(Value::Null, Reflect::reflect)
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect_type() -> Type {
        Type::seq(T::reflect_type())
    }

    fn reflect(&self) -> Value {
        Value::Seq(Seq::new(
            T::reflect_type(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect_type() -> Type {
        <[T]>::reflect_type()
    }

    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_type() -> Type {
        <[T]>::reflect_type()
    }

    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn reflect_type() -> Type {
        <[T]>::reflect_type()
    }

    fn reflect(&self) -> Value {
        Value::Seq(Seq::new(
            T::reflect_type(),
            self.iter().map(Reflect::reflect).collect(),
        ))
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect_type() -> Type {
        T::reflect_type()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect_type() -> Type {
        T::reflect_type()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect_type() -> Type {
        T::reflect_type()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}
