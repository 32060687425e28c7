//! Table operators for tabula.
//!
//! Every operator borrows a [`Value`] and returns a new one. Inputs are never
//! modified; results share the original records through `Arc`, so chaining
//! operators inside a template does not copy data.
//!
//! | Operator | Input | Result |
//! |----------|-------|--------|
//! | [`cols`] | sequence of records | records narrowed to the named fields |
//! | [`rows`], [`head`], [`tail`] | any sequence | a sub-range |
//! | [`filter`] | sequence of records | records whose field matches a [`Match`] |
//! | [`sort`] | sequence of records | stable sort on one field |
//! | [`promote`] | sequence of records | the nested records at a path |
//! | [`sliceof`] | any value | a one-element sequence |
//! | [`totable`] | grid of strings | records named by the header row |
//!
//! ```
//! use tabula_reflect::{Reflect, Value};
//! use tabula_transform::{head, sort, Dir};
//! # use std::sync::Arc;
//! # use tabula_reflect::{FieldDescriptor, Record, Recordable, Shape, Type};
//! # struct Name { surname: &'static str }
//! # impl Recordable for Name {
//! #     fn shape() -> Arc<Shape> {
//! #         Arc::new(Shape::named("Name", vec![FieldDescriptor::new("Surname", Type::Str)]))
//! #     }
//! # }
//! # impl Reflect for Name {
//! #     fn reflect_type() -> Type { Type::Record(Self::shape()) }
//! #     fn reflect(&self) -> Value {
//! #         Value::Record(Record::new(Self::shape(), vec![self.surname.reflect()]))
//! #     }
//! # }
//!
//! let names = vec![Name { surname: "Cicero" }, Name { surname: "Caesar" }].reflect();
//! let first = head(&sort(&names, "Surname", Dir::Asc)?, 1)?;
//! assert_eq!(first.to_string(), "[{Caesar}]");
//! # Ok::<(), tabula_reflect::Error>(())
//! ```

mod filter;
mod grid;
mod ordering;
mod project;
mod slice;

pub use filter::{filter, Match};
pub use grid::totable;
pub use ordering::{compare_values, sort, Dir};
pub use project::{cols, promote};
pub use slice::{head, rows, sliceof, tail};

use tabula_reflect::{Error, Record, Result, Value};

/// Borrows a sequence item as a record. Null items of optional record
/// sequences are passed through as `None`.
pub(crate) fn item_record(item: &Value) -> Result<Option<&Record>> {
    match item {
        Value::Record(r) => Ok(Some(r)),
        Value::Null => Ok(None),
        other => Err(Error::unsupported("a record", other.describe_kind())),
    }
}
