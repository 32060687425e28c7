//! Runtime record introspection for tabula.
//!
//! Templates operate on arbitrary caller data, so the data is first turned
//! into a self-describing [`Value`]: records carry a [`Shape`] (field names,
//! declared types and documentation) and sequences carry their element
//! [`Type`], which keeps the fields of an empty sequence visible.
//!
//! There are three ways in:
//!
//! - `#[derive(Recordable)]` (from `tabula-macros`) implements [`Reflect`]
//!   and [`Recordable`] for a struct, keeping field docs and exact integer
//!   widths.
//! - [`to_value`] accepts anything that implements `serde::Serialize`.
//! - [`Value::from_json`] accepts a parsed JSON document.
//!
//! # Example
//!
//! ```
//! use tabula_reflect::{classify, Class, Reflect, Value};
//!
//! let grid = vec![vec!["Message".to_string()], vec!["Too many GOSUBs".to_string()]];
//! assert_eq!(classify(&grid.reflect()), Class::Grid);
//! assert_eq!(classify(&Value::Uint(255)), Class::Scalar);
//! ```

mod error;
mod introspect;
mod json;
mod lookup;
mod reflect;
mod ser;
mod types;
mod value;

pub use error::{Error, Result};
pub use introspect::{classify, ensure_uniform, expect_records, fields_of, records_of, shape_of, Class};
pub use lookup::Lookup;
pub use reflect::{Recordable, Reflect};
pub use ser::to_value;
pub use types::{FieldDescriptor, Kind, Shape, Type};
pub use value::{Record, Seq, Value};
