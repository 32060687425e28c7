//! # tabula - table functions for minijinja templates
//!
//! tabula adds a library of table functions to [minijinja] templates. A
//! script can project, filter, sort and reshape a sequence of records and
//! print it as aligned columns or `name: value` blocks, without any
//! formatting code written for the record type.
//!
//! ```rust
//! use tabula::{output_to_template, Recordable};
//!
//! #[derive(Recordable)]
//! #[record(rename_all = "PascalCase")]
//! struct Name {
//!     first_name: String,
//!     surname: String,
//! }
//!
//! let data = vec![
//!     Name { first_name: "Marcus".into(), surname: "Cicero".into() },
//!     Name { first_name: "Gaius".into(), surname: "Caesar".into() },
//! ];
//! let mut out = Vec::new();
//! output_to_template(&mut out, "names", r#"{{ tablex(sort(data, "Surname"), 12, 8, 0) }}"#, &data, None)?;
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "FirstName   Surname\nGaius       Caesar\nMarcus      Cicero\n",
//! );
//! # Ok::<(), tabula::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `tabula-reflect`: the self-describing [`Value`] model and [`Reflect`]
//! - `tabula-macros`: `#[derive(Recordable)]`
//! - `tabula-transform`: the pure table operators
//! - `tabula-render`: column, block, `describe` and `select` output
//!
//! This crate binds them to minijinja. [`Config`] picks the functions a
//! template may call and registers custom ones, and the [`help`] functions
//! print usage text for them.
//!
//! [minijinja]: https://docs.rs/minijinja

mod config;
mod error;
mod functions;
pub mod help;
mod objects;
mod output;

pub use config::{Config, CustomFn, Opt};
pub use error::{Error, Result};
pub use help::{
    generate_usage_decorated, generate_usage_undecorated, template_function_help,
    template_function_help_single, template_function_names, usage_decorated_for, usage_for,
};
pub use objects::{to_jinja, to_model, RecordObject, SeqObject};
pub use output::{output_to_template, render_to_string, render_value};

pub use tabula_macros::Recordable;
pub use tabula_reflect::{Recordable, Reflect, Type, Value};
