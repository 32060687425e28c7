//! Proc macros for tabula.
//!
//! - [`Recordable`] - Describe a struct to the template engine as a record
//!   type, with field names, declared types and documentation

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `tabula_reflect::Recordable` and `tabula_reflect::Reflect`.
///
/// Every named field becomes a column. Field types must implement
/// `Reflect`, which covers primitives, strings, `Option`, `Vec`, `Box` and
/// other `Recordable` types. Doc comments become the field documentation
/// shown by `describe` and in usage text.
///
/// # Attributes
///
/// | Attribute | Where | Effect |
/// |-----------|-------|--------|
/// | `rename_all = "..."` | struct | Rename every field: `PascalCase`, `camelCase`, `snake_case`, `SCREAMING_SNAKE_CASE` or `kebab-case` |
/// | `rename = "..."` | field | Use a custom column name |
/// | `skip` | field | Hide the field from templates |
/// | `doc = "..."` | field | Override the doc comment |
///
/// # Example
///
/// ```ignore
/// use tabula_macros::Recordable;
///
/// #[derive(Recordable)]
/// #[record(rename_all = "PascalCase")]
/// struct Name {
///     /// Given name
///     first_name: String,
///     #[record(rename = "Surname", doc = "Family name")]
///     last_name: String,
///     #[record(skip)]
///     cache_key: u64,
/// }
/// ```
#[proc_macro_derive(Recordable, attributes(record))]
pub fn recordable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::recordable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
