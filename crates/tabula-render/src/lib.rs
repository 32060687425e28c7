//! Plain-text rendering of tabula values.
//!
//! Rendering has two independent axes:
//!
//! - layout: [`render_table`] lays records out in aligned columns,
//!   [`render_blocks`] prints one `name: value` block per record;
//! - [`Style`]: `Plain` prints values as they are, `Alt` quotes strings and
//!   shows unsigned integers in hexadecimal.
//!
//! [`describe`] and [`describe_type`] render declared types, and [`select`]
//! prints individual fields.

mod describe;
mod select;
mod style;
mod table;
mod util;

pub use describe::{describe, describe_type};
pub use select::select;
pub use style::Style;
pub use table::{render_blocks, render_table, TableOptions};
pub use util::{display_width, expand_tabs, pad_right, truncate_end};
