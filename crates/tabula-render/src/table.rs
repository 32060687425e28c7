//! Columnar and vertical-block table layouts.

use std::sync::Arc;

use tabula_reflect::{ensure_uniform, Error, Record, Result, Shape, Value};

use crate::style::Style;
use crate::util::{display_width, expand_tabs, pad_right, truncate_end};

const ELLIPSIS: &str = "…";

/// Width settings for a table render.
///
/// The three leading numbers follow tabwriter conventions: a minimum cell
/// width (padding included), the tab stop used to expand tabs inside cells,
/// and the gap added after the widest cell of each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub min_width: usize,
    pub tab_width: usize,
    pub padding: usize,
    /// Cells wider than this are truncated with an ellipsis.
    pub max_width: Option<usize>,
    /// Per-column minimum widths, reused cyclically. Overrides `min_width`.
    pub widths: Vec<usize>,
    /// Header text for the leading columns.
    pub headers: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            min_width: 8,
            tab_width: 8,
            padding: 1,
            max_width: None,
            widths: Vec::new(),
            headers: Vec::new(),
        }
    }
}

impl TableOptions {
    pub fn new(min_width: usize, tab_width: usize, padding: usize) -> Self {
        TableOptions {
            min_width,
            tab_width,
            padding,
            ..TableOptions::default()
        }
    }

    pub fn with_widths(mut self, widths: Vec<usize>) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    fn min_for(&self, column: usize) -> usize {
        if self.widths.is_empty() {
            self.min_width
        } else {
            self.widths[column % self.widths.len()]
        }
    }

    fn prepare(&self, text: &str) -> String {
        let text = expand_tabs(text, self.tab_width);
        match self.max_width {
            Some(max) => truncate_end(&text, max, ELLIPSIS),
            None => text,
        }
    }

    fn header_names(&self, shape: &Shape) -> Result<Vec<String>> {
        if self.headers.len() > shape.len() {
            return Err(Error::invalid(format!(
                "{} headers given for {} columns",
                self.headers.len(),
                shape.len()
            )));
        }
        Ok(shape
            .field_names()
            .enumerate()
            .map(|(i, name)| self.headers.get(i).map_or(name, String::as_str))
            .map(|name| self.prepare(name))
            .collect())
    }
}

/// The records to render, with null elements kept as `None`.
fn table_rows<'a>(
    value: &'a Value,
    op: &str,
    allow_single: bool,
) -> Result<(Arc<Shape>, Vec<Option<&'a Record>>)> {
    match value {
        Value::Record(r) if allow_single => Ok((r.shape().clone(), vec![Some(r)])),
        Value::Seq(seq) => {
            let Some(shape) = seq.record_shape() else {
                return Err(Error::unsupported("a sequence of records", value.describe_kind()));
            };
            ensure_uniform(seq, shape)?;
            let rows = seq
                .iter()
                .map(|item| match item {
                    Value::Record(r) => Ok(Some(r)),
                    Value::Null => Ok(None),
                    other => Err(Error::unsupported("a record", other.describe_kind())),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok((shape.clone(), rows))
        }
        other => {
            log::trace!("{op}: rejected input of kind {}", other.describe_kind());
            Err(Error::unsupported(
                if allow_single {
                    "a record or a sequence of records"
                } else {
                    "a sequence of records"
                },
                other.describe_kind(),
            ))
        }
    }
}

fn row_cells(record: Option<&Record>, columns: usize, opts: &TableOptions, style: Style) -> Vec<String> {
    match record {
        Some(r) => r
            .values()
            .iter()
            .map(|v| opts.prepare(&style.format(v)))
            .collect(),
        None => vec![String::new(); columns],
    }
}

/// Renders a sequence of records as aligned columns with a header line.
///
/// Column width is the widest cell (header included) plus `padding`, but
/// never less than the column's minimum. The last column is not padded, and
/// every line ends with a newline. An empty sequence renders only the
/// header; a shape without fields renders nothing.
///
/// ```rust
/// use tabula_reflect::{Reflect, Value};
/// use tabula_render::{render_table, Style, TableOptions};
/// # use std::sync::Arc;
/// # use tabula_reflect::{FieldDescriptor, Record, Seq, Shape, Type};
/// # let shape = Arc::new(Shape::anonymous(vec![
/// #     FieldDescriptor::new("FirstName", Type::Str),
/// #     FieldDescriptor::new("Surname", Type::Str),
/// # ]));
/// # let row = |a: &str, b: &str| Value::Record(Record::new(shape.clone(), vec![a.into(), b.into()]));
/// # let names = Value::Seq(Seq::new(Type::Record(shape.clone()), vec![row("Marcus", "Cicero"), row("Gaius", "Caesar")]));
///
/// let out = render_table(&names, &TableOptions::new(12, 8, 0), Style::Plain)?;
/// assert_eq!(out, "FirstName   Surname\nMarcus      Cicero\nGaius       Caesar\n");
/// # Ok::<(), tabula_reflect::Error>(())
/// ```
pub fn render_table(value: &Value, opts: &TableOptions, style: Style) -> Result<String> {
    let (shape, records) = table_rows(value, "tablex", false)?;
    if shape.is_empty() {
        return Ok(String::new());
    }

    let header = opts.header_names(&shape)?;
    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|r| row_cells(r, shape.len(), opts, style))
        .collect();

    let widths: Vec<usize> = (0..shape.len())
        .map(|col| {
            let widest = std::iter::once(&header)
                .chain(rows.iter())
                .map(|row| display_width(&row[col]))
                .max()
                .unwrap_or(0);
            opts.min_for(col).max(widest + opts.padding)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let last = row.len() - 1;
        for (col, cell) in row.iter().enumerate() {
            if col == last {
                out.push_str(cell);
            } else {
                out.push_str(&pad_right(cell, widths[col]));
            }
        }
        out.push('\n');
    }

    log::trace!("tablex: rendered {} rows of {} columns", rows.len(), shape.len());
    Ok(out)
}

/// Renders each record as a block of `name: value` lines.
///
/// Keys are aligned across all blocks and a blank line separates records.
/// A single record renders one block.
pub fn render_blocks(value: &Value, opts: &TableOptions, style: Style) -> Result<String> {
    let (shape, records) = table_rows(value, "htablex", true)?;
    if shape.is_empty() {
        return Ok(String::new());
    }

    let keys: Vec<String> = opts
        .header_names(&shape)?
        .into_iter()
        .map(|h| format!("{h}:"))
        .collect();
    let widest = keys.iter().map(|k| display_width(k)).max().unwrap_or(0);
    let key_width = opts.min_width.max(widest + opts.padding);

    let mut out = String::new();
    for (i, record) in records.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (key, cell) in keys.iter().zip(row_cells(record, shape.len(), opts, style)) {
            if cell.is_empty() {
                out.push_str(key);
            } else {
                out.push_str(&pad_right(key, key_width));
                out.push_str(&cell);
            }
            out.push('\n');
        }
    }
    Ok(out)
}
