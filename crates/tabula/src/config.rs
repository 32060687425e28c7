//! Selecting which table functions a template can call.
//!
//! A [`Config`] holds the enabled builtin functions ([`Opt`]) and any custom
//! functions registered by the caller. Passing `None` where a config is
//! expected enables every builtin.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One builtin template function, or [`Opt::AllFns`] for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Opt {
    Filter,
    FilterContains,
    FilterHasPrefix,
    FilterHasSuffix,
    FilterFolded,
    FilterRegexp,
    ToJson,
    Select,
    SelectAlt,
    TableX,
    TableXAlt,
    HTableX,
    HTableXAlt,
    Cols,
    Sort,
    Rows,
    Head,
    Tail,
    Describe,
    Promote,
    Sliceof,
    ToTable,
    AllFns,
}

impl Opt {
    /// Every builtin in canonical order. Does not include [`Opt::AllFns`].
    pub const BUILTINS: [Opt; 22] = [
        Opt::Filter,
        Opt::FilterContains,
        Opt::FilterHasPrefix,
        Opt::FilterHasSuffix,
        Opt::FilterFolded,
        Opt::FilterRegexp,
        Opt::ToJson,
        Opt::Select,
        Opt::SelectAlt,
        Opt::TableX,
        Opt::TableXAlt,
        Opt::HTableX,
        Opt::HTableXAlt,
        Opt::Cols,
        Opt::Sort,
        Opt::Rows,
        Opt::Head,
        Opt::Tail,
        Opt::Describe,
        Opt::Promote,
        Opt::Sliceof,
        Opt::ToTable,
    ];

    /// The name the function is bound to inside templates.
    pub fn template_name(self) -> &'static str {
        match self {
            Opt::Filter => "filter",
            Opt::FilterContains => "filterContains",
            Opt::FilterHasPrefix => "filterHasPrefix",
            Opt::FilterHasSuffix => "filterHasSuffix",
            Opt::FilterFolded => "filterFolded",
            Opt::FilterRegexp => "filterRegexp",
            Opt::ToJson => "tojson",
            Opt::Select => "select",
            Opt::SelectAlt => "selectalt",
            Opt::TableX => "tablex",
            Opt::TableXAlt => "tablexalt",
            Opt::HTableX => "htablex",
            Opt::HTableXAlt => "htablexalt",
            Opt::Cols => "cols",
            Opt::Sort => "sort",
            Opt::Rows => "rows",
            Opt::Head => "head",
            Opt::Tail => "tail",
            Opt::Describe => "describe",
            Opt::Promote => "promote",
            Opt::Sliceof => "sliceof",
            Opt::ToTable => "totable",
            Opt::AllFns => "all",
        }
    }

    /// Help text shown by `--help-function` and in decorated usage.
    pub fn help(self) -> &'static str {
        match self {
            Opt::Filter => HELP_FILTER,
            Opt::FilterContains => HELP_FILTER_CONTAINS,
            Opt::FilterHasPrefix => HELP_FILTER_HAS_PREFIX,
            Opt::FilterHasSuffix => HELP_FILTER_HAS_SUFFIX,
            Opt::FilterFolded => HELP_FILTER_FOLDED,
            Opt::FilterRegexp => HELP_FILTER_REGEXP,
            Opt::ToJson => HELP_TOJSON,
            Opt::Select => HELP_SELECT,
            Opt::SelectAlt => HELP_SELECTALT,
            Opt::TableX => HELP_TABLEX,
            Opt::TableXAlt => HELP_TABLEXALT,
            Opt::HTableX => HELP_HTABLEX,
            Opt::HTableXAlt => HELP_HTABLEXALT,
            Opt::Cols => HELP_COLS,
            Opt::Sort => HELP_SORT,
            Opt::Rows => HELP_ROWS,
            Opt::Head => HELP_HEAD,
            Opt::Tail => HELP_TAIL,
            Opt::Describe => HELP_DESCRIBE,
            Opt::Promote => HELP_PROMOTE,
            Opt::Sliceof => HELP_SLICEOF,
            Opt::ToTable => HELP_TOTABLE,
            Opt::AllFns => "",
        }
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

impl FromStr for Opt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(Opt::AllFns);
        }
        Opt::BUILTINS
            .into_iter()
            .find(|opt| opt.template_name() == s)
            .ok_or_else(|| Error::UnknownFunction(s.to_string()))
    }
}

impl TryFrom<String> for Opt {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A caller-supplied template function.
#[derive(Debug, Clone)]
pub struct CustomFn {
    pub name: String,
    pub help: String,
    pub callable: minijinja::Value,
}

/// The set of functions available to a template.
#[derive(Debug, Clone)]
pub struct Config {
    enabled: Vec<Opt>,
    custom: Vec<CustomFn>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    functions: Vec<Opt>,
}

impl Config {
    /// Enables the listed builtins. [`Opt::AllFns`] enables all of them.
    ///
    /// ```rust
    /// use tabula::{Config, Opt};
    ///
    /// let cfg = Config::new([Opt::Cols, Opt::Rows]);
    /// assert!(cfg.is_enabled(Opt::Cols));
    /// assert!(!cfg.is_enabled(Opt::Sort));
    /// ```
    pub fn new(opts: impl IntoIterator<Item = Opt>) -> Self {
        let wanted: Vec<Opt> = opts.into_iter().collect();
        let enabled = if wanted.contains(&Opt::AllFns) {
            Opt::BUILTINS.to_vec()
        } else {
            Opt::BUILTINS
                .into_iter()
                .filter(|opt| wanted.contains(opt))
                .collect()
        };
        Config {
            enabled,
            custom: Vec::new(),
        }
    }

    /// Parses a YAML document of the form `functions: [cols, rows]`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        Ok(Config::new(file.functions))
    }

    /// Reads [`Config::from_yaml`] input from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Config::from_yaml(&text)
    }

    /// Registers `callable` as a global template function called `name`.
    ///
    /// Builtin names are reserved even when the builtin is disabled, so a
    /// name always refers to the same function.
    pub fn add_custom_fn(
        &mut self,
        callable: minijinja::Value,
        name: &str,
        help: &str,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(tabula_reflect::Error::invalid("custom function name is empty").into());
        }
        let taken = name == Opt::AllFns.template_name()
            || Opt::BUILTINS.iter().any(|opt| opt.template_name() == name)
            || self.custom.iter().any(|f| f.name == name);
        if taken {
            return Err(Error::DuplicateFunction(name.to_string()));
        }
        self.custom.push(CustomFn {
            name: name.to_string(),
            help: help.to_string(),
            callable,
        });
        Ok(())
    }

    /// Whether `opt` is enabled. [`Opt::AllFns`] asks whether every builtin is.
    pub fn is_enabled(&self, opt: Opt) -> bool {
        match opt {
            Opt::AllFns => self.enabled.len() == Opt::BUILTINS.len(),
            opt => self.enabled.contains(&opt),
        }
    }

    /// Enabled builtins in canonical order.
    pub fn enabled(&self) -> &[Opt] {
        &self.enabled
    }

    /// Custom functions in registration order.
    pub fn custom_fns(&self) -> &[CustomFn] {
        &self.custom
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new([Opt::AllFns])
    }
}

const HELP_FILTER: &str = "\
- 'filter' operates along the same lines as the 'cols' function.  It takes a
  table, a field name and a value, and returns a new table holding only the
  rows whose field, in its printed form, equals the value.  For example,

  {{ filter(data, \"Name\", \"Marcus\") }}

  returns the rows whose 'Name' field is exactly \"Marcus\".";

const HELP_FILTER_CONTAINS: &str = "\
- 'filterContains' is like 'filter' but keeps the rows whose field contains
  the given substring.  An empty substring keeps every row.";

const HELP_FILTER_HAS_PREFIX: &str = "\
- 'filterHasPrefix' is like 'filter' but keeps the rows whose field starts
  with the given prefix.";

const HELP_FILTER_HAS_SUFFIX: &str = "\
- 'filterHasSuffix' is like 'filter' but keeps the rows whose field ends
  with the given suffix.";

const HELP_FILTER_FOLDED: &str = "\
- 'filterFolded' is like 'filter' but compares without regard to case, so

  {{ filterFolded(data, \"Name\", \"marcus\") }}

  also returns the rows named \"Marcus\" and \"MARCUS\".";

const HELP_FILTER_REGEXP: &str = "\
- 'filterRegexp' is like 'filter' but keeps the rows whose field matches the
  given regular expression.  An invalid expression is an error.";

const HELP_TOJSON: &str = "\
- 'tojson' outputs the target object in pretty-printed JSON, indented with
  tabs.  For example,

  {{ tojson(data) }}";

const HELP_SELECT: &str = "\
- 'select' prints the named fields of a record, or of every record in a
  table, one value per line.  For example,

  {{ select(head(data), \"Name\") }}";

const HELP_SELECTALT: &str = "\
- 'selectalt' is like 'select' but quotes strings and prints unsigned
  integers in hexadecimal.";

const HELP_TABLEX: &str = "\
- 'tablex' prints a table in aligned columns with a header row holding the
  field names.  It accepts three optional numbers: the minimum column width,
  the tab width and the padding added between columns.  For example,

  {{ tablex(data, 12, 8, 0) }}

  The keyword arguments 'widths', 'max_width' and 'headers' set per-column
  widths, truncate long cells and rename the leading columns.";

const HELP_TABLEXALT: &str = "\
- 'tablexalt' is like 'tablex' but quotes strings and prints unsigned
  integers in hexadecimal.";

const HELP_HTABLEX: &str = "\
- 'htablex' takes the same arguments as 'tablex' but prints each record as a
  block of 'name: value' lines, with a blank line between records.";

const HELP_HTABLEXALT: &str = "\
- 'htablexalt' is like 'htablex' but quotes strings and prints unsigned
  integers in hexadecimal.";

const HELP_COLS: &str = "\
- 'cols' can be used to extract certain columns from a table consisting of a
  sequence of records.  It returns a new table of records which contain only
  the fields requested by the caller.  For example, given a table of records

  {{ cols(data, \"Name\", \"Address\") }}

  returns a new table, each element of which is a record with only the two
  fields 'Name' and 'Address'.";

const HELP_SORT: &str = "\
- 'sort' sorts a table by the given field.  Numbers compare numerically and
  strings lexicographically.  An optional third argument of true, \"dsc\" or
  \"desc\" reverses the order.  For example,

  {{ sort(data, \"Age\", \"desc\") }}";

const HELP_ROWS: &str = "\
- 'rows' returns the rows of a table from a start index up to, but not
  including, an end index.  Out of range indices are clamped.  For example,

  {{ rows(data, 1, 3) }}

  returns the second and third rows.";

const HELP_HEAD: &str = "\
- 'head' returns the first n rows of a table, or the first row if n is
  omitted.  For example,

  {{ head(data, 2) }}";

const HELP_TAIL: &str = "\
- 'tail' returns the last n rows of a table, or the last row if n is
  omitted.";

const HELP_DESCRIBE: &str = "\
- 'describe' prints the declared type of its argument.  For example,

  {{ describe(data) }}";

const HELP_PROMOTE: &str = "\
- 'promote' replaces each record of a table with the record found at the
  given dotted path.  For example,

  {{ promote(data, \"User.Credentials\") }}

  returns a table of the 'Credentials' records.";

const HELP_SLICEOF: &str = "\
- 'sliceof' wraps its argument in a one-element sequence, so that a single
  record can be passed to the table functions.";

const HELP_TOTABLE: &str = "\
- 'totable' converts a sequence of sequences of strings into a table.  The
  first row holds the field names.  For example,

  {{ select(totable(data), \"Name\") }}";
