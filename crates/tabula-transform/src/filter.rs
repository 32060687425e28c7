//! Record filtering on the string form of a field.

use regex::Regex;
use tabula_reflect::{expect_records, Error, Result, Value};

use crate::item_record;

/// How a field's string form is tested.
#[derive(Debug, Clone)]
pub enum Match {
    /// Exact equality.
    Equals(String),
    /// Substring. An empty needle matches everything.
    Contains(String),
    HasPrefix(String),
    HasSuffix(String),
    /// Equality after Unicode lowercasing of both sides.
    Folded(String),
    /// Unanchored regular expression search.
    Regexp(Regex),
}

impl Match {
    /// Compiles a regular expression matcher.
    pub fn regexp(pattern: &str) -> Result<Match> {
        Regex::new(pattern)
            .map(Match::Regexp)
            .map_err(|e| Error::invalid(format!("invalid regex pattern '{pattern}': {e}")))
    }

    /// Returns the template function name for this matcher.
    pub fn as_str(&self) -> &'static str {
        match self {
            Match::Equals(_) => "filter",
            Match::Contains(_) => "filterContains",
            Match::HasPrefix(_) => "filterHasPrefix",
            Match::HasSuffix(_) => "filterHasSuffix",
            Match::Folded(_) => "filterFolded",
            Match::Regexp(_) => "filterRegexp",
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Match::Equals(v) => text == v,
            Match::Contains(v) => text.contains(v.as_str()),
            Match::HasPrefix(v) => text.starts_with(v.as_str()),
            Match::HasSuffix(v) => text.ends_with(v.as_str()),
            Match::Folded(v) => text.to_lowercase() == v.to_lowercase(),
            Match::Regexp(re) => re.is_match(text),
        }
    }
}

/// Keeps the records whose `field` matches. The field may be a dotted path.
///
/// Values are compared through their plain string form, so `filter(v,
/// "Code", Equals("37"))` works on numeric fields too. Null elements never
/// match.
pub fn filter(value: &Value, field: &str, m: &Match) -> Result<Value> {
    let (seq, shape) = expect_records(value, m.as_str())?;
    shape.resolve(field)?;

    let mut kept = Vec::new();
    for item in seq {
        let Some(record) = item_record(item)? else {
            continue;
        };
        if m.matches(&record.resolve(field)?.to_string()) {
            kept.push(item.clone());
        }
    }

    log::trace!(
        "{}: kept {} of {} records on '{}'",
        m.as_str(),
        kept.len(),
        seq.len(),
        field
    );
    Ok(Value::Seq(seq.with_items(kept)))
}
