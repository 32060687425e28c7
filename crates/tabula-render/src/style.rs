//! Cell formatting styles.

use tabula_reflect::Value;

/// How individual values are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Strings verbatim, numbers in decimal.
    #[default]
    Plain,
    /// Strings quoted and escaped, unsigned integers in `0x` hexadecimal.
    Alt,
}

impl Style {
    /// Formats one value. Nested records and sequences use the same style
    /// for their items.
    ///
    /// ```rust
    /// use tabula_reflect::Value;
    /// use tabula_render::Style;
    ///
    /// assert_eq!(Style::Alt.format(&Value::Uint(255)), "0xff");
    /// assert_eq!(Style::Alt.format(&Value::from("Marcus")), "\"Marcus\"");
    /// assert_eq!(Style::Plain.format(&Value::Uint(255)), "255");
    /// ```
    pub fn format(self, value: &Value) -> String {
        match (self, value) {
            (Style::Plain, _) => value.to_string(),
            (Style::Alt, Value::Str(s)) => format!("{s:?}"),
            (Style::Alt, Value::Uint(n)) => format!("{n:#x}"),
            (Style::Alt, Value::Record(r)) => self.join('{', r.values(), '}'),
            (Style::Alt, Value::Seq(s)) => self.join('[', s.items(), ']'),
            (Style::Alt, other) => other.to_string(),
        }
    }

    fn join(self, open: char, items: &[Value], close: char) -> String {
        let inner: Vec<String> = items.iter().map(|v| self.format(v)).collect();
        format!("{open}{}{close}", inner.join(" "))
    }
}
