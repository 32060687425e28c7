//! Template bindings for the table functions.
//!
//! Every builtin is registered both as a function and as a filter, so
//! `tablex(sort(data, "Name"))` and `data | sort("Name") | tablex` are the
//! same script.

use log::trace;
use minijinja::value::{Kwargs, Rest, ValueKind};
use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;
use tabula_reflect::Value;
use tabula_render::{Style, TableOptions};
use tabula_transform::{Dir, Match};

use crate::config::{Config, Opt};
use crate::objects::{to_jinja, to_model};

type Jinja = minijinja::Value;
type Output = Result<Jinja, Error>;

macro_rules! bind {
    ($env:expr, $opt:expr, $f:expr) => {{
        $env.add_function($opt.template_name(), $f);
        $env.add_filter($opt.template_name(), $f);
    }};
}

/// Adds the builtins enabled in `cfg` and its custom functions to `env`.
pub(crate) fn register(env: &mut Environment<'_>, cfg: &Config) {
    for &opt in cfg.enabled() {
        match opt {
            Opt::Filter => bind!(env, opt, filter_equals),
            Opt::FilterContains => bind!(env, opt, filter_contains),
            Opt::FilterHasPrefix => bind!(env, opt, filter_has_prefix),
            Opt::FilterHasSuffix => bind!(env, opt, filter_has_suffix),
            Opt::FilterFolded => bind!(env, opt, filter_folded),
            Opt::FilterRegexp => bind!(env, opt, filter_regexp),
            Opt::ToJson => bind!(env, opt, tojson),
            Opt::Select => bind!(env, opt, select),
            Opt::SelectAlt => bind!(env, opt, selectalt),
            Opt::TableX => bind!(env, opt, tablex),
            Opt::TableXAlt => bind!(env, opt, tablexalt),
            Opt::HTableX => bind!(env, opt, htablex),
            Opt::HTableXAlt => bind!(env, opt, htablexalt),
            Opt::Cols => bind!(env, opt, cols),
            Opt::Sort => bind!(env, opt, sort),
            Opt::Rows => bind!(env, opt, rows),
            Opt::Head => bind!(env, opt, head),
            Opt::Tail => bind!(env, opt, tail),
            Opt::Describe => bind!(env, opt, describe),
            Opt::Promote => bind!(env, opt, promote),
            Opt::Sliceof => bind!(env, opt, sliceof),
            Opt::ToTable => bind!(env, opt, totable),
            Opt::AllFns => {}
        }
    }
    for custom in cfg.custom_fns() {
        env.add_global(custom.name.clone(), custom.callable.clone());
    }
}

/// Turns a table error into a template error, keeping it as the source.
fn lift(err: tabula_reflect::Error) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)
}

fn model(value: &Jinja) -> Result<Value, Error> {
    to_model(value).map_err(lift)
}

fn done(name: &str, value: tabula_reflect::Result<Value>) -> Output {
    let value = value.map_err(lift)?;
    if let Value::Seq(seq) = &value {
        trace!("{name}: {} rows", seq.len());
    }
    Ok(to_jinja(value))
}

fn cols(data: Jinja, names: Rest<String>) -> Output {
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    done("cols", tabula_transform::cols(&model(&data)?, &names))
}

fn rows(data: Jinja, start: i64, end: i64) -> Output {
    done("rows", tabula_transform::rows(&model(&data)?, start, end))
}

fn head(data: Jinja, n: Option<usize>) -> Output {
    done("head", tabula_transform::head(&model(&data)?, n.unwrap_or(1)))
}

fn tail(data: Jinja, n: Option<usize>) -> Output {
    done("tail", tabula_transform::tail(&model(&data)?, n.unwrap_or(1)))
}

fn promote(data: Jinja, path: String) -> Output {
    done("promote", tabula_transform::promote(&model(&data)?, &path))
}

fn sliceof(data: Jinja) -> Output {
    done("sliceof", Ok(tabula_transform::sliceof(&model(&data)?)))
}

fn totable(data: Jinja) -> Output {
    done("totable", tabula_transform::totable(&model(&data)?))
}

fn sort(data: Jinja, field: String, dir: Option<Jinja>) -> Output {
    let dir = match dir {
        None => Dir::Asc,
        Some(d) if d.kind() == ValueKind::Bool => Dir::from_reverse(d.is_true()),
        Some(d) => match d.as_str() {
            Some(s) => s.parse().map_err(lift)?,
            None => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("sort direction must be a bool or a string, not {}", d.kind()),
                ))
            }
        },
    };
    done("sort", tabula_transform::sort(&model(&data)?, &field, dir))
}

fn filter_by(name: &str, data: &Jinja, field: &str, m: &Match) -> Output {
    done(name, tabula_transform::filter(&model(data)?, field, m))
}

fn filter_equals(data: Jinja, field: String, value: Jinja) -> Output {
    filter_by("filter", &data, &field, &Match::Equals(value.to_string()))
}

fn filter_contains(data: Jinja, field: String, sub: String) -> Output {
    filter_by("filterContains", &data, &field, &Match::Contains(sub))
}

fn filter_has_prefix(data: Jinja, field: String, prefix: String) -> Output {
    filter_by("filterHasPrefix", &data, &field, &Match::HasPrefix(prefix))
}

fn filter_has_suffix(data: Jinja, field: String, suffix: String) -> Output {
    filter_by("filterHasSuffix", &data, &field, &Match::HasSuffix(suffix))
}

fn filter_folded(data: Jinja, field: String, value: String) -> Output {
    filter_by("filterFolded", &data, &field, &Match::Folded(value))
}

fn filter_regexp(data: Jinja, field: String, pattern: String) -> Output {
    let m = Match::regexp(&pattern).map_err(lift)?;
    filter_by("filterRegexp", &data, &field, &m)
}

fn describe(data: Jinja) -> Result<String, Error> {
    Ok(tabula_render::describe(&model(&data)?))
}

fn select(data: Jinja, fields: Rest<String>) -> Result<String, Error> {
    select_styled(&data, &fields, Style::Plain)
}

fn selectalt(data: Jinja, fields: Rest<String>) -> Result<String, Error> {
    select_styled(&data, &fields, Style::Alt)
}

fn select_styled(data: &Jinja, fields: &[String], style: Style) -> Result<String, Error> {
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
    tabula_render::select(&model(data)?, &fields, style).map_err(lift)
}

/// Pretty-printed JSON, indented with tabs.
fn tojson(data: Jinja) -> Result<String, Error> {
    let value = model(&data)?;
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| json_error("cannot encode JSON", e))?;
    String::from_utf8(buf).map_err(|e| json_error("JSON output is not UTF-8", e))
}

fn json_error(msg: &'static str, err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg).with_source(err)
}

fn width_arg(name: &str, value: Option<i64>, default: usize) -> Result<usize, Error> {
    match value {
        None => Ok(default),
        Some(n) => usize::try_from(n).map_err(|_| {
            lift(tabula_reflect::Error::invalid(format!(
                "{name} must not be negative, got {n}"
            )))
        }),
    }
}

/// Reads `(min_width, tab_width, padding)` and the keyword arguments.
fn table_options(
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: &Kwargs,
) -> Result<TableOptions, Error> {
    let defaults = TableOptions::default();
    let mut opts = TableOptions::new(
        width_arg("min_width", min_width, defaults.min_width)?,
        width_arg("tab_width", tab_width, defaults.tab_width)?,
        width_arg("padding", padding, defaults.padding)?,
    );
    if let Some(widths) = kwargs.get::<Option<Vec<usize>>>("widths")? {
        opts = opts.with_widths(widths);
    }
    if let Some(max) = kwargs.get::<Option<usize>>("max_width")? {
        opts = opts.with_max_width(max);
    }
    if let Some(headers) = kwargs.get::<Option<Vec<String>>>("headers")? {
        opts = opts.with_headers(headers);
    }
    kwargs.assert_all_used()?;
    Ok(opts)
}

type Render = fn(&Value, &TableOptions, Style) -> tabula_reflect::Result<String>;

fn table_with(
    render: Render,
    style: Style,
    data: &Jinja,
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: &Kwargs,
) -> Result<String, Error> {
    let opts = table_options(min_width, tab_width, padding, kwargs)?;
    render(&model(data)?, &opts, style).map_err(lift)
}

fn tablex(
    data: Jinja,
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: Kwargs,
) -> Result<String, Error> {
    table_with(
        tabula_render::render_table,
        Style::Plain,
        &data,
        min_width,
        tab_width,
        padding,
        &kwargs,
    )
}

fn tablexalt(
    data: Jinja,
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: Kwargs,
) -> Result<String, Error> {
    table_with(
        tabula_render::render_table,
        Style::Alt,
        &data,
        min_width,
        tab_width,
        padding,
        &kwargs,
    )
}

fn htablex(
    data: Jinja,
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: Kwargs,
) -> Result<String, Error> {
    table_with(
        tabula_render::render_blocks,
        Style::Plain,
        &data,
        min_width,
        tab_width,
        padding,
        &kwargs,
    )
}

fn htablexalt(
    data: Jinja,
    min_width: Option<i64>,
    tab_width: Option<i64>,
    padding: Option<i64>,
    kwargs: Kwargs,
) -> Result<String, Error> {
    table_with(
        tabula_render::render_blocks,
        Style::Alt,
        &data,
        min_width,
        tab_width,
        padding,
        &kwargs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn env(cfg: &Config) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        register(&mut env, cfg);
        env
    }

    fn numbers() -> Jinja {
        to_jinja(Value::Seq(tabula_reflect::Seq::inferred(
            (1..=5).map(Value::Int).collect(),
        )))
    }

    #[test]
    fn disabled_functions_are_not_bound() {
        let env = env(&Config::new([Opt::Head]));
        let ok = env.render_str("{{ head(data) }}", context! { data => numbers() });
        assert_eq!(ok.unwrap(), "[1]");
        assert!(env
            .render_str("{{ tail(data) }}", context! { data => numbers() })
            .is_err());
    }

    #[test]
    fn functions_double_as_filters() {
        let env = env(&Config::default());
        let out = env
            .render_str(
                "{{ data | rows(1, 3) }} {{ rows(data, 1, 3) }}",
                context! { data => numbers() },
            )
            .unwrap();
        assert_eq!(out, "[2 3] [2 3]");
    }

    #[test]
    fn operator_errors_keep_their_source() {
        let env = env(&Config::default());
        let err = env
            .render_str("{{ tablex(data, -1) }}", context! { data => numbers() })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        let source = std::error::Error::source(&err)
            .and_then(|s| s.downcast_ref::<tabula_reflect::Error>());
        assert!(matches!(
            source,
            Some(tabula_reflect::Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn unknown_keyword_arguments_are_rejected() {
        let env = env(&Config::default());
        assert!(env
            .render_str("{{ tablex(data, colour='red') }}", context! { data => numbers() })
            .is_err());
    }

    #[test]
    fn bad_sort_direction() {
        let env = env(&Config::default());
        assert!(env
            .render_str("{{ sort(data, 'x', 3) }}", context! { data => numbers() })
            .is_err());
    }
}
