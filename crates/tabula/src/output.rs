//! Running a template script against a data value.

use std::io::Write;

use log::debug;
use minijinja::{context, Environment, UndefinedBehavior};
use tabula_reflect::{Reflect, Value};

use crate::config::Config;
use crate::error::Result;
use crate::functions;
use crate::objects::to_jinja;

/// Renders `script` with `data` bound to the variable `data` and writes the
/// result to `sink`.
///
/// `cfg` selects the available functions; `None` enables every builtin.
/// Nothing is written unless rendering succeeds.
///
/// ```rust
/// use tabula::output_to_template;
///
/// let data = vec![3u32, 1, 2];
/// let mut out = Vec::new();
/// output_to_template(&mut out, "nums", "{{ data | length }} {{ data | head }}", &data, None)?;
/// assert_eq!(out, b"3 [3]");
/// # Ok::<(), tabula::Error>(())
/// ```
pub fn output_to_template<W, T>(
    mut sink: W,
    name: &str,
    script: &str,
    data: &T,
    cfg: Option<&Config>,
) -> Result<()>
where
    W: Write,
    T: Reflect + ?Sized,
{
    let rendered = render_to_string(name, script, data, cfg)?;
    sink.write_all(rendered.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Like [`output_to_template`], returning the output.
pub fn render_to_string<T>(name: &str, script: &str, data: &T, cfg: Option<&Config>) -> Result<String>
where
    T: Reflect + ?Sized,
{
    render_value(name, script, data.reflect(), cfg)
}

/// Renders against an already-built [`Value`], such as one read from JSON.
pub fn render_value(name: &str, script: &str, data: Value, cfg: Option<&Config>) -> Result<String> {
    let default;
    let cfg = match cfg {
        Some(cfg) => cfg,
        None => {
            default = Config::default();
            &default
        }
    };
    debug!(
        "rendering template '{name}' with {} builtin and {} custom functions",
        cfg.enabled().len(),
        cfg.custom_fns().len()
    );

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    functions::register(&mut env, cfg);
    env.add_template_owned(name.to_string(), script.to_string())?;

    let tmpl = env.get_template(name)?;
    let out = tmpl.render(context! { data => to_jinja(data) })?;
    debug!("template '{name}' produced {} bytes", out.len());
    Ok(out)
}
