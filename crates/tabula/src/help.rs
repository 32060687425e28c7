//! Help and usage text for the template functions.

use tabula_reflect::{Reflect, Type};

use crate::config::Config;
use crate::error::{Error, Result};

/// Names of the enabled functions: builtins in canonical order, then custom
/// functions in registration order.
///
/// ```rust
/// use tabula::{template_function_names, Config, Opt};
///
/// let cfg = Config::new([Opt::Rows, Opt::Cols]);
/// assert_eq!(template_function_names(&cfg), ["cols", "rows"]);
/// ```
pub fn template_function_names(cfg: &Config) -> Vec<String> {
    cfg.enabled()
        .iter()
        .map(|opt| opt.template_name().to_string())
        .chain(cfg.custom_fns().iter().map(|f| f.name.clone()))
        .collect()
}

/// Help for every enabled function, each followed by a blank line.
pub fn template_function_help(cfg: &Config) -> String {
    let mut out = String::new();
    for help in helps(cfg) {
        out.push_str(help);
        out.push_str("\n\n");
    }
    out
}

/// Help for one enabled function, followed by a newline.
pub fn template_function_help_single(name: &str, cfg: &Config) -> Result<String> {
    let builtin = cfg
        .enabled()
        .iter()
        .find(|opt| opt.template_name() == name)
        .map(|opt| opt.help());
    let custom = || {
        cfg.custom_fns()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.help.as_str())
    };
    builtin
        .or_else(custom)
        .map(|help| format!("{help}\n"))
        .ok_or_else(|| Error::UnknownFunction(name.to_string()))
}

/// The declaration of `ty`, with field documentation.
pub fn generate_usage_undecorated(ty: &Type) -> String {
    tabula_render::describe_type(ty, true)
}

/// A usage block for a command line option whose argument is a template
/// run against values of type `ty`.
pub fn generate_usage_decorated(option: &str, ty: &Type, cfg: &Config) -> String {
    format!(
        "The template passed to the --{} option operates on a\n\n{}\n\n\
         Some new functions have been added to the template language\n\n{}",
        option.trim_start_matches('-'),
        generate_usage_undecorated(ty),
        template_function_help(cfg),
    )
}

/// [`generate_usage_undecorated`] for a Rust type.
pub fn usage_for<T: Reflect + ?Sized>() -> String {
    generate_usage_undecorated(&T::reflect_type())
}

/// [`generate_usage_decorated`] for a Rust type.
pub fn usage_decorated_for<T: Reflect + ?Sized>(option: &str, cfg: &Config) -> String {
    generate_usage_decorated(option, &T::reflect_type(), cfg)
}

fn helps(cfg: &Config) -> impl Iterator<Item = &str> {
    cfg.enabled()
        .iter()
        .map(|opt| opt.help())
        .chain(cfg.custom_fns().iter().map(|f| f.help.as_str()))
}
