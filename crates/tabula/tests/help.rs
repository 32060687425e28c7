use tabula::{
    generate_usage_decorated, template_function_help, template_function_help_single,
    template_function_names, usage_decorated_for, usage_for, Config, Error, Opt, Recordable,
};

fn trim() -> minijinja::Value {
    minijinja::Value::from_function(|s: String| s.trim().to_string())
}

fn cols_rows_trim() -> Config {
    let mut cfg = Config::new([Opt::Cols, Opt::Rows]);
    cfg.add_custom_fn(
        trim(),
        "trim",
        "- trim trims leading and trailing whitespace from string",
    )
    .unwrap();
    cfg
}

#[derive(Recordable)]
#[record(rename_all = "PascalCase")]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Recordable)]
#[record(rename_all = "PascalCase")]
struct Documented {
    /// This is an int
    x: i32,
    #[record(doc = "This is a string")]
    y: String,
    #[record(skip)]
    #[allow(dead_code)]
    hidden: f64,
}

#[test]
fn names_list_builtins_then_custom() {
    assert_eq!(template_function_names(&cols_rows_trim()), ["cols", "rows", "trim"]);
}

#[test]
fn help_single() {
    let cfg = cols_rows_trim();
    assert_eq!(
        template_function_help_single("cols", &cfg).unwrap(),
        format!("{}\n", Opt::Cols.help())
    );
    assert_eq!(
        template_function_help_single("trim", &cfg).unwrap(),
        "- trim trims leading and trailing whitespace from string\n"
    );
    assert!(Opt::Cols
        .help()
        .starts_with("- 'cols' can be used to extract certain columns from a table"));
}

#[test]
fn help_single_rejects_disabled_functions() {
    let cfg = cols_rows_trim();
    assert!(matches!(
        template_function_help_single("sort", &cfg),
        Err(Error::UnknownFunction(n)) if n == "sort"
    ));
}

#[test]
fn help_lists_every_enabled_function() {
    let help = template_function_help(&cols_rows_trim());
    assert_eq!(
        help,
        format!(
            "{}\n\n{}\n\n- trim trims leading and trailing whitespace from string\n\n",
            Opt::Cols.help(),
            Opt::Rows.help()
        )
    );
}

#[test]
fn usage_decorated() {
    let cfg = Config::new([Opt::Cols]);
    let help = usage_decorated_for::<Vec<Point>>("-f", &cfg);
    assert_eq!(
        help,
        format!(
            "The template passed to the --f option operates on a\n\n\
             Vec<struct Point {{\n\tX i32\n\tY i32\n}}>\n\n\
             Some new functions have been added to the template language\n\n\
             {}\n\n",
            Opt::Cols.help()
        )
    );
}

#[test]
fn usage_decorated_strips_any_dashes() {
    let cfg = Config::new([Opt::Cols]);
    let ty = <Point as tabula::Reflect>::reflect_type();
    assert!(generate_usage_decorated("--format", &ty, &cfg)
        .starts_with("The template passed to the --format option"));
    assert!(generate_usage_decorated("format", &ty, &cfg)
        .starts_with("The template passed to the --format option"));
}

#[test]
fn usage_undecorated_shows_docs_and_hides_skipped_fields() {
    assert_eq!(
        usage_for::<Documented>(),
        "struct Documented {\n\tX i32    // This is an int\n\tY String // This is a string\n}"
    );
}
