//! Runs a tabula template against JSON data.
//!
//! ```text
//! $ echo '[{"Name": "Marcus", "Age": 63}]' | tabula --script '{{ tablex(data) }}'
//! Name    Age
//! Marcus  63
//! ```

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tabula::{help, Config, Opt, Value};

/// Project, filter, sort and print JSON tables with a template.
#[derive(Parser)]
#[command(name = "tabula", version)]
struct Cli {
    /// JSON input file. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Template text. The input is bound to `data`.
    #[arg(short, long, value_name = "TEXT", conflicts_with = "script_file")]
    script: Option<String>,

    /// Read the template from a file.
    #[arg(short = 'f', long, value_name = "FILE")]
    script_file: Option<PathBuf>,

    /// Comma-separated functions to enable (default: all).
    #[arg(long, value_name = "NAME,...", value_delimiter = ',')]
    functions: Vec<Opt>,

    /// YAML file of the form `functions: [cols, rows]`.
    #[arg(long, value_name = "FILE", conflicts_with = "functions")]
    config: Option<PathBuf>,

    /// Print the names of the enabled functions and exit.
    #[arg(long)]
    list_functions: bool,

    /// Print the help text of one function and exit.
    #[arg(long, value_name = "NAME")]
    help_function: Option<String>,

    /// Print the type of the input data and exit.
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = match (&cli.config, cli.functions.is_empty()) {
        (Some(path), _) => Config::from_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        (None, true) => Config::default(),
        (None, false) => Config::new(cli.functions.iter().copied()),
    };

    if cli.list_functions {
        for name in help::template_function_names(&cfg) {
            println!("{name}");
        }
        return Ok(());
    }
    if let Some(name) = &cli.help_function {
        print!("{}", help::template_function_help_single(name, &cfg)?);
        return Ok(());
    }

    let data = read_data(cli.data.as_ref())?;
    if cli.describe {
        println!("{}", help::generate_usage_undecorated(&data.type_of()));
        return Ok(());
    }

    let (name, script) = match (&cli.script, &cli.script_file) {
        (Some(text), _) => ("script".to_string(), text.clone()),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read script {}", path.display()))?;
            (path.display().to_string(), text)
        }
        (None, None) => bail!("one of --script or --script-file is required"),
    };

    let out = tabula::render_value(&name, &script, data, Some(&cfg))?;
    print!("{out}");
    Ok(())
}

fn read_data(path: Option<&PathBuf>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            text
        }
    };
    let json: serde_json::Value = serde_json::from_str(&text).context("input is not valid JSON")?;
    Ok(Value::from_json(json)?)
}
