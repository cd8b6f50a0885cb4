//! efpp - eFortran macro preprocessor

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use efpp::process::preprocess_file;
use efpp::{parse_args, AliasTable, CliArgs, Config, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EFPP_LOG";

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args();

    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt_filename()?,
    };
    let config = build_config(&args)?;
    let aliases = AliasTable::load(&config)?;
    tracing::debug!(rules = aliases.len(), "alias table ready");

    let file = File::open(&input).with_context(|| format!("failed to open {}", input.display()))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    preprocess_file(
        BufReader::new(file),
        &mut out,
        &config,
        &aliases,
        &input.display().to_string(),
    )
}

/// Logs go to stderr so stdout carries only the generated source
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn build_config(args: &CliArgs) -> Result<Config> {
    if let Some(path) = &args.config {
        tracing::debug!(path = %path.display(), "using explicit config file");
        return Config::from_toml_file(path);
    }
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    Config::from_directory(&cwd)
}

/// Ask for the source file on stdin when none was given on the command line
fn prompt_filename() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "enter filename_in name > ")?;
    stdout.flush()?;

    let mut name = String::new();
    io::stdin().lock().read_line(&mut name)?;
    let name = name.trim();
    if name.is_empty() {
        bail!("no input file given");
    }
    Ok(PathBuf::from(name))
}
