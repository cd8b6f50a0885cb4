//! Command-line interface for efpp.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// eFortran source to preprocess; prompted for when absent
    pub input: Option<PathBuf>,

    /// Explicit configuration file instead of `./efpp.toml`
    pub config: Option<PathBuf>,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("efpp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Macro preprocessor for eFortran sources; writes plain Fortran to stdout")
        .arg(
            Arg::new("input")
                .help("eFortran source file")
                .value_name("FILE")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file [default: ./efpp.toml if present]")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        input: matches.get_one::<PathBuf>("input").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
    }
}
