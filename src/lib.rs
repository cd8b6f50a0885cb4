//! efpp - macro preprocessor for eFortran
//!
//! Rewrites eFortran sources into plain Fortran through a fixed sequence of
//! line passes: nested block comments, scope-name placeholders, member-access
//! dots, compound assignment, profiling annotations, debug prints, guarded
//! blocks and user-defined aliases.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod alias;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod passes;
pub mod process;
pub mod validate;

// Re-export commonly used types
pub use alias::{AliasRule, AliasTable};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{Error, Result};
pub use process::{preprocess_file, preprocess_str, Pipeline};
