//! Error types and result aliases for efpp.
//!
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//! - [`Error`]: The fatal conditions a preprocessing run can hit. They travel inside
//!   `anyhow::Error` and can be recovered with `downcast_ref::<Error>()`.

use std::path::PathBuf;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A rule file line that matches none of the recognized rule shapes
    #[error("{}:{line}: unknown alias rule pattern: {text:?}", path.display())]
    AliasSyntax {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("{}:{line}: alias rule has an empty pattern", path.display())]
    EmptyAliasPattern { path: PathBuf, line: usize },

    /// An `end program|module|subroutine|function` with no open scope left
    #[error("line {line}: `{text}` closes a scope that was never opened")]
    ScopeUnderflow { line: usize, text: String },

    #[error("{file}: `implicit none` is missing in {unit} (line {line})")]
    MissingImplicitNone {
        file: String,
        unit: String,
        line: usize,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },
}
