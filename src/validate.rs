//! Post-pass checks on the generated source

use crate::error::Error;
use crate::parser::patterns::{
    COMMENT_OR_BLANK_RE, IMPLICIT_NONE_RE, MODULE_IN_RE, PROGRAM_IN_RE, USE_OR_IMPORT_RE,
};
use crate::parser::LineMask;
use crate::Result;

/// A program unit header still waiting for its `implicit none`
#[derive(Debug)]
struct OpenUnit<'a> {
    name: &'a str,
    line: usize,
}

/// True if the statement on `line` continues on the next line
fn is_continued(line: &str) -> bool {
    let mask = LineMask::strings_and_comment(line);
    mask.masked().trim_end().ends_with('&')
}

/// Check that every `program` and `module` declares `implicit none`
///
/// Only blank lines, comments and `use`/`import` statements (with their
/// continuation lines) may sit between the header and `implicit none`. `file`
/// labels the diagnostic.
pub fn check_implicit_none(lines: &[String], file: &str) -> Result<()> {
    let mut open: Option<OpenUnit<'_>> = None;
    let mut continuation = false;

    for (idx, line) in lines.iter().enumerate() {
        if let Some(unit) = &open {
            if continuation {
                continuation = is_continued(line);
                continue;
            }
            if IMPLICIT_NONE_RE.is_match(line) {
                open = None;
            } else if COMMENT_OR_BLANK_RE.is_match(line) {
                continue;
            } else if USE_OR_IMPORT_RE.is_match(line) {
                continuation = is_continued(line);
                continue;
            } else {
                return Err(missing(file, unit));
            }
        }

        let header = PROGRAM_IN_RE
            .captures(line)
            .or_else(|| MODULE_IN_RE.captures(line));
        if let Some(caps) = header {
            if let Some(name) = caps.get(1) {
                tracing::trace!(unit = name.as_str(), line = idx + 1, "program unit header");
                open = Some(OpenUnit {
                    name: name.as_str(),
                    line: idx + 1,
                });
                continuation = false;
            }
        }
    }

    match &open {
        Some(unit) => Err(missing(file, unit)),
        None => Ok(()),
    }
}

fn missing(file: &str, unit: &OpenUnit<'_>) -> anyhow::Error {
    Error::MissingImplicitNone {
        file: file.to_string(),
        unit: unit.name.to_string(),
        line: unit.line,
    }
    .into()
}
