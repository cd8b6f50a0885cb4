//! Nested block comments
//!
//! A region between two identical `===` rule lines is commented out. Regions nest
//! when a rule of a different indent, width or trailing whitespace appears inside
//! an open region:
//!
//! ```text
//! abc                      abc
//! =======                  !=======
//! def            =>        !def
//!   ======                 !!  ======
//!   ghi                    !!  ghi
//!   ======                 !!  ======
//! =======                  !=======
//! jkl                      jkl
//! ```

use crate::parser::patterns::COMMENT_DELIM_RE;

/// Comment marker prepended once per nesting level
pub const COMMENT_MARKER: char = '!';

/// Extent of a `===` rule line: leading spaces, `=` run, trailing whitespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DelimSpan {
    indent: usize,
    width: usize,
    trailing: usize,
}

/// Open comment regions, innermost last
#[derive(Debug, Default, Clone)]
pub struct CommentDepth {
    open: Vec<DelimSpan>,
}

impl CommentDepth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Feed one line, returning it with the comment prefix for its depth
    pub fn process_line(&mut self, line: &str) -> String {
        let mut closing = false;
        if let Some(caps) = COMMENT_DELIM_RE.captures(line) {
            let span = DelimSpan {
                indent: caps.get(1).map_or(0, |m| m.len()),
                width: caps.get(2).map_or(0, |m| m.len()),
                trailing: caps.get(3).map_or(0, |m| m.len()),
            };
            if self.open.last() == Some(&span) {
                closing = true;
            } else {
                self.open.push(span);
            }
        }

        let depth = self.open.len();
        let out = if depth > 0 {
            let mut s = String::with_capacity(line.len() + depth);
            s.extend(std::iter::repeat(COMMENT_MARKER).take(depth));
            s.push_str(line);
            s
        } else {
            line.to_string()
        };

        if closing {
            self.open.pop();
        }
        out
    }
}

/// Comment out every nested `===` region of `lines`
///
/// `state` is reset first; after the call it holds whatever was left open at the
/// end of input (depth 0 for balanced input).
pub fn comment_out_blocks(lines: Vec<String>, state: &mut CommentDepth) -> Vec<String> {
    state.open.clear();
    lines.iter().map(|line| state.process_line(line)).collect()
}
