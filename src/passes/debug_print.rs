//! Debug-print shorthand
//!
//! ```text
//! !debug i, "step", norm(v(1:3), 2)
//! ```
//!
//! becomes
//!
//! ```text
//! print *, "__FILE__:__LINE__: ", "i = ", i, "step", "norm(v(1:3), 2) = ", norm(v(1:3), 2)
//! ```
//!
//! The placeholders are expanded later by the scope-name pass.

use crate::parser::patterns::DEBUG_PRINT_RE;
use crate::passes::scope_names::Placeholders;

/// One argument of a `!debug` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugArg {
    /// A quoted literal, printed as is
    Literal(String),
    /// Any other expression, printed with a `"expr = "` label
    Expr(String),
}

impl DebugArg {
    fn classify(text: &str) -> Self {
        let text = text.trim();
        let quoted = text.len() >= 2
            && ((text.starts_with('"') && text.ends_with('"'))
                || (text.starts_with('\'') && text.ends_with('\'')));
        if quoted {
            DebugArg::Literal(text.to_string())
        } else {
            DebugArg::Expr(text.to_string())
        }
    }

    fn render(&self) -> String {
        match self {
            DebugArg::Literal(text) => text.clone(),
            DebugArg::Expr(expr) => format!("\"{} = \", {expr}", expr.replace('"', "\"\"")),
        }
    }
}

/// Splitter state: where the scanner currently is inside an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    InString(char),
}

/// Split a directive's argument list on top-level commas
///
/// Commas inside parentheses or quotes do not split; the pending argument is
/// buffered until the parenthesis balance is back to zero.
#[must_use]
pub fn split_debug_args(args: &str) -> Vec<DebugArg> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Code;
    let mut depth = 0usize;

    for c in args.chars() {
        match state {
            ScanState::InString(quote) => {
                if c == quote {
                    state = ScanState::Code;
                }
                current.push(c);
            }
            ScanState::Code => match c {
                '"' | '\'' => {
                    state = ScanState::InString(c);
                    current.push(c);
                }
                '(' | '[' => {
                    depth += 1;
                    current.push(c);
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    flush(&mut current, &mut out);
                }
                _ => current.push(c),
            },
        }
    }
    flush(&mut current, &mut out);
    out
}

fn flush(current: &mut String, out: &mut Vec<DebugArg>) {
    if !current.trim().is_empty() {
        out.push(DebugArg::classify(current));
    }
    current.clear();
}

/// Rewrite a `!debug` directive into a labeled `print` statement
#[must_use]
pub fn expand_debug_print(line: &str, placeholders: &Placeholders) -> Option<String> {
    let caps = DEBUG_PRINT_RE.captures(line)?;
    let indent = &caps[1];
    let args = split_debug_args(&caps[2]);
    if args.is_empty() {
        return None;
    }

    let mut out = format!(
        "{indent}print *, \"{}:{}: \"",
        placeholders.file, placeholders.line
    );
    for arg in &args {
        out.push_str(", ");
        out.push_str(&arg.render());
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(line: &str) -> Option<String> {
        expand_debug_print(line, &Placeholders::default())
    }

    #[test]
    fn test_simple_arguments() {
        assert_eq!(
            expand("  !debug i, j").as_deref(),
            Some(r#"  print *, "__FILE__:__LINE__: ", "i = ", i, "j = ", j"#)
        );
    }

    #[test]
    fn test_string_arguments_pass_through() {
        assert_eq!(
            expand("!debug 'step', n, \"done\"").as_deref(),
            Some(r#"print *, "__FILE__:__LINE__: ", 'step', "n = ", n, "done""#)
        );
    }

    #[test]
    fn test_parenthesized_argument_kept_whole() {
        assert_eq!(
            split_debug_args("norm(v(1:3), 2), x"),
            vec![
                DebugArg::Expr("norm(v(1:3), 2)".to_string()),
                DebugArg::Expr("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_comma_inside_string() {
        assert_eq!(
            split_debug_args("'a, b', c"),
            vec![
                DebugArg::Literal("'a, b'".to_string()),
                DebugArg::Expr("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_label_escapes_double_quotes() {
        assert_eq!(
            expand("!debug trim(\"x\")").as_deref(),
            Some(r#"print *, "__FILE__:__LINE__: ", "trim(""x"") = ", trim("x")"#)
        );
    }

    #[test]
    fn test_array_constructor_argument() {
        assert_eq!(
            split_debug_args("[1, 2], y"),
            vec![
                DebugArg::Expr("[1, 2]".to_string()),
                DebugArg::Expr("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_not_a_directive() {
        assert_eq!(expand("! debug i"), None);
        assert_eq!(expand("!debugging is fun"), None);
        assert_eq!(expand("x = 1 !debug x"), None);
        assert_eq!(expand("!debug   "), None);
    }
}
