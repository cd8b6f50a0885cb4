//! Compound assignment operators
//!
//! ```text
//! val += aa                 =>  val = val + aa
//! if (xyz>0) xyz *= 2       =>  if (xyz>0) xyz = xyz * 2
//! val /= 2                  =>  (unchanged, `/=` means "not equal")
//! ```

use crate::parser::patterns::COMPOUND_ASSIGN_RE;
use crate::parser::LineMask;

/// Expand `target op= rhs`, or `None` when the line has no compound assignment
///
/// The pattern is matched on the string/comment-masked line so operators inside
/// literals and comments are ignored; the pieces are then cut from the original.
#[must_use]
pub fn expand_compound_assign(line: &str) -> Option<String> {
    let mask = LineMask::strings_and_comment(line);
    let caps = COMPOUND_ASSIGN_RE.captures(mask.masked())?;

    let prefix = caps.get(1).map_or("", |m| &line[m.range()]);
    let target = &line[caps.get(2)?.range()];
    let op = &line[caps.get(3)?.range()];
    let rhs = &line[caps.get(4)?.range()];

    Some(format!("{prefix}{target} = {target} {op} {rhs}"))
}
