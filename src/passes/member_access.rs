//! Dotted member access
//!
//! Rewrites `a.b` into `a%b`:
//!
//! ```text
//! call mhd.sub.update(mhd.main)   =>   call mhd%sub%update(mhd%main)
//! ```
//!
//! Dots are left alone inside strings and comments, in numeric literals
//! (`3.141592`, `-1.e-14`), in intrinsic operators (`.and.`, `.not.`) and in
//! whitespace-bounded user-defined operators (`a .cross. b`).

use crate::parser::patterns::MEMBER_ACCESS_RE;
use crate::parser::LineMask;

/// Byte offset of the first member-access dot of `line`, if any
#[must_use]
pub fn find_member_dot(line: &str) -> Option<usize> {
    let mask = LineMask::for_member_access(line);
    MEMBER_ACCESS_RE
        .captures(mask.masked())
        .and_then(|caps| caps.get(1))
        .map(|m| m.end())
}

/// Rewrite every member-access dot of `line` into `separator`
///
/// One dot is rewritten per round and the line is masked and searched again, so
/// replacements happen strictly left to right. A `.` separator leaves the line as is.
#[must_use]
pub fn rewrite_member_access(line: &str, separator: char) -> String {
    let mut out = line.to_string();
    if separator == '.' {
        return out;
    }
    let mut sep_buf = [0u8; 4];
    let sep: &str = separator.encode_utf8(&mut sep_buf);
    while let Some(pos) = find_member_dot(&out) {
        out.replace_range(pos..=pos, sep);
    }
    out
}

/// Apply [`rewrite_member_access`] to every line
#[must_use]
pub fn rewrite_lines(lines: Vec<String>, separator: char) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if line.contains('.') {
                rewrite_member_access(&line, separator)
            } else {
                line
            }
        })
        .collect()
}
