/// Regex patterns for eFortran notations
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// Keyword patterns are case-insensitive like Fortran itself; macro markers
/// (`==<just_once>==`, `!{...}{{STT}}`, `-call`) are matched verbatim.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str, case_insensitive: bool) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

fn keyword_re(pattern: &str) -> Regex {
    build_re(pattern, true)
}

fn marker_re(pattern: &str) -> Regex {
    build_re(pattern, false)
}

// Anchor pattern
const SOL_STR: &str = r"^\s*"; // Start of line
const NAME_STR: &str = r"[a-zA-Z][a-zA-Z_0-9]*";

// ===== BLOCK COMMENTS =====

/// A line made of `===...` only; group 1 is the indent, group 2 the rule
pub static COMMENT_DELIM_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^( *)(={3,})(\s*)$"));

// ===== PROGRAM UNITS =====

pub static PROGRAM_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}program\s+({NAME_STR})\b")));
/// `module <name>`; `module procedure` / `module subroutine` are excluded by the caller
pub static MODULE_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}module\s+({NAME_STR})\s*(?:!.*)?$")));
const PREFIX_STR: &str = r"(?:(?:pure|impure|elemental|recursive|non_recursive|module)\s+)*";
const TYPE_SPEC_STR: &str =
    r"(?:(?:integer|real|double\s+precision|complex|logical|character|type|class)\s*(?:\([^)]*\))?\s+)?";

/// `[prefixes] [type-spec] subroutine|function <name>`; group 1 is the keyword, group 2 the name
pub static ROUTINE_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_re(&format!(
        r"{SOL_STR}{PREFIX_STR}{TYPE_SPEC_STR}{PREFIX_STR}(subroutine|function)\s+({NAME_STR})(?:[\s(]|$)"
    ))
});
pub static INTERFACE_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_re(&format!(r"{SOL_STR}(?:abstract\s+)?interface(?:\s|$)"))
});

pub static PROGRAM_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}end\s*program\b")));
pub static MODULE_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}end\s*module\b")));
pub static ROUTINE_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}end\s*(?:subroutine|function)\b")));
pub static INTERFACE_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}end\s*interface\b")));

// ===== VALIDATION =====

pub static IMPLICIT_NONE_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}implicit\s+none\b")));
/// Statements allowed between a program unit header and `implicit none`
pub static USE_OR_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(&format!(r"{SOL_STR}(?:use|import)\b")));
pub static COMMENT_OR_BLANK_RE: LazyLock<Regex> = LazyLock::new(|| marker_re(r"^\s*(?:!.*)?$"));

// ===== MEMBER ACCESS =====

/// Non-greedy quoted spans, applied double quotes first
pub static DOUBLE_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| marker_re(r#""[^"]*""#));
pub static SINGLE_QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| marker_re(r"'[^']*'"));

/// Numeric literal not glued to an identifier; group 1 is the literal
pub static NUMBER_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    marker_re(r"(?:^|[^\w.])([+-]?[0-9]+\.[0-9]*(?:[eEdD][+-]?[0-9]+)?)")
});

/// Intrinsic dot operators and logical constants, wherever they appear
pub static INTRINSIC_DOT_OP_RE: LazyLock<Regex> = LazyLock::new(|| {
    keyword_re(r"\.(?:and|or|not|eqv|neqv|eq|ne|lt|le|gt|ge|true|false)\.")
});

/// User-defined `.op.` token bounded by whitespace (or line ends); group 1 is the token
pub static SURROUNDED_DOT_OP_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"(?:^|\s)(\.[a-zA-Z_0-9]+\.)(?:\s|$)"));

/// `ident[(index)].ident`; group 1 ends right before the separator dot
pub static MEMBER_ACCESS_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"([a-zA-Z_]\w*(?:\([^()]*\))?)\.[a-zA-Z_]"));

// ===== SINGLE-LINE MACROS =====

/// `<prefix><target> <op>= <rhs>` with op in {+, -, *}
///
/// The target is a name with optional member parts and one index group, so a
/// space inside `a(i, j)` does not split it. The prefix ends on a non-name byte.
pub static COMPOUND_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    marker_re(r"^((?:.*[^\w%.])?)([A-Za-z_][\w%.]*(?:\([^()]*\))?)\s+([+\-*])=\s+(.*)$")
});

pub static JUST_ONCE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^([^=]*)=+<just_once>=+(.*)$"));
pub static JUST_ONCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^([^=]*)=+</just_once>=+(.*)$"));

pub static SKIP_BEGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    marker_re(&format!(r"^([^=]*)=+<skip\s+({NAME_STR}):\s*([0-9]+)>=+(.*)$"))
});
pub static SKIP_END_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(&format!(r"^([^=]*)=+</skip\s+({NAME_STR})>=+(.*)$")));

pub static PROFILE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*)\s+!\{(.{6})\}\{\{STT\}\}"));
pub static PROFILE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*)\s+!\{(.{6})\}\{\{END\}\}"));
pub static PROFILE_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*)\s+!\{\{count\}\}"));
pub static PROFILE_PRINT_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*)\s+!\{\{print\}\}"));
pub static PROFILE_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*)\s+!\{(.{6})\}\{(.{6})\}"));

pub static DEBUG_PRINT_RE: LazyLock<Regex> =
    LazyLock::new(|| keyword_re(r"^(\s*)!debug\s+(.*?)\s*$"));

pub static SUBSIDIARY_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r"^(.*) -call +([a-zA-Z].*)$"));

// ===== ALIAS RULE FILE =====

pub static ALIAS_BLANK_RE: LazyLock<Regex> = LazyLock::new(|| marker_re(r"^\s*$"));
pub static ALIAS_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| marker_re(r"^\s*#"));
/// `"left" => "right"`
pub static ALIAS_BOTH_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r#"^\s*"(.*?)"\s*=>\s*"(.*?)"\s*(?:#.*)?$"#));
/// `"left" =>`
pub static ALIAS_LEFT_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r#"^\s*"(.*?)"\s*=>\s*(?:#.*)?$"#));
/// `=> "right"`
pub static ALIAS_RIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r#"^\s*=>\s*"(.*?)"\s*(?:#.*)?$"#));
/// A lone `"text"`; left or right side depending on what is pending
pub static ALIAS_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| marker_re(r#"^\s*"(.*?)"\s*(?:#.*)?$"#));
