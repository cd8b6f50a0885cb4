//! Line-sequence transforms
//!
//! Each pass maps the whole line sequence to a new one of the same length. Most
//! passes rewrite one line at a time; [`block_comment`] and [`scope_names`]
//! carry state from line to line.

pub mod block_comment;
pub mod compound_assign;
pub mod debug_print;
pub mod guarded_block;
pub mod member_access;
pub mod profiling;
pub mod scope_names;
pub mod subsidiary_call;

pub use block_comment::{comment_out_blocks, CommentDepth};
pub use scope_names::{expand_scope_names, Placeholders, ScopeStack};

/// The passes, in the order the pipeline runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Profiling,
    SubsidiaryCall,
    BlockComment,
    CompoundAssign,
    JustOnce,
    SkipCounter,
    DebugPrint,
    Alias,
    ScopeNames,
    MemberAccess,
}

impl Pass {
    /// Profiling markers must be joined by the subsidiary-call pass, `!debug` and
    /// aliases may produce scope placeholders, and member access sees final text.
    pub const ORDER: [Pass; 10] = [
        Pass::Profiling,
        Pass::SubsidiaryCall,
        Pass::BlockComment,
        Pass::CompoundAssign,
        Pass::JustOnce,
        Pass::SkipCounter,
        Pass::DebugPrint,
        Pass::Alias,
        Pass::ScopeNames,
        Pass::MemberAccess,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Pass::Profiling => "profiling",
            Pass::SubsidiaryCall => "subsidiary_call",
            Pass::BlockComment => "block_comment",
            Pass::CompoundAssign => "compound_assign",
            Pass::JustOnce => "just_once",
            Pass::SkipCounter => "skip_counter",
            Pass::DebugPrint => "debug_print",
            Pass::Alias => "alias",
            Pass::ScopeNames => "scope_names",
            Pass::MemberAccess => "member_access",
        }
    }
}

/// Apply a single-line rewrite to every line; `None` keeps the line as is
pub fn map_lines<F>(lines: Vec<String>, rewrite: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    lines
        .into_iter()
        .map(|line| rewrite(&line).unwrap_or(line))
        .collect()
}
