//! Alias rules: literal find/replace pairs applied to every line
//!
//! The table is seeded with built-in shorthands and extended from a rule file
//! (`efpp_alias.list`):
//!
//! ```text
//! # since there is no typedef in fortran.
//!      "type(sfield_t)"
//!   => "real(DR), dimension(0:NXPP1,0:NYPP1,0:NZPP1)"
//!
//!      "do i bulk"  => "do i = 1 , NXPP"    # one line works too
//!
//!      "do i full" =>
//!      "do i = 0 , NXPP1"
//! ```
//!
//! Rules are applied in table order, each as a replace-all, so a later rule sees
//! the text produced by earlier ones.

use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::error::Error;
use crate::parser::patterns::{
    ALIAS_BLANK_RE, ALIAS_BOTH_RE, ALIAS_COMMENT_RE, ALIAS_LEFT_RE, ALIAS_QUOTED_RE, ALIAS_RIGHT_RE,
};
use crate::Result;

/// Built-in rules, applied before any user rule
const BUILTIN_RULES: &[(&str, &str)] = &[
    (" inte(SI)", " integer(SI)"),
    (" inte(DI)", " integer(DI)"),
    (" char(len=", " character(len="),
    (" <in> ", ", intent(in) "),
    (" <out> ", ", intent(out) "),
    (" <io> ", ", intent(inout) "),
    (" <optin> ", ", intent(in), optional "),
    (" <optout> ", ", intent(out), optional "),
    (" <optio> ", ", intent(inout), optional "),
    (" <const> ", ", parameter "),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    pub pattern: String,
    pub replacement: String,
}

/// Ordered alias rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    /// An empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding only the built-in type and intent shorthands
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for (pattern, replacement) in BUILTIN_RULES {
            table.insert(pattern, replacement);
        }
        table
    }

    /// Build the table a run uses: built-ins (if enabled) plus the rule file
    ///
    /// A missing rule file is not an error; the run continues with the built-ins.
    pub fn load(config: &Config) -> Result<Self> {
        let mut table = if config.builtin_aliases {
            Self::with_builtins()
        } else {
            Self::new()
        };
        if config.alias_file.is_file() {
            table.extend_from_file(&config.alias_file)?;
        } else {
            tracing::debug!(
                path = %config.alias_file.display(),
                "no alias rule file, using built-in rules only"
            );
        }
        Ok(table)
    }

    /// Add a rule at the end, or replace the replacement of an existing pattern in place
    pub fn insert(&mut self, pattern: &str, replacement: &str) {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.pattern == pattern) {
            rule.replacement = replacement.to_string();
        } else {
            self.rules.push(AliasRule {
                pattern: pattern.to_string(),
                replacement: replacement.to_string(),
            });
        }
    }

    /// Append the rules of a rule file
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read alias rules from {}", path.display()))?;
        self.extend_from_str(&text, path)
    }

    /// Append rules parsed from rule-file text; `origin` labels error messages
    pub fn extend_from_str(&mut self, text: &str, origin: &Path) -> Result<()> {
        for rule in parse_alias_rules(text, origin)? {
            self.insert(&rule.pattern, &rule.replacement);
        }
        Ok(())
    }

    #[must_use]
    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule, in order, to one line
    #[must_use]
    pub fn apply(&self, line: &str) -> String {
        let mut out = line.to_string();
        for rule in &self.rules {
            if out.contains(&rule.pattern) {
                out = out.replace(&rule.pattern, &rule.replacement);
            }
        }
        out
    }

    /// Apply the table to every line
    #[must_use]
    pub fn apply_lines(&self, lines: Vec<String>) -> Vec<String> {
        lines.into_iter().map(|line| self.apply(&line)).collect()
    }
}

/// Half of a rule seen so far, with the line it came from
#[derive(Debug, Default)]
struct PendingRule {
    left: Option<(String, usize)>,
    right: Option<String>,
}

impl PendingRule {
    fn set_left(&mut self, left: &str, line: usize, origin: &Path) -> Result<()> {
        if left.is_empty() {
            return Err(Error::EmptyAliasPattern {
                path: origin.to_path_buf(),
                line,
            }
            .into());
        }
        self.left = Some((left.to_string(), line));
        Ok(())
    }

    fn take_complete(&mut self) -> Option<AliasRule> {
        if self.left.is_some() && self.right.is_some() {
            let (pattern, _) = self.left.take()?;
            let replacement = self.right.take()?;
            return Some(AliasRule {
                pattern,
                replacement,
            });
        }
        None
    }

    fn warn_if_dangling(&self, origin: &Path) {
        if let Some((left, line)) = &self.left {
            tracing::warn!(
                path = %origin.display(),
                line,
                pattern = %left,
                "alias rule has no replacement, ignored"
            );
        }
        if let Some(right) = &self.right {
            tracing::warn!(
                path = %origin.display(),
                replacement = %right,
                "alias replacement has no pattern, ignored"
            );
        }
    }
}

/// Parse rule-file text into rules, in file order
///
/// Fails with [`Error::AliasSyntax`] on the first line that matches no rule
/// shape and with [`Error::EmptyAliasPattern`] on an empty left-hand side.
pub fn parse_alias_rules(text: &str, origin: &Path) -> Result<Vec<AliasRule>> {
    let mut rules = Vec::new();
    let mut pending = PendingRule::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if ALIAS_BLANK_RE.is_match(raw) || ALIAS_COMMENT_RE.is_match(raw) {
            continue;
        }

        if let Some(caps) = ALIAS_BOTH_RE.captures(raw) {
            pending.warn_if_dangling(origin);
            pending = PendingRule::default();
            pending.set_left(&caps[1], line_no, origin)?;
            pending.right = Some(caps[2].to_string());
        } else if let Some(caps) = ALIAS_LEFT_RE.captures(raw) {
            pending.set_left(&caps[1], line_no, origin)?;
        } else if let Some(caps) = ALIAS_RIGHT_RE.captures(raw) {
            pending.right = Some(caps[1].to_string());
        } else if let Some(caps) = ALIAS_QUOTED_RE.captures(raw) {
            if pending.left.is_some() {
                pending.right = Some(caps[1].to_string());
            } else {
                pending.set_left(&caps[1], line_no, origin)?;
            }
        } else {
            return Err(Error::AliasSyntax {
                path: origin.to_path_buf(),
                line: line_no,
                text: raw.to_string(),
            }
            .into());
        }

        if let Some(rule) = pending.take_complete() {
            rules.push(rule);
        }
    }
    pending.warn_if_dangling(origin);

    Ok(rules)
}
