//! Pass pipeline
//!
//! Reads the whole source into a line sequence, threads it through every pass
//! in [`Pass::ORDER`], validates the result and writes it back with each line's
//! original terminator.

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::alias::AliasTable;
use crate::config::Config;
use crate::passes::{
    comment_out_blocks, compound_assign, debug_print, expand_scope_names, guarded_block,
    map_lines, member_access, profiling, subsidiary_call, CommentDepth, Pass, Placeholders,
    ScopeStack,
};
use crate::validate::check_implicit_none;
use crate::Result;

/// State carried across lines during one run
#[derive(Debug, Default, Clone)]
pub struct PipelineState {
    /// Open `===` comment regions
    pub comment: CommentDepth,
    /// Open program units
    pub scope: ScopeStack,
}

/// The configured pass sequence
#[derive(Debug)]
pub struct Pipeline<'a> {
    config: &'a Config,
    aliases: &'a AliasTable,
    placeholders: Placeholders,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(config: &'a Config, aliases: &'a AliasTable) -> Self {
        Self {
            config,
            aliases,
            placeholders: Placeholders::from_config(config),
            state: PipelineState::default(),
        }
    }

    /// State left behind by the last run
    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Run every pass over `lines`
    pub fn run(&mut self, mut lines: Vec<String>) -> Result<Vec<String>> {
        self.state = PipelineState::default();
        let count = lines.len();

        for pass in Pass::ORDER {
            let before = lines.clone();
            lines = self
                .run_pass(pass, lines)
                .with_context(|| format!("{} pass failed", pass.name()))?;
            debug_assert_eq!(lines.len(), count, "{} changed the line count", pass.name());

            let rewritten = before.iter().zip(&lines).filter(|(a, b)| a != b).count();
            tracing::debug!(pass = pass.name(), rewritten, "pass done");
        }
        Ok(lines)
    }

    fn run_pass(&mut self, pass: Pass, lines: Vec<String>) -> Result<Vec<String>> {
        let out = match pass {
            Pass::Profiling => map_lines(lines, profiling::expand_profiling),
            Pass::SubsidiaryCall => map_lines(lines, subsidiary_call::join_subsidiary_call),
            Pass::BlockComment => {
                let out = comment_out_blocks(lines, &mut self.state.comment);
                if self.state.comment.depth() > 0 {
                    tracing::warn!(
                        depth = self.state.comment.depth(),
                        "comment block left open at end of input"
                    );
                }
                out
            }
            Pass::CompoundAssign => map_lines(lines, compound_assign::expand_compound_assign),
            Pass::JustOnce => map_lines(lines, guarded_block::expand_just_once),
            Pass::SkipCounter => map_lines(lines, guarded_block::expand_skip_counter),
            Pass::DebugPrint => {
                let placeholders = &self.placeholders;
                map_lines(lines, |line| {
                    debug_print::expand_debug_print(line, placeholders)
                })
            }
            Pass::Alias => self.aliases.apply_lines(lines),
            Pass::ScopeNames => {
                expand_scope_names(lines, &mut self.state.scope, &self.placeholders)?
            }
            Pass::MemberAccess => {
                member_access::rewrite_lines(lines, self.config.member_separator)
            }
        };
        Ok(out)
    }
}

/// Split source text into lines and their terminators (`"\n"`, `"\r\n"` or `""`)
#[must_use]
pub fn split_lines(text: &str) -> (Vec<String>, Vec<&str>) {
    let mut lines = Vec::new();
    let mut terminators = Vec::new();
    for chunk in text.split_inclusive('\n') {
        let (body, end) = if let Some(body) = chunk.strip_suffix("\r\n") {
            (body, "\r\n")
        } else if let Some(body) = chunk.strip_suffix('\n') {
            (body, "\n")
        } else {
            (chunk, "")
        };
        lines.push(body.to_string());
        terminators.push(end);
    }
    (lines, terminators)
}

/// Preprocess a whole source text, returning the generated text
///
/// `filename` only labels diagnostics.
pub fn preprocess_str(
    text: &str,
    config: &Config,
    aliases: &AliasTable,
    filename: &str,
) -> Result<String> {
    let (lines, terminators) = split_lines(text);
    tracing::info!(file = filename, lines = lines.len(), "preprocessing");

    let mut pipeline = Pipeline::new(config, aliases);
    let lines = pipeline.run(lines)?;

    if config.require_implicit_none {
        check_implicit_none(&lines, filename)?;
    }

    let mut out = String::with_capacity(text.len());
    for (line, end) in lines.iter().zip(terminators) {
        out.push_str(line);
        out.push_str(end);
    }
    tracing::info!(file = filename, "done");
    Ok(out)
}

/// Preprocess `input` into `output`
///
/// Nothing is written unless every pass and the validation succeed.
pub fn preprocess_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    aliases: &AliasTable,
    filename: &str,
) -> Result<()> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .with_context(|| format!("failed to read {filename}"))?;

    let out = preprocess_str(&text, config, aliases, filename)?;
    output.write_all(out.as_bytes())?;
    output.flush()?;
    Ok(())
}
