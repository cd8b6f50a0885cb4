//! File processing pipeline.
//!
//! A run reads the whole source, passes the line sequence through every pass
//! in a fixed order (see [`crate::passes::Pass::ORDER`]), checks the result and
//! only then writes it out:
//!
//! 1. profiling annotations become `-call` markers
//! 2. `-call` markers are joined onto their statement
//! 3. `===` regions are commented out
//! 4. single-line macros expand (compound assignment, guarded blocks, `!debug`)
//! 5. alias rules apply
//! 6. scope placeholders expand
//! 7. member-access dots become `%`
//!
//! The main entry point is [`preprocess_file`] which processes a buffered reader
//! and writes the generated source to any `Write` implementation.

pub mod pipeline;

pub use pipeline::{preprocess_file, preprocess_str, split_lines, Pipeline, PipelineState};
