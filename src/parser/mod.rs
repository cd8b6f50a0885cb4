//! eFortran line scanning utilities.
//!
//! - [`LineMask`]: Masked copy of a line that hides strings, comments, numeric
//!   literals and dot operators from pattern searches without moving any byte
//! - [`patterns`]: Precompiled regex patterns for every notation the passes recognize

pub mod mask;
pub mod patterns;

pub use mask::{LineMask, MaskSpan, SpanKind};
