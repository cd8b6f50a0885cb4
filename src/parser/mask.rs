/// `LineMask` - scratch copy of a line with excluded spans blanked out
///
/// Pattern searches run on the masked copy while rewrites are applied to the
/// original line. Masking only overwrites bytes, never inserts or removes them,
/// so every byte offset found in the mask is valid in the original line.
use std::ops::Range;

use regex::Regex;

use super::patterns::{
    DOUBLE_QUOTED_RE, INTRINSIC_DOT_OP_RE, NUMBER_DOT_RE, SINGLE_QUOTED_RE, SURROUNDED_DOT_OP_RE,
};

/// Kind of content hidden by a mask span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    DoubleQuoted, // "..."
    SingleQuoted, // '...'
    Comment,      // ! to end of line
    Number,       // 3.14, -1.e-14
    Operator,     // .and., .myop.
}

impl SpanKind {
    /// ASCII filler written over the span. None of these can be part of an
    /// identifier, a dot, a parenthesis, a quote or a comment marker.
    #[must_use]
    pub fn filler(self) -> char {
        match self {
            SpanKind::DoubleQuoted => '\u{1}',
            SpanKind::SingleQuoted => '\u{2}',
            SpanKind::Comment => ' ',
            SpanKind::Number => '\u{3}',
            SpanKind::Operator => '\u{4}',
        }
    }
}

/// One masked byte range of the original line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSpan {
    pub range: Range<usize>,
    pub kind: SpanKind,
}

/// A line together with its masked copy
#[derive(Debug, Clone)]
pub struct LineMask {
    masked: String,
    spans: Vec<MaskSpan>,
}

impl LineMask {
    /// Mask quoted strings and the trailing comment
    ///
    /// Double-quoted spans are masked first; single-quoted spans are then searched
    /// on the partially masked copy, so a `'` inside `"..."` never opens a string.
    /// The comment starts at the first `!` that survives string masking.
    #[must_use]
    pub fn strings_and_comment(line: &str) -> Self {
        let mut mask = Self {
            masked: line.to_string(),
            spans: Vec::new(),
        };
        mask.mask_all(&DOUBLE_QUOTED_RE, 0, SpanKind::DoubleQuoted);
        mask.mask_all(&SINGLE_QUOTED_RE, 0, SpanKind::SingleQuoted);
        if let Some(pos) = mask.masked.find('!') {
            mask.fill(pos..mask.masked.len(), SpanKind::Comment);
        }
        mask
    }

    /// Mask everything a member-access dot rewrite must leave alone
    ///
    /// On top of [`LineMask::strings_and_comment`] this hides numeric literals,
    /// intrinsic dot operators and whitespace-bounded user operators.
    #[must_use]
    pub fn for_member_access(line: &str) -> Self {
        let mut mask = Self::strings_and_comment(line);
        mask.mask_all(&NUMBER_DOT_RE, 1, SpanKind::Number);
        mask.mask_all(&INTRINSIC_DOT_OP_RE, 0, SpanKind::Operator);
        mask.mask_all(&SURROUNDED_DOT_OP_RE, 1, SpanKind::Operator);
        mask
    }

    /// The masked copy, byte-for-byte aligned with the original line
    #[must_use]
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Masked spans in ascending start order
    #[must_use]
    pub fn spans(&self) -> &[MaskSpan] {
        &self.spans
    }

    /// Check whether byte `pos` lies inside any masked span
    #[must_use]
    pub fn is_masked(&self, pos: usize) -> bool {
        self.spans.iter().any(|span| span.range.contains(&pos))
    }

    /// Mask every match of `re` (capture `group`) on the current masked copy.
    ///
    /// Searching resumes right after the masked group rather than after the whole
    /// match, so delimiters shared by neighbouring tokens are not consumed.
    fn mask_all(&mut self, re: &Regex, group: usize, kind: SpanKind) {
        let mut start = 0;
        while start <= self.masked.len() {
            let Some(caps) = re.captures_at(&self.masked, start) else {
                break;
            };
            let Some(m) = caps.get(group) else {
                break;
            };
            let range = m.range();
            let resume = if range.is_empty() { range.end + 1 } else { range.end };
            self.fill(range, kind);
            start = resume;
        }
    }

    fn fill(&mut self, range: Range<usize>, kind: SpanKind) {
        if range.is_empty() {
            return;
        }
        let filler = kind.filler().to_string().repeat(range.len());
        self.masked.replace_range(range.clone(), &filler);
        let at = self
            .spans
            .partition_point(|span| span.range.start <= range.start);
        self.spans.insert(at, MaskSpan { range, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(mask: &LineMask) -> String {
        mask.masked()
            .chars()
            .map(|c| if c.is_control() { '#' } else { c })
            .collect()
    }

    #[test]
    fn test_no_masking_needed() {
        let mask = LineMask::strings_and_comment("x = y + 5");
        assert_eq!(mask.masked(), "x = y + 5");
        assert!(mask.spans().is_empty());
    }

    #[test]
    fn test_mask_double_quotes() {
        let mask = LineMask::strings_and_comment(r#"f = "main.e03" // x"#);
        assert_eq!(visible(&mask), "f = ########## // x");
        assert_eq!(mask.spans()[0].kind, SpanKind::DoubleQuoted);
        assert_eq!(mask.spans()[0].range, 4..14);
    }

    #[test]
    fn test_single_quote_inside_double_quotes() {
        let mask = LineMask::strings_and_comment(r#"s = "it's" // 'a.b'"#);
        assert_eq!(visible(&mask), "s = ###### // #####");
        assert_eq!(mask.spans().len(), 2);
        assert_eq!(mask.spans()[1].kind, SpanKind::SingleQuoted);
    }

    #[test]
    fn test_comment_marker_inside_string_is_not_a_comment() {
        let mask = LineMask::strings_and_comment(r#"print *, "hi!" ! real comment"#);
        assert_eq!(visible(&mask), format!("print *, ##### {}", " ".repeat(14)));
        assert_eq!(mask.spans()[1].kind, SpanKind::Comment);
    }

    #[test]
    fn test_mask_preserves_byte_length() {
        let line = "label = \"größe.x\" ! ü.v";
        let mask = LineMask::for_member_access(line);
        assert_eq!(mask.masked().len(), line.len());
    }

    #[test]
    fn test_mask_numbers_and_operators() {
        let mask = LineMask::for_member_access("x = 3.14 .and. .not. y");
        assert_eq!(visible(&mask), "x = #### ##### ##### y");
        assert!(mask.is_masked(4));
        assert!(!mask.is_masked(0));
    }

    #[test]
    fn test_mask_adjacent_user_operators() {
        let mask = LineMask::for_member_access("c = a .cross. .dot. b");
        assert_eq!(visible(&mask), "c = a ####### ##### b");
    }

    #[test]
    fn test_mask_glued_intrinsic_operator() {
        let mask = LineMask::for_member_access("if (.not.flag.and.ok) x = 1.e-14");
        assert_eq!(visible(&mask), "if (#####flag#####ok) x = ######");
    }

    #[test]
    fn test_identifier_with_digits_is_not_a_number() {
        let mask = LineMask::for_member_access("y = v1.x");
        assert_eq!(mask.masked(), "y = v1.x");
    }

    #[test]
    fn test_spans_are_sorted() {
        let mask = LineMask::for_member_access("a = 'q' + 2.5 ! c");
        let starts: Vec<usize> = mask.spans().iter().map(|s| s.range.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }
}
