//! Byte ranges in the source text.
//!
//! Tokens and parse errors carry a `Span` next to their line/column
//! position so diagnostics can underline the exact source range.

use std::ops::Range;

/// Half-open byte range `start..end` into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}
