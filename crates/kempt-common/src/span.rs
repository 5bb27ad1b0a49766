//! Source spans and line/column locations.
//!
//! Spans are byte offsets into the text handed to a rewriter. Locations are
//! the 1-based line / 0-based column pairs a host attaches to syntax nodes;
//! the host's printer attaches comments by position, so both travel with a
//! node whenever it is substituted for another.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Build a span from `usize` offsets, saturating at `u32::MAX`.
    pub fn from_range(start: usize, end: usize) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span::new(clamp(start), clamp(end))
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the two spans overlap or touch.
    pub const fn touches(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest span covering both.
    pub fn cover(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The slice of `text` this span covers, or `None` when it is out of
    /// bounds or not on a char boundary.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start as usize..self.end as usize)
    }
}

/// A line/column position. Lines are 1-based, columns 0-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Start/end positions of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub const fn new(start: Position, end: Position) -> Self {
        Location { start, end }
    }

    /// Location covering whole lines `start_line..=end_line`.
    pub const fn lines(start_line: u32, end_line: u32) -> Self {
        Location {
            start: Position::new(start_line, 0),
            end: Position::new(end_line, 0),
        }
    }

    #[inline]
    pub const fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}
