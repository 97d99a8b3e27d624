//! Source location tracking.
//!
//! Nodes carry the line and column of the scan cursor at the moment they
//! were built. Positions are informational only and never take part in
//! structural equality.

use serde::Serialize;
use std::fmt;

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number in characters, starting at 1.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The first column of the first line.
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_start_of_source() {
        assert_eq!(Position::default(), Position::new(1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 7).to_string(), "12:7");
    }

    #[test]
    fn test_ordering_is_line_major() {
        assert!(Position::new(1, 40) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 5));
    }
}
