use serde::{Deserialize, Serialize};

/// A zero-based line/character position inside a document. `character` counts
/// UTF-16 code units, the unit editor hosts report columns in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A text selection. `start` is the anchor and `end` the active end, stored
/// exactly as the editor reported them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

impl SelectionRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Builds a range from `((start_line, start_char), (end_line, end_char))`.
    pub fn from_pairs(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: Position::new(start.0, start.1),
            end: Position::new(end.0, end.1),
        }
    }
}
