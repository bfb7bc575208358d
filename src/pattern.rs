use crate::board::{Board, ALIVE_CHAR};

/// A named cell configuration to search for on a board.
///
/// The shape is a rectangular boolean matrix, immutable after construction.
/// Dead cells are part of the shape: a match requires exact equality, not a
/// live-cell subset.
#[derive(Clone, Debug)]
pub struct Pattern {
    name: String,
    width: usize,
    height: usize,
    shape: Vec<bool>,
}

impl Pattern {
    /// Builds a pattern from rows written in the board text convention,
    /// `*` for alive and anything else for dead. Rows shorter than the
    /// widest are padded with dead cells.
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut shape = vec![false; width * height];
        for (dy, row) in rows.iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                shape[dy * width + dx] = ch == ALIVE_CHAR;
            }
        }
        Self {
            name: name.into(),
            width,
            height,
            shape,
        }
    }

    /// The pattern's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the shape in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the shape in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// State of the shape cell at offset `(dx, dy)` from the anchor.
    pub fn cell(&self, dx: usize, dy: usize) -> bool {
        self.shape[dy * self.width + dx]
    }
}

/// An ordered collection of patterns with a brute-force board scan.
#[derive(Clone, Debug, Default)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    /// The built-in library: the 2x2 Block and the one-column Blinker.
    pub fn standard() -> Self {
        Self {
            patterns: vec![
                Pattern::from_rows("Block", &["**", "**"]),
                Pattern::from_rows("Blinker", &["*", "*", "*"]),
            ],
        }
    }

    /// Adds a pattern to the end of the library.
    pub fn register(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// The registered patterns, in scan order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Scans the board for every registered pattern.
    ///
    /// Each pattern is tested with its top-left corner anchored at every
    /// `(x, y)` of the board, wrapping around the edges with the same
    /// toroidal convention as the neighbor graph. Overlapping occurrences
    /// each produce a match; duplicates are retained, so the result counts
    /// anchors, not distinct motifs. O(patterns x columns x rows x area).
    pub fn match_patterns(&self, board: &Board) -> Vec<&Pattern> {
        let mut matched = Vec::new();
        for pattern in &self.patterns {
            for x in 0..board.columns() {
                for y in 0..board.rows() {
                    if Self::matches_at(pattern, board, x, y) {
                        matched.push(pattern);
                    }
                }
            }
        }
        matched
    }

    /// Exact-equality test of `pattern` anchored at `(start_x, start_y)`:
    /// every shape cell, dead ones included, must equal the board cell at
    /// the wrapped offset.
    fn matches_at(pattern: &Pattern, board: &Board, start_x: usize, start_y: usize) -> bool {
        for dy in 0..pattern.height() {
            for dx in 0..pattern.width() {
                let x = (start_x + dx) % board.columns();
                let y = (start_y + dy) % board.rows();
                if board.is_alive(x, y) != pattern.cell(dx, dy) {
                    return false;
                }
            }
        }
        true
    }
}
