//! ASCII Crystal Renderer
//!
//! Draws a genome as a six-armed snowflake on a character grid.
//! Pure presentation: no RNG, no side effects.

use super::genome::Genome;

/// Glyph at the center of the crystal.
pub const CENTER_GLYPH: char = '*';

/// Glyph closing every arm and branch.
pub const TERMINAL_GLYPH: char = 'o';

/// Background glyph.
pub const EMPTY_GLYPH: char = ' ';

/// One of the six 60° directions on the character grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Direction {
    d_row: i32,
    d_col: i32,
    glyph: char,
}

/// Counter-clockwise from east. Horizontal steps move two columns so the
/// crystal keeps its proportions in a terminal cell aspect.
const DIRECTIONS: [Direction; 6] = [
    Direction { d_row: 0, d_col: 2, glyph: '-' },
    Direction { d_row: -1, d_col: 1, glyph: '/' },
    Direction { d_row: -1, d_col: -1, glyph: '\\' },
    Direction { d_row: 0, d_col: -2, glyph: '-' },
    Direction { d_row: 1, d_col: -1, glyph: '/' },
    Direction { d_row: 1, d_col: 1, glyph: '\\' },
];

/// A single plotted cell, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    /// Row, 0 at the top.
    pub row: i32,
    /// Column, 0 at the left.
    pub col: i32,
    /// Glyph drawn at this cell.
    pub glyph: char,
}

/// Grid geometry for a given arm length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Center row.
    pub center_row: i32,
    /// Center column.
    pub center_col: i32,
    /// Grid width in columns.
    pub width: usize,
    /// Grid height in rows.
    pub height: usize,
}

impl Frame {
    /// Frame sized so no branch of length <= 3 on an arm of length <= 7 clips.
    pub fn for_arm_length(arm_length: u8) -> Self {
        let center_row = i32::from(arm_length) + 3;
        let center_col = 2 * i32::from(arm_length) + 6;
        Self {
            center_row,
            center_col,
            width: (2 * center_col + 1) as usize,
            height: (2 * center_row + 1) as usize,
        }
    }

    /// Whether a cell lies on the grid.
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }
}

/// Trace every cell the genome plots, in drawing order.
///
/// Later strokes overwrite earlier ones where they coincide.
pub fn strokes(genome: &Genome) -> Vec<Stroke> {
    let frame = Frame::for_arm_length(genome.arm_length());
    let arm_length = i32::from(genome.arm_length());

    let mut out = vec![Stroke {
        row: frame.center_row,
        col: frame.center_col,
        glyph: CENTER_GLYPH,
    }];

    for (arm, dir) in DIRECTIONS.iter().enumerate() {
        for d in 1..=arm_length {
            out.push(Stroke {
                row: frame.center_row + dir.d_row * d,
                col: frame.center_col + dir.d_col * d,
                glyph: if d == arm_length { TERMINAL_GLYPH } else { dir.glyph },
            });

            for branch in genome.branches().iter().filter(|b| i32::from(b.pos) == d) {
                let root_row = frame.center_row + dir.d_row * d;
                let root_col = frame.center_col + dir.d_col * d;
                let len = i32::from(branch.len);

                for side in [DIRECTIONS[(arm + 1) % 6], DIRECTIONS[(arm + 5) % 6]] {
                    for s in 1..=len {
                        out.push(Stroke {
                            row: root_row + side.d_row * s,
                            col: root_col + side.d_col * s,
                            glyph: if s == len { TERMINAL_GLYPH } else { side.glyph },
                        });
                    }
                }
            }
        }
    }

    out
}

/// Render a genome as multi-line ASCII art.
///
/// Every row has the full grid width; rows are joined with `\n`.
pub fn render(genome: &Genome) -> String {
    let frame = Frame::for_arm_length(genome.arm_length());
    let mut grid = vec![vec![EMPTY_GLYPH; frame.width]; frame.height];

    for stroke in strokes(genome) {
        if frame.contains(stroke.row, stroke.col) {
            grid[stroke.row as usize][stroke.col as usize] = stroke.glyph;
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TESTS
// =============================================================================
