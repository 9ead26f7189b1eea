#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The board text format and grid rendering.
//!
//! A board is 9 lines of 9 cells. A cell is a digit (`0` or `.` meaning
//! blank, `1`-`9` a given); any other character except newline is
//! filler and is skipped. A newline advances to the next row and resets
//! the column. Loading fails when a cell lands outside the 9x9 grid,
//! when more than 81 cells arrive, or when fewer than 81 have arrived
//! by end of input. The parser only builds the [`Board`]; the
//! constraint network is constructed from it separately, so a malformed
//! board never reaches the solver.

use crate::csp::position::{CELL_COUNT, Position, SIDE};
use crate::csp::puzzle::{Puzzle, Solution};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;
use std::io::{self, BufRead, Cursor};
use std::path::Path;
use std::str::FromStr;

/// The canonical example puzzle; it has exactly one completion.
pub const EXAMPLE: &str = "\
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79
";

/// AI Escargot, a famously hard instance for branching solvers.
pub const HARD: &str = "\
1....7.9.
.3..2...8
..96..5..
..53..9..
.1..8...2
6....4...
3......1.
.4......7
..7...3..
";

/// 81 cell values in linear-index order, `0` for a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board([u8; CELL_COUNT]);

/// Why board text failed to load.
#[derive(Debug)]
pub enum ParseBoardError {
    /// A cell landed outside the 9x9 grid: a line held more than nine
    /// cells, or more than nine lines held cells.
    OutOfBounds {
        /// 1-based row of the offending cell.
        row: usize,
        /// 1-based column of the offending cell.
        col: usize,
    },
    /// More than 81 cells in the input.
    TooManyCells,
    /// End of input before 81 cells.
    TooFewCells {
        /// Cells seen before end of input.
        count: usize,
    },
    /// Reading the input failed.
    Io(io::Error),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col } => {
                write!(f, "cell at row {row}, column {col} is outside the 9x9 grid")
            }
            Self::TooManyCells => write!(f, "more than 81 cells in input"),
            Self::TooFewCells { count } => write!(f, "expected 81 cells, found {count}"),
            Self::Io(e) => write!(f, "failed to read board: {e}"),
        }
    }
}

impl std::error::Error for ParseBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseBoardError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Scans board text from a reader.
///
/// # Errors
///
/// Returns [`ParseBoardError`] when the input does not describe a
/// well-formed 9x9 grid, or when reading fails.
pub fn parse_board<R: BufRead>(reader: R) -> Result<Board, ParseBoardError> {
    let mut cells = [0; CELL_COUNT];
    let mut count = 0;
    let mut row = 1;
    let mut col = 1;

    for byte in reader.bytes() {
        match byte? {
            value @ (b'0'..=b'9' | b'.') => {
                if count == CELL_COUNT {
                    return Err(ParseBoardError::TooManyCells);
                }
                if row > usize::from(SIDE) || col > usize::from(SIDE) {
                    return Err(ParseBoardError::OutOfBounds { row, col });
                }
                cells[count] = if value == b'.' { 0 } else { value - b'0' };
                count += 1;
                col += 1;
            }
            b'\n' => {
                row += 1;
                col = 1;
            }
            _ => {}
        }
    }

    if count != CELL_COUNT {
        return Err(ParseBoardError::TooFewCells { count });
    }
    Ok(Board(cells))
}

/// Loads a board from a file.
///
/// # Errors
///
/// See [`parse_board`]; file-open failures surface as
/// [`ParseBoardError::Io`].
pub fn parse_board_file<P: AsRef<Path>>(path: P) -> Result<Board, ParseBoardError> {
    let file = std::fs::File::open(path)?;
    parse_board(io::BufReader::new(file))
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board(Cursor::new(s))
    }
}

impl Board {
    /// Wraps 81 cell values in linear-index order.
    #[must_use]
    pub const fn new(cells: [u8; CELL_COUNT]) -> Self {
        Self(cells)
    }

    /// All 81 cell values in linear-index order.
    #[must_use]
    pub const fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.0
    }

    /// The cell value at `pos`, `0` for a blank.
    #[must_use]
    pub const fn get(&self, pos: Position) -> u8 {
        self.0[pos.index()]
    }

    /// Number of given cells.
    #[must_use]
    pub fn givens(&self) -> usize {
        self.0.iter().filter(|&&v| v != 0).count()
    }

    /// True when every cell is filled and every row, column and box
    /// holds the digits 1-9 exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        let rows = (1..=SIDE).all(|row| self.house_ok((1..=SIDE).map(|col| (row, col))));
        let cols = (1..=SIDE).all(|col| self.house_ok((1..=SIDE).map(|row| (row, col))));
        let boxes = [1, 4, 7].into_iter().all(|box_row| {
            [1, 4, 7].into_iter().all(|box_col| {
                self.house_ok(
                    (0..3).flat_map(move |r| (0..3).map(move |c| (box_row + r, box_col + c))),
                )
            })
        });
        rows && cols && boxes
    }

    fn house_ok(&self, house: impl Iterator<Item = (u8, u8)>) -> bool {
        let mut seen = FxHashSet::default();
        let mut filled = 0;
        for (row, col) in house {
            let digit = self.get(Position::new(row, col));
            if digit == 0 || !seen.insert(digit) {
                return false;
            }
            filled += 1;
        }
        filled == usize::from(SIDE)
    }
}

impl From<&Board> for Puzzle {
    fn from(board: &Board) -> Self {
        Self::new(board.cells())
    }
}

impl From<&Solution> for Board {
    fn from(solution: &Solution) -> Self {
        Self(*solution.digits())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(37);
        writeln!(f, "{separator}")?;
        for row in 1..=SIDE {
            let cells = (1..=SIDE).map(|col| {
                let digit = self.get(Position::new(row, col));
                if digit == 0 {
                    '.'
                } else {
                    char::from(b'0' + digit)
                }
            });
            writeln!(f, "| {} |", cells.format(" | "))?;
            writeln!(f, "{separator}")?;
        }
        Ok(())
    }
}
