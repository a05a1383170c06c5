#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Encoding 9x9 Sudoku grids into CNF and decoding models back into grids.
//!
//! Cell `(r, c)` holding digit `d` is the propositional variable
//! `(r-1)*81 + (c-1)*9 + (d-1) + 1`; rows, columns, and digits are
//! 1-indexed. The emitted constraints are the classic set: every cell holds
//! at least one digit and no two digits at once, every row, column, and
//! 3x3 box contains every digit, and the given clues are unit clauses.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::solver::Solutions;
use itertools::Itertools;
use std::fmt::Display;
use std::num::NonZeroI32;
use std::path::Path;
use thiserror::Error;

/// Side length of the grid.
pub const SIZE: usize = 9;
/// Side length of one box.
const BLOCK: usize = 3;

/// Everything that can go wrong parsing a grid or decoding a model.
#[derive(Debug, Error)]
pub enum SudokuError {
    /// The puzzle file could not be read.
    #[error("cannot read sudoku file: {0}")]
    Io(#[from] std::io::Error),

    /// The text is neither nine rows of nine cells nor one 81-character
    /// line.
    #[error("expected nine rows of nine cells or one 81-character line")]
    BadShape,

    /// A grid character outside `1..9`, `0`, and `.`.
    #[error("invalid character {c:?} in grid")]
    InvalidCell {
        /// The offending character.
        c: char,
    },

    /// The model assigns no digit to a cell. Indicates an inconsistent
    /// model rather than bad user input.
    #[error("no digit is assigned to cell ({row}, {col})")]
    MissingDigit {
        /// 1-indexed row.
        row: usize,
        /// 1-indexed column.
        col: usize,
    },

    /// The model assigns more than one digit to a cell.
    #[error("multiple digits are assigned to cell ({row}, {col})")]
    AmbiguousDigit {
        /// 1-indexed row.
        row: usize,
        /// 1-indexed column.
        col: usize,
    },
}

/// One cell/digit pair of the encoding: "cell `(row, col)` holds `digit`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVar {
    /// 1-indexed row.
    pub row: usize,
    /// 1-indexed column.
    pub col: usize,
    /// The digit, `1..=9`.
    pub digit: usize,
}

impl CellVar {
    /// Creates a cell/digit pair. All three coordinates are 1-indexed.
    #[must_use]
    pub const fn new(row: usize, col: usize, digit: usize) -> Self {
        Self { row, col, digit }
    }

    /// The propositional variable for this pair, as a positive DIMACS
    /// literal: `(row-1)*81 + (col-1)*9 + (digit-1) + 1`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn encode(self) -> i32 {
        ((self.row - 1) * SIZE * SIZE + (self.col - 1) * SIZE + (self.digit - 1) + 1) as i32
    }
}

/// A 9x9 grid of digits; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps a 9x9 grid. Callers are trusted on the dimensions; parsed
    /// input goes through [`parse_sudoku`], which checks them.
    #[must_use]
    pub const fn new(cells: Vec<Vec<usize>>) -> Self {
        Self(cells)
    }

    /// The digit at `(row, col)`, 1-indexed; `0` if empty.
    #[must_use]
    pub fn digit(&self, row: usize, col: usize) -> usize {
        self.0[row - 1][col - 1]
    }

    /// The grid as one 81-character line, row-major.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.0
            .iter()
            .flat_map(|row| row.iter())
            .map(|&d| {
                if d == 0 {
                    '.'.to_string()
                } else {
                    d.to_string()
                }
            })
            .collect()
    }
}

impl Display for Board {
    /// Nine rows of nine characters, `.` for empty cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.0 {
            let line: String = row
                .iter()
                .map(|&d| {
                    if d == 0 {
                        '.'.to_string()
                    } else {
                        d.to_string()
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A Sudoku puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// The grid, with `0` in the unsolved cells.
    pub board: Board,
}

impl Display for Sudoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Each cell holds at least one digit.
fn cell_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=SIZE {
        for col in 1..=SIZE {
            clauses.push(
                (1..=SIZE)
                    .map(|digit| CellVar::new(row, col, digit).encode())
                    .collect(),
            );
        }
    }
    clauses
}

/// No cell holds two digits at once.
fn cell_uniqueness_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=SIZE {
        for col in 1..=SIZE {
            for digit in 1..=SIZE {
                for other in (digit + 1)..=SIZE {
                    clauses.push(vec![
                        -CellVar::new(row, col, digit).encode(),
                        -CellVar::new(row, col, other).encode(),
                    ]);
                }
            }
        }
    }
    clauses
}

/// Each row contains every digit.
fn row_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for digit in 1..=SIZE {
        for row in 1..=SIZE {
            clauses.push(
                (1..=SIZE)
                    .map(|col| CellVar::new(row, col, digit).encode())
                    .collect(),
            );
        }
    }
    clauses
}

/// Each column contains every digit.
fn column_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for digit in 1..=SIZE {
        for col in 1..=SIZE {
            clauses.push(
                (1..=SIZE)
                    .map(|row| CellVar::new(row, col, digit).encode())
                    .collect(),
            );
        }
    }
    clauses
}

/// Each 3x3 box contains every digit.
fn block_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for digit in 1..=SIZE {
        for block_row in 0..BLOCK {
            for block_col in 0..BLOCK {
                clauses.push(
                    (1..=BLOCK)
                        .cartesian_product(1..=BLOCK)
                        .map(|(r, c)| {
                            CellVar::new(block_row * BLOCK + r, block_col * BLOCK + c, digit)
                                .encode()
                        })
                        .collect(),
                );
            }
        }
    }
    clauses
}

/// The given clues, one unit clause each.
fn given_clauses(board: &Board) -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for row in 1..=SIZE {
        for col in 1..=SIZE {
            let digit = board.digit(row, col);
            if digit != 0 {
                clauses.push(vec![CellVar::new(row, col, digit).encode()]);
            }
        }
    }
    clauses
}

impl Sudoku {
    /// Wraps a parsed board.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self { board }
    }

    /// Encodes the puzzle as CNF.
    #[must_use]
    pub fn to_cnf<L: Literal, S: LiteralStorage<L>>(&self) -> Cnf<L, S> {
        let clauses: Vec<Vec<i32>> = cell_clauses()
            .into_iter()
            .chain(cell_uniqueness_clauses())
            .chain(row_clauses())
            .chain(column_clauses())
            .chain(block_clauses())
            .chain(given_clauses(&self.board))
            .collect();

        Cnf::new(clauses)
    }

    /// Reads the solved grid out of a model: per cell, the one digit whose
    /// variable is true.
    ///
    /// # Errors
    ///
    /// `MissingDigit` or `AmbiguousDigit` if some cell has zero or several
    /// true digit variables; either means the model is inconsistent with
    /// the encoding.
    pub fn decode(&self, solutions: &Solutions) -> Result<Self, SudokuError> {
        let mut cells = vec![vec![0_usize; SIZE]; SIZE];

        for row in 1..=SIZE {
            for col in 1..=SIZE {
                let mut found = None;
                for digit in 1..=SIZE {
                    let var = NonZeroI32::new(CellVar::new(row, col, digit).encode())
                        .ok_or(SudokuError::MissingDigit { row, col })?;
                    if solutions.check(var) {
                        if found.is_some() {
                            return Err(SudokuError::AmbiguousDigit { row, col });
                        }
                        found = Some(digit);
                    }
                }
                cells[row - 1][col - 1] = found.ok_or(SudokuError::MissingDigit { row, col })?;
            }
        }

        Ok(Self::new(Board::new(cells)))
    }

    /// Parses a puzzle from text. See [`parse_sudoku`].
    ///
    /// # Errors
    ///
    /// See [`SudokuError`].
    pub fn from_string(text: &str) -> Result<Self, SudokuError> {
        parse_sudoku(text)
    }

    /// Reads and parses a puzzle file.
    ///
    /// # Errors
    ///
    /// `SudokuError::Io` if the file cannot be read; otherwise see
    /// [`parse_sudoku`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SudokuError> {
        let text = std::fs::read_to_string(path)?;
        parse_sudoku(&text)
    }
}

fn parse_digit(c: char) -> Result<usize, SudokuError> {
    match c {
        '.' | '0' => Ok(0),
        '1'..='9' => Ok(c as usize - '0' as usize),
        _ => Err(SudokuError::InvalidCell { c }),
    }
}

/// Parses a puzzle from text: either nine lines of nine characters or one
/// 81-character line. `1..9` are given digits; `.` and `0` mark empty
/// cells. Blank lines and surrounding whitespace are ignored.
///
/// # Errors
///
/// `BadShape` if the text has the wrong dimensions, `InvalidCell` on any
/// other character.
pub fn parse_sudoku(text: &str) -> Result<Sudoku, SudokuError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let rows: Vec<Vec<char>> = match lines.as_slice() {
        [single] if single.chars().count() == SIZE * SIZE => single
            .chars()
            .collect_vec()
            .chunks(SIZE)
            .map(<[char]>::to_vec)
            .collect(),
        _ if lines.len() == SIZE => {
            let rows = lines.iter().map(|l| l.chars().collect_vec()).collect_vec();
            if rows.iter().any(|r| r.len() != SIZE) {
                return Err(SudokuError::BadShape);
            }
            rows
        }
        _ => return Err(SudokuError::BadShape),
    };

    let cells = rows
        .into_iter()
        .map(|row| row.into_iter().map(parse_digit).collect())
        .collect::<Result<Vec<Vec<usize>>, _>>()?;

    Ok(Sudoku::new(Board::new(cells)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::Cnf;
    use crate::sat::dpll::Dpll;
    use crate::sat::solver::Solver;

    /// The classic example puzzle's full solution.
    const SOLVED: [[usize; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    fn board_from(grid: &[[usize; 9]; 9]) -> Board {
        Board::new(grid.iter().map(|r| r.to_vec()).collect())
    }

    /// The solved grid with the diagonal blanked out.
    fn diagonal_puzzle() -> Sudoku {
        let mut grid = SOLVED;
        for i in 0..9 {
            grid[i][i] = 0;
        }
        Sudoku::new(board_from(&grid))
    }

    #[test]
    fn test_encode_formula() {
        assert_eq!(CellVar::new(1, 1, 1).encode(), 1);
        assert_eq!(CellVar::new(1, 1, 9).encode(), 9);
        assert_eq!(CellVar::new(1, 2, 1).encode(), 10);
        assert_eq!(CellVar::new(2, 1, 1).encode(), 82);
        assert_eq!(CellVar::new(9, 9, 9).encode(), 729);
    }

    #[test]
    fn test_parse_nine_lines() {
        let text = diagonal_puzzle().board.to_string();
        let parsed = parse_sudoku(&text).unwrap();
        assert_eq!(parsed, diagonal_puzzle());
    }

    #[test]
    fn test_parse_single_line() {
        let text = diagonal_puzzle().board.to_line();
        assert_eq!(text.chars().count(), 81);
        let parsed = parse_sudoku(&text).unwrap();
        assert_eq!(parsed, diagonal_puzzle());
    }

    #[test]
    fn test_parse_zero_and_dot_are_empty() {
        let dots = ".".repeat(81);
        let zeros = "0".repeat(81);
        assert_eq!(parse_sudoku(&dots).unwrap(), parse_sudoku(&zeros).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let mut text = ".".repeat(80);
        text.push('x');
        assert!(matches!(
            parse_sudoku(&text),
            Err(SudokuError::InvalidCell { c: 'x' })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(matches!(
            parse_sudoku("123\n456"),
            Err(SudokuError::BadShape)
        ));
        let short = ".".repeat(80);
        assert!(matches!(parse_sudoku(&short), Err(SudokuError::BadShape)));
    }

    #[test]
    fn test_clause_counts() {
        let puzzle = diagonal_puzzle();
        let cnf: Cnf = puzzle.to_cnf();

        // 81 cell + 81*36 uniqueness + 3*81 row/column/block + 72 givens
        assert_eq!(cnf.len(), 81 + 2916 + 243 + 72);
        assert_eq!(cnf.num_vars, 729 + 1);
    }

    #[test]
    fn test_decode_reads_model() {
        let literals: Vec<i32> = (1..=9)
            .flat_map(|row| {
                (1..=9).flat_map(move |col| {
                    (1..=9).map(move |digit| {
                        let var = CellVar::new(row, col, digit).encode();
                        if SOLVED[row - 1][col - 1] == digit {
                            var
                        } else {
                            -var
                        }
                    })
                })
            })
            .collect();
        let model = Solutions::new(&literals);

        let decoded = diagonal_puzzle().decode(&model).unwrap();
        assert_eq!(decoded.board, board_from(&SOLVED));
    }

    #[test]
    fn test_decode_rejects_empty_model() {
        let result = diagonal_puzzle().decode(&Solutions::default());
        assert!(matches!(
            result,
            Err(SudokuError::MissingDigit { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_decode_rejects_ambiguous_cell() {
        let model = Solutions::new(&[
            CellVar::new(1, 1, 1).encode(),
            CellVar::new(1, 1, 2).encode(),
        ]);
        let result = diagonal_puzzle().decode(&model);
        assert!(matches!(
            result,
            Err(SudokuError::AmbiguousDigit { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_solve_round_trip() {
        let puzzle = diagonal_puzzle();
        let cnf: Cnf = puzzle.to_cnf();

        let mut solver: Dpll = Solver::new(cnf.clone());
        let model = solver.solve().expect("puzzle is satisfiable");
        assert!(cnf.verify(&model));

        let solved = puzzle.decode(&model).unwrap();
        assert_eq!(solved.board, board_from(&SOLVED));
    }

    #[test]
    fn test_contradictory_givens_are_unsat() {
        // duplicate the 3 from (1, 2) into (1, 1): digit 5 can no longer
        // appear anywhere in the first row
        let mut grid = SOLVED;
        grid[0][0] = 3;
        let puzzle = Sudoku::new(board_from(&grid));

        let cnf: Cnf = puzzle.to_cnf();
        let mut solver: Dpll = Solver::new(cnf);
        assert!(solver.solve().is_none());
    }
}
