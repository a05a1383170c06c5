#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! 9x9 Sudoku as a SAT problem.

pub mod solver;
