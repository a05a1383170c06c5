#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! An iterative DPLL SAT solver, plus the front ends that feed it: a
//! DIMACS-CNF reader and a 9x9 Sudoku encoder/decoder.

pub mod sat;
pub mod sudoku;
