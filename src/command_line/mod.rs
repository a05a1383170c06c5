#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The command-line surface of the solver binary.

pub mod cli;
