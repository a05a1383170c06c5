#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Storage abstraction for the literals owned by a clause.
//!
//! Clauses in this solver are short: the Sudoku encoding emits mostly binary
//! clauses, and random 3-SAT stays at three literals. `SmallVec` keeps those
//! inline; `Vec` is the plain fallback.

use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::ops::Index;
use std::slice::Iter;

/// Container trait for the literals of a single clause.
pub trait LiteralStorage<L: Literal>:
    Index<usize, Output = L> + FromIterator<L> + Extend<L> + AsRef<[L]> + Clone + Default + Debug
{
    fn push(&mut self, literal: L);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn iter(&self) -> Iter<'_, L>;
}

impl<L: Literal> LiteralStorage<L> for Vec<L> {
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<'_, L> {
        self.as_slice().iter()
    }
}

impl<L: Literal, const N: usize> LiteralStorage<L> for SmallVec<[L; N]> {
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<'_, L> {
        self.as_slice().iter()
    }
}
