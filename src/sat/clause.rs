#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A clause: a disjunction of literals.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::Display;
use std::marker::PhantomData;
use std::ops::Index;

/// A clause in a SAT formula, satisfied iff at least one of its literals is
/// true. Duplicate literals are dropped at construction.
///
/// # Type Parameters
///
/// * `L`: The literal type. Defaults to `PackedLiteral`.
/// * `S`: The storage holding the literals. Defaults to `SmallVec<[L; 8]>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    /// The literals forming the clause.
    pub literals: S,
    data: PhantomData<*const L>,
}

impl<L: Literal, S: LiteralStorage<L>> FromIterator<L> for Clause<L, S> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            literals: iter.into_iter().unique().collect(),
            data: PhantomData,
        }
    }
}

impl<L: Literal, S: LiteralStorage<L>> Clause<L, S> {
    /// Creates a clause from a slice of literals, deduplicating them.
    #[must_use]
    pub fn new(literals: &[L]) -> Self {
        literals.iter().copied().collect()
    }

    /// Number of literals in the clause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the empty clause, which no assignment satisfies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// `true` if the clause has exactly one literal.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// `true` if the clause contains a literal and its negation and is
    /// therefore satisfied by every assignment.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| self.literals.iter().contains(&l.negated()))
    }

    /// Iterates over the literals.
    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.literals.iter()
    }
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Clause<L, S> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<i32>> for Clause<L, S> {
    /// Builds a clause from signed DIMACS literals. Zeroes are not legal
    /// literals and must not appear in `value`.
    fn from(value: Vec<i32>) -> Self {
        value.into_iter().map(L::from_i32).collect()
    }
}

impl<L: Literal, S: LiteralStorage<L>> Display for Clause<L, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &lit in self.literals.iter() {
            write!(f, "{} ", lit.to_i32())?;
        }
        write!(f, "0")
    }
}
