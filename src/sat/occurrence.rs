#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The occurrence index: for every literal, the clauses containing it.
//!
//! Clauses are referred to by their index into the clause store, never by
//! pointer, so the index stays valid for the whole solve. It is built once,
//! after the store is frozen, and is read-only thereafter. Propagating a
//! literal only examines the clauses listed under its negation: those are
//! the clauses whose truth the new assignment threatens.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::marker::PhantomData;
use std::ops::Index;

/// Maps each literal (variable and polarity) to the handles of the clauses
/// in which it occurs.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceIndex<L: Literal, const N: usize = 8> {
    occurrences: Vec<SmallVec<[usize; N]>>,
    marker: PhantomData<*const L>,
}

impl<L: Literal, const N: usize> OccurrenceIndex<L, N> {
    /// Builds the index with one pass over the frozen clause store.
    #[must_use]
    pub fn new<S: LiteralStorage<L>>(cnf: &Cnf<L, S>) -> Self {
        let mut occurrences = vec![SmallVec::new(); cnf.num_vars * 2];

        for (handle, clause) in cnf.iter().enumerate() {
            for &lit in clause.iter() {
                occurrences[lit.index()].push(handle);
            }
        }

        Self {
            occurrences,
            marker: PhantomData,
        }
    }

    /// The handles of the clauses containing `lit` with exactly this
    /// polarity.
    #[must_use]
    pub fn clauses_with(&self, lit: L) -> &[usize] {
        &self.occurrences[lit.index()]
    }
}

impl<L: Literal, const N: usize> Index<L> for OccurrenceIndex<L, N> {
    type Output = [usize];

    fn index(&self, lit: L) -> &Self::Output {
        self.clauses_with(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    type TestCnf = Cnf<PackedLiteral>;

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_i32(value)
    }

    #[test]
    fn test_polarities_are_kept_apart() {
        let cnf = TestCnf::new(vec![vec![1, -2], vec![-1, 2, 3], vec![1]]);
        let index = OccurrenceIndex::<PackedLiteral>::new(&cnf);

        assert_eq!(index.clauses_with(lit(1)), &[0, 2]);
        assert_eq!(index.clauses_with(lit(-1)), &[1]);
        assert_eq!(index.clauses_with(lit(-2)), &[0]);
        assert_eq!(index.clauses_with(lit(2)), &[1]);
        assert_eq!(index.clauses_with(lit(3)), &[1]);
        assert!(index.clauses_with(lit(-3)).is_empty());
    }

    #[test]
    fn test_empty_clause_is_not_indexed() {
        let cnf = TestCnf::new(vec![vec![1], Vec::new()]);
        let index = OccurrenceIndex::<PackedLiteral>::new(&cnf);
        assert_eq!(index.clauses_with(lit(1)), &[0]);
        assert!(index.clauses_with(lit(-1)).is_empty());
    }
}
