#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The clause store: a formula in conjunctive normal form.
//!
//! The store is filled once, at parse or encode time, and is read-only for
//! the lifetime of a solve. Empty clauses are kept: the solver core reports
//! them as trivial unsatisfiability.

use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::solver::Solutions;
use smallvec::SmallVec;
use std::fmt::Display;
use std::num::NonZeroI32;
use std::ops::Index;

/// A boolean formula in conjunctive normal form: a conjunction of clauses.
///
/// # Type Parameters
///
/// * `L`: The literal type. Defaults to `PackedLiteral`.
/// * `S`: The storage used within each clause. Defaults to `SmallVec<[L; 8]>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    /// The clauses making up the formula.
    pub clauses: Vec<Clause<L, S>>,
    /// Highest variable identifier plus one. Variables are `1..num_vars`,
    /// so arrays sized `num_vars` can be indexed by variable directly.
    pub num_vars: usize,
    /// Every literal occurrence across all clauses, duplicates included.
    pub lits: Vec<L>,
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Cnf<L, S> {
    type Output = Clause<L, S>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> Cnf<L, S> {
    /// Builds a formula from clauses of signed DIMACS literals, e.g.
    /// `Cnf::new(vec![vec![1, -2], vec![2, 3]])` for `(x1 | !x2) & (x2 | x3)`.
    ///
    /// Empty inner vectors become empty clauses and are kept.
    pub fn new<J: IntoIterator<Item = i32>, I: IntoIterator<Item = J>>(clauses: I) -> Self {
        let clauses: Vec<Clause<L, S>> = clauses
            .into_iter()
            .map(|c| c.into_iter().map(L::from_i32).collect())
            .collect();

        let max_var = clauses
            .iter()
            .flat_map(|c| c.iter().map(|l| l.variable()))
            .max()
            .unwrap_or_default();

        let lits = clauses.iter().flat_map(Clause::iter).copied().collect();

        Self {
            clauses,
            num_vars: (max_var as usize).wrapping_add(1),
            lits,
        }
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause<L, S>> {
        self.clauses.iter()
    }

    /// The number of clauses in the formula.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` if the formula has no clauses at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Checks a model against every clause: each must contain at least one
    /// literal that `solutions` makes true.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.iter().all(|clause| {
            clause
                .iter()
                .any(|&lit| NonZeroI32::new(lit.to_i32()).is_some_and(|l| solutions.check(l)))
        })
    }
}

impl<L: Literal, S: LiteralStorage<L>> Display for Cnf<L, S> {
    /// Formats the formula in DIMACS CNF.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars.saturating_sub(1), self.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<Vec<i32>>> for Cnf<L, S> {
    fn from(value: Vec<Vec<i32>>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    type TestCnf = Cnf<PackedLiteral>;

    #[test]
    fn test_new_from_dimacs() {
        let cnf = TestCnf::new(vec![vec![1, -2], vec![-1, 2, 3]]);
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars, 3 + 1);
        assert_eq!(cnf.lits.len(), 5);
        assert!(cnf[0].iter().any(|l| l.variable() == 2 && !l.polarity()));
    }

    #[test]
    fn test_empty_clause_is_kept() {
        let cnf = TestCnf::new(vec![vec![1], Vec::new()]);
        assert_eq!(cnf.len(), 2);
        assert!(cnf[1].is_empty());
    }

    #[test]
    fn test_empty_input() {
        let cnf = TestCnf::new(Vec::<Vec<i32>>::new());
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars, 1);
    }

    #[test]
    fn test_verify() {
        let cnf = TestCnf::new(vec![vec![1, -2], vec![-1, 2, 3]]);

        let good = Solutions::new(&[1, -2, 3]);
        assert!(cnf.verify(&good));

        let bad = Solutions::new(&[-1, 2, -3]);
        assert!(!cnf.verify(&bad));
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = TestCnf::new(vec![vec![1, -2], vec![2, 3]]);
        let text = format!("{cnf}");
        assert!(text.contains("p cnf 3 2"));
        assert!(text.contains("1 -2 0"));
        assert!(text.contains("2 3 0"));
    }
}
