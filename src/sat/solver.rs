#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The solver-facing surface: the `Solver` trait, the configuration bundle
//! of component types, the extracted model, and the search counters.

use crate::sat::assignment::{Assignment, VecAssignment};
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use crate::sat::variable_selection::{VariableSelection, Vsids};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::{Debug, Display};
use std::num::NonZeroI32;

/// Bundles the component types a solver is instantiated with.
///
/// Swapping an associated type swaps the implementation of that concern
/// everywhere in the engine.
pub trait SolverConfig: Debug + Clone {
    /// The literal representation.
    type Literal: Literal;
    /// The storage used inside each clause.
    type LiteralStorage: LiteralStorage<Self::Literal>;
    /// The model: variable states under the current partial assignment.
    type Assignment: Assignment;
    /// The branching heuristic.
    type VariableSelector: VariableSelection<Self::Literal>;
}

/// The configuration used when none is specified: packed literals, inline
/// clause storage, a dense model, and activity-based branching.
#[derive(Debug, Clone, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Literal = PackedLiteral;
    type LiteralStorage = SmallVec<[PackedLiteral; 8]>;
    type Assignment = VecAssignment;
    type VariableSelector = Vsids;
}

/// Common interface of SAT solving engines.
pub trait Solver<Config: SolverConfig> {
    /// Creates a solver owning the given formula. Solvers are built fresh
    /// per formula and are not re-entrant.
    fn new(cnf: Cnf<Config::Literal, Config::LiteralStorage>) -> Self;

    /// Runs the search. `Some(model)` if the formula is satisfiable,
    /// `None` if it is not.
    fn solve(&mut self) -> Option<Solutions>;

    /// The model extracted from the current assignment.
    fn solutions(&self) -> Solutions;

    /// Counters accumulated during the search.
    fn stats(&self) -> SolutionStats;
}

/// Counters describing a finished (or ongoing) search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Number of falsified clauses encountered.
    pub conflicts: usize,
    /// Number of branching decisions taken.
    pub decisions: usize,
    /// Number of literals consumed from the propagation queue.
    pub propagations: usize,
}

/// A satisfying assignment, keyed by variable.
///
/// Covers exactly the variables that were assigned when the solver declared
/// SAT; variables whose value is irrelevant may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions {
    assignments: FxHashMap<Variable, bool>,
}

impl Solutions {
    /// Builds a model from signed DIMACS literals; e.g. `&[1, -2]` assigns
    /// `x1 = true, x2 = false`. Zeroes are ignored.
    #[must_use]
    pub fn new(literals: &[i32]) -> Self {
        let assignments = literals
            .iter()
            .filter(|&&l| l != 0)
            .map(|&l| (l.unsigned_abs(), l > 0))
            .collect();
        Self { assignments }
    }

    /// Records one assigned literal.
    pub fn add(&mut self, literal: NonZeroI32) {
        self.assignments
            .insert(literal.get().unsigned_abs(), literal.get() > 0);
    }

    /// `true` iff the model makes this literal true. Unassigned variables
    /// make every literal over them false.
    #[must_use]
    pub fn check(&self, literal: NonZeroI32) -> bool {
        self.assignments
            .get(&literal.get().unsigned_abs())
            .is_some_and(|&polarity| polarity == (literal.get() > 0))
    }

    /// The value of a variable, if it is assigned.
    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.assignments.get(&var).copied()
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// `true` if no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl Display for Solutions {
    /// Space-separated signed literals, sorted by variable, so repeated
    /// runs print identically.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self
            .assignments
            .iter()
            .sorted_by_key(|&(&var, _)| var)
            .map(|(&var, &polarity)| {
                #[allow(clippy::cast_possible_wrap)]
                let signed = var as i32;
                let value = if polarity { signed } else { -signed };
                value.to_string()
            })
            .join(" ");
        write!(f, "{line}")
    }
}
