#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Branching heuristics: which literal to decide next.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, Variable};
use std::fmt::Debug;

/// Added to a literal's activity each time it sits in a falsified clause.
const ACTIVITY_INCREMENT: f64 = 1.0;

/// Every this many conflicts, all activities are halved so that recent
/// conflicts outweigh old ones.
const ACT_INC_UPDATE_RATE: usize = 1000;

/// Picks the literal to branch on.
pub trait VariableSelection<L: Literal>: Debug + Clone {
    /// Creates a selector for `num_vars` variable slots.
    fn new(num_vars: usize) -> Self;

    /// The literal to decide next, or `None` when every variable is
    /// assigned (the search is then complete).
    fn pick<A: Assignment>(&self, assignment: &A) -> Option<L>;

    /// Records a falsified clause, feeding the heuristic.
    fn on_conflict<S: LiteralStorage<L>>(&mut self, clause: &Clause<L, S>);

    /// Number of conflicts recorded so far.
    fn conflicts(&self) -> usize;
}

/// Conflict-driven activity branching, one score per literal polarity.
///
/// Literals collect `ACTIVITY_INCREMENT` whenever they appear in a
/// falsified clause; every `ACT_INC_UPDATE_RATE` conflicts all scores are
/// halved. Scores start at zero and never go negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vsids {
    /// Indexed by `Literal::index()`: slot `2v` is the negative polarity of
    /// variable `v`, slot `2v + 1` the positive one.
    activities: Vec<f64>,
    conflicts: usize,
    num_vars: usize,
}

impl<L: Literal> VariableSelection<L> for Vsids {
    fn new(num_vars: usize) -> Self {
        Self {
            activities: vec![0.0; num_vars * 2],
            conflicts: 0,
            num_vars,
        }
    }

    /// Scans all unassigned variables and returns the literal whose
    /// activity is maximal across both polarities.
    ///
    /// Tie-break, fixed and intentional: a score *equal* to the running
    /// maximum replaces the candidate, so among tying literals the last one
    /// scanned wins. The scan runs over variables in increasing order and
    /// consults a variable's negative slot before its positive one, so a
    /// within-variable tie goes to the positive literal.
    fn pick<A: Assignment>(&self, assignment: &A) -> Option<L> {
        let mut max_activity = 0.0;
        let mut best: Option<L> = None;

        for var in 1..self.num_vars {
            #[allow(clippy::cast_possible_truncation)]
            let var = var as Variable;
            if assignment.is_assigned(var) {
                continue;
            }

            let negative = self.activities[var as usize * 2];
            let positive = self.activities[var as usize * 2 + 1];

            if negative >= max_activity {
                max_activity = negative;
                best = Some(L::new(var, false));
            }
            if positive >= max_activity {
                max_activity = positive;
                best = Some(L::new(var, true));
            }
        }

        best
    }

    fn on_conflict<S: LiteralStorage<L>>(&mut self, clause: &Clause<L, S>) {
        self.conflicts += 1;
        if self.conflicts % ACT_INC_UPDATE_RATE == 0 {
            for activity in &mut self.activities {
                *activity /= 2.0;
            }
        }

        for &lit in clause.iter() {
            self.activities[lit.index()] += ACTIVITY_INCREMENT;
        }
    }

    fn conflicts(&self) -> usize {
        self.conflicts
    }
}

/// Baseline selector: the first unassigned variable, positive polarity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedOrder {
    conflicts: usize,
    num_vars: usize,
}

impl<L: Literal> VariableSelection<L> for FixedOrder {
    fn new(num_vars: usize) -> Self {
        Self {
            conflicts: 0,
            num_vars,
        }
    }

    fn pick<A: Assignment>(&self, assignment: &A) -> Option<L> {
        (1..self.num_vars).find_map(|var| {
            #[allow(clippy::cast_possible_truncation)]
            let var = var as Variable;
            if assignment.is_assigned(var) {
                None
            } else {
                Some(L::new(var, true))
            }
        })
    }

    fn on_conflict<S: LiteralStorage<L>>(&mut self, _: &Clause<L, S>) {
        self.conflicts += 1;
    }

    fn conflicts(&self) -> usize {
        self.conflicts
    }
}
