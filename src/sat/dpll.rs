#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The iterative DPLL engine.
//!
//! One solver instance owns everything a solve needs: the frozen clause
//! store, the occurrence index over it, the model, the trail, and the
//! branching heuristic. The search alternates between three activities:
//!
//! 1. **Propagation**: consume trail literals FIFO from the cursor; each
//!    consumed literal is checked only against the clauses containing its
//!    negation. A clause with one unassigned literal left forces that
//!    literal; a clause with none is a conflict.
//! 2. **Backtracking**: on a conflict above decision level zero, pop the
//!    trail through the most recent decision and push that decision's
//!    negation as an implied assignment one level down. A conflict at level
//!    zero is unsatisfiability.
//! 3. **Deciding**: with the queue drained and no conflict, branch on the
//!    literal the selector ranks highest. No candidate left means every
//!    variable is assigned and the formula is satisfied.
//!
//! There is no clause learning and no restarting; backtracking is strictly
//! chronological.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::occurrence::OccurrenceIndex;
use crate::sat::solver::{DefaultConfig, SolutionStats, Solutions, Solver, SolverConfig};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::VariableSelection;

/// How a clause stands under the current partial assignment.
enum ClauseStatus<L: Literal> {
    /// Some literal is true.
    Satisfied,
    /// No true literal, exactly one unassigned: that literal is forced.
    Unit(L),
    /// No true literal, two or more unassigned.
    Unresolved,
    /// Every literal is false.
    Conflicting,
}

/// Evaluates a clause, remembering the last unassigned literal seen so a
/// unit clause hands back the literal it forces.
fn clause_status<L: Literal, S: LiteralStorage<L>, A: Assignment>(
    clause: &Clause<L, S>,
    assignment: &A,
) -> ClauseStatus<L> {
    let mut unassigned = 0_usize;
    let mut last_unassigned = None;

    for &lit in clause.iter() {
        match assignment.literal_value(lit) {
            Some(true) => return ClauseStatus::Satisfied,
            Some(false) => {}
            None => {
                unassigned += 1;
                last_unassigned = Some(lit);
            }
        }
    }

    match (unassigned, last_unassigned) {
        (0, _) => ClauseStatus::Conflicting,
        (1, Some(lit)) => ClauseStatus::Unit(lit),
        _ => ClauseStatus::Unresolved,
    }
}

/// An iterative DPLL solver.
///
/// Constructed fresh for each formula; not re-entrant.
#[derive(Debug, Clone)]
pub struct Dpll<Config: SolverConfig = DefaultConfig> {
    /// The formula being decided. Read-only once the solver exists.
    pub cnf: Cnf<Config::Literal, Config::LiteralStorage>,
    occurrence: OccurrenceIndex<Config::Literal>,
    assignment: Config::Assignment,
    trail: Trail<Config::Literal>,
    selector: Config::VariableSelector,
    decisions: usize,
    propagations: usize,
}

impl<Config: SolverConfig> Dpll<Config> {
    /// Makes a literal true: model first, then the trail entry.
    fn enqueue(&mut self, lit: Config::Literal, reason: Reason) {
        self.assignment.assign(lit);
        self.trail.push(lit, reason);
    }

    /// Seeds the trail from the formula's unit clauses, all at decision
    /// level zero. Returns `false` if two unit clauses contradict each
    /// other, which already decides the formula.
    fn assign_initial_units(&mut self) -> bool {
        for handle in 0..self.cnf.len() {
            if !self.cnf.clauses[handle].is_unit() {
                continue;
            }
            let lit = self.cnf.clauses[handle][0];
            match self.assignment.literal_value(lit) {
                Some(false) => return false,
                Some(true) => {}
                None => self.enqueue(lit, Reason::Unit(handle)),
            }
        }
        true
    }

    /// Runs unit propagation to fixpoint. Returns the handle of a falsified
    /// clause, or `None` once the queue is drained without conflict.
    fn propagate(&mut self) -> Option<usize> {
        while let Some(lit) = self.trail.next_to_propagate() {
            self.propagations += 1;

            // only clauses holding the opposite polarity can have been
            // weakened by this assignment
            let falsified = lit.negated();
            for &handle in &self.occurrence[falsified] {
                match clause_status(&self.cnf.clauses[handle], &self.assignment) {
                    ClauseStatus::Satisfied | ClauseStatus::Unresolved => {}
                    ClauseStatus::Unit(forced) => {
                        self.assignment.assign(forced);
                        self.trail.push(forced, Reason::Clause(handle));
                    }
                    ClauseStatus::Conflicting => return Some(handle),
                }
            }
        }
        None
    }

    /// `true` iff every clause has at least one true literal under the
    /// current model.
    fn check_model(&self) -> bool {
        self.cnf.iter().all(|clause| {
            clause
                .iter()
                .any(|&lit| self.assignment.literal_value(lit) == Some(true))
        })
    }
}

impl<Config: SolverConfig> Solver<Config> for Dpll<Config> {
    fn new(cnf: Cnf<Config::Literal, Config::LiteralStorage>) -> Self {
        let occurrence = OccurrenceIndex::new(&cnf);
        let assignment = Config::Assignment::new(cnf.num_vars);
        let trail = Trail::new(cnf.num_vars);
        let selector = Config::VariableSelector::new(cnf.num_vars);

        Self {
            cnf,
            occurrence,
            assignment,
            trail,
            selector,
            decisions: 0,
            propagations: 0,
        }
    }

    fn solve(&mut self) -> Option<Solutions> {
        if self.cnf.is_empty() {
            return Some(Solutions::default());
        }
        // an empty clause is unsatisfiable on its own
        if self.cnf.iter().any(Clause::is_empty) {
            return None;
        }
        if !self.assign_initial_units() {
            return None;
        }

        loop {
            if let Some(handle) = self.propagate() {
                self.selector.on_conflict(&self.cnf.clauses[handle]);

                if self.trail.decision_level() == 0 {
                    return None;
                }

                let decision = self.trail.backtrack(&mut self.assignment)?;
                self.enqueue(decision.negated(), Reason::Flipped);
            } else if let Some(lit) = self.selector.pick(&self.assignment) {
                self.decisions += 1;
                self.enqueue(lit, Reason::Decision);
            } else {
                assert!(
                    self.check_model(),
                    "solver bug: declared SAT but the model leaves a clause unsatisfied"
                );
                return Some(self.solutions());
            }
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            conflicts: self.selector.conflicts(),
            decisions: self.decisions,
            propagations: self.propagations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::HashMapAssignment;
    use crate::sat::literal::PackedLiteral;
    use crate::sat::variable_selection::FixedOrder;

    fn solve(clauses: Vec<Vec<i32>>) -> (Option<Solutions>, SolutionStats) {
        let mut solver: Dpll = Solver::new(Cnf::new(clauses));
        let solution = solver.solve();
        (solution, solver.stats())
    }

    #[test]
    fn test_trivially_sat() {
        let (solution, stats) = solve(vec![vec![1]]);
        let model = solution.unwrap();
        assert_eq!(model.var_value(1), Some(true));
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn test_trivially_unsat() {
        let (solution, _) = solve(vec![vec![1], vec![-1]]);
        assert!(solution.is_none());
    }

    #[test]
    fn test_empty_formula_is_sat() {
        let (solution, _) = solve(Vec::new());
        assert!(solution.unwrap().is_empty());
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let (solution, _) = solve(vec![vec![1, 2], Vec::new()]);
        assert!(solution.is_none());
    }

    #[test]
    fn test_pigeonhole_two_in_one() {
        let (solution, stats) = solve(vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]]);
        assert!(solution.is_none());
        assert!(stats.conflicts > 0);
    }

    #[test]
    fn test_chain_propagation() {
        let cnf: Cnf = Cnf::new(vec![vec![1], vec![-1, 2], vec![-2, 3]]);
        let mut solver: Dpll = Solver::new(cnf.clone());
        let model = solver.solve().unwrap();

        for var in 1..=3 {
            assert_eq!(model.var_value(var), Some(true));
        }
        assert!(cnf.verify(&model));

        let stats = solver.stats();
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.propagations, 3);
        assert_eq!(stats.conflicts, 0);
    }

    #[test]
    fn test_branch_and_flip() {
        let cnf: Cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2]]);
        let mut solver: Dpll = Solver::new(cnf.clone());
        let model = solver.solve().unwrap();
        assert!(cnf.verify(&model));
        assert_eq!(model.var_value(2), Some(true));
    }

    #[test]
    fn test_conflict_then_flip_recovers() {
        // deciding 2 true runs straight into a conflict; the flipped
        // branch with 2 false satisfies everything
        let cnf: Cnf = Cnf::new(vec![vec![-2, 1], vec![-2, -1], vec![2, 1]]);
        let mut solver: Dpll = Solver::new(cnf.clone());
        let model = solver.solve().unwrap();

        assert!(cnf.verify(&model));
        assert_eq!(model.var_value(2), Some(false));
        assert_eq!(model.var_value(1), Some(true));

        let stats = solver.stats();
        assert_eq!(stats.conflicts, 1);
        assert_eq!(stats.decisions, 1);
    }

    #[test]
    fn test_sat_models_satisfy_formula() {
        let formulas = [
            vec![vec![1, 2, 3], vec![-1, -2], vec![-3, 1]],
            vec![vec![1, -2], vec![2, -3], vec![3, -1], vec![1, 2, 3]],
            vec![vec![-1, 2], vec![-2, 3], vec![-3, 4], vec![1]],
        ];

        for clauses in formulas {
            let cnf: Cnf = Cnf::new(clauses);
            let mut solver: Dpll = Solver::new(cnf.clone());
            let model = solver.solve().expect("formula is satisfiable");
            assert!(cnf.verify(&model));
        }
    }

    #[test]
    fn test_deterministic_counters() {
        let clauses = vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![2, 3], vec![-3, 1]];

        let (first_solution, first_stats) = solve(clauses.clone());
        let (second_solution, second_stats) = solve(clauses);

        assert_eq!(first_solution.is_some(), second_solution.is_some());
        assert_eq!(first_solution, second_solution);
        assert_eq!(first_stats, second_stats);
    }

    #[derive(Debug, Clone, Default)]
    struct SparseConfig;

    impl SolverConfig for SparseConfig {
        type Literal = PackedLiteral;
        type LiteralStorage = Vec<PackedLiteral>;
        type Assignment = HashMapAssignment;
        type VariableSelector = FixedOrder;
    }

    #[test]
    fn test_alternative_config() {
        let cnf: Cnf<PackedLiteral, Vec<PackedLiteral>> =
            Cnf::new(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
        let mut solver: Dpll<SparseConfig> = Solver::new(cnf.clone());
        let model = solver.solve().unwrap();
        assert!(cnf.verify(&model));
    }
}
