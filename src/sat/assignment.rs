#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The model: variable states under the current partial assignment.
//!
//! Two implementations are provided. `VecAssignment` stores one state per
//! variable and suits the dense, contiguous numbering DIMACS produces;
//! `HashMapAssignment` only stores the variables actually touched.

use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Solutions;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

/// The assignment state of a propositional variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum VarState {
    /// The variable has not been assigned a truth value.
    #[default]
    Unassigned,
    /// The variable has been assigned the contained truth value.
    Assigned(bool),
}

impl VarState {
    /// `true` if the variable holds a truth value.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// `true` if the variable holds no truth value.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

impl From<VarState> for Option<bool> {
    fn from(s: VarState) -> Self {
        match s {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }
}

/// Interface for tracking variable assignments.
///
/// Variables are `1..num_vars`; index 0 is a reserved dummy that stays
/// unassigned forever.
pub trait Assignment:
    Index<usize, Output = VarState> + IndexMut<usize, Output = VarState> + Debug + Clone
{
    /// Creates an assignment manager with all `n_vars` variables unassigned.
    fn new(n_vars: usize) -> Self;

    /// The number of variable slots, including the dummy slot 0.
    fn num_vars(&self) -> usize;

    /// Assigns a truth value to a variable.
    fn set(&mut self, var: Variable, value: bool);

    /// Returns a variable to the unassigned state.
    fn unassign(&mut self, var: Variable);

    /// Makes a literal true: its variable takes the literal's polarity.
    fn assign(&mut self, l: impl Literal) {
        self.set(l.variable(), l.polarity());
    }

    /// `true` if the variable holds a truth value.
    fn is_assigned(&self, var: Variable) -> bool {
        self[var as usize].is_assigned()
    }

    /// The truth value of a variable, if assigned.
    fn var_value(&self, var: Variable) -> Option<bool> {
        self[var as usize].into()
    }

    /// The truth value of a literal under the current assignment, or `None`
    /// if its variable is unassigned.
    fn literal_value(&self, l: impl Literal) -> Option<bool> {
        self.var_value(l.variable()).map(|b| b == l.polarity())
    }

    /// Extracts the assigned variables as a `Solutions` model.
    fn get_solutions(&self) -> Solutions;
}

/// Dense assignment storage: one `VarState` per variable slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment {
    states: Vec<VarState>,
}

impl Index<usize> for VecAssignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.states[index]
    }
}

impl IndexMut<usize> for VecAssignment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.states[index]
    }
}

impl Assignment for VecAssignment {
    fn new(n_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; n_vars],
        }
    }

    fn num_vars(&self) -> usize {
        self.states.len()
    }

    fn set(&mut self, var: Variable, value: bool) {
        self[var as usize] = VarState::Assigned(value);
    }

    fn unassign(&mut self, var: Variable) {
        self[var as usize] = VarState::Unassigned;
    }

    fn get_solutions(&self) -> Solutions {
        Solutions::new(
            &self
                .states
                .iter()
                .enumerate()
                .filter_map(|(i, s)| {
                    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
                    let var = i as i32;
                    match s {
                        VarState::Assigned(true) => Some(var),
                        VarState::Assigned(false) => Some(-var),
                        VarState::Unassigned => None,
                    }
                })
                .collect_vec(),
        )
    }
}

/// Sparse assignment storage keyed by variable; absent variables read as
/// unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HashMapAssignment {
    map: FxHashMap<Variable, VarState>,
    num_vars: usize,
}

impl Index<usize> for HashMapAssignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        #[allow(clippy::cast_possible_truncation)]
        self.map
            .get(&(index as Variable))
            .unwrap_or(&VarState::Unassigned)
    }
}

impl IndexMut<usize> for HashMapAssignment {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        #[allow(clippy::cast_possible_truncation)]
        self.map
            .entry(index as Variable)
            .or_insert(VarState::Unassigned)
    }
}

impl Assignment for HashMapAssignment {
    fn new(n_vars: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            num_vars: n_vars,
        }
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn set(&mut self, var: Variable, value: bool) {
        self.map.insert(var, VarState::Assigned(value));
    }

    fn unassign(&mut self, var: Variable) {
        self.map.remove(&var);
    }

    fn get_solutions(&self) -> Solutions {
        Solutions::new(
            &self
                .map
                .iter()
                .filter_map(|(&var, s)| {
                    #[allow(clippy::cast_possible_wrap)]
                    let var = var as i32;
                    match s {
                        VarState::Assigned(true) => Some(var),
                        VarState::Assigned(false) => Some(-var),
                        VarState::Unassigned => None,
                    }
                })
                .collect_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    fn exercise<A: Assignment>(a: &mut A) {
        a.set(1, true);
        a.set(2, false);
        a.assign(PackedLiteral::new(3, true));

        assert!(a.is_assigned(1));
        assert!(a.is_assigned(2));
        assert!(a.is_assigned(3));
        assert!(!a.is_assigned(0));

        assert_eq!(a.var_value(1), Some(true));
        assert_eq!(a.var_value(2), Some(false));
        assert_eq!(a.var_value(0), None);

        assert_eq!(a.literal_value(PackedLiteral::new(1, true)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::new(1, false)), Some(false));
        assert_eq!(a.literal_value(PackedLiteral::new(2, false)), Some(true));
        assert_eq!(a.literal_value(PackedLiteral::new(0, true)), None);

        a.unassign(1);
        assert!(!a.is_assigned(1));
        assert_eq!(a.literal_value(PackedLiteral::new(1, true)), None);

        assert_eq!(a.get_solutions(), Solutions::new(&[-2, 3]));
    }

    #[test]
    fn test_vec_assignment() {
        let mut a = VecAssignment::new(4);
        exercise(&mut a);
        assert_eq!(a.num_vars(), 4);
    }

    #[test]
    fn test_hashmap_assignment() {
        let mut a = HashMapAssignment::new(4);
        exercise(&mut a);
        assert_eq!(a.num_vars(), 4);
    }
}
