use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Solutions;
use core::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }

    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    pub const fn is_false(&self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

/// Truth values for variables `1..=num_vars`, densely indexed by variable.
///
/// Slot 0 is allocated but never used, so a variable is its own index. Every
/// variable starts unassigned; reading a variable outside the range is a bug
/// in the caller and panics rather than inventing a default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    states: Vec<VarState>,
    assigned: usize,
}

impl Index<Variable> for Assignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.states[index as usize]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars + 1],
            assigned: 0,
        }
    }

    /// Number of variables covered, not counting the unused slot 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set(&mut self, var: Variable, b: bool) {
        let slot = &mut self.states[var as usize];
        if slot.is_unassigned() {
            self.assigned += 1;
        }
        *slot = VarState::Assigned(b);
    }

    /// Makes `lit` true.
    pub fn assign(&mut self, lit: impl Literal) {
        self.set(lit.variable(), lit.polarity());
    }

    pub fn unassign(&mut self, var: Variable) {
        let slot = &mut self.states[var as usize];
        if slot.is_assigned() {
            self.assigned -= 1;
        }
        *slot = VarState::Unassigned;
    }

    pub fn reset(&mut self) {
        self.states.fill(VarState::Unassigned);
        self.assigned = 0;
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self[var].is_assigned()
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self[var] {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    /// `Some(true)` if `lit` holds, `Some(false)` if its negation holds.
    #[must_use]
    pub fn literal_value(&self, lit: impl Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    #[must_use]
    pub fn all_assigned(&self) -> bool {
        self.assigned == self.states.len().saturating_sub(1)
    }

    /// Lowest-numbered unassigned variable.
    #[must_use]
    pub fn first_unassigned(&self) -> Option<Variable> {
        self.states
            .iter()
            .skip(1)
            .position(VarState::is_unassigned)
            .and_then(|i| Variable::try_from(i + 1).ok())
    }

    /// One signed literal per assigned variable; unassigned variables are left
    /// out.
    #[must_use]
    pub fn get_solutions(&self) -> Solutions {
        self.states
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, s)| match s {
                VarState::Assigned(b) => i32::try_from(i).ok().map(|v| if *b { v } else { -v }),
                VarState::Unassigned => None,
            })
            .collect()
    }
}
