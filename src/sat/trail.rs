#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, Variable};
use std::ops::Index;

/// Depth of free decisions in effect. Level 0 holds only forced assignments.
pub type DecisionLevel = usize;

/// Why a literal is on the trail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash, PartialOrd, Ord)]
pub enum Reason {
    /// Free choice that opened its decision level.
    #[default]
    Decision,
    /// Input unit clause with this index.
    Unit(usize),
    /// Forced by the clause with this index becoming unit.
    Long(usize),
    /// Negation of a decision whose level failed.
    Flipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step<L: Literal> {
    pub lit: L,
    pub decision_level: DecisionLevel,
    pub reason: Reason,
}

/// Chronological record of every assignment, undone in LIFO order.
///
/// `curr_idx` is the propagation head: steps before it have had their
/// consequences examined, steps from it onwards are still pending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail<L: Literal> {
    t: Vec<Step<L>>,
    pub curr_idx: usize,
    pub lit_to_level: Vec<DecisionLevel>,
}

impl<L: Literal> Index<usize> for Trail<L> {
    type Output = Step<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl<L: Literal> Trail<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars),
            curr_idx: 0,
            lit_to_level: vec![0; num_vars + 1],
        }
    }

    /// Level of the most recent step, 0 on an empty trail.
    #[must_use]
    pub fn decision_level(&self) -> DecisionLevel {
        self.t.last().map_or(0, |step| step.decision_level)
    }

    /// Level `var` was assigned at. Meaningless while `var` is unassigned.
    #[must_use]
    pub fn level(&self, var: Variable) -> DecisionLevel {
        self.lit_to_level[var as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step<L>> {
        self.t.iter()
    }

    /// Next literal whose consequences have not been examined yet.
    pub fn next_pending(&mut self) -> Option<L> {
        let step = self.t.get(self.curr_idx)?;
        self.curr_idx += 1;
        Some(step.lit)
    }

    pub fn push(&mut self, lit: L, decision_level: DecisionLevel, reason: Reason) {
        debug_assert!(
            self.t.iter().all(|s| s.lit.variable() != lit.variable()),
            "variable {} is already on the trail",
            lit.variable()
        );

        self.t.push(Step {
            lit,
            decision_level,
            reason,
        });
        self.lit_to_level[lit.variable() as usize] = decision_level;
    }

    /// Pops and unassigns every step above `level`.
    ///
    /// Returns the decision that opened `level + 1`, if it was popped.
    pub fn backstep_to(&mut self, a: &mut Assignment, level: DecisionLevel) -> Option<L> {
        let mut decision = None;

        while let Some(step) = self.t.last() {
            let var = step.lit.variable();
            if self.lit_to_level[var as usize] <= level {
                break;
            }

            if step.reason == Reason::Decision {
                decision = Some(step.lit);
            }
            a.unassign(var);
            self.lit_to_level[var as usize] = 0;
            self.t.pop();
        }

        self.curr_idx = self.curr_idx.min(self.t.len());
        decision
    }

    pub fn clear(&mut self) {
        self.t.clear();
        self.curr_idx = 0;
        self.lit_to_level.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::DoubleLiteral;

    fn lit(value: i32) -> DoubleLiteral {
        DoubleLiteral::from_i32(value)
    }

    fn push_assigned(t: &mut Trail<DoubleLiteral>, a: &mut Assignment, value: i32, level: usize, reason: Reason) {
        a.assign(lit(value));
        t.push(lit(value), level, reason);
    }

    #[test]
    fn test_push_records_level() {
        let mut t = Trail::new(3);
        t.push(lit(-2), 0, Reason::Unit(4));
        t.push(lit(1), 1, Reason::Decision);

        assert_eq!(t.len(), 2);
        assert_eq!(t.level(2), 0);
        assert_eq!(t.level(1), 1);
        assert_eq!(t.decision_level(), 1);
        assert_eq!(t[0].reason, Reason::Unit(4));
    }

    #[test]
    fn test_next_pending_advances_head() {
        let mut t = Trail::new(2);
        t.push(lit(1), 0, Reason::Unit(0));
        t.push(lit(-2), 0, Reason::Long(1));

        assert_eq!(t.next_pending(), Some(lit(1)));
        assert_eq!(t.next_pending(), Some(lit(-2)));
        assert_eq!(t.next_pending(), None);
        assert_eq!(t.curr_idx, 2);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_backstep_to_keeps_lower_levels() {
        let mut a = Assignment::new(5);
        let mut t = Trail::new(5);
        push_assigned(&mut t, &mut a, -1, 0, Reason::Unit(0));
        push_assigned(&mut t, &mut a, 2, 1, Reason::Decision);
        push_assigned(&mut t, &mut a, 3, 1, Reason::Long(2));
        push_assigned(&mut t, &mut a, 4, 2, Reason::Decision);
        push_assigned(&mut t, &mut a, -5, 2, Reason::Long(3));
        while t.next_pending().is_some() {}

        let decision = t.backstep_to(&mut a, 1);

        assert_eq!(decision, Some(lit(4)));
        assert_eq!(t.len(), 3);
        assert_eq!(t.curr_idx, 3);
        assert!(t.iter().all(|s| s.decision_level <= 1));
        assert!(a.is_assigned(3));
        assert!(!a.is_assigned(4));
        assert!(!a.is_assigned(5));
    }

    #[test]
    fn test_backstep_to_zero_reports_first_decision() {
        let mut a = Assignment::new(3);
        let mut t = Trail::new(3);
        push_assigned(&mut t, &mut a, 1, 1, Reason::Decision);
        push_assigned(&mut t, &mut a, 2, 2, Reason::Decision);
        push_assigned(&mut t, &mut a, 3, 2, Reason::Long(0));

        assert_eq!(t.backstep_to(&mut a, 0), Some(lit(1)));
        assert!(t.is_empty());
        assert_eq!(t.curr_idx, 0);
        assert_eq!(a.first_unassigned(), Some(1));
    }

    #[test]
    fn test_backstep_without_deeper_steps_is_noop() {
        let mut a = Assignment::new(1);
        let mut t = Trail::new(1);
        push_assigned(&mut t, &mut a, 1, 0, Reason::Unit(0));

        assert_eq!(t.backstep_to(&mut a, 0), None);
        assert_eq!(t.len(), 1);
        assert!(a.is_assigned(1));
    }
}
