//! Exhaustive depth-first search over variable assignments.
//!
//! Each step re-scans the whole formula:
//! 1.  If every clause has a true literal, the current assignment is a model.
//! 2.  If some clause has only false literals, the current branch fails.
//! 3.  Otherwise the first unassigned variable found scanning clauses, then
//!     literals, in order is tried with `true` first and `false` second.
//!
//! There is no propagation and no heuristic. Instead of recursing, the
//! solver keeps an explicit stack of choice points, one per tentatively
//! assigned variable, so search depth is bounded by the variable count rather
//! than the call stack. Undoing a choice point only needs its variable, since
//! nothing else is assigned alongside it.

use crate::sat::assignment::Assignment;
use crate::sat::clause::ClauseStatus;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{DefaultConfig, SolutionStats, Solutions, Solver, SolverConfig};
use log::{debug, trace};

/// A variable tentatively assigned by the search, with the value currently
/// being tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChoicePoint {
    var: Variable,
    value: bool,
}

#[derive(Debug, Clone)]
pub struct Dpll<Config: SolverConfig = DefaultConfig> {
    /// The formula being solved.
    pub cnf: Cnf<Config::Literal>,
    /// Current partial assignment. On success it holds the model.
    pub assignment: Assignment,
    choices: Vec<ChoicePoint>,
    stats: SolutionStats,
}

impl<Config: SolverConfig> Solver<Config> for Dpll<Config> {
    fn new(cnf: Cnf<Config::Literal>) -> Self {
        Self {
            assignment: Assignment::new(cnf.num_vars),
            choices: Vec::with_capacity(cnf.num_vars),
            cnf,
            stats: SolutionStats::default(),
        }
    }

    /// Runs the search to completion.
    ///
    /// Returns the assigned variables of the first model found in
    /// true-before-false order, or `None` if no assignment satisfies the
    /// formula. Variables that no clause needed stay out of the model.
    fn solve(&mut self) -> Option<Solutions> {
        self.assignment.reset();
        self.choices.clear();
        self.stats = SolutionStats::default();
        debug!(
            "dpll: {} variables, {} clauses",
            self.cnf.num_vars,
            self.cnf.len()
        );

        loop {
            if self.is_sat() {
                debug!("satisfiable after {:?}", self.stats);
                return Some(self.solutions());
            }

            if self.is_unsat() {
                self.stats.conflicts += 1;
                if !self.backtrack() {
                    debug!("unsatisfiable after {:?}", self.stats);
                    return None;
                }
                continue;
            }

            let Some(var) = self.pick_variable() else {
                debug_assert!(false, "undecided formula without an unassigned variable");
                return None;
            };

            self.stats.decisions += 1;
            trace!("try {var} = true at depth {}", self.choices.len() + 1);
            self.choices.push(ChoicePoint { var, value: true });
            self.assignment.set(var, true);
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl<Config: SolverConfig> Dpll<Config> {
    /// Every clause has a true literal. Vacuously true for an empty formula.
    fn is_sat(&self) -> bool {
        self.cnf
            .iter()
            .all(|clause| clause.status(&self.assignment) == ClauseStatus::Satisfied)
    }

    /// Some clause has only false literals, including the empty clause.
    fn is_unsat(&self) -> bool {
        self.cnf
            .iter()
            .any(|clause| clause.status(&self.assignment) == ClauseStatus::Conflict)
    }

    fn pick_variable(&self) -> Option<Variable> {
        self.cnf
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|lit| lit.variable())
            .find(|&var| !self.assignment.is_assigned(var))
    }

    /// Moves to the next untried branch: the deepest choice still on `true`
    /// switches to `false`, exhausted choices above it are undone. Returns
    /// `false` once every branch has been tried.
    fn backtrack(&mut self) -> bool {
        while let Some(choice) = self.choices.last_mut() {
            if choice.value {
                choice.value = false;
                let var = choice.var;
                self.assignment.set(var, false);
                self.stats.backtracks += 1;
                trace!("try {var} = false at depth {}", self.choices.len());
                return true;
            }

            self.assignment.unassign(choice.var);
            self.choices.pop();
        }

        false
    }
}
