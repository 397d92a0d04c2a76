#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Trail-based search with watched-literal unit propagation.
//!
//! The engine keeps every assignment on a `Trail`, tagged with the decision
//! level it was made at, and alternates three phases:
//!
//! 1. **Propagate:** walk the pending part of the trail. For each literal made
//!    true, revisit the clauses watching its negation. A clause either finds
//!    another non-false literal to watch, is already satisfied, becomes unit
//!    (its last open literal is forced at the current level) or is in
//!    conflict.
//! 2. **Decide:** when propagation is clean and variables remain, open a new
//!    level by setting the lowest-numbered unassigned variable to true.
//! 3. **Backtrack:** on conflict, drop the current level and assert the
//!    negation of the decision that opened it at the level below. A conflict
//!    at level 0 means the formula is unsatisfiable.
//!
//! Backtracking is chronological and nothing is learnt from conflicts.
//! Flipping the failed decision keeps the search complete.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::FormulaError;
use crate::sat::literal::Literal;
use crate::sat::solver::{DefaultConfig, SolutionStats, Solutions, Solver, SolverConfig};
use crate::sat::trail::{DecisionLevel, Reason, Trail};
use crate::sat::watch::{WatchSlot, WatchedLiterals};
use log::{debug, trace};

/// Outcome of revisiting one watching clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchUpdate {
    /// The clause keeps watching the falsified literal.
    Kept,
    /// The clause now watches another literal.
    Moved,
    Conflict,
}

#[derive(Debug, Clone)]
pub struct TrailSearch<Config: SolverConfig = DefaultConfig> {
    pub cnf: Cnf<Config::Literal>,

    pub assignment: Assignment,

    pub trail: Trail<Config::Literal>,

    pub watched_literals: WatchedLiterals,

    pub decision_level: DecisionLevel,

    stats: SolutionStats,
}

impl<Config: SolverConfig> TrailSearch<Config> {
    /// An engine over variables `1..=num_vars` with no clauses yet.
    #[must_use]
    pub fn with_vars(num_vars: usize) -> Self {
        Self::new(Cnf::with_vars(num_vars))
    }

    /// Appends a clause and starts watching it.
    ///
    /// # Errors
    ///
    /// `FormulaError` if a literal is `0` or its variable exceeds the declared
    /// count. The engine is unchanged in that case.
    pub fn add_clause(&mut self, literals: &[i32]) -> Result<(), FormulaError> {
        let c_ref = self.cnf.add_clause(literals)?;
        self.watched_literals.add_clause(&self.cnf[c_ref], c_ref);
        Ok(())
    }

    fn reset(&mut self) {
        self.assignment.reset();
        self.trail.clear();
        self.decision_level = 0;
        self.stats = SolutionStats::default();
    }

    fn assign(&mut self, lit: Config::Literal, reason: Reason) {
        debug_assert!(
            !self.assignment.is_assigned(lit.variable()),
            "variable {} assigned twice",
            lit.variable()
        );

        self.assignment.assign(lit);
        self.trail.push(lit, self.decision_level, reason);
    }

    /// Asserts every input unit clause at level 0. Returns `false` if two of
    /// them contradict each other.
    fn enqueue_units(&mut self) -> bool {
        for c_ref in 0..self.cnf.len() {
            if !self.cnf[c_ref].is_unit() {
                continue;
            }

            let lit = self.cnf[c_ref][0];
            match self.assignment.literal_value(lit) {
                Some(true) => {}
                Some(false) => {
                    trace!("unit clause {c_ref} contradicts an earlier unit");
                    return false;
                }
                None => self.assign(lit, Reason::Unit(c_ref)),
            }
        }
        true
    }

    /// Propagates every pending trail entry. Returns the index of a clause
    /// whose literals are all false, if one is found.
    pub fn propagate(&mut self) -> Option<usize> {
        while let Some(lit) = self.trail.next_pending() {
            self.stats.propagations += 1;

            if let Some(c_ref) = self.propagate_watch(lit.negated()) {
                return Some(c_ref);
            }
        }

        None
    }

    fn propagate_watch(&mut self, falsified: Config::Literal) -> Option<usize> {
        let mut watchers = self.watched_literals.take(falsified);
        let mut conflict = None;
        let mut i = 0;

        while i < watchers.len() {
            let c_ref = watchers[i];
            match self.process_clause(c_ref, falsified) {
                WatchUpdate::Kept => i += 1,
                WatchUpdate::Moved => {
                    watchers.swap_remove(i);
                }
                WatchUpdate::Conflict => {
                    conflict = Some(c_ref);
                    break;
                }
            }
        }

        self.watched_literals.restore(falsified, watchers);
        conflict
    }

    fn process_clause(&mut self, c_ref: usize, falsified: Config::Literal) -> WatchUpdate {
        let clause = &self.cnf[c_ref];
        let [first, second] = self.watched_literals.positions(c_ref);

        let (slot, other) = if clause[first] == falsified {
            (WatchSlot::First, clause[second])
        } else {
            debug_assert_eq!(clause[second], falsified);
            (WatchSlot::Second, clause[first])
        };

        let other_value = self.assignment.literal_value(other);
        if other_value == Some(true) {
            return WatchUpdate::Kept;
        }

        if let Some(pos) = self.find_new_watch(clause, first, second) {
            let new_lit = clause[pos];
            self.watched_literals.set_position(c_ref, slot, pos);
            self.watched_literals[new_lit].push(c_ref);
            return WatchUpdate::Moved;
        }

        match other_value {
            None => {
                self.assign(other, Reason::Long(c_ref));
                WatchUpdate::Kept
            }
            _ => WatchUpdate::Conflict,
        }
    }

    /// First unwatched position whose literal is not false.
    fn find_new_watch(&self, clause: &Clause<Config::Literal>, first: usize, second: usize) -> Option<usize> {
        clause
            .iter()
            .enumerate()
            .find(|&(pos, &lit)| {
                pos != first && pos != second && self.assignment.literal_value(lit) != Some(false)
            })
            .map(|(pos, _)| pos)
    }

    /// Opens a new level by setting the lowest-numbered unassigned variable
    /// to true. Returns `false` if every variable is assigned.
    pub fn decide(&mut self) -> bool {
        let Some(var) = self.assignment.first_unassigned() else {
            return false;
        };

        self.decision_level += 1;
        self.stats.decisions += 1;
        trace!("decide {var} at level {}", self.decision_level);

        self.assign(Config::Literal::new(var, true), Reason::Decision);
        true
    }

    /// Undoes the current level and asserts the negation of its decision one
    /// level down. Returns `false` at level 0, where there is nothing left to
    /// try.
    pub fn backtrack(&mut self) -> bool {
        if self.decision_level == 0 {
            return false;
        }

        self.decision_level -= 1;
        self.stats.backtracks += 1;

        let decision = self
            .trail
            .backstep_to(&mut self.assignment, self.decision_level);

        debug_assert!(
            decision.is_some(),
            "no decision on the trail above level {}",
            self.decision_level
        );
        let Some(decision) = decision else {
            return false;
        };

        trace!(
            "backtrack to level {}, flipping {:?}",
            self.decision_level,
            decision
        );
        self.assign(decision.negated(), Reason::Flipped);
        true
    }
}

impl<Config: SolverConfig> Solver<Config> for TrailSearch<Config> {
    fn new(cnf: Cnf<Config::Literal>) -> Self {
        let mut watched_literals = WatchedLiterals::new(cnf.num_vars);
        for (c_ref, clause) in cnf.iter().enumerate() {
            watched_literals.add_clause(clause, c_ref);
        }

        Self {
            assignment: Assignment::new(cnf.num_vars),
            trail: Trail::new(cnf.num_vars),
            watched_literals,
            cnf,
            decision_level: 0,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> Option<Solutions> {
        self.reset();
        debug!(
            "trail search: {} variables, {} clauses",
            self.cnf.num_vars,
            self.cnf.len()
        );

        if self.cnf.iter().any(Clause::is_empty) {
            debug!("formula contains the empty clause");
            return None;
        }

        if !self.enqueue_units() {
            debug!("unsatisfiable: contradicting unit clauses");
            return None;
        }

        loop {
            while let Some(c_ref) = self.propagate() {
                self.stats.conflicts += 1;
                trace!("conflict in clause {c_ref} at level {}", self.decision_level);

                if !self.backtrack() {
                    debug!("unsatisfiable after {:?}", self.stats);
                    return None;
                }
            }

            if !self.decide() {
                debug!("satisfiable after {:?}", self.stats);
                return Some(self.solutions());
            }
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}
