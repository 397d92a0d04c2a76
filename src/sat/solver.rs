#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The contract shared by both search engines.
//!
//! An engine is built from a `Cnf` formula and answers `solve()` with either a
//! model (`Some(Solutions)`) or `None` when the formula is unsatisfiable.
//! Which literal encoding the engine uses is picked at the type level through
//! `SolverConfig`.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{DoubleLiteral, Literal, Variable};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::Debug;
use std::num::NonZeroI32;

/// Compile-time configuration of an engine.
pub trait SolverConfig: Debug + Clone {
    /// In-memory encoding of literals inside clauses, the trail and the
    /// watch lists.
    type Literal: Literal;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Literal = DoubleLiteral;
}

/// A model: the set of literals made true, at most one per variable.
///
/// Variables the engine never had to assign are absent and may take either
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions {
    pub assignments: FxHashSet<NonZeroI32>,
}

impl Solutions {
    /// # Panics
    ///
    /// If `s` contains `0`.
    #[must_use]
    pub fn new(s: &[i32]) -> Self {
        s.iter().copied().collect()
    }

    /// Whether the literal `i` is true in this model.
    #[must_use]
    pub fn check(&self, i: NonZeroI32) -> bool {
        self.assignments.contains(&i)
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        let var = NonZeroI32::new(i32::try_from(var).ok()?)?;
        if self.check(var) {
            Some(true)
        } else if self.check(-var) {
            Some(false)
        } else {
            None
        }
    }

    /// Whether `lit` (in signed form) holds under this model.
    #[must_use]
    pub fn satisfies(&self, lit: impl Literal) -> bool {
        NonZeroI32::new(lit.to_i32()).is_some_and(|l| self.check(l))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NonZeroI32> {
        self.assignments.iter()
    }

    /// Literal-per-variable listing ordered by variable, the form consumers
    /// print.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i32> {
        self.assignments
            .iter()
            .map(|l| l.get())
            .sorted_by_key(|l| l.unsigned_abs())
            .collect()
    }
}

impl FromIterator<i32> for Solutions {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self {
            assignments: iter
                .into_iter()
                .map(|l| NonZeroI32::new(l).unwrap_or_else(|| panic!("0 is not a literal")))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub decisions: usize,
    pub propagations: usize,
    pub conflicts: usize,
    pub backtracks: usize,
}

pub trait Solver<Config: SolverConfig = DefaultConfig> {
    fn new(cnf: Cnf<Config::Literal>) -> Self;

    /// Searches for a model. Repeated calls start from scratch and give the
    /// same answer.
    fn solve(&mut self) -> Option<Solutions>;

    /// The current assignment as a model; only meaningful after `solve`
    /// returned `Some`.
    fn solutions(&self) -> Solutions;

    fn stats(&self) -> SolutionStats;
}
