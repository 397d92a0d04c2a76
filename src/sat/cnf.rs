#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A `Cnf` fixes its variable range `1..=num_vars` up front and owns the
//! clause database. Clauses are identified by their insertion index and are
//! validated on the way in, so the engines never see a zero literal or a
//! variable outside the range.

use crate::sat::clause::Clause;
use crate::sat::error::FormulaError;
use crate::sat::literal::{DoubleLiteral, Literal, MAX_VARIABLE};
use crate::sat::solver::Solutions;
use core::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf<L: Literal = DoubleLiteral> {
    pub clauses: Vec<Clause<L>>,
    pub num_vars: usize,
}

impl<L: Literal> Cnf<L> {
    /// An empty formula over variables `1..=num_vars`.
    #[must_use]
    pub fn with_vars(num_vars: usize) -> Self {
        Self {
            clauses: Vec::new(),
            num_vars: num_vars.min(MAX_VARIABLE as usize),
        }
    }

    /// Appends a clause and returns its index.
    ///
    /// # Errors
    ///
    /// `FormulaError` if a literal is `0` or names a variable above
    /// `num_vars`. Nothing is added in that case.
    pub fn add_clause(&mut self, literals: &[i32]) -> Result<usize, FormulaError> {
        let idx = self.clauses.len();
        check_literals(literals, idx, self.num_vars)?;

        self.clauses.push(Clause::new(literals));
        Ok(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter()
    }

    /// Replays a model against every clause. A variable missing from the
    /// model satisfies neither of its literals.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.iter()
            .all(|clause| clause.iter().any(|&lit| solutions.satisfies(lit)))
    }
}

fn check_literals(literals: &[i32], clause: usize, num_vars: usize) -> Result<(), FormulaError> {
    for &lit in literals {
        if lit == 0 {
            return Err(FormulaError::ZeroLiteral { clause });
        }

        let variable = lit.unsigned_abs();
        if variable as usize > num_vars {
            return Err(FormulaError::VariableOutOfRange {
                clause,
                variable,
                num_vars,
            });
        }
    }
    Ok(())
}

impl<L: Literal> Index<usize> for Cnf<L> {
    type Output = Clause<L>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

/// Builds a formula from a clause list, taking the variable range from the
/// largest variable mentioned.
impl<L: Literal> TryFrom<Vec<Vec<i32>>> for Cnf<L> {
    type Error = FormulaError;

    fn try_from(clauses: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs())
            .filter(|&var| var <= MAX_VARIABLE)
            .max()
            .unwrap_or(0) as usize;

        let mut cnf = Self::with_vars(num_vars);
        for clause in &clauses {
            cnf.add_clause(clause)?;
        }
        Ok(cnf)
    }
}
