use crate::sat::assignment::Assignment;
use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;

/// A disjunction of literals, kept exactly as given: duplicate literals and
/// tautologies are not cleaned up. Clauses never change once they are part of
/// a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause<L: Literal> {
    literals: SmallVec<[L; 8]>,
}

/// How a clause stands under a (partial) assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseStatus<L: Literal> {
    /// Some literal is true.
    Satisfied,
    /// Every literal is false.
    Conflict,
    /// Exactly one literal is unassigned and the rest are false.
    Unit(L),
    /// Two or more literals are unassigned and none is true.
    Unresolved,
}

impl<L: Literal> Clause<L> {
    /// Builds a clause from signed literals. Callers validate the literals
    /// first; see `Cnf::add_clause`.
    #[must_use]
    pub fn new(literals: &[i32]) -> Self {
        literals.iter().copied().map(L::from_i32).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// Contains some literal together with its negation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .tuple_combinations()
            .any(|(a, b)| *a == b.negated())
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// Classifies the clause by scanning every literal.
    #[must_use]
    pub fn status(&self, assignment: &Assignment) -> ClauseStatus<L> {
        let mut unassigned = None;
        let mut open = 0_usize;

        for &lit in &self.literals {
            match assignment.literal_value(lit) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    open += 1;
                    unassigned = Some(lit);
                }
            }
        }

        match (open, unassigned) {
            (0, _) => ClauseStatus::Conflict,
            (1, Some(lit)) => ClauseStatus::Unit(lit),
            _ => ClauseStatus::Unresolved,
        }
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal> FromIterator<L> for Clause<L> {
    fn from_iter<T: IntoIterator<Item = L>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
        }
    }
}

impl<L: Literal> From<Vec<L>> for Clause<L> {
    fn from(literals: Vec<L>) -> Self {
        Self {
            literals: SmallVec::from_vec(literals),
        }
    }
}

impl<L: Literal> AsRef<[L]> for Clause<L> {
    fn as_ref(&self) -> &[L] {
        &self.literals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::{DoubleLiteral, NegativeLiteral};

    type Lit = DoubleLiteral;

    #[test]
    fn test_new() {
        let clause: Clause<Lit> = Clause::new(&[1, 2, 3]);
        assert_eq!(clause.len(), 3);
        assert!(!clause.is_unit());
        assert!(Clause::<Lit>::new(&[-4]).is_unit());
        assert!(Clause::<Lit>::new(&[]).is_empty());
    }

    #[test]
    fn test_iter_preserves_order_and_duplicates() {
        let clause: Clause<NegativeLiteral> = Clause::new(&[3, -1, 3]);
        let lits = clause.iter().map(|l| l.to_i32()).collect_vec();
        assert_eq!(lits, vec![3, -1, 3]);
        assert_eq!(clause[2], NegativeLiteral::from_i32(3));
    }

    #[test]
    fn test_is_tautology() {
        assert!(Clause::<Lit>::new(&[1, 2, -1]).is_tautology());
        assert!(!Clause::<Lit>::new(&[1, 2, 1]).is_tautology());
        assert!(!Clause::<Lit>::new(&[]).is_tautology());
    }

    #[test]
    fn test_status() {
        let clause: Clause<Lit> = Clause::new(&[1, -2, 3]);
        let mut a = Assignment::new(3);
        assert_eq!(clause.status(&a), ClauseStatus::Unresolved);

        a.set(1, false);
        a.set(2, true);
        assert_eq!(clause.status(&a), ClauseStatus::Unit(Lit::from_i32(3)));

        a.set(3, false);
        assert_eq!(clause.status(&a), ClauseStatus::Conflict);

        a.set(2, false);
        assert_eq!(clause.status(&a), ClauseStatus::Satisfied);
    }

    #[test]
    fn test_empty_clause_is_conflict() {
        let clause: Clause<Lit> = Clause::new(&[]);
        assert_eq!(clause.status(&Assignment::new(1)), ClauseStatus::Conflict);
    }
}
