use crate::sat::literal::Variable;
use thiserror::Error;

/// A clause that cannot belong to the formula it is being added to.
///
/// The offending clause is rejected as a whole; the formula is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// `0` terminates DIMACS clauses but is never a literal.
    #[error("clause {clause} contains the literal 0")]
    ZeroLiteral { clause: usize },

    #[error("clause {clause} references variable {variable}, outside the declared range 1..={num_vars}")]
    VariableOutOfRange {
        clause: usize,
        variable: Variable,
        num_vars: usize,
    },
}
