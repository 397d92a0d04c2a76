//! This crate provides two propositional satisfiability (SAT) search engines
//! over a shared CNF model.
//!
//! - [`sat::dpll::Dpll`] exhaustively tries both values of each variable,
//!   re-scanning the whole formula at every step.
//! - [`sat::trail_search::TrailSearch`] keeps an assignment trail with
//!   decision levels and propagates unit clauses through watched literals,
//!   backtracking chronologically on conflict.
//!
//! Both implement [`sat::solver::Solver`]: build one from a
//! [`sat::cnf::Cnf`], call `solve()`, and get `Some(model)` or `None` for an
//! unsatisfiable formula.
//!
//! ```
//! use sat_search::sat::cnf::Cnf;
//! use sat_search::sat::solver::{Solutions, Solver};
//! use sat_search::sat::trail_search::TrailSearch;
//!
//! let mut solver: TrailSearch = TrailSearch::with_vars(3);
//! solver.add_clause(&[1, -2]).unwrap();
//! solver.add_clause(&[-1, 2]).unwrap();
//! solver.add_clause(&[-2, 3]).unwrap();
//! solver.add_clause(&[-3]).unwrap();
//! assert_eq!(solver.solve(), Some(Solutions::new(&[-1, -2, -3])));
//!
//! let cnf: Cnf = Cnf::try_from(vec![vec![1, 3], vec![-1], vec![-3]]).unwrap();
//! let mut solver: sat_search::sat::dpll::Dpll = Solver::new(cnf);
//! assert_eq!(solver.solve(), None);
//! ```

/// The `sat` module holds the formula model and both search engines.
pub mod sat;
