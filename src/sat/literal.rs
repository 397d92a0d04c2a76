#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Boolean variables and literals.
//!
//! A variable is a positive integer `1..=N`. A literal is a variable together
//! with a polarity: positive asserts the variable true, negative asserts it
//! false. The `Literal` trait abstracts over the in-memory encoding so the
//! engines can be configured with whichever representation suits them.

use core::ops::{Neg, Not};
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a boolean variable. Valid variables start at 1.
pub type Variable = u32;

/// Largest variable a formula may reference, so that every literal still fits
/// in a signed 32-bit integer.
#[allow(clippy::cast_sign_loss)]
pub const MAX_VARIABLE: Variable = i32::MAX as Variable;

pub trait Literal: Copy + Debug + Eq + Hash + Default {
    fn new(var: Variable, polarity: bool) -> Self;
    fn variable(self) -> Variable;

    /// `true` for a positive literal.
    fn polarity(self) -> bool;

    #[must_use]
    fn negated(self) -> Self;

    fn is_negated(self) -> bool {
        !self.polarity()
    }

    fn is_positive(self) -> bool {
        self.polarity()
    }

    /// Dense index for per-literal tables: `2v` for `v`, `2v + 1` for `-v`.
    fn index(self) -> usize {
        (self.variable() as usize) * 2 + usize::from(self.is_negated())
    }

    /// Builds a literal from its signed form. The caller guarantees `value`
    /// is non-zero and within `MAX_VARIABLE`.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        debug_assert_ne!(value, 0, "zero is not a literal");
        let polarity = value.is_positive();
        let var = value.unsigned_abs();
        Self::new(var, polarity)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }
}

/// `2v` for the positive literal, `2v + 1` for the negative one, so the
/// encoding is its own watch-table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DoubleLiteral(u32);

impl Literal for DoubleLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        if polarity {
            Self(var * 2)
        } else {
            Self(var * 2 + 1)
        }
    }

    fn variable(self) -> Variable {
        self.0 / 2
    }

    fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl Neg for DoubleLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for DoubleLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// The signed form itself: `v` or `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NegativeLiteral(i32);

impl Literal for NegativeLiteral {
    #[allow(clippy::cast_possible_wrap)]
    fn new(var: Variable, polarity: bool) -> Self {
        debug_assert!(var <= MAX_VARIABLE, "variable {var} overflows a signed literal");
        let var = var as i32;

        if polarity { Self(var) } else { Self(-var) }
    }

    fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    fn polarity(self) -> bool {
        self.0.is_positive()
    }

    fn negated(self) -> Self {
        Self(-self.0)
    }

    fn to_i32(self) -> i32 {
        self.0
    }
}

impl Neg for NegativeLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for NegativeLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_literal_neg() {
        assert_eq!(DoubleLiteral::new(1, false).negated(), DoubleLiteral::new(1, true));
        assert_eq!(-DoubleLiteral::new(1, true), DoubleLiteral::new(1, false));
        assert_eq!(!DoubleLiteral::new(7, false), DoubleLiteral::new(7, true));
    }

    #[test]
    fn test_negative_literal_neg() {
        assert_eq!(NegativeLiteral::new(3, true).negated(), NegativeLiteral::new(3, false));
        assert_eq!(-NegativeLiteral::from_i32(-3), NegativeLiteral::from_i32(3));
    }

    #[test]
    fn test_polarity_follows_sign() {
        let pos = DoubleLiteral::from_i32(4);
        let neg = DoubleLiteral::from_i32(-4);
        assert!(pos.polarity());
        assert!(neg.is_negated());
        assert_eq!(pos.variable(), 4);
        assert_eq!(neg.variable(), 4);

        let pos = NegativeLiteral::from_i32(4);
        assert!(pos.is_positive());
        assert!(NegativeLiteral::from_i32(-4).is_negated());
    }

    #[test]
    fn test_i32_conversion() {
        for value in [1, -1, 17, -17, MAX_VARIABLE as i32, -(MAX_VARIABLE as i32)] {
            assert_eq!(DoubleLiteral::from_i32(value).to_i32(), value);
            assert_eq!(NegativeLiteral::from_i32(value).to_i32(), value);
        }
    }

    #[test]
    fn test_index_is_shared_across_encodings() {
        for value in [1, -1, 2, -2, 9, -9] {
            assert_eq!(
                DoubleLiteral::from_i32(value).index(),
                NegativeLiteral::from_i32(value).index()
            );
        }
        assert_eq!(DoubleLiteral::from_i32(3).index(), 6);
        assert_eq!(DoubleLiteral::from_i32(-3).index(), 7);
    }
}
