#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Which slot of a clause's watch pair is being referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSlot {
    First,
    Second,
}

/// Literal → clauses that must be revisited when that literal becomes false.
///
/// Every clause watches two of its positions (the same position twice for a
/// unit clause). The positions live here rather than in the clause so the
/// clause's literal order never changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchedLiterals {
    lists: Vec<SmallVec<[usize; 6]>>,
    watched: Vec<[usize; 2]>,
}

impl WatchedLiterals {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            lists: vec![SmallVec::new(); 2 * (num_vars + 1)],
            watched: Vec::new(),
        }
    }

    /// Registers clause `idx`: its first literal, and its second if it has
    /// one. Clauses must be added in index order.
    pub fn add_clause<L: Literal>(&mut self, clause: &Clause<L>, idx: usize) {
        debug_assert_eq!(idx, self.watched.len(), "clauses registered out of order");

        let pair = match clause.len() {
            0 => [0, 0],
            1 => {
                self[clause[0]].push(idx);
                [0, 0]
            }
            _ => {
                self[clause[0]].push(idx);
                self[clause[1]].push(idx);
                [0, 1]
            }
        };
        self.watched.push(pair);
    }

    /// Watched positions of clause `idx`.
    #[must_use]
    pub fn positions(&self, idx: usize) -> [usize; 2] {
        debug_assert!(idx < self.watched.len(), "watch refers to unknown clause {idx}");
        self.watched[idx]
    }

    pub fn set_position(&mut self, idx: usize, slot: WatchSlot, pos: usize) {
        let pair = &mut self.watched[idx];
        match slot {
            WatchSlot::First => pair[0] = pos,
            WatchSlot::Second => pair[1] = pos,
        }
    }

    /// Detaches the list for `lit` so it can be walked while other lists
    /// are being extended. Hand it back with `restore`.
    pub fn take<L: Literal>(&mut self, lit: L) -> SmallVec<[usize; 6]> {
        std::mem::take(&mut self[lit])
    }

    pub fn restore<L: Literal>(&mut self, lit: L, list: SmallVec<[usize; 6]>) {
        let slot = &mut self[lit];
        debug_assert!(slot.is_empty(), "watch list for {lit:?} grew while detached");
        *slot = list;
    }

    /// Number of registered clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.watched.len()
    }
}

impl<L: Literal> Index<L> for WatchedLiterals {
    type Output = SmallVec<[usize; 6]>;

    fn index(&self, index: L) -> &Self::Output {
        &self.lists[index.index()]
    }
}

impl<L: Literal> IndexMut<L> for WatchedLiterals {
    fn index_mut(&mut self, index: L) -> &mut Self::Output {
        &mut self.lists[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::{DoubleLiteral, NegativeLiteral};

    #[test]
    fn test_add_clause_watches_first_two() {
        let mut wl = WatchedLiterals::new(3);
        let c0: Clause<DoubleLiteral> = Clause::new(&[1, -2, 3]);
        let c1: Clause<DoubleLiteral> = Clause::new(&[-2]);
        wl.add_clause(&c0, 0);
        wl.add_clause(&c1, 1);

        assert_eq!(wl[DoubleLiteral::from_i32(1)].as_slice(), &[0]);
        assert_eq!(wl[DoubleLiteral::from_i32(-2)].as_slice(), &[0, 1]);
        assert!(wl[DoubleLiteral::from_i32(3)].is_empty());
        assert!(wl[DoubleLiteral::from_i32(2)].is_empty());
        assert_eq!(wl.positions(0), [0, 1]);
        assert_eq!(wl.positions(1), [0, 0]);
        assert_eq!(wl.num_clauses(), 2);
    }

    #[test]
    fn test_empty_clause_is_not_watched() {
        let mut wl = WatchedLiterals::new(1);
        wl.add_clause(&Clause::<NegativeLiteral>::new(&[]), 0);
        assert_eq!(wl.num_clauses(), 1);
        assert!(wl[NegativeLiteral::from_i32(1)].is_empty());
        assert!(wl[NegativeLiteral::from_i32(-1)].is_empty());
    }

    #[test]
    fn test_duplicate_literal_is_watched_twice() {
        let mut wl = WatchedLiterals::new(2);
        wl.add_clause(&Clause::<DoubleLiteral>::new(&[2, 2]), 0);
        assert_eq!(wl[DoubleLiteral::from_i32(2)].as_slice(), &[0, 0]);
    }

    #[test]
    fn test_take_and_restore() {
        let mut wl = WatchedLiterals::new(2);
        wl.add_clause(&Clause::<DoubleLiteral>::new(&[1, 2]), 0);

        let lit = DoubleLiteral::from_i32(1);
        let list = wl.take(lit);
        assert!(wl[lit].is_empty());

        wl.set_position(0, WatchSlot::First, 1);
        wl.restore(lit, list);
        assert_eq!(wl[lit].as_slice(), &[0]);
        assert_eq!(wl.positions(0), [1, 1]);
    }
}
