#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The constraint network state.
//!
//! A [`Puzzle`] owns the 81 [`Variable`]s of the grid plus a counter of
//! how many of them are already decided (domain size exactly one). The
//! puzzle is mutated in place by propagation (domain shrinks) and by the
//! search (domain collapses to a trial value); the search undoes failed
//! trials by restoring a [`Snapshot`], a deep copy of every domain and
//! the solved counter. Nothing outside this module can reach a domain
//! mutably, so all shrinking goes through the propagator/search contract.

use crate::csp::domain::Domain;
use crate::csp::position::{CELL_COUNT, Position};

/// One cell of the network: its fixed position and its remaining
/// candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pos: Position,
    domain: Domain,
}

impl Variable {
    /// Builds the initial variable for a cell: a full domain for an open
    /// cell (`given == 0`), a singleton for a clue.
    #[must_use]
    pub fn new(pos: Position, given: u8) -> Self {
        let domain = if given == 0 {
            Domain::full()
        } else {
            Domain::singleton(given)
        };
        Self { pos, domain }
    }

    /// The cell this variable models.
    #[must_use]
    pub const fn pos(&self) -> Position {
        self.pos
    }

    /// The remaining candidate set.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }
}

/// The completed grid, read off a solved puzzle: 81 digits in
/// linear-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution([u8; CELL_COUNT]);

impl Solution {
    /// All 81 digits in linear-index order.
    #[must_use]
    pub const fn digits(&self) -> &[u8; CELL_COUNT] {
        &self.0
    }

    /// The digit at `pos`.
    #[must_use]
    pub const fn digit(&self, pos: Position) -> u8 {
        self.0[pos.index()]
    }
}

/// A deep, independent copy of the mutable puzzle state, the unit of
/// rollback around a trial assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    domains: Vec<Domain>,
    solved: usize,
}

/// The 81 variables of the grid plus the solved counter.
///
/// Invariants: every domain is a duplicate-free subset of `1..=9`, and
/// `solved` equals the number of singleton domains. The puzzle is solved
/// exactly when `solved == 81`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    variables: Vec<Variable>,
    solved: usize,
}

impl Puzzle {
    /// Builds the initial network from 81 givens in linear-index order,
    /// `0` meaning an open cell.
    #[must_use]
    pub fn new(givens: &[u8; CELL_COUNT]) -> Self {
        let variables: Vec<Variable> = givens
            .iter()
            .enumerate()
            .map(|(index, &given)| Variable::new(Position::from_index(index), given))
            .collect();
        let solved = variables.iter().filter(|v| v.domain().is_singleton()).count();
        Self { variables, solved }
    }

    /// The variable at `pos`.
    #[must_use]
    pub fn var(&self, pos: Position) -> &Variable {
        &self.variables[pos.index()]
    }

    /// The candidate set at `pos`.
    #[must_use]
    pub fn domain(&self, pos: Position) -> &Domain {
        &self.variables[pos.index()].domain
    }

    pub(crate) fn domain_mut(&mut self, pos: Position) -> &mut Domain {
        &mut self.variables[pos.index()].domain
    }

    /// Number of variables whose domain is a singleton.
    #[must_use]
    pub const fn solved(&self) -> usize {
        self.solved
    }

    /// True when all 81 variables are decided.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved == CELL_COUNT
    }

    /// Records that propagation shrank some domain down to a singleton.
    pub(crate) fn note_decided(&mut self) {
        self.solved += 1;
    }

    /// Collapses an open variable to the trial value `value` and counts
    /// it as decided. The branch step of the search.
    pub fn assign(&mut self, pos: Position, value: u8) {
        let domain = self.domain_mut(pos);
        debug_assert!(!domain.is_singleton());
        domain.collapse_to(value);
        self.solved += 1;
    }

    /// Count of still-undetermined peers of `pos`: the degree used to
    /// break ties between equally constrained variables.
    #[must_use]
    pub fn degree(&self, pos: Position) -> usize {
        pos.peers()
            .iter()
            .filter(|peer| self.domain(**peer).len() > 1)
            .count()
    }

    /// Takes a full deep copy of the mutable state. Restoring it undoes
    /// a trial assignment together with everything propagation derived
    /// from it.
    #[must_use]
    pub fn checkpoint(&self) -> Snapshot {
        Snapshot {
            domains: self.variables.iter().map(|v| v.domain.clone()).collect(),
            solved: self.solved,
        }
    }

    /// Restores the state captured by [`Puzzle::checkpoint`].
    pub fn restore(&mut self, snapshot: &Snapshot) {
        for (variable, domain) in self.variables.iter_mut().zip(&snapshot.domains) {
            variable.domain.clone_from(domain);
        }
        self.solved = snapshot.solved;
    }

    /// Reads the assignment off a solved puzzle.
    ///
    /// # Panics
    ///
    /// Panics if any domain is not a singleton; callers check
    /// [`Puzzle::is_solved`] first.
    #[must_use]
    pub fn solution(&self) -> Solution {
        let mut digits = [0; CELL_COUNT];
        for (cell, variable) in digits.iter_mut().zip(&self.variables) {
            *cell = variable
                .domain()
                .value()
                .unwrap_or_else(|| panic!("unsolved variable at {}", variable.pos()));
        }
        Solution(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board() -> Puzzle {
        Puzzle::new(&[0; CELL_COUNT])
    }

    #[test]
    fn test_new_counts_givens() {
        let mut givens = [0; CELL_COUNT];
        givens[0] = 5;
        givens[42] = 9;
        let puzzle = Puzzle::new(&givens);
        assert_eq!(puzzle.solved(), 2);
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.domain(Position::from_index(0)).value(), Some(5));
        assert_eq!(puzzle.domain(Position::from_index(42)).value(), Some(9));
        assert_eq!(puzzle.domain(Position::from_index(1)).len(), 9);
    }

    #[test]
    fn test_assign_collapses_and_counts() {
        let mut puzzle = empty_board();
        let pos = Position::new(3, 7);
        puzzle.assign(pos, 4);
        assert_eq!(puzzle.domain(pos).value(), Some(4));
        assert_eq!(puzzle.solved(), 1);
    }

    #[test]
    fn test_checkpoint_restore_round_trip() {
        let mut puzzle = empty_board();
        let snapshot = puzzle.checkpoint();

        puzzle.assign(Position::new(1, 1), 1);
        puzzle.domain_mut(Position::new(9, 9)).remove(1);
        assert_eq!(puzzle.solved(), 1);

        puzzle.restore(&snapshot);
        assert_eq!(puzzle.solved(), 0);
        assert_eq!(puzzle.domain(Position::new(1, 1)).len(), 9);
        assert_eq!(puzzle.domain(Position::new(9, 9)).len(), 9);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let mut puzzle = empty_board();
        let snapshot = puzzle.checkpoint();
        let untouched = puzzle.clone();

        puzzle.assign(Position::new(5, 5), 8);
        puzzle.restore(&snapshot);
        assert_eq!(puzzle, untouched);
    }

    #[test]
    fn test_degree_counts_open_peers() {
        let mut puzzle = empty_board();
        let pos = Position::new(1, 1);
        assert_eq!(puzzle.degree(pos), 20);

        puzzle.assign(Position::new(1, 2), 3);
        puzzle.assign(Position::new(2, 2), 7);
        assert_eq!(puzzle.degree(pos), 18);
    }

    #[test]
    fn test_solution_reads_singletons() {
        let givens: Vec<u8> = (0..CELL_COUNT).map(|i| (i % 9) as u8 + 1).collect();
        let puzzle = Puzzle::new(&givens.try_into().unwrap());
        assert!(puzzle.is_solved());
        let solution = puzzle.solution();
        assert_eq!(solution.digit(Position::new(1, 1)), 1);
        assert_eq!(solution.digit(Position::new(1, 9)), 9);
    }
}
