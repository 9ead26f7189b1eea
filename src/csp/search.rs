#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search with constraint propagation.
//!
//! [`Backtracking`] is the engine of record: exhaustive depth-first
//! search over candidate assignments, with a propagation pass after
//! every trial to prune the branch early and detect dead ends cheaply.
//! Each trial is wrapped in a full-state snapshot; a failed trial and
//! everything propagation derived from it are discarded by restoring
//! the snapshot, so partial effects never leak between branches.
//!
//! Before any branching, a root pass propagates from every cell once.
//! That pass is what turns a direct contradiction among the givens into
//! an immediate [`Verdict::Unsolvable`] instead of a doomed search.
//!
//! Recursion depth is bounded by the 81 cells: every level decides at
//! least the selected variable, and usually propagation decides many
//! more.

use crate::csp::position::Position;
use crate::csp::propagation::Propagator;
use crate::csp::puzzle::Puzzle;
use crate::csp::selection::VariableSelection;
use crate::csp::solver::{DefaultConfig, SearchStats, Solver, SolverConfig, SolverState, Verdict};

/// How one recursion level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The puzzle is complete below this level; unwind without
    /// restoring so the solved state survives.
    Solved,
    /// Every candidate at this level failed.
    Exhausted,
    /// The decision budget ran out mid-search.
    Aborted,
}

/// Recursive backtracking solver over a pluggable heuristic and
/// worklist order.
#[derive(Debug, Clone)]
pub struct Backtracking<Config: SolverConfig = DefaultConfig> {
    puzzle: Puzzle,
    selector: Config::Selector,
    propagator: Propagator<Config::Worklist>,
    state: SolverState,
    decisions: usize,
    backtracks: usize,
    max_depth: usize,
    max_decisions: Option<usize>,
}

impl<Config: SolverConfig> Solver<Config> for Backtracking<Config> {
    fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            selector: Config::Selector::new(),
            propagator: Propagator::new(),
            state: SolverState::Unsolved,
            decisions: 0,
            backtracks: 0,
            max_depth: 0,
            max_decisions: None,
        }
    }

    fn solve(&mut self) -> Verdict {
        self.state = SolverState::Propagating;

        // Root pass: make the clue set itself arc-consistent before any
        // branching. A failure here means the givens contradict each
        // other.
        for pos in Position::all() {
            if !self.propagator.propagate(&mut self.puzzle, pos) {
                self.state = SolverState::Failed;
                return Verdict::Unsolvable;
            }
        }

        match self.backtrack(0) {
            Outcome::Solved => {
                self.state = SolverState::Solved;
                Verdict::Solved(self.puzzle.solution())
            }
            Outcome::Exhausted => {
                self.state = SolverState::Failed;
                Verdict::Unsolvable
            }
            Outcome::Aborted => {
                self.state = SolverState::Aborted;
                Verdict::Aborted
            }
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            decisions: self.decisions,
            propagations: self.propagator.revisions(),
            conflicts: self.propagator.wipeouts(),
            backtracks: self.backtracks,
            max_depth: self.max_depth,
        }
    }
}

impl<Config: SolverConfig> Backtracking<Config> {
    /// Caps the number of trial assignments; exceeding the cap yields
    /// [`Verdict::Aborted`] rather than a bogus unsolvability claim.
    #[must_use]
    pub const fn with_max_decisions(mut self, limit: usize) -> Self {
        self.max_decisions = Some(limit);
        self
    }

    /// Where the solver currently stands.
    #[must_use]
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// The network in its current shape; after a solved verdict every
    /// domain is a singleton.
    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    fn backtrack(&mut self, depth: usize) -> Outcome {
        if self.puzzle.is_solved() {
            return Outcome::Solved;
        }
        self.max_depth = self.max_depth.max(depth);

        // The sole rollback unit: a deep copy of every domain plus the
        // solved counter.
        let snapshot = self.puzzle.checkpoint();

        self.state = SolverState::Branching;
        let Some(pos) = self.selector.pick(&self.puzzle) else {
            return Outcome::Exhausted;
        };

        // Capture the candidate list before the first collapse
        // overwrites it; the branch order is the domain's own order.
        let candidates = self.puzzle.domain(pos).candidates();

        for value in candidates {
            if self.max_decisions.is_some_and(|limit| self.decisions >= limit) {
                return Outcome::Aborted;
            }
            self.decisions += 1;

            self.puzzle.assign(pos, value);
            self.state = SolverState::Propagating;
            if !self.propagator.propagate(&mut self.puzzle, pos) {
                self.backtracks += 1;
                self.puzzle.restore(&snapshot);
                self.state = SolverState::Branching;
                continue;
            }

            match self.backtrack(depth + 1) {
                Outcome::Solved => return Outcome::Solved,
                Outcome::Aborted => return Outcome::Aborted,
                Outcome::Exhausted => {
                    self.backtracks += 1;
                    self.puzzle.restore(&snapshot);
                    self.state = SolverState::Branching;
                }
            }
        }

        Outcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::position::{CELL_COUNT, Position};
    use crate::csp::selection::FirstOpen;
    use crate::csp::solver::SolverState;
    use crate::csp::worklist::ArcStack;

    /// The canonical puzzle with a unique completion.
    const CANONICAL: &str = "\
        53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n\
        7...2...6\n.6....28.\n...419..5\n....8..79\n";

    const CANONICAL_SOLVED: &str = "\
        534678912672195348198342567859761423426853791\
        713924856961537284287419635345286179";

    fn givens_from(text: &str) -> [u8; CELL_COUNT] {
        let mut givens = [0; CELL_COUNT];
        let digits = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .map(|c| c.to_digit(10).unwrap_or(0) as u8);
        for (cell, digit) in givens.iter_mut().zip(digits) {
            *cell = digit;
        }
        givens
    }

    fn solved_digits(verdict: &Verdict) -> String {
        verdict
            .solution()
            .expect("expected a solved verdict")
            .digits()
            .iter()
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    #[test]
    fn test_canonical_puzzle_end_to_end() {
        let puzzle = Puzzle::new(&givens_from(CANONICAL));
        let mut solver = Backtracking::<DefaultConfig>::new(puzzle);
        let verdict = solver.solve();

        assert_eq!(solved_digits(&verdict), CANONICAL_SOLVED);
        assert_eq!(solver.state(), SolverState::Solved);
        assert!(solver.puzzle().is_solved());
    }

    #[test]
    fn test_alternate_configs_find_the_same_completion() {
        use crate::csp::selection::MrvDegree;
        use crate::csp::worklist::ArcQueue;

        #[derive(Debug, Clone)]
        struct ScanOrder;
        impl SolverConfig for ScanOrder {
            type Selector = FirstOpen;
            type Worklist = ArcQueue;
        }

        #[derive(Debug, Clone)]
        struct LifoWorklist;
        impl SolverConfig for LifoWorklist {
            type Selector = MrvDegree;
            type Worklist = ArcStack;
        }

        let givens = givens_from(CANONICAL);

        let mut scan = Backtracking::<ScanOrder>::new(Puzzle::new(&givens));
        let mut lifo = Backtracking::<LifoWorklist>::new(Puzzle::new(&givens));

        assert_eq!(solved_digits(&scan.solve()), CANONICAL_SOLVED);
        assert_eq!(solved_digits(&lifo.solve()), CANONICAL_SOLVED);
    }

    #[test]
    fn test_complete_grid_is_idempotent() {
        let givens = givens_from(CANONICAL_SOLVED);
        let puzzle = Puzzle::new(&givens);
        assert!(puzzle.is_solved());

        let mut solver = Backtracking::<DefaultConfig>::new(puzzle);
        let verdict = solver.solve();
        assert_eq!(solved_digits(&verdict), CANONICAL_SOLVED);
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn test_contradictory_givens_are_unsolvable() {
        // 5 twice in row 1
        let mut givens = [0; CELL_COUNT];
        givens[Position::new(1, 2).index()] = 5;
        givens[Position::new(1, 8).index()] = 5;

        let mut solver = Backtracking::<DefaultConfig>::new(Puzzle::new(&givens));
        assert_eq!(solver.solve(), Verdict::Unsolvable);
        assert_eq!(solver.state(), SolverState::Failed);
    }

    #[test]
    fn test_empty_board_solves() {
        let mut solver = Backtracking::<DefaultConfig>::new(Puzzle::new(&[0; CELL_COUNT]));
        let verdict = solver.solve();
        assert!(verdict.is_solved());
        assert!(solver.puzzle().is_solved());
    }

    #[test]
    fn test_decision_budget_aborts() {
        let puzzle = Puzzle::new(&[0; CELL_COUNT]);
        let mut solver = Backtracking::<DefaultConfig>::new(puzzle).with_max_decisions(0);
        assert_eq!(solver.solve(), Verdict::Aborted);
        assert_eq!(solver.state(), SolverState::Aborted);
    }

    #[test]
    fn test_stats_are_collected() {
        let puzzle = Puzzle::new(&givens_from(CANONICAL));
        let mut solver = Backtracking::<DefaultConfig>::new(puzzle);
        assert!(solver.solve().is_solved());

        let stats = solver.stats();
        assert!(stats.propagations > 0);
        assert!(stats.max_depth <= CELL_COUNT);
    }
}
