#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver surface: configuration, verdicts and statistics.

use crate::csp::puzzle::{Puzzle, Solution};
use crate::csp::selection::{MrvDegree, VariableSelection};
use crate::csp::worklist::{ArcQueue, Worklist};
use std::fmt::Debug;

/// Ties together the pluggable pieces of a solver: which worklist order
/// drives propagation and which heuristic picks the branching variable.
pub trait SolverConfig: Debug + Clone {
    /// The branching heuristic.
    type Selector: VariableSelection + Debug + Clone;
    /// The propagation worklist.
    type Worklist: Worklist + Debug + Clone;
}

/// MRV + degree branching over a FIFO arc queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Selector = MrvDegree;
    type Worklist = ArcQueue;
}

/// Where the solver currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    /// Not started.
    #[default]
    Unsolved,
    /// Running a propagation pass.
    Propagating,
    /// Trying candidate assignments for a selected variable.
    Branching,
    /// Every domain is a singleton.
    Solved,
    /// The search space is exhausted.
    Failed,
    /// The decision budget ran out mid-search.
    Aborted,
}

/// The outcome of a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The puzzle has been solved in place; the completed grid is
    /// attached.
    Solved(Solution),
    /// The search space is exhausted: the puzzle has no valid
    /// completion.
    Unsolvable,
    /// The decision budget ran out before the search finished. Not an
    /// unsolvability claim.
    Aborted,
}

impl Verdict {
    /// True for [`Verdict::Solved`].
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The completed grid, if solved.
    #[must_use]
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Counters collected during a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Trial assignments made while branching.
    pub decisions: usize,
    /// Individual arc revisions run by the propagation engine.
    pub propagations: usize,
    /// Domains emptied by propagation (locally inconsistent trials).
    pub conflicts: usize,
    /// Snapshot restores after a failed trial or failed subtree.
    pub backtracks: usize,
    /// Deepest branching level reached; bounded by 81.
    pub max_depth: usize,
}

/// A complete solver over a [`SolverConfig`].
pub trait Solver<Config: SolverConfig> {
    /// Wraps the initial constraint network.
    fn new(puzzle: Puzzle) -> Self;

    /// Runs the solver to a verdict, mutating the network in place.
    fn solve(&mut self) -> Verdict;

    /// Counters for the run so far.
    fn stats(&self) -> SearchStats;
}
