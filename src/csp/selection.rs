#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching variable selection.
//!
//! The search asks a [`VariableSelection`] for the next cell to branch
//! on. [`MrvDegree`] is the heuristic of record: minimum remaining
//! values, ties broken by the degree towards still-undetermined peers.
//! [`FirstOpen`] simply takes the first open cell in scan order and
//! exists as the baseline the benchmarks compare against.

use crate::csp::position::Position;
use crate::csp::puzzle::Puzzle;

/// Picks the next variable to branch on.
pub trait VariableSelection {
    /// Builds the selector.
    fn new() -> Self;

    /// The chosen cell, or `None` when every domain is a singleton (the
    /// puzzle is solved; the search never branches then).
    fn pick(&self, puzzle: &Puzzle) -> Option<Position>;
}

/// Most constrained, most constraining: smallest domain strictly larger
/// than one, ties going to the variable with more undetermined peers.
///
/// Scan order settles what the two criteria leave open: a candidate
/// replaces the incumbent on strictly smaller domain size, or on equal
/// size with strictly greater degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MrvDegree;

impl VariableSelection for MrvDegree {
    fn new() -> Self {
        Self
    }

    fn pick(&self, puzzle: &Puzzle) -> Option<Position> {
        let mut best = None;
        let mut best_size = usize::MAX;
        let mut best_degree = 0;

        for pos in Position::all() {
            let size = puzzle.domain(pos).len();
            if size <= 1 {
                continue;
            }
            if size < best_size {
                best = Some(pos);
                best_size = size;
                best_degree = puzzle.degree(pos);
            } else if size == best_size {
                let degree = puzzle.degree(pos);
                if degree > best_degree {
                    best = Some(pos);
                    best_degree = degree;
                }
            }
        }

        best
    }
}

/// First open cell in linear-index order, no heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstOpen;

impl VariableSelection for FirstOpen {
    fn new() -> Self {
        Self
    }

    fn pick(&self, puzzle: &Puzzle) -> Option<Position> {
        Position::all().find(|&pos| puzzle.domain(pos).len() > 1)
    }
}
