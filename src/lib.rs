#![deny(missing_docs)]
//! A 9x9 Sudoku solver built as a constraint-satisfaction problem: one
//! variable per cell, domains of candidate digits, and pairwise
//! "distinct" constraints among the 20 peers of every cell.
//!
//! The engine lives in [`csp`]: AC-3 style worklist propagation over
//! binary arcs, an MRV + degree branching heuristic, and recursive
//! backtracking with full-state snapshots. [`sudoku`] is the I/O shell
//! around it: board text loading, grid rendering and solution validity
//! checking.

/// The constraint engine: grid geometry, candidate domains, propagation,
/// variable selection and backtracking search.
pub mod csp;

/// Board loading, rendering and validity checking around the engine.
pub mod sudoku;
