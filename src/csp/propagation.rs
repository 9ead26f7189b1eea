#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arc-consistency propagation.
//!
//! This module has two layers. [`revise`] is the binary propagation step
//! for a "distinct" constraint: across the arc `(x, y)`, a candidate `v`
//! leaves `x`'s domain exactly when `y` is forced to `v`, i.e. when `y`'s
//! domain is the singleton `{v}`. That rule alone is weaker than full
//! arc-consistency over the n-ary all-different constraint; the
//! [`Propagator`] compensates with AC-3 style scheduling, re-enqueueing
//! the arcs of every variable whose domain shrinks until the worklist
//! drains or a domain empties.

use crate::csp::position::Position;
use crate::csp::puzzle::Puzzle;
use crate::csp::worklist::{Arc, Worklist};
use std::marker::PhantomData;

/// Shrinks `x`'s domain using `y`'s domain under the pairwise "distinct"
/// constraint, reporting whether it changed.
///
/// A candidate is removed only when `y`'s whole domain offers no
/// alternative to it; with duplicate-free domains that means `y` is the
/// singleton holding it. A single call can therefore remove at most one
/// candidate from `x`.
pub fn revise(puzzle: &mut Puzzle, x: Position, y: Position) -> bool {
    match puzzle.domain(y).value() {
        Some(forced) => puzzle.domain_mut(x).remove(forced),
        None => false,
    }
}

/// The AC-3 style worklist engine, generic over the worklist order.
///
/// The counters survive across calls, so one propagator instance carries
/// the totals for a whole search.
#[derive(Debug, Clone, Default)]
pub struct Propagator<W: Worklist> {
    revisions: usize,
    wipeouts: usize,
    _worklist: PhantomData<W>,
}

impl<W: Worklist> Propagator<W> {
    /// A fresh engine with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            revisions: 0,
            wipeouts: 0,
            _worklist: PhantomData,
        }
    }

    /// Propagates outward from a changed cell until no more domains
    /// shrink.
    ///
    /// Returns `false` as soon as some domain empties: the current
    /// partial assignment is locally inconsistent and the caller must
    /// roll back the triggering trial. On `true`, every domain the seed
    /// could reach has been made consistent, and the puzzle's solved
    /// counter reflects any domain that shrank to a singleton on the way.
    pub fn propagate(&mut self, puzzle: &mut Puzzle, seed: Position) -> bool {
        let mut worklist = W::seeded(seed);

        while let Some(Arc { x, y }) = worklist.pop() {
            self.revisions += 1;
            if !revise(puzzle, x, y) {
                continue;
            }

            match puzzle.domain(x).len() {
                0 => {
                    self.wipeouts += 1;
                    return false;
                }
                1 => puzzle.note_decided(),
                _ => {}
            }

            // Re-derive arcs pointing at the shrunk variable, skipping
            // only the arc just processed. A peer that merely shares a
            // row or column with y still has to see the change, or a
            // singleton derived here is never enforced on its house.
            for peer in x.peers() {
                if peer != y {
                    worklist.push(Arc::new(peer, x));
                }
            }
        }

        true
    }

    /// Total `revise` calls so far.
    #[must_use]
    pub const fn revisions(&self) -> usize {
        self.revisions
    }

    /// Total emptied domains so far.
    #[must_use]
    pub const fn wipeouts(&self) -> usize {
        self.wipeouts
    }
}
