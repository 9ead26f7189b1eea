#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arc worklists for the propagation engine.
//!
//! An [`Arc`] is a directional obligation: the domain of `x` may still be
//! constrained by the domain of `y`, so the pair must be revised. `(x, y)`
//! and `(y, x)` are distinct obligations. The engine is correct for any
//! processing order, so the worklist is a trait with a FIFO and a LIFO
//! implementation; only the propagation order differs between them.

use crate::csp::position::{CELL_COUNT, Position};
use bit_vec::BitVec;
use std::collections::VecDeque;

/// An ordered pair of cells: revise `x`'s domain against `y`'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    /// The variable under revision.
    pub x: Position,
    /// The constraining variable.
    pub y: Position,
}

impl Arc {
    /// Builds the arc revising `x` against `y`.
    #[must_use]
    pub const fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// Dense key over the 81x81 arc space, for membership masks.
    #[must_use]
    pub const fn key(self) -> usize {
        self.x.index() * CELL_COUNT + self.y.index()
    }
}

/// A growable collection of pending arcs.
pub trait Worklist {
    /// Builds the initial worklist for a change at `seed`: one arc
    /// `(peer, seed)` per peer, so every neighbour gets re-checked
    /// against the shrunk domain.
    fn seeded(seed: Position) -> Self;

    /// Adds a pending arc.
    fn push(&mut self, arc: Arc);

    /// Takes the next arc to revise, `None` when drained.
    fn pop(&mut self) -> Option<Arc>;
}

fn seed_arcs(seed: Position) -> impl Iterator<Item = Arc> {
    seed.peers().into_iter().map(move |peer| Arc::new(peer, seed))
}

/// FIFO worklist. Arcs already waiting are not enqueued a second time;
/// the mask bit is cleared on pop, so a processed arc can re-enter later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcQueue {
    arcs: VecDeque<Arc>,
    enqueued: BitVec,
}

impl Worklist for ArcQueue {
    fn seeded(seed: Position) -> Self {
        let mut queue = Self {
            arcs: VecDeque::with_capacity(PEER_CAPACITY),
            enqueued: BitVec::from_elem(CELL_COUNT * CELL_COUNT, false),
        };
        for arc in seed_arcs(seed) {
            queue.push(arc);
        }
        queue
    }

    fn push(&mut self, arc: Arc) {
        if self.enqueued.get(arc.key()) == Some(true) {
            return;
        }
        self.enqueued.set(arc.key(), true);
        self.arcs.push_back(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        let arc = self.arcs.pop_front()?;
        self.enqueued.set(arc.key(), false);
        Some(arc)
    }
}

/// Initial queue capacity: the seed fan-out plus one wave of re-derived
/// arcs.
const PEER_CAPACITY: usize = 64;

/// LIFO worklist without deduplication; duplicate arcs are revised again
/// harmlessly. Kept as the comparison point for the queue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcStack(Vec<Arc>);

impl Worklist for ArcStack {
    fn seeded(seed: Position) -> Self {
        Self(seed_arcs(seed).collect())
    }

    fn push(&mut self, arc: Arc) {
        self.0.push(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop()
    }
}
