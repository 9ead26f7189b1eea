#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Cell geometry for the 9x9 grid.
//!
//! A [`Position`] is a 1-based (row, column) pair. Every cell has a fixed
//! set of exactly [`PEER_COUNT`] peers: the 8 other cells of its row, the
//! 8 other cells of its column, and the 4 cells of its 3x3 box that share
//! neither. Each peer carries a pairwise "distinct" constraint with the
//! cell, which is the only constraint kind in the network.

use std::fmt;

/// Number of cells in the grid.
pub const CELL_COUNT: usize = 81;

/// Number of rows, columns and digits.
pub const SIDE: u8 = 9;

/// Number of constraint neighbours of any cell.
pub const PEER_COUNT: usize = 20;

/// A (row, column) pair, both in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row, in `1..=9`.
    pub row: u8,
    /// Column, in `1..=9`.
    pub col: u8,
}

impl Position {
    /// Builds the position at (`row`, `col`), both 1-based.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Linear index in `0..81`. Bijective with the (row, col) form.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row as usize - 1) * SIDE as usize + (self.col as usize - 1)
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / SIDE as usize) as u8 + 1,
            col: (index % SIDE as usize) as u8 + 1,
        }
    }

    /// Iterates every cell of the grid in linear-index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT).map(Self::from_index)
    }

    /// The 20 cells sharing a constraint with `self`: row-mates,
    /// column-mates, and the box-mates that overlap neither.
    ///
    /// The box anchor is derived from `((row - 1) / 3) * 3` (and likewise
    /// for the column), so the box scan never revisits a row/column peer.
    #[must_use]
    pub fn peers(self) -> [Self; PEER_COUNT] {
        let mut peers = [Self::new(1, 1); PEER_COUNT];
        let mut count = 0;

        for i in 1..=SIDE {
            if i != self.row {
                peers[count] = Self::new(i, self.col);
                count += 1;
            }
            if i != self.col {
                peers[count] = Self::new(self.row, i);
                count += 1;
            }
        }

        let box_row = (self.row - 1) / 3 * 3;
        let box_col = (self.col - 1) / 3 * 3;
        for row in box_row + 1..=box_row + 3 {
            for col in box_col + 1..=box_col + 3 {
                if row != self.row && col != self.col {
                    peers[count] = Self::new(row, col);
                    count += 1;
                }
            }
        }

        debug_assert_eq!(count, PEER_COUNT);
        peers
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_index_round_trip() {
        for index in 0..CELL_COUNT {
            let pos = Position::from_index(index);
            assert!((1..=SIDE).contains(&pos.row));
            assert!((1..=SIDE).contains(&pos.col));
            assert_eq!(pos.index(), index);
        }
    }

    #[test]
    fn test_index_formula() {
        assert_eq!(Position::new(1, 1).index(), 0);
        assert_eq!(Position::new(1, 9).index(), 8);
        assert_eq!(Position::new(2, 1).index(), 9);
        assert_eq!(Position::new(9, 9).index(), 80);
    }

    #[test]
    fn test_every_cell_has_twenty_distinct_peers() {
        for pos in Position::all() {
            let peers = pos.peers();
            assert_eq!(peers.len(), PEER_COUNT);
            assert_eq!(peers.iter().unique().count(), PEER_COUNT);
            assert!(!peers.contains(&pos));
        }
    }

    #[test]
    fn test_peers_share_a_house() {
        for pos in Position::all() {
            for peer in pos.peers() {
                let same_row = peer.row == pos.row;
                let same_col = peer.col == pos.col;
                let same_box = (peer.row - 1) / 3 == (pos.row - 1) / 3
                    && (peer.col - 1) / 3 == (pos.col - 1) / 3;
                assert!(same_row || same_col || same_box, "{peer} is no peer of {pos}");
            }
        }
    }

    #[test]
    fn test_peer_relation_is_symmetric() {
        for pos in Position::all() {
            for peer in pos.peers() {
                assert!(peer.peers().contains(&pos));
            }
        }
    }

    #[test]
    fn test_corner_peers() {
        let peers = Position::new(1, 1).peers();
        let row_mates = peers.iter().filter(|p| p.row == 1).count();
        let col_mates = peers.iter().filter(|p| p.col == 1).count();
        assert_eq!(row_mates, 8);
        assert_eq!(col_mates, 8);
        assert!(peers.contains(&Position::new(2, 2)));
        assert!(peers.contains(&Position::new(3, 3)));
    }
}
