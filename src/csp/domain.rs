#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate sets.
//!
//! A [`Domain`] is the ordered, duplicate-free set of digits a cell may
//! still take. Domains only ever shrink: propagation removes candidates,
//! and the search collapses a domain to a single trial value (undone by
//! restoring a snapshot, never by re-inserting). The nine candidates fit
//! inline, so cloning a domain never allocates.

use smallvec::SmallVec;

/// Inline storage for up to nine candidate digits.
type Candidates = SmallVec<[u8; 9]>;

/// The set of values a variable may still take, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Domain(Candidates);

impl Domain {
    /// The open-cell domain: all digits `1..=9`.
    #[must_use]
    pub fn full() -> Self {
        Self((1..=9).collect())
    }

    /// A domain holding exactly one digit, for given cells and trial
    /// assignments.
    #[must_use]
    pub fn singleton(value: u8) -> Self {
        debug_assert!((1..=9).contains(&value));
        let mut candidates = Candidates::new();
        candidates.push(value);
        Self(candidates)
    }

    /// Number of remaining candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty domain signals a contradiction: no value can satisfy the
    /// constraints on this cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when exactly one candidate remains.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.0.len() == 1
    }

    /// The forced value, if the domain is a singleton.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        if self.is_singleton() {
            Some(self.0[0])
        } else {
            None
        }
    }

    /// True when `value` is still a candidate.
    #[must_use]
    pub fn contains(&self, value: u8) -> bool {
        self.0.contains(&value)
    }

    /// Removes `value` if present, reporting whether the domain shrank.
    pub fn remove(&mut self, value: u8) -> bool {
        let before = self.0.len();
        self.0.retain(|&mut v| v != value);
        self.0.len() != before
    }

    /// Collapses the domain to the single candidate `value`, the trial
    /// step of a branch. The value must currently be a candidate.
    pub fn collapse_to(&mut self, value: u8) {
        debug_assert!(self.contains(value));
        self.0.clear();
        self.0.push(value);
    }

    /// Iterates the candidates in order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// The candidates as an owned list; the search captures this before
    /// mutating the domain so the branch order survives the collapse.
    #[must_use]
    pub fn candidates(&self) -> SmallVec<[u8; 9]> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_holds_all_nine_digits() {
        let domain = Domain::full();
        assert_eq!(domain.len(), 9);
        assert!((1..=9).all(|v| domain.contains(v)));
        assert!(!domain.is_singleton());
        assert_eq!(domain.value(), None);
    }

    #[test]
    fn test_singleton() {
        let domain = Domain::singleton(4);
        assert_eq!(domain.len(), 1);
        assert!(domain.is_singleton());
        assert_eq!(domain.value(), Some(4));
        assert!(domain.contains(4));
        assert!(!domain.contains(5));
    }

    #[test]
    fn test_remove_shrinks_once() {
        let mut domain = Domain::full();
        assert!(domain.remove(7));
        assert_eq!(domain.len(), 8);
        assert!(!domain.contains(7));
        // already gone
        assert!(!domain.remove(7));
        assert_eq!(domain.len(), 8);
    }

    #[test]
    fn test_remove_to_empty() {
        let mut domain = Domain::singleton(3);
        assert!(domain.remove(3));
        assert!(domain.is_empty());
        assert_eq!(domain.value(), None);
    }

    #[test]
    fn test_collapse_keeps_only_the_trial_value() {
        let mut domain = Domain::full();
        domain.collapse_to(6);
        assert_eq!(domain.value(), Some(6));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut domain = Domain::full();
        domain.remove(1);
        domain.remove(5);
        let rest: Vec<u8> = domain.iter().collect();
        assert_eq!(rest, vec![2, 3, 4, 6, 7, 8, 9]);
    }
}
