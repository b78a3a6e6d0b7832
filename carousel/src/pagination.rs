//! Dot indicator.

use crate::index::IndexMachine;

/// One dot per logical item, with the active one derived from the index
///
/// While the track sits on the ghost slot the first dot is active, so the
/// indicator never shows a position that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    count: usize,
    active: usize,
}

impl Pagination {
    /// Indicator for the given index state
    #[must_use]
    pub const fn of(index: &IndexMachine) -> Self {
        Self {
            count: index.item_count(),
            active: index.logical(),
        }
    }

    /// Number of dots
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Active dot
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Whether dot `k` is active
    #[must_use]
    pub const fn is_active(&self, k: usize) -> bool {
        self.active == k
    }

    /// `(dot, is_active)` for every dot in order
    pub fn dots(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.count).map(|k| (k, self.is_active(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_lights_first_dot() {
        let mut index = IndexMachine::new(3, true);
        index.set_index(3);

        let pagination = Pagination::of(&index);
        assert_eq!(pagination.count(), 3);
        assert_eq!(pagination.active(), 0);
    }

    #[test]
    fn test_dots() {
        let mut index = IndexMachine::new(4, false);
        index.set_index(2);

        let dots: Vec<_> = Pagination::of(&index).dots().collect();
        assert_eq!(dots, vec![(0, false), (1, false), (2, true), (3, false)]);
    }
}
