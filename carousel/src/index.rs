//! The active-item index.
//!
//! [`IndexMachine`] is the only place the current index changes. Gestures,
//! autoplay, pagination and the loop correction all go through its
//! intent-level operations, so the bound `0 <= current <= last_index()`
//! holds after every call.

use crate::gesture::Swipe;

/// Current item index with clamping rules for plain and looping carousels
///
/// In loop mode one extra slot, the ghost at index `N`, is reachable. It
/// shows item 0 again so the wrap can animate forward before snapping back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMachine {
    current: usize,
    item_count: usize,
    looping: bool,
}

impl IndexMachine {
    /// Start at index 0 over `item_count` logical items (at least one)
    #[must_use]
    pub fn new(item_count: usize, looping: bool) -> Self {
        Self {
            current: 0,
            item_count: item_count.max(1),
            looping,
        }
    }

    /// The current index (may be the ghost slot)
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of logical items, `N`
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether the ghost slot is reachable
    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Highest reachable index: `N` when looping, `N - 1` otherwise
    #[must_use]
    pub const fn last_index(&self) -> usize {
        if self.looping {
            self.item_count
        } else {
            self.item_count - 1
        }
    }

    /// Whether the index sits on the ghost slot
    #[must_use]
    pub const fn is_ghost(&self) -> bool {
        self.looping && self.current == self.item_count
    }

    /// The logical item shown at the current index
    #[must_use]
    pub const fn logical(&self) -> usize {
        self.current % self.item_count
    }

    fn update(&mut self, next: usize) -> bool {
        let next = next.min(self.last_index());
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Move to the next slot, holding at the last one
    ///
    /// Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        self.update(self.current.saturating_add(1))
    }

    /// Move to the previous slot, holding at 0
    ///
    /// Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        self.update(self.current.saturating_sub(1))
    }

    /// Jump to `index`, clamped to the reachable range
    ///
    /// Returns whether the index changed.
    pub fn set_index(&mut self, index: usize) -> bool {
        self.update(index)
    }

    /// Snap back to index 0 after arriving on the ghost slot
    ///
    /// Returns whether the index changed; a second call is a no-op.
    pub fn correct_to_zero(&mut self) -> bool {
        self.update(0)
    }

    /// Apply a classified drag
    ///
    /// Returns whether the index changed.
    pub fn apply(&mut self, swipe: Swipe) -> bool {
        match swipe {
            Swipe::Advance => self.advance(),
            Swipe::Retreat => self.retreat(),
            Swipe::Stay => false,
        }
    }

    /// Change the item count and loop mode, keeping the index in bounds
    pub fn reshape(&mut self, item_count: usize, looping: bool) {
        self.item_count = item_count.max(1);
        self.looping = looping;
        self.current = self.current.min(self.last_index());
    }
}
