//! Two-slot buffer store
//!
//! Holds the `previous` and `current` grids for the whole run. A tick reads
//! `previous` and writes `current`; afterwards the roles flip by toggling an
//! index, so neither buffer is ever reallocated.

use super::Grid;

/// Ping-pong pair of same-shape grids
#[derive(Debug, Clone)]
pub struct GridStore {
    slots: [Grid; 2],
    // Index of the slot currently playing `previous`
    previous: usize,
}

impl GridStore {
    /// Create a store whose two buffers both start as `initial`
    #[must_use]
    pub fn new(initial: Grid) -> Self {
        let copy = initial.clone();
        Self {
            slots: [initial, copy],
            previous: 0,
        }
    }

    /// Edge length of both buffers
    pub fn size(&self) -> usize {
        self.slots[0].size()
    }

    /// Read-only snapshot for the next tick
    pub fn previous(&self) -> &Grid {
        &self.slots[self.previous]
    }

    /// Buffer the next tick writes into
    pub fn current(&self) -> &Grid {
        &self.slots[1 - self.previous]
    }

    /// Borrow `previous` immutably and `current` mutably at the same time
    pub fn split_mut(&mut self) -> (&Grid, &mut Grid) {
        let [first, second] = &mut self.slots;
        if self.previous == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        }
    }

    /// Flip buffer roles
    pub fn swap_roles(&mut self) {
        self.previous = 1 - self.previous;
    }

    /// Most recently written buffer
    ///
    /// After `swap_roles` this is `previous`, which is also the snapshot the
    /// next tick will read.
    pub fn latest(&self) -> &Grid {
        self.previous()
    }

    /// Consume the store, keeping only the latest buffer
    pub fn into_latest(self) -> Grid {
        let [first, second] = self.slots;
        if self.previous == 0 {
            first
        } else {
            second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_start_equal() {
        let mut grid = Grid::new(3);
        grid.set(1, 1, 9.0);
        let store = GridStore::new(grid.clone());
        assert_eq!(store.previous(), &grid);
        assert_eq!(store.current(), &grid);
    }

    #[test]
    fn test_buffers_are_independent() {
        let mut store = GridStore::new(Grid::new(3));
        let (_, current) = store.split_mut();
        current.set(1, 1, 5.0);
        assert_eq!(store.previous().get(1, 1), 0.0);
        assert_eq!(store.current().get(1, 1), 5.0);
    }

    #[test]
    fn test_swap_flips_roles_without_reallocating() {
        let mut store = GridStore::new(Grid::new(3));
        let (_, current) = store.split_mut();
        current.set(0, 0, 1.0);
        let written = store.current().as_slice().as_ptr();

        store.swap_roles();
        assert_eq!(store.previous().get(0, 0), 1.0);
        assert_eq!(store.latest().as_slice().as_ptr(), written);

        store.swap_roles();
        assert_eq!(store.current().as_slice().as_ptr(), written);
    }

    #[test]
    fn test_into_latest() {
        let mut store = GridStore::new(Grid::new(2));
        let (_, current) = store.split_mut();
        current.fill(7.0);
        store.swap_roles();
        assert_eq!(store.into_latest(), Grid::with_value(2, 7.0));
    }
}
