// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot addressing: linear indices, (row, column) pairs, and grid bounds.

use crate::error::SlotError;

/// Convert a `(row, column)` pair into a linear slot index.
///
/// Rows and columns are zero-based. No bounds are checked; use
/// [`Grid::index_of`] for a checked conversion.
#[inline]
pub const fn to_index(row: usize, column: usize, columns: usize) -> usize {
    row * columns + column
}

/// Convert a linear slot index into a zero-based `(row, column)` pair.
///
/// `columns` must be non-zero.
#[inline]
pub const fn to_row_col(index: usize, columns: usize) -> (usize, usize) {
    (index / columns, index % columns)
}

/// One addressable cell of a container, as a zero-based `(row, column)` pair.
///
/// A `Slot` is a plain value; it never changes once built. Positions that do
/// not exist are represented as `None` in an `Option<Slot>` so that every
/// shift composes with `?` and stops at the first invalid step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub column: usize,
}

impl Slot {
    /// The top-left slot.
    pub const FIRST: Self = Self::new(0, 0);

    /// Create a slot from a zero-based row and column.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Build a slot from a linear index for a grid with `columns` columns.
    pub const fn from_index(index: usize, columns: usize) -> Self {
        let (row, column) = to_row_col(index, columns);
        Self { row, column }
    }

    /// Linear index of this slot for a grid with `columns` columns.
    pub const fn index(self, columns: usize) -> usize {
        to_index(self.row, self.column, columns)
    }
}

/// Bounds of a slot grid: `rows × columns`.
///
/// Traversal functions take a `Grid` so that every shift knows where the edges are.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

impl Grid {
    /// Columns of a standard chest-like container.
    pub const CHEST_COLUMNS: usize = 9;

    /// Create a grid with the given dimensions.
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// A chest-shaped grid with nine columns.
    pub const fn chest(rows: usize) -> Self {
        Self::new(rows, Self::CHEST_COLUMNS)
    }

    /// Total number of slots.
    pub const fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Whether the grid has no slots at all.
    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `slot` lies inside the grid.
    pub const fn contains(&self, slot: Slot) -> bool {
        slot.row < self.rows && slot.column < self.columns
    }

    /// The bottom-right slot, or `None` for an empty grid.
    pub const fn last(&self) -> Option<Slot> {
        if self.is_empty() {
            None
        } else {
            Some(Slot::new(self.rows - 1, self.columns - 1))
        }
    }

    /// Bounds-checked conversion from a linear index to a slot.
    pub fn slot(&self, index: usize) -> Result<Slot, SlotError> {
        if index >= self.size() {
            return Err(SlotError::OutOfRange {
                index,
                size: self.size(),
            });
        }
        Ok(Slot::from_index(index, self.columns))
    }

    /// Bounds-checked conversion from a slot to its linear index.
    ///
    /// The reported index saturates for slots far outside the grid.
    pub fn index_of(&self, slot: Slot) -> Result<usize, SlotError> {
        if !self.contains(slot) {
            return Err(SlotError::OutOfRange {
                index: slot
                    .row
                    .saturating_mul(self.columns)
                    .saturating_add(slot.column),
                size: self.size(),
            });
        }
        Ok(slot.index(self.columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_round_trip_for_every_cell() {
        for columns in 1..=9 {
            for row in 0..6 {
                for column in 0..columns {
                    let index = to_index(row, column, columns);
                    assert_eq!(to_row_col(index, columns), (row, column));
                }
            }
        }
    }

    #[test]
    fn slot_index_matches_free_functions() {
        let s = Slot::from_index(22, 9);
        assert_eq!(s, Slot::new(2, 4));
        assert_eq!(s.index(9), 22);
    }

    #[test]
    fn grid_slot_is_bounds_checked() {
        let g = Grid::chest(3);
        assert_eq!(g.size(), 27);
        assert_eq!(g.slot(26), Ok(Slot::new(2, 8)));
        assert_eq!(g.slot(27), Err(SlotError::OutOfRange { index: 27, size: 27 }));
        assert!(g.index_of(Slot::new(3, 0)).is_err());
        assert_eq!(g.index_of(Slot::new(1, 1)), Ok(10));
    }

    #[test]
    fn far_away_slots_are_rejected_without_overflow() {
        let g = Grid::chest(3);
        assert_eq!(
            g.index_of(Slot::new(usize::MAX, 0)),
            Err(SlotError::OutOfRange { index: usize::MAX, size: 27 })
        );
        assert!(g.index_of(Slot::new(0, usize::MAX)).is_err());
    }

    #[test]
    fn last_slot_of_empty_grid_is_none() {
        assert_eq!(Grid::new(0, 9).last(), None);
        assert_eq!(Grid::chest(6).last(), Some(Slot::new(5, 8)));
    }
}
