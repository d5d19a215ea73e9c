// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy slot traversal driven by a [`Direction`].

use crate::direction::Direction;
use crate::error::SlotError;
use crate::slot::{Grid, Slot};

/// A lazy, finite walk over the slots of a grid.
///
/// [`has_next`](Self::has_next) computes one shift ahead and caches it;
/// [`try_next`](Self::try_next) consumes the cached slot. The walk cannot be
/// rewound; build a new iterator to start over.
///
/// `SlotIter` also implements [`Iterator`], which is usually the more
/// convenient interface:
///
/// ```
/// use coffer_slots::{Direction, Grid, SlotIter};
///
/// let column: Vec<usize> = SlotIter::new(Direction::Down, Grid::chest(3))
///     .map(|s| s.index(9))
///     .collect();
/// assert_eq!(column, [0, 9, 18]);
/// ```
#[derive(Clone, Debug)]
pub struct SlotIter {
    direction: Direction,
    grid: Grid,
    // Last slot handed out; `None` before the first call to `try_next`.
    position: Option<Slot>,
    // One-ahead cache filled by `has_next`.
    next: Option<Slot>,
}

impl SlotIter {
    /// Walk the whole grid from [`Direction::start`].
    pub const fn new(direction: Direction, grid: Grid) -> Self {
        Self {
            direction,
            grid,
            position: None,
            next: direction.start(grid),
        }
    }

    /// Walk from `start` (inclusive).
    ///
    /// Fails if `start` is not inside `grid`.
    pub fn starting_at(direction: Direction, grid: Grid, start: Slot) -> Result<Self, SlotError> {
        grid.index_of(start)?;
        Ok(Self {
            direction,
            grid,
            position: None,
            next: Some(start),
        })
    }

    /// Direction of this walk.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Grid this walk covers.
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// Whether another slot follows. Computes and caches the next shift.
    pub fn has_next(&mut self) -> bool {
        if self.next.is_some() {
            return true;
        }
        self.next = self
            .position
            .and_then(|p| self.direction.shift(p, self.grid));
        self.next.is_some()
    }

    /// Consume the cached slot.
    ///
    /// Fails with [`SlotError::Exhausted`] when nothing is cached, either because
    /// the walk is over or because [`has_next`](Self::has_next) was not called.
    pub fn try_next(&mut self) -> Result<Slot, SlotError> {
        let slot = self.next.take().ok_or(SlotError::Exhausted)?;
        self.position = Some(slot);
        Ok(slot)
    }
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.has_next() {
            self.try_next().ok()
        } else {
            None
        }
    }
}

impl core::iter::FusedIterator for SlotIter {}
