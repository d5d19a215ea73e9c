// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coffer Slots: addressing and traversal for row-by-column slot grids.
//!
//! A menu container is a grid of slots, `rows × columns`, addressed either by a
//! linear index or by a zero-based `(row, column)` pair.
//!
//! - [`to_index`] and [`to_row_col`] convert between the two forms.
//! - [`Slot`] is an immutable `(row, column)` value; [`Grid`] carries the bounds.
//! - [`Direction`] is a closed set of traversal patterns, each a pure single-step shift
//!   that returns `None` once it leaves the grid.
//! - [`SlotIter`] walks a grid lazily in any direction.
//!
//! The crate is `no_std` and allocation-free outside of tests.
//!
//! # Example
//!
//! ```rust
//! use coffer_slots::{Direction, Grid, Slot, SlotIter, to_index, to_row_col};
//!
//! assert_eq!(to_index(2, 4, 9), 22);
//! assert_eq!(to_row_col(22, 9), (2, 4));
//!
//! // Walk the main diagonal of a six-row chest.
//! let grid = Grid::chest(6);
//! let diagonal: Vec<usize> = SlotIter::new(Direction::RightDown, grid)
//!     .map(|s| s.index(grid.columns))
//!     .collect();
//! assert_eq!(diagonal, [0, 10, 20, 30, 40, 50]);
//!
//! // Single steps stop at the edge instead of clamping.
//! assert_eq!(Direction::Up.shift(Slot::FIRST, grid), None);
//! ```

#![no_std]

extern crate alloc;

pub mod direction;
pub mod error;
pub mod iter;
pub mod slot;

pub use direction::Direction;
pub use error::SlotError;
pub use iter::SlotIter;
pub use slot::{Grid, Slot, to_index, to_row_col};
