// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direction algebra: stateless single-step shifts across a slot grid.
//!
//! ## Families
//!
//! - Wrapping walks: [`Horizontal`](Direction::Horizontal) wraps to the start of the next row,
//!   [`Vertical`](Direction::Vertical) wraps to the top of the next column.
//! - Axis steps: [`Up`](Direction::Up), [`Down`](Direction::Down), [`Right`](Direction::Right),
//!   [`Left`](Direction::Left) move one cell and stop at the edge.
//! - Diagonals: [`RightUp`](Direction::RightUp), [`RightDown`](Direction::RightDown),
//!   [`LeftUp`](Direction::LeftUp), [`LeftDown`](Direction::LeftDown) take the row of a vertical
//!   step and the column of a horizontal step. If either step falls off the grid the
//!   diagonal does too; nothing is clamped.
//! - Reverse walks: [`BackwardsHorizontal`](Direction::BackwardsHorizontal) and
//!   [`BackwardsVertical`](Direction::BackwardsVertical) mirror the wrapping walks,
//!   starting from the last slot.
//!
//! For a 6×9 grid, walking from [`Direction::start`]:
//!
//! | Direction | Indices |
//! |---|---|
//! | `Horizontal` | 0, 1, 2, … 8, 9, 10, … 53 |
//! | `Vertical` | 0, 9, 18, 27, 36, 45, 1, 10, … 53 |
//! | `Down` | 0, 9, 18, 27, 36, 45 |
//! | `RightDown` | 0, 10, 20, 30, 40, 50 |
//! | `BackwardsHorizontal` | 53, 52, 51, … 0 |
//! | `BackwardsVertical` | 53, 44, 35, 26, 17, 8, 52, 43, … 0 |

use crate::slot::{Grid, Slot};

/// A traversal pattern over a slot grid.
///
/// Each variant defines [`shift`](Direction::shift): given a position, the next
/// position in that direction, or `None` when the walk leaves the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right, wrapping to the first column of the next row.
    Horizontal,
    /// Top to bottom, wrapping to the first row of the next column.
    Vertical,
    /// One row up; stops at the top edge.
    Up,
    /// One row down; stops at the bottom edge.
    Down,
    /// One column right; stops at the right edge.
    Right,
    /// One column left; stops at the left edge.
    Left,
    /// Up and right at once.
    RightUp,
    /// Down and right at once.
    RightDown,
    /// Up and left at once.
    LeftUp,
    /// Down and left at once.
    LeftDown,
    /// Right to left, wrapping to the last column of the previous row.
    BackwardsHorizontal,
    /// Bottom to top, wrapping to the last row of the previous column.
    BackwardsVertical,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Horizontal,
        Self::Vertical,
        Self::Up,
        Self::Down,
        Self::Right,
        Self::Left,
        Self::RightUp,
        Self::RightDown,
        Self::LeftUp,
        Self::LeftDown,
        Self::BackwardsHorizontal,
        Self::BackwardsVertical,
    ];

    /// Whether this direction walks from the last slot towards the first.
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::BackwardsHorizontal | Self::BackwardsVertical)
    }

    /// The slot a full walk in this direction starts from.
    ///
    /// Reverse walks start at the last slot, every other direction at the first.
    /// Returns `None` for an empty grid.
    pub const fn start(self, grid: Grid) -> Option<Slot> {
        if grid.is_empty() {
            None
        } else if self.is_reverse() {
            grid.last()
        } else {
            Some(Slot::FIRST)
        }
    }

    /// Shift `from` by one step.
    ///
    /// Returns `None` when the step leaves the grid or when `from` is not inside
    /// `grid` to begin with.
    pub fn shift(self, from: Slot, grid: Grid) -> Option<Slot> {
        if !grid.contains(from) {
            return None;
        }
        let Slot { row, column } = from;
        match self {
            Self::Horizontal => {
                if column + 1 < grid.columns {
                    Some(Slot::new(row, column + 1))
                } else if row + 1 < grid.rows {
                    Some(Slot::new(row + 1, 0))
                } else {
                    None
                }
            }
            Self::Vertical => {
                if row + 1 < grid.rows {
                    Some(Slot::new(row + 1, column))
                } else if column + 1 < grid.columns {
                    Some(Slot::new(0, column + 1))
                } else {
                    None
                }
            }
            Self::Up => (row > 0).then(|| Slot::new(row - 1, column)),
            Self::Down => (row + 1 < grid.rows).then(|| Slot::new(row + 1, column)),
            Self::Right => (column + 1 < grid.columns).then(|| Slot::new(row, column + 1)),
            Self::Left => (column > 0).then(|| Slot::new(row, column - 1)),
            Self::RightUp => Self::compose(Self::Up, Self::Right, from, grid),
            Self::RightDown => Self::compose(Self::Down, Self::Right, from, grid),
            Self::LeftUp => Self::compose(Self::Up, Self::Left, from, grid),
            Self::LeftDown => Self::compose(Self::Down, Self::Left, from, grid),
            Self::BackwardsHorizontal => {
                if column > 0 {
                    Some(Slot::new(row, column - 1))
                } else if row > 0 {
                    Some(Slot::new(row - 1, grid.columns - 1))
                } else {
                    None
                }
            }
            Self::BackwardsVertical => {
                if row > 0 {
                    Some(Slot::new(row - 1, column))
                } else if column > 0 {
                    Some(Slot::new(grid.rows - 1, column - 1))
                } else {
                    None
                }
            }
        }
    }

    /// Take the row from a vertical step and the column from a horizontal step.
    fn compose(vertical: Self, horizontal: Self, from: Slot, grid: Grid) -> Option<Slot> {
        let v = vertical.shift(from, grid)?;
        let h = horizontal.shift(from, grid)?;
        Some(Slot::new(v.row, h.column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn walk(direction: Direction, grid: Grid) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = direction.start(grid);
        while let Some(s) = cur {
            out.push(s.index(grid.columns));
            cur = direction.shift(s, grid);
        }
        out
    }

    #[test]
    fn horizontal_wraps_rows() {
        let g = Grid::chest(2);
        assert_eq!(walk(Direction::Horizontal, g), (0..18).collect::<Vec<_>>());
    }

    #[test]
    fn vertical_wraps_columns() {
        let g = Grid::chest(6);
        let w = walk(Direction::Vertical, g);
        assert_eq!(&w[..8], &[0, 9, 18, 27, 36, 45, 1, 10]);
        assert_eq!(w.len(), 54);
        assert_eq!(*w.last().unwrap(), 53);
    }

    #[test]
    fn axis_steps_stop_at_edges() {
        let g = Grid::chest(6);
        assert_eq!(walk(Direction::Down, g), [0, 9, 18, 27, 36, 45]);
        assert_eq!(walk(Direction::Right, g), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Direction::Up.shift(Slot::new(0, 4), g), None);
        assert_eq!(Direction::Left.shift(Slot::new(3, 0), g), None);
        assert_eq!(Direction::Right.shift(Slot::new(3, 8), g), None);
        assert_eq!(Direction::Down.shift(Slot::new(5, 2), g), None);
        assert_eq!(Direction::Up.shift(Slot::new(5, 2), g), Some(Slot::new(4, 2)));
    }

    #[test]
    fn right_down_walks_the_diagonal() {
        let g = Grid::chest(6);
        assert_eq!(walk(Direction::RightDown, g), [0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn diagonal_is_none_when_either_primitive_is_none() {
        let grids = [Grid::chest(1), Grid::chest(3), Grid::chest(6), Grid::new(3, 3)];
        let diagonals = [
            (Direction::RightUp, Direction::Up, Direction::Right),
            (Direction::RightDown, Direction::Down, Direction::Right),
            (Direction::LeftUp, Direction::Up, Direction::Left),
            (Direction::LeftDown, Direction::Down, Direction::Left),
        ];
        for g in grids {
            for index in 0..g.size() {
                let p = Slot::from_index(index, g.columns);
                for (d, v, h) in diagonals {
                    let (vs, hs) = (v.shift(p, g), h.shift(p, g));
                    match (vs, hs) {
                        (Some(vs), Some(hs)) => {
                            assert_eq!(d.shift(p, g), Some(Slot::new(vs.row, hs.column)));
                        }
                        _ => assert_eq!(d.shift(p, g), None, "{d:?} from {p:?} in {g:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn reverse_walks_mirror_forward_walks() {
        for g in [Grid::chest(1), Grid::chest(4), Grid::new(3, 5)] {
            let mut fwd = walk(Direction::Horizontal, g);
            fwd.reverse();
            assert_eq!(walk(Direction::BackwardsHorizontal, g), fwd);

            let mut fwd = walk(Direction::Vertical, g);
            fwd.reverse();
            assert_eq!(walk(Direction::BackwardsVertical, g), fwd);
        }
    }

    #[test]
    fn backwards_vertical_from_last_slot() {
        let g = Grid::chest(6);
        assert_eq!(&walk(Direction::BackwardsVertical, g)[..8], &[53, 44, 35, 26, 17, 8, 52, 43]);
    }

    #[test]
    fn shifting_outside_the_grid_is_none() {
        let g = Grid::chest(3);
        for d in Direction::ALL {
            assert_eq!(d.shift(Slot::new(3, 0), g), None);
            assert_eq!(d.shift(Slot::new(0, 9), g), None);
        }
    }

    #[test]
    fn empty_grid_has_no_start() {
        for d in Direction::ALL {
            assert_eq!(d.start(Grid::new(0, 9)), None);
        }
    }
}
