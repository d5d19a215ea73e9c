// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container geometry: row/column shape, growth limits, and host container kinds.

use coffer_slots::Grid;

use crate::error::ContentsError;

/// Shape of a container: current rows, fixed columns, and the row ceiling
/// that overflow growth may reach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    rows: usize,
    columns: usize,
    max_rows: usize,
}

impl Layout {
    /// Rows of the largest chest-like container.
    pub const MAX_CHEST_ROWS: usize = 6;

    /// Create a layout that may grow from `rows` up to `max_rows`.
    ///
    /// Fails unless `1 <= rows <= max_rows` and `columns > 0`.
    pub fn new(rows: usize, columns: usize, max_rows: usize) -> Result<Self, ContentsError> {
        if rows == 0 || rows > max_rows {
            return Err(ContentsError::InvalidRows {
                rows,
                max: max_rows,
            });
        }
        if columns == 0 {
            return Err(ContentsError::NoColumns);
        }
        Ok(Self {
            rows,
            columns,
            max_rows,
        })
    }

    /// A layout that never grows.
    pub fn fixed(rows: usize, columns: usize) -> Result<Self, ContentsError> {
        Self::new(rows, columns, rows)
    }

    /// A nine-column chest layout of `rows` rows.
    ///
    /// With `growable` set, overflow may add rows up to [`Self::MAX_CHEST_ROWS`].
    pub fn chest(rows: usize, growable: bool) -> Result<Self, ContentsError> {
        if rows == 0 || rows > Self::MAX_CHEST_ROWS {
            return Err(ContentsError::InvalidRows {
                rows,
                max: Self::MAX_CHEST_ROWS,
            });
        }
        let max_rows = if growable { Self::MAX_CHEST_ROWS } else { rows };
        Self::new(rows, Grid::CHEST_COLUMNS, max_rows)
    }

    /// Current number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Largest row count growth may reach.
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Current number of slots.
    pub const fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of slots at full growth.
    pub const fn max_size(&self) -> usize {
        self.max_rows * self.columns
    }

    /// Whether the container already has its maximum rows.
    pub const fn is_at_max(&self) -> bool {
        self.rows >= self.max_rows
    }

    /// Whether `index` addresses a slot of the current shape.
    pub const fn contains(&self, index: usize) -> bool {
        index < self.size()
    }

    /// The slot grid for traversal.
    pub const fn grid(&self) -> Grid {
        Grid::new(self.rows, self.columns)
    }

    /// Fail with [`ContentsError::SlotOutOfRange`] unless `index` is inside.
    pub fn check(&self, index: usize) -> Result<(), ContentsError> {
        if self.contains(index) {
            Ok(())
        } else {
            Err(ContentsError::SlotOutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    /// Add `by_rows` rows. Returns `false`, leaving the shape unchanged, if that
    /// would pass the maximum.
    pub fn grow(&mut self, by_rows: usize) -> bool {
        match self.rows.checked_add(by_rows) {
            Some(rows) if by_rows > 0 && rows <= self.max_rows => {
                self.rows = rows;
                true
            }
            _ => false,
        }
    }

    /// Same shape ignoring the current growth state.
    pub(crate) const fn same_grid(&self, other: &Self) -> bool {
        self.rows == other.rows && self.columns == other.columns
    }
}

/// Container kinds the host can display.
///
/// Only chests have a variable row count; every other kind has one fixed grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// Up to six rows of nine slots.
    #[default]
    Chest,
    /// One row of three slots.
    Furnace,
    /// A three by three crafting grid.
    Workbench,
    /// One row of five slots.
    Hopper,
    /// One row of three slots.
    Anvil,
    /// A three by three grid.
    Dispenser,
    /// One row of four slots.
    Brewing,
}

impl MenuKind {
    /// Largest row count of this kind.
    pub const fn max_rows(self) -> usize {
        match self {
            Self::Chest => Layout::MAX_CHEST_ROWS,
            Self::Workbench | Self::Dispenser => 3,
            Self::Furnace | Self::Hopper | Self::Anvil | Self::Brewing => 1,
        }
    }

    /// Column count of this kind.
    pub const fn columns(self) -> usize {
        match self {
            Self::Chest => Grid::CHEST_COLUMNS,
            Self::Hopper => 5,
            Self::Brewing => 4,
            Self::Furnace | Self::Workbench | Self::Anvil | Self::Dispenser => 3,
        }
    }

    /// Largest slot count of this kind.
    pub const fn max_size(self) -> usize {
        self.max_rows() * self.columns()
    }

    /// Whether rows can be chosen and grown.
    pub const fn is_resizable(self) -> bool {
        matches!(self, Self::Chest)
    }

    /// Layout for a container of this kind.
    ///
    /// `rows` and `growable` only matter for chests; other kinds use their fixed grid.
    pub fn layout(self, rows: usize, growable: bool) -> Result<Layout, ContentsError> {
        if self.is_resizable() {
            Layout::chest(rows, growable)
        } else {
            Layout::fixed(self.max_rows(), self.columns())
        }
    }
}

/// A displayed container that owns a content store.
///
/// Overflow growth calls [`grow`](Container::grow); navigation and wholesale
/// replacement call [`refresh`](Container::refresh).
pub trait Container {
    /// Current shape.
    fn layout(&self) -> Layout;

    /// Current number of slots.
    fn size(&self) -> usize {
        self.layout().size()
    }

    /// Current number of rows.
    fn rows(&self) -> usize {
        self.layout().rows()
    }

    /// Number of columns.
    fn columns(&self) -> usize {
        self.layout().columns()
    }

    /// Largest row count.
    fn max_rows(&self) -> usize {
        self.layout().max_rows()
    }

    /// Add rows. Returns `false` at the maximum.
    fn grow(&mut self, by_rows: usize) -> bool;

    /// Push the current contents to the live display.
    fn refresh(&mut self);
}
