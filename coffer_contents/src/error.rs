// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validation errors for content stores and pagination.

use crate::layout::Layout;

/// A rejected store or pagination call.
///
/// Every variant is reported before anything is mutated; a failed call leaves
/// the store exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentsError {
    /// A replacement does not fill whole rows.
    #[error("{len} items is not a multiple of {columns} columns")]
    SizeMismatch {
        /// Number of supplied items.
        len: usize,
        /// Column count of the store.
        columns: usize,
    },
    /// A slot index lies outside the container.
    #[error("slot {index} is out of range for a container of {size} slots")]
    SlotOutOfRange {
        /// Offending index.
        index: usize,
        /// Current container size.
        size: usize,
    },
    /// A row index outside the container's current rows.
    #[error("row {row} is out of range for a container of {rows} rows")]
    RowOutOfRange {
        /// Offending row.
        row: usize,
        /// Current row count.
        rows: usize,
    },
    /// A layout without columns.
    #[error("a container needs at least one column")]
    NoColumns,
    /// No page is registered under this key.
    #[error("no page with key `{0}`")]
    UnknownPage(String),
    /// A page with this key already exists.
    #[error("a page with key `{0}` already exists")]
    DuplicatePage(String),
    /// Pagination needs at least one page.
    #[error("pagination needs at least one page, got {0}")]
    InvalidPageCount(usize),
    /// A page store has a different shape than the pagination it joins.
    #[error("page layout {found:?} does not match pagination layout {expected:?}")]
    LayoutMismatch {
        /// Layout shared by every page.
        expected: Layout,
        /// Layout of the rejected store.
        found: Layout,
    },
    /// Parallel slot and item lists differ in length.
    #[error("{slots} slots given for {items} items")]
    LengthMismatch {
        /// Number of slots.
        slots: usize,
        /// Number of items.
        items: usize,
    },
    /// A row count outside what the container kind supports.
    #[error("{rows} rows is outside 1..={max}")]
    InvalidRows {
        /// Requested rows.
        rows: usize,
        /// Largest allowed row count.
        max: usize,
    },
}
