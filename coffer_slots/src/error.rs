// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by slot addressing and traversal.

/// Failure of a slot conversion or traversal step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// The index does not address a slot of the grid.
    #[error("slot {index} is out of range for a container of {size} slots")]
    OutOfRange {
        /// Offending linear index.
        index: usize,
        /// Number of slots in the grid.
        size: usize,
    },
    /// [`SlotIter::try_next`](crate::SlotIter::try_next) was called with nothing left to yield.
    #[error("slot traversal is exhausted; call has_next() before next()")]
    Exhausted,
}
