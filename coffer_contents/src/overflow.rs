// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow distribution: place, grow, retry.
//!
//! Both a single store (growing by rows) and a pagination (growing by pages)
//! insert through [`distribute`]. The target places what fits; whatever is
//! left asks the target to grow and is retried, until nothing is pending or
//! the target refuses to grow. Anything still pending at that point is
//! dropped without error, and only the placed count is reported.
//!
//! Items keep their order and are never duplicated: each one leaves the
//! pending queue exactly once, either into a slot or into the dropped tail.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::item::MenuItem;

/// Something items can be poured into.
pub trait Overflow {
    /// Move as many items as fit from the front of `pending` into slots.
    ///
    /// Returns how many were placed.
    fn place(&mut self, pending: &mut VecDeque<MenuItem>) -> usize;

    /// Add capacity: one row, or one page. Returns `false` at the maximum.
    fn grow(&mut self) -> bool;

    /// Whether placing would start past the current capacity, so growth must
    /// continue before a placement step means anything.
    fn short_of_start(&self) -> bool {
        false
    }
}

/// Insert `items` into `target`, growing it as needed. Returns the number placed.
pub fn distribute<T, I>(target: &mut T, items: I) -> usize
where
    T: Overflow + ?Sized,
    I: IntoIterator<Item = MenuItem>,
{
    let mut pending: VecDeque<MenuItem> = items.into_iter().collect();
    let mut placed = target.place(&mut pending);
    while !pending.is_empty() {
        if !target.grow() {
            break;
        }
        if target.short_of_start() {
            continue;
        }
        let step = target.place(&mut pending);
        trace!(step, pending = pending.len(), "placed after growth");
        if step == 0 {
            // Fresh capacity at the start that takes nothing would grow forever.
            break;
        }
        placed += step;
    }
    if !pending.is_empty() {
        debug!(
            placed,
            dropped = pending.len(),
            "overflow exhausted, dropping remaining items"
        );
    }
    placed
}
