// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic events produced by translating host events.
//!
//! Each type describes one thing a menu cares about, independent of how the
//! host reported it. Cancelling a cancellable semantic event cancels the host
//! event it came from.

use coffer_contents::{Contents, PageChange, PageKey, ViewerId};

use crate::event::{Cancellable, ClickAction, CloseReason, Region, SemanticEvent};
use crate::modifiers::Modifiers;

macro_rules! cancellable {
    ($($ty:ident $(<$k:ident: $bound:ident>)?),* $(,)?) => {
        $(
            impl$(<$k: $bound>)? Cancellable for $ty$(<$k>)? {
                fn is_cancelled(&self) -> bool {
                    self.cancelled
                }

                fn set_cancelled(&mut self, cancelled: bool) {
                    self.cancelled = cancelled;
                }
            }

            impl$(<$k: $bound>)? SemanticEvent for $ty$(<$k>)? {
                fn as_cancellable(&self) -> Option<&dyn Cancellable> {
                    Some(self)
                }
            }
        )*
    };
}

/// A click that would change what the menu holds, and which modifiers deny it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotModification {
    /// Clicking viewer.
    pub viewer: ViewerId,
    /// Clicked slot.
    pub slot: usize,
    /// Raw inventory action.
    pub action: ClickAction,
    /// Clicked region.
    pub region: Region,
    /// Flags that forbid this click. Empty if nothing does.
    pub denied_by: Modifiers,
    cancelled: bool,
}

impl SlotModification {
    /// A modification that is not yet cancelled.
    pub fn new(
        viewer: ViewerId,
        slot: usize,
        action: ClickAction,
        region: Region,
        denied_by: Modifiers,
    ) -> Self {
        Self {
            viewer,
            slot,
            action,
            region,
            denied_by,
            cancelled: false,
        }
    }
}

/// A drag across menu slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragAttempt {
    /// Dragging viewer.
    pub viewer: ViewerId,
    /// Raw slot indices touched by the drag.
    pub raw_slots: Vec<usize>,
    cancelled: bool,
}

impl DragAttempt {
    /// A drag that is not yet cancelled.
    pub fn new(viewer: ViewerId, raw_slots: Vec<usize>) -> Self {
        Self {
            viewer,
            raw_slots,
            cancelled: false,
        }
    }
}

/// A viewer is about to turn the page.
///
/// Cancelling it keeps the current page on display.
#[derive(Clone, Debug)]
pub struct PageChangeEvent<K> {
    /// Navigating viewer.
    pub viewer: ViewerId,
    /// Key of the page on display.
    pub old_key: K,
    /// Key of the target page.
    pub new_key: K,
    /// Snapshot of the page on display.
    pub old_page: Contents,
    /// Snapshot of the target page.
    pub new_page: Contents,
    cancelled: bool,
}

impl<K: PageKey> PageChangeEvent<K> {
    /// Event for `change`, triggered by `viewer`.
    pub fn new(viewer: ViewerId, change: PageChange<K>) -> Self {
        Self {
            viewer,
            old_key: change.old_key,
            new_key: change.new_key,
            old_page: change.old_page,
            new_page: change.new_page,
            cancelled: false,
        }
    }
}

/// A viewer opened the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOpenEvent {
    /// Opening viewer.
    pub viewer: ViewerId,
}

impl SemanticEvent for MenuOpenEvent {}

/// A viewer closed the menu. Cancelling it reopens the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCloseEvent {
    /// Closing viewer.
    pub viewer: ViewerId,
    /// Why it closed.
    pub reason: CloseReason,
    cancelled: bool,
}

impl MenuCloseEvent {
    /// A close that is not yet cancelled.
    pub fn new(viewer: ViewerId, reason: CloseReason) -> Self {
        Self {
            viewer,
            reason,
            cancelled: false,
        }
    }
}

cancellable!(SlotModification, DragAttempt, PageChangeEvent<K: PageKey>, MenuCloseEvent);
