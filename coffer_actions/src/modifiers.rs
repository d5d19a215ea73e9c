// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction restrictions.
//!
//! A set flag denies the matching interaction. A menu with every flag set is
//! read-only: every click and every drag is cancelled while it is open.

use crate::event::{ClickEvent, DragEvent};

bitflags::bitflags! {
    /// Interactions a menu refuses.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Refuse items placed into the menu.
        const DISABLE_ITEM_ADD     = 0b0000_0001;
        /// Refuse items taken or dropped out of the menu.
        const DISABLE_ITEM_REMOVAL = 0b0000_0010;
        /// Refuse swaps with menu items.
        const DISABLE_ITEM_SWAP    = 0b0000_0100;
        /// Refuse cloning menu items.
        const DISABLE_ITEM_CLONE   = 0b0000_1000;
    }
}

impl Modifiers {
    /// Flags that forbid `click`. Empty if the click is allowed.
    pub fn denies(self, click: &ClickEvent) -> Self {
        if self.is_all() {
            return Self::all();
        }
        let mut denied = Self::empty();
        if click.is_place() {
            denied |= self & Self::DISABLE_ITEM_ADD;
        }
        if click.is_take() || click.is_drop() {
            denied |= self & Self::DISABLE_ITEM_REMOVAL;
        }
        if click.is_swap() {
            denied |= self & Self::DISABLE_ITEM_SWAP;
        }
        if click.is_clone() {
            denied |= self & Self::DISABLE_ITEM_CLONE;
        }
        denied
    }

    /// Whether `drag` must be refused by a menu of `menu_size` slots.
    pub fn denies_drag(self, drag: &DragEvent, menu_size: usize) -> bool {
        self.is_all() || (self.contains(Self::DISABLE_ITEM_ADD) && drag.touches_menu(menu_size))
    }
}
