// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coffer Actions: event dispatch and interactive menus.
//!
//! The host delivers raw interaction events (clicks, drags, opens, closes).
//! This crate turns them into menu behaviour:
//!
//! - [`action`]: an [`Action`] translates one host event type into a semantic
//!   event, behind a predicate, and consumes it.
//! - [`dispatch`]: [`Actions`] keys actions by host event type and runs them in
//!   registration order, propagating cancellation back to the host event.
//! - [`guards`]: the built-in click and drag guards driven by [`Modifiers`].
//! - [`Menu`] and [`PagedMenu`]: containers owning their contents, a viewport,
//!   and an action registry with the guards already registered.
//! - [`spawn`]: where async consumers and async item clicks run.
//!
//! Item, store, and pagination types come from [`coffer_contents`]; the most
//! used ones are re-exported here.
//!
//! # Example
//!
//! ```rust
//! use coffer_actions::{Cancellable, ClickEvent, Menu, MenuConfig, MenuItem, Modifiers, ViewerId};
//!
//! // A read-only shop window with one buy button.
//! let mut menu = Menu::new(MenuConfig::default().with_modifiers(Modifiers::all())).unwrap();
//! menu.set_item(13, MenuItem::new("buy").with_click(|click| click.close()))
//!     .unwrap();
//!
//! let mut click = ClickEvent::menu(ViewerId::random(), 13);
//! let outcome = menu.handle_click(&mut click);
//!
//! // The guard stops the viewer taking the button, and the button still works.
//! assert!(click.is_cancelled());
//! assert!(outcome.close);
//! ```

pub mod action;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod guards;
pub mod menu;
pub mod modifiers;
pub mod paged;
pub mod semantic;
pub mod spawn;

pub use action::Action;
pub use dispatch::{Actions, DispatchReport};
pub use error::MenuError;
pub use event::{
    Cancellable, ClickAction, ClickEvent, CloseEvent, CloseReason, DragEvent, EventKind,
    HostEvent, OpenEvent, Region, SemanticEvent,
};
pub use menu::{ClickOutcome, CloseOutcome, Menu, MenuConfig, MenuContext, MenuView};
pub use modifiers::Modifiers;
pub use paged::{PagedContext, PagedMenu, PagedView};
pub use semantic::{DragAttempt, MenuCloseEvent, MenuOpenEvent, PageChangeEvent, SlotModification};
pub use spawn::{Immediate, Job, Spawner, Worker};

pub use coffer_contents::{
    Container, Contents, ItemClick, MenuCommand, MenuItem, MenuKind, PaginationConfig,
    SharedContents, SlotStore, ViewerId, Viewport,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn menus_and_paged_menus_share_the_guards() {
        let mut menu = Menu::new(MenuConfig::default().with_modifiers(Modifiers::DISABLE_ITEM_SWAP)).unwrap();
        let mut paged = PagedMenu::new(PaginationConfig::default(), Modifiers::DISABLE_ITEM_SWAP).unwrap();
        menu.actions_mut().set_spawner(Arc::new(Immediate));
        paged.actions_mut().set_spawner(Arc::new(Immediate));

        let viewer = ViewerId::random();
        let mut a = ClickEvent::new(viewer, 5, ClickAction::SwapWithCursor, Region::Menu);
        let mut b = a.clone();
        menu.handle_click(&mut a);
        paged.handle_click(&mut b);
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }
}
