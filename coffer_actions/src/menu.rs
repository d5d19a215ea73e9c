// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-store menus.
//!
//! ## Overview
//!
//! A [`Menu`] owns one content store, a viewport, its [`Modifiers`], and the
//! [`Actions`] registry its events go through. The host forwards interaction
//! events to the `handle_*` methods; each runs a dispatch round and then does
//! the menu's own work:
//!
//! - Clicks on menu slots run the slot action and then the item's click
//!   handler, even when a guard cancelled the click: cancelling only stops the
//!   host from moving items. Commands queued by the handler are applied after.
//! - Opening renders the contents and registers the viewer.
//! - Closing unregisters the viewer, unless a listener cancelled the close, in
//!   which case the menu asks to be reopened.
//!
//! While the menu is [updating](Menu::set_updating) (the host is swapping its
//! window), open and close events are not dispatched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use coffer_contents::{
    ClickHandler, Container, Contents, ItemClick, Layout, MenuCommand, MenuItem, MenuKind,
    NoViewport, RenderContext, SharedContents, SlotStore, ViewerId, Viewport,
};
use tracing::{trace, warn};

use crate::dispatch::{Actions, DispatchReport};
use crate::error::MenuError;
use crate::event::{Cancellable, ClickEvent, CloseEvent, DragEvent, OpenEvent};
use crate::guards::register_default_guards;
use crate::modifiers::Modifiers;
use crate::spawn::Spawner;

/// What actions see of a menu while an event is dispatched.
pub trait MenuView: Container {
    /// Interactions the menu refuses.
    fn modifiers(&self) -> Modifiers;

    /// Item currently shown at `slot`.
    fn item(&self, slot: usize) -> Option<MenuItem>;

    /// Whether the host is swapping the menu's window.
    fn is_updating(&self) -> bool;

    /// Number of viewers with the menu open.
    fn viewer_count(&self) -> usize;
}

/// Context type of a [`Menu`]'s action registry.
pub type MenuContext = dyn MenuView;

/// Construction parameters for a [`Menu`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuConfig {
    /// Container kind.
    pub kind: MenuKind,
    /// Initial rows. Only chests use it.
    pub rows: usize,
    /// Whether overflowing inserts may add rows. Only chests support it.
    pub dynamic_sizing: bool,
    /// Initially denied interactions.
    pub modifiers: Modifiers,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            kind: MenuKind::Chest,
            rows: 3,
            dynamic_sizing: false,
            modifiers: Modifiers::empty(),
        }
    }
}

impl MenuConfig {
    /// Set the container kind.
    pub fn with_kind(mut self, kind: MenuKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the initial row count.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Allow or forbid row growth.
    pub fn with_dynamic_sizing(mut self, dynamic: bool) -> Self {
        self.dynamic_sizing = dynamic;
        self
    }

    /// Set the denied interactions.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Layout described by this configuration.
    pub fn layout(&self) -> Result<Layout, MenuError> {
        if self.dynamic_sizing && !self.kind.is_resizable() {
            return Err(MenuError::Unsupported {
                kind: self.kind,
                feature: "dynamic sizing",
            });
        }
        Ok(self.kind.layout(self.rows, self.dynamic_sizing)?)
    }
}

/// What handling a click did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// The dispatch round.
    pub report: DispatchReport,
    /// Whether an item click handler ran or was handed off.
    pub item_clicked: bool,
    /// Whether a handler asked to close the menu for the clicking viewer.
    pub close: bool,
}

/// What the host should do after a close.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The menu is closed for the viewer.
    Closed,
    /// A listener refused the close; open the menu again.
    Reopen,
}

/// Run `item`'s click handler, inline or on `spawner`.
///
/// Async handlers get their own [`ItemClick`]; commands they queue cannot be
/// applied and are dropped.
pub(crate) fn run_item_click(item: &MenuItem, click: &mut ItemClick, spawner: &dyn Spawner) -> bool {
    if !item.runs_async() {
        return item.click(click);
    }
    let Some(handler) = item.click_handler() else {
        return false;
    };
    let mut detached = ItemClick::new(click.slot(), click.viewer());
    let key = item.key().to_owned();
    spawner.spawn(Box::new(move || {
        handler(&mut detached);
        if !detached.commands().is_empty() {
            warn!(item = %key, "async click handler queued commands; they are dropped");
        }
    }));
    true
}

/// Fail unless `store` has the columns and row ceiling of `expected`.
fn check_shape<S: SlotStore>(expected: Layout, store: &S) -> Result<(), MenuError> {
    let found = store.layout();
    if found.columns() != expected.columns() || found.max_rows() != expected.max_rows() {
        return Err(coffer_contents::ContentsError::LayoutMismatch { expected, found }.into());
    }
    Ok(())
}

/// A menu backed by one content store.
///
/// `S` is [`Contents`] for menus driven from the host's event thread only and
/// [`SharedContents`] for menus whose async handlers edit the contents.
pub struct Menu<S: SlotStore + 'static = Contents, V: Viewport + 'static = NoViewport> {
    kind: MenuKind,
    store: S,
    viewport: V,
    modifiers: Modifiers,
    actions: Actions<MenuContext>,
    slot_actions: BTreeMap<usize, ClickHandler>,
    updating: bool,
    viewers: BTreeSet<ViewerId>,
}

impl<S: SlotStore + 'static, V: Viewport + 'static> core::fmt::Debug for Menu<S, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Menu")
            .field("kind", &self.kind)
            .field("layout", &self.store.layout())
            .field("modifiers", &self.modifiers)
            .field("actions", &self.actions)
            .field("viewers", &self.viewers.len())
            .finish_non_exhaustive()
    }
}

impl Menu {
    /// A menu over a plain store, without a live display.
    pub fn new(config: MenuConfig) -> Result<Self, MenuError> {
        let store = Contents::new(config.layout()?);
        Self::with_store(config, store, NoViewport)
    }
}

impl Menu<SharedContents> {
    /// A menu over a lock-protected store, without a live display.
    pub fn concurrent(config: MenuConfig) -> Result<Self, MenuError> {
        let store = SharedContents::new(config.layout()?);
        Self::with_store(config, store, NoViewport)
    }
}

impl<S: SlotStore + 'static, V: Viewport + 'static> Menu<S, V> {
    /// A menu over `store`, rendering to `viewport`.
    ///
    /// The store must have the shape `config` describes, apart from rows
    /// already grown.
    pub fn with_store(config: MenuConfig, store: S, viewport: V) -> Result<Self, MenuError> {
        check_shape(config.layout()?, &store)?;
        let mut actions: Actions<MenuContext> = Actions::new();
        register_default_guards(&mut actions);
        Ok(Self {
            kind: config.kind,
            store,
            viewport,
            modifiers: config.modifiers,
            actions,
            slot_actions: BTreeMap::new(),
            updating: false,
            viewers: BTreeSet::new(),
        })
    }

    /// Container kind.
    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    /// The content store.
    ///
    /// Edits through [`store_mut`](Self::store_mut) are not rendered until
    /// [`Container::refresh`].
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the content store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The live display.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access to the live display.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// The action registry.
    pub fn actions(&self) -> &Actions<MenuContext> {
        &self.actions
    }

    /// Mutable access to the action registry.
    pub fn actions_mut(&mut self) -> &mut Actions<MenuContext> {
        &mut self.actions
    }

    /// Replace the denied interactions.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Deny more interactions.
    pub fn add_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers |= modifiers;
    }

    /// Allow interactions again.
    pub fn remove_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers -= modifiers;
    }

    /// Mark the host as swapping the menu's window.
    pub fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
    }

    /// Viewers with the menu open.
    pub fn viewers(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.viewers.iter().copied()
    }

    /// Run `handler` on every click of `slot`, before the item's own handler.
    pub fn set_slot_action(
        &mut self,
        slot: usize,
        handler: impl Fn(&mut ItemClick) + Send + Sync + 'static,
    ) -> Result<(), MenuError> {
        self.store.layout().check(slot)?;
        self.slot_actions.insert(slot, Arc::new(handler));
        Ok(())
    }

    /// Remove the slot action of `slot`. Returns whether there was one.
    pub fn clear_slot_action(&mut self, slot: usize) -> bool {
        self.slot_actions.remove(&slot).is_some()
    }

    /// Insert items into empty slots, growing rows when allowed. Returns how
    /// many were placed.
    pub fn add_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let before = self.store.layout();
        let placed = self.store.add_items(items);
        let after = self.store.layout();
        if after != before {
            self.viewport.reshape(after);
        }
        if placed > 0 {
            self.render();
        }
        placed
    }

    /// Put `item` at `slot` and render. Returns the previous item.
    pub fn set_item(&mut self, slot: usize, item: MenuItem) -> Result<Option<MenuItem>, MenuError> {
        let previous = self.store.set(slot, item)?;
        self.render();
        Ok(previous)
    }

    /// Remove the item at `slot` and render.
    pub fn remove_item(&mut self, slot: usize) -> Option<MenuItem> {
        let removed = self.store.remove(slot);
        if removed.is_some() {
            self.render();
        }
        removed
    }

    /// Replace every slot with `items` and render.
    pub fn replace_contents<I>(&mut self, items: I) -> Result<(), MenuError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let before = self.store.layout();
        self.store.replace_contents(items)?;
        let after = self.store.layout();
        if after != before {
            self.viewport.reshape(after);
        }
        self.render();
        Ok(())
    }

    /// Swap in a whole new store and render it. Returns the old store.
    ///
    /// The new store must have the current columns and row ceiling.
    pub fn replace_store(&mut self, store: S) -> Result<S, MenuError> {
        check_shape(self.store.layout(), &store)?;
        let old = core::mem::replace(&mut self.store, store);
        let layout = self.store.layout();
        if layout != old.layout() {
            self.viewport.reshape(layout);
        }
        self.render();
        Ok(old)
    }

    /// Handle a click. The dispatch round runs first, then slot and item handlers.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> ClickOutcome {
        let report = self.actions.dispatch(event, &*self);
        let mut outcome = ClickOutcome {
            report,
            ..ClickOutcome::default()
        };
        if !event.is_menu_click() || !self.store.layout().contains(event.slot) {
            return outcome;
        }

        let mut click = ItemClick::new(event.slot, event.viewer);
        if let Some(handler) = self.slot_actions.get(&event.slot) {
            handler(&mut click);
        }
        if let Some(item) = self.store.get(event.slot) {
            outcome.item_clicked = run_item_click(&item, &mut click, &**self.actions.spawner());
        }
        outcome.close = self.apply(click.take_commands());
        outcome
    }

    /// Handle a drag.
    pub fn handle_drag(&mut self, event: &mut DragEvent) -> DispatchReport {
        self.actions.dispatch(event, &*self)
    }

    /// Handle the menu being opened: render, register the viewer, dispatch.
    pub fn handle_open(&mut self, event: &mut OpenEvent) -> DispatchReport {
        self.render();
        self.viewers.insert(event.viewer);
        if self.updating {
            return DispatchReport::default();
        }
        self.actions.dispatch(event, &*self)
    }

    /// Handle the menu being closed.
    pub fn handle_close(&mut self, event: &mut CloseEvent) -> CloseOutcome {
        if self.updating {
            return CloseOutcome::Closed;
        }
        self.actions.dispatch(event, &*self);
        if event.is_cancelled() {
            CloseOutcome::Reopen
        } else {
            self.viewers.remove(&event.viewer);
            CloseOutcome::Closed
        }
    }

    fn apply(&mut self, commands: Vec<MenuCommand>) -> bool {
        let mut close = false;
        for command in commands {
            match command {
                MenuCommand::Refresh => self.render(),
                MenuCommand::Close => close = true,
                other => trace!(command = ?other, "page command on a single-page menu"),
            }
        }
        close
    }

    fn render(&mut self) {
        let ctx = RenderContext::new(self.store.layout());
        let entries = self.store.visible_entries(&ctx);
        self.viewport.refresh(&ctx, &entries);
    }
}

impl<S: SlotStore + 'static, V: Viewport + 'static> Container for Menu<S, V> {
    fn layout(&self) -> Layout {
        self.store.layout()
    }

    fn grow(&mut self, by_rows: usize) -> bool {
        if !self.store.grow(by_rows) {
            return false;
        }
        self.viewport.reshape(self.store.layout());
        self.render();
        true
    }

    fn refresh(&mut self) {
        self.render();
    }
}

impl<S: SlotStore + 'static, V: Viewport + 'static> MenuView for Menu<S, V> {
    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn item(&self, slot: usize) -> Option<MenuItem> {
        self.store.get(slot)
    }

    fn is_updating(&self) -> bool {
        self.updating
    }

    fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}
