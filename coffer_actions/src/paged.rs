// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paginated menus.
//!
//! A [`PagedMenu`] wraps a [`Pagination`] the way [`Menu`](crate::Menu) wraps
//! one store. Clicks on a navigation button are translated into a
//! [`PageChangeEvent`] before the button's handler runs; cancelling that event
//! keeps the current page on display. The page-change translation ignores
//! earlier cancellations, so a guard refusing to let the viewer pick up the
//! button does not stop the page from turning.

use coffer_contents::{
    ClickHandler, Container, ItemClick, Layout, MenuCommand, MenuItem, NoViewport, PageChange, PageKey,
    Pagination, PaginationConfig, SlotStore, ViewerId, Viewport,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::action;
use crate::dispatch::{Actions, DispatchReport};
use crate::error::MenuError;
use crate::event::{Cancellable, ClickEvent, CloseEvent, DragEvent, OpenEvent};
use crate::guards::register_default_guards;
use crate::menu::{ClickOutcome, CloseOutcome, MenuView, run_item_click};
use crate::modifiers::Modifiers;
use crate::semantic::PageChangeEvent;

/// What actions see of a paged menu.
pub trait PagedView<K: PageKey>: MenuView {
    /// Key of the page on display.
    fn current_key(&self) -> K;

    /// Navigation a click on `slot` would trigger, if any.
    fn page_change_for(&self, slot: usize) -> Option<PageChange<K>>;

    /// Whether `slot` holds a navigation button.
    fn is_navigation_slot(&self, slot: usize) -> bool;
}

/// Context type of a [`PagedMenu`]'s action registry.
pub type PagedContext<K> = dyn PagedView<K>;

fn page_turn<K: PageKey>(click: &ClickEvent, menu: &PagedContext<K>) -> Option<PageChangeEvent<K>> {
    if !click.is_menu_click() {
        return None;
    }
    menu.page_change_for(click.slot)
        .map(|change| PageChangeEvent::new(click.viewer, change))
}

impl<K: PageKey> Actions<PagedContext<K>> {
    /// React to a viewer clicking a navigation button. Cancelling the event
    /// keeps the current page.
    ///
    /// Runs even when an earlier action cancelled the click.
    pub fn on_page_change(&mut self, f: impl Fn(&mut PageChangeEvent<K>) + Send + Sync + 'static) {
        self.add_action(
            action::on::<ClickEvent>()
                .filter_map(page_turn::<K>)
                .ignore_cancelled(true)
                .then(f),
        );
    }
}

/// A menu showing one page of a [`Pagination`] at a time.
pub struct PagedMenu<K: PageKey, V: Viewport + 'static = NoViewport> {
    pagination: Pagination<K, V>,
    modifiers: Modifiers,
    actions: Actions<PagedContext<K>>,
    slot_actions: BTreeMap<usize, ClickHandler>,
    updating: bool,
    viewers: BTreeSet<ViewerId>,
}

impl<K: PageKey, V: Viewport + 'static> core::fmt::Debug for PagedMenu<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagedMenu")
            .field("pagination", &self.pagination)
            .field("modifiers", &self.modifiers)
            .field("actions", &self.actions)
            .field("viewers", &self.viewers.len())
            .finish_non_exhaustive()
    }
}

impl PagedMenu<usize> {
    /// Sequential pages without a live display.
    pub fn new(config: PaginationConfig, modifiers: Modifiers) -> Result<Self, MenuError> {
        Self::with_viewport(config, modifiers, NoViewport)
    }
}

impl<V: Viewport + 'static> PagedMenu<usize, V> {
    /// Sequential pages rendered through `viewport`.
    pub fn with_viewport(
        config: PaginationConfig,
        modifiers: Modifiers,
        viewport: V,
    ) -> Result<Self, MenuError> {
        let pagination = Pagination::with_viewport(config, viewport)?;
        Ok(Self::from_pagination(pagination, modifiers))
    }

    /// Install next/previous buttons on every page.
    pub fn set_navigation(
        &mut self,
        next: (usize, MenuItem),
        previous: (usize, MenuItem),
    ) -> Result<(), MenuError> {
        self.pagination.set_next_item(next.0, next.1)?;
        self.pagination.set_previous_item(previous.0, previous.1)?;
        Ok(())
    }
}

impl<V: Viewport + 'static> PagedMenu<String, V> {
    /// One chest page of `rows` rows per key, rendered through `viewport`.
    pub fn keyed<I, S>(rows: usize, keys: I, modifiers: Modifiers, viewport: V) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pagination = Pagination::with_pages(rows, keys, viewport)?;
        Ok(Self::from_pagination(pagination, modifiers))
    }
}

impl<K: PageKey, V: Viewport + 'static> PagedMenu<K, V> {
    /// Wrap an existing pagination. Guards and the page-turn action are
    /// registered first.
    pub fn from_pagination(pagination: Pagination<K, V>, modifiers: Modifiers) -> Self {
        let mut actions: Actions<PagedContext<K>> = Actions::new();
        register_default_guards(&mut actions);
        actions.on_page_change(|change| {
            trace!(from = %change.old_key, to = %change.new_key, "page turn requested");
        });
        Self {
            pagination,
            modifiers,
            actions,
            slot_actions: BTreeMap::new(),
            updating: false,
            viewers: BTreeSet::new(),
        }
    }

    /// The pages.
    pub fn pagination(&self) -> &Pagination<K, V> {
        &self.pagination
    }

    /// Mutable access to the pages.
    pub fn pagination_mut(&mut self) -> &mut Pagination<K, V> {
        &mut self.pagination
    }

    /// The action registry.
    pub fn actions(&self) -> &Actions<PagedContext<K>> {
        &self.actions
    }

    /// Mutable access to the action registry.
    pub fn actions_mut(&mut self) -> &mut Actions<PagedContext<K>> {
        &mut self.actions
    }

    /// Replace the denied interactions.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Mark the host as swapping the menu's window.
    pub fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
    }

    /// Viewers with the menu open.
    pub fn viewers(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.viewers.iter().copied()
    }

    /// Run `handler` on every click of `slot`, on whichever page is on
    /// display, before the item's own handler.
    pub fn set_slot_action(
        &mut self,
        slot: usize,
        handler: impl Fn(&mut ItemClick) + Send + Sync + 'static,
    ) -> Result<(), MenuError> {
        self.pagination.layout().check(slot)?;
        self.slot_actions.insert(slot, Arc::new(handler));
        Ok(())
    }

    /// Remove the slot action of `slot`. Returns whether there was one.
    pub fn clear_slot_action(&mut self, slot: usize) -> bool {
        self.slot_actions.remove(&slot).is_some()
    }

    /// Insert items across pages. See [`Pagination::add_items`].
    pub fn add_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        self.pagination.add_items(items)
    }

    /// Handle a click on the page on display.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> ClickOutcome {
        let report = self.actions.dispatch(event, &*self);
        let mut outcome = ClickOutcome {
            report,
            ..ClickOutcome::default()
        };
        if !event.is_menu_click() || !self.pagination.layout().contains(event.slot) {
            return outcome;
        }
        if self.pagination.is_navigation_slot(event.slot)
            && outcome.report.was_cancelled::<PageChangeEvent<K>>()
        {
            debug!(slot = event.slot, "page turn vetoed");
            return outcome;
        }
        let mut click = ItemClick::new(event.slot, event.viewer);
        if let Some(handler) = self.slot_actions.get(&event.slot) {
            handler(&mut click);
        }
        if let Some(item) = self.pagination.current().contents().get(event.slot) {
            outcome.item_clicked = run_item_click(&item, &mut click, &**self.actions.spawner());
        }
        outcome.close = self.apply(click.take_commands());
        outcome
    }

    /// Handle a drag.
    pub fn handle_drag(&mut self, event: &mut DragEvent) -> DispatchReport {
        self.actions.dispatch(event, &*self)
    }

    /// Handle the menu being opened on the page already on display.
    pub fn handle_open(&mut self, event: &mut OpenEvent) -> DispatchReport {
        self.pagination.refresh();
        self.viewers.insert(event.viewer);
        if self.updating {
            return DispatchReport::default();
        }
        self.actions.dispatch(event, &*self)
    }

    /// Handle the menu being opened on the page with `key`.
    pub fn open_at(&mut self, event: &mut OpenEvent, key: &K) -> Result<DispatchReport, MenuError> {
        if self.pagination.position(key).is_none() {
            return Err(coffer_contents::ContentsError::UnknownPage(key.to_string()).into());
        }
        self.pagination.go_to_page(key);
        Ok(self.handle_open(event))
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
                MenuCommand::NextPage => self.turn(true),
                MenuCommand::PreviousPage => self.turn(false),
                MenuCommand::GoToIndex(position) => {
                    if !self.pagination.go_to_index(position) {
                        trace!(position, "no page at that position");
                    }
                }
                MenuCommand::GoToKey(label) => {
                    let found = K::parse_label(&label).is_some_and(|key| self.pagination.go_to_page(&key));
                    if !found {
                        trace!(%label, "no page with that label");
                    }
                }
                MenuCommand::Refresh => self.pagination.refresh(),
                MenuCommand::Close => close = true,
            }
        }
        close
    }

    fn turn(&mut self, forward: bool) {
        match self.pagination.neighbour_key(forward) {
            Some(key) => {
                self.pagination.go_to_page(&key);
            }
            None => trace!(forward, "no page in that direction"),
        }
    }
}

impl<K: PageKey, V: Viewport + 'static> Container for PagedMenu<K, V> {
    fn layout(&self) -> Layout {
        self.pagination.layout()
    }

    // Pages grow by pages, never by rows.
    fn grow(&mut self, _by_rows: usize) -> bool {
        false
    }

    fn refresh(&mut self) {
        self.pagination.refresh();
    }
}

impl<K: PageKey, V: Viewport + 'static> MenuView for PagedMenu<K, V> {
    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn item(&self, slot: usize) -> Option<MenuItem> {
        self.pagination.current().contents().get(slot)
    }

    fn is_updating(&self) -> bool {
        self.updating
    }

    fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}

impl<K: PageKey, V: Viewport + 'static> PagedView<K> for PagedMenu<K, V> {
    fn current_key(&self) -> K {
        self.pagination.current_key().clone()
    }

    fn page_change_for(&self, slot: usize) -> Option<PageChange<K>> {
        self.pagination.page_change_for(slot)
    }

    fn is_navigation_slot(&self, slot: usize) -> bool {
        self.pagination.is_navigation_slot(slot)
    }
}
